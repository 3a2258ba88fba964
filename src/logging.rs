//! Process-wide logger setup.

use std::path::Path;

use flexi_logger::{
    opt_format, Cleanup, Criterion, FileSpec, FlexiLoggerError, Logger, LoggerHandle, Naming,
};

/// Start logging from `RUST_LOG`, falling back to `spec`.
///
/// Logs go to stderr, or to size-rotated files under `log_dir` when given.
/// Keep the returned handle alive for the life of the process.
pub fn setup_logging(
    spec: &str,
    log_dir: Option<&Path>,
) -> Result<LoggerHandle, FlexiLoggerError> {
    let logger = Logger::try_with_env_or_str(spec)?.format(opt_format);

    let logger = match log_dir {
        Some(dir) => logger
            .log_to_file(FileSpec::default().directory(dir))
            .rotate(
                Criterion::Size(10 * 1024 * 1024), // rotate at 10 MB
                Naming::Numbers,
                Cleanup::KeepLogFiles(7),
            ),
        None => logger.log_to_stderr(),
    };

    logger.start()
}
