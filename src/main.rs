//! deck-forge server binary.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use deck_forge::{
    logging, serve, AnalysisProviderConfig, Catalog, ClashRoyaleMetaProvider, DeckConfig,
    DeckService, MetaProviderConfig, OpenAiAnalysisProvider, ServerConfig,
};

#[derive(Parser, Debug)]
#[command(name = "deck-forge", about = "Deck-building API for a collectible card game")]
struct Cli {
    /// Card catalog JSON file
    #[arg(long, env = "DECK_CATALOG", default_value = "data/cards.json")]
    catalog: PathBuf,

    /// Address to bind
    #[arg(long, env = "DECK_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(short = 'p', long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// Frontend origin allowed by CORS ("*" allows any)
    #[arg(long, env = "DECK_ALLOWED_ORIGIN", default_value = "http://localhost:3000")]
    allowed_origin: String,

    /// Generator attempt budget
    #[arg(long, default_value_t = 1000)]
    max_attempts: u32,

    /// Fixed RNG seed for reproducible decks
    #[arg(long, env = "DECK_SEED")]
    seed: Option<u64>,

    /// Card-game API token
    #[arg(long, env = "CLASH_ROYALE_API_KEY", hide_env_values = true)]
    clash_royale_api_key: Option<String>,

    #[arg(long, env = "CLASH_ROYALE_API_URL", default_value = "https://api.clashroyale.com/v1")]
    clash_royale_api_url: String,

    /// Language-model API token
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: Option<String>,

    #[arg(long, env = "OPENAI_API_URL", default_value = "https://api.openai.com/v1")]
    openai_api_url: String,

    #[arg(long, env = "OPENAI_MODEL", default_value = "gpt-3.5-turbo")]
    openai_model: String,

    /// Timeout for language-model calls, in seconds
    #[arg(long, default_value_t = 30)]
    analysis_timeout: u64,

    /// Log spec used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Write rotating log files here instead of stderr
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let _logger = logging::setup_logging(&cli.log_level, cli.log_dir.as_deref())?;

    let catalog = Arc::new(Catalog::load(&cli.catalog)?);

    let mut deck_config = DeckConfig::default().with_max_attempts(cli.max_attempts);
    if let Some(seed) = cli.seed {
        deck_config = deck_config.with_seed(seed);
    }

    let mut meta_config = MetaProviderConfig::default().with_base_url(cli.clash_royale_api_url);
    if let Some(key) = cli.clash_royale_api_key {
        meta_config = meta_config.with_api_key(key);
    }

    let mut analysis_config = AnalysisProviderConfig::default()
        .with_base_url(cli.openai_api_url)
        .with_model(cli.openai_model)
        .with_timeout(cli.analysis_timeout);
    if let Some(key) = cli.openai_api_key {
        analysis_config = analysis_config.with_api_key(key);
    }

    let service = Arc::new(DeckService::new(
        catalog,
        deck_config,
        Arc::new(ClashRoyaleMetaProvider::new(meta_config)?),
        Arc::new(OpenAiAnalysisProvider::new(analysis_config)?),
    )?);

    let server_config = ServerConfig {
        host: cli.host,
        port: cli.port,
        allowed_origin: (cli.allowed_origin != "*").then_some(cli.allowed_origin),
    };

    serve(service, &server_config).await?;
    Ok(())
}
