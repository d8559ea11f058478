use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Import modules from the library crate
use gigpitch::config::{self, AppConfig, FileConfig};
use gigpitch::llm::{LlmProvider, OpenAIProvider};
use gigpitch::pitch::{PitchGenerator, PitchStyle, VenueInfo, VenueType};
use gigpitch::profile::{load_profiles, InMemoryProfileStore};

fn parse_path(s: &str) -> Result<PathBuf, String> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(format!("Error resolving path '{}': {}", s, msg));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir().map_err(|e| format!("Failed to get current dir: {}", e))?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to the JSON file containing artist profiles.
    #[clap(value_parser = parse_path)]
    pub profiles: PathBuf,

    /// Id of the artist to pitch.
    pub artist_id: String,

    /// Name of the target venue.
    #[clap(long)]
    pub venue_name: Option<String>,

    /// City of the target venue.
    #[clap(long)]
    pub venue_city: Option<String>,

    /// Type of the target venue.
    #[clap(long)]
    pub venue_type: Option<VenueType>,

    /// Tone to use for the pitch.
    #[clap(long)]
    pub style: Option<PitchStyle>,

    /// Path to TOML configuration file. Values in the file override CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Base URL of an OpenAI-compatible API for generative drafting.
    /// Without it every pitch uses the deterministic templates.
    #[clap(long)]
    pub llm_base_url: Option<String>,

    /// Model to request from the generative service.
    #[clap(long)]
    pub llm_model: Option<String>,

    /// Print the pitch as JSON instead of plain text.
    #[clap(long)]
    pub json: bool,

    /// Check connectivity to the configured generative service and exit.
    #[clap(long)]
    pub check_llm: bool,
}

/// Convert CLI args to CliConfig for config resolution
impl From<&CliArgs> for config::CliConfig {
    fn from(args: &CliArgs) -> Self {
        config::CliConfig {
            profiles_path: Some(args.profiles.clone()),
            llm_base_url: args.llm_base_url.clone(),
            llm_model: args.llm_model.clone(),
        }
    }
}

impl CliArgs {
    fn venue(&self) -> Option<VenueInfo> {
        if self.venue_name.is_none() && self.venue_city.is_none() && self.venue_type.is_none() {
            return None;
        }
        Some(VenueInfo {
            name: self.venue_name.clone(),
            city: self.venue_city.clone(),
            venue_type: self.venue_type,
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    info!(
        "gigpitch {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH")
    );

    // Load TOML config if provided
    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };

    // Resolve final configuration (TOML overrides CLI)
    let cli_config: config::CliConfig = (&cli_args).into();
    let app_config = AppConfig::resolve(&cli_config, file_config)?;

    // Create the generative provider if a base URL is configured
    let provider: Option<Arc<dyn LlmProvider>> = app_config.llm_base_url.as_ref().map(|url| {
        info!(
            "Generative service configured at {} (model: {})",
            url, app_config.llm.model
        );
        Arc::new(OpenAIProvider::with_key_source(
            url.clone(),
            app_config.llm.model.clone(),
            app_config.llm.api_key_source.clone(),
        )) as Arc<dyn LlmProvider>
    });

    if cli_args.check_llm {
        let Some(provider) = provider else {
            bail!("No generative service configured; set llm.base_url or pass --llm-base-url");
        };
        provider.health_check().await?;
        info!(
            "Generative service {} ({}) is reachable",
            provider.name(),
            provider.model()
        );
        return Ok(());
    }

    let profiles = load_profiles(&app_config.profiles_path)?;
    let store = Arc::new(InMemoryProfileStore::new(profiles));

    let generator = PitchGenerator::new(store, provider, app_config.llm.completion_options());

    let venue = cli_args.venue();
    let pitch = generator
        .generate_pitch(&cli_args.artist_id, venue.as_ref(), cli_args.style)
        .await?;

    if cli_args.json {
        println!("{}", serde_json::to_string_pretty(&pitch)?);
    } else {
        println!("Subject: {}", pitch.subject);
        println!();
        println!("{}", pitch.body);
    }

    Ok(())
}
