use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use injected_logger::backend::{BackendHandle, TracingBackend, WriterBackend};
use injected_logger::config::{apply_updates, load_config, BackendKind, ConfigWatcher, LoggerConfig};
use injected_logger::observability::logging;
use injected_logger::{BindOptions, Facade, Message};

#[derive(Parser)]
#[command(name = "injected-logger")]
#[command(about = "Bind a built-in backend and drive it through reconciled log levels", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured backend.
    #[arg(short, long, value_enum)]
    backend: Option<BackendArg>,

    /// Override the configured prefix.
    #[arg(short, long)]
    prefix: Option<String>,

    /// Extra levels to request, in addition to the configured ones.
    #[arg(short, long = "level")]
    levels: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum BackendArg {
    Tracing,
    Writer,
    SeverityWriter,
}

impl From<BackendArg> for BackendKind {
    fn from(b: BackendArg) -> Self {
        match b {
            BackendArg::Tracing => BackendKind::Tracing,
            BackendArg::Writer => BackendKind::Writer,
            BackendArg::SeverityWriter => BackendKind::SeverityWriter,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print how the requested levels map onto the backend
    Classify,
    /// Log one message at a level
    Emit {
        level: String,
        message: Vec<String>,
    },
    /// Keep the logger bound and apply config file changes until Ctrl-C
    Watch,
}

fn backend_for(config: &LoggerConfig) -> BackendHandle {
    match config.backend {
        BackendKind::Tracing => BackendHandle::new(TracingBackend::new(config.target.clone())),
        BackendKind::Writer => BackendHandle::new(WriterBackend::stderr()),
        BackendKind::SeverityWriter => {
            BackendHandle::new(WriterBackend::with_severities(std::io::stderr(), &config.severities))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init(logging::DEFAULT_FILTER)?;

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => LoggerConfig::default(),
    };
    if let Some(backend) = cli.backend {
        config.backend = backend.into();
    }
    if cli.prefix.is_some() {
        config.prefix = cli.prefix.clone();
    }
    config.levels.extend(cli.levels.iter().cloned());

    tracing::debug!(backend = ?config.backend, levels = ?config.levels, "Configuration loaded");

    let facade = Arc::new(Facade::new(config.target.clone()));
    let classification = facade.bind(backend_for(&config), BindOptions::from(&config))?;

    match cli.command {
        Commands::Classify => {
            println!("{}", serde_json::to_string_pretty(&classification)?);
        }
        Commands::Emit { level, message } => {
            facade.call(&level, Message::text(message.join(" ")))?;
        }
        Commands::Watch => {
            let Some(path) = cli.config else {
                return Err("watch needs --config".into());
            };
            let (watcher, updates) = ConfigWatcher::new(&path);
            let _guard = watcher.run()?;
            let task = tokio::spawn(apply_updates(facade.clone(), updates));

            tokio::signal::ctrl_c().await?;
            task.abort();
            tracing::info!("Shutdown complete");
        }
    }

    Ok(())
}
