use clap::{Parser, Subcommand};
use lobby_registry_cli::application::{run_script, write_schemas};
use lobby_registry_cli::{CliError, LogConfig, LoggingEmitter, Result, RpcRouter};
use lobby_registry_core::{spawn_event_forwarder, EngineConfig, LobbyEngine};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, BufReader};
use tracing::info;

#[derive(Parser)]
#[command(name = "lobby-cli")]
#[command(
    version,
    about = "Lobby registry host - run lobby RPCs against an in-memory registry"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level used when RUST_LOG is unset (info, or debug with --dev)
    #[arg(long, global = true)]
    log_level: Option<tracing::Level>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    /// Verbose logs with span timings and thread ids
    #[arg(long, global = true)]
    dev: bool,

    /// Print no logs at all
    #[arg(short, long, global = true, conflicts_with = "dev")]
    quiet: bool,

    /// Characters per generated join code
    #[arg(long, global = true, default_value_t = 6)]
    code_length: usize,

    /// Emit AccessDenied events for refused authorization checks
    #[arg(long, global = true)]
    audit_denials: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a JSON-lines request script
    Replay {
        /// Script file, one request per line
        script: PathBuf,
    },

    /// Read requests from stdin until EOF
    Stdin,

    /// Write JSON schemas for every request and response
    Schema {
        /// Output directory
        #[arg(short = 'o', long, default_value = "schemas")]
        out: PathBuf,
    },
}

impl Cli {
    fn engine_config(&self) -> Result<EngineConfig> {
        if !(4..=16).contains(&self.code_length) {
            return Err(CliError::InvalidConfig(format!(
                "code length must be between 4 and 16, got {}",
                self.code_length
            )));
        }

        Ok(EngineConfig::default()
            .with_join_code_length(self.code_length)
            .with_audit_denials(self.audit_denials))
    }

    fn log_config(&self) -> LogConfig {
        let mut config = if self.dev {
            LogConfig::dev()
        } else {
            LogConfig::default()
        };
        if let Some(level) = self.log_level {
            config = config.with_level(level);
        }
        if self.json_logs {
            config = config.with_json();
        }
        if self.quiet {
            config = config.without_logs();
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.log_config().init().map_err(CliError::Logging)?;

    match &cli.command {
        Commands::Replay { script } => {
            let file = tokio::fs::File::open(script)
                .await
                .map_err(|_| CliError::script_not_found(script.clone()))?;
            info!(script = %script.display(), "Replaying script");
            serve(cli.engine_config()?, BufReader::new(file)).await?;
        }
        Commands::Stdin => {
            info!("Reading requests from stdin");
            serve(cli.engine_config()?, BufReader::new(tokio::io::stdin())).await?;
        }
        Commands::Schema { out } => {
            write_schemas(out).await?;
        }
    }

    Ok(())
}

/// Run every request from `reader` against a fresh registry, logging events
async fn serve<R>(config: EngineConfig, reader: R) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let (engine, events) = LobbyEngine::with_config(config);
    let forwarder = spawn_event_forwarder(events, Arc::new(LoggingEmitter));

    let router = RpcRouter::new(engine);
    let stats = run_script(&router, reader, tokio::io::stdout()).await?;
    let lobbies = router.engine().store().len();

    // Closing the last sender lets the forwarder drain and finish
    drop(router);
    let delivered = forwarder
        .await
        .map_err(|e| CliError::Forwarder(e.to_string()))?;

    info!(
        requests = stats.requests,
        failures = stats.failures,
        events = delivered,
        lobbies,
        "Done"
    );
    Ok(())
}
