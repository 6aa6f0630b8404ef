use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use snipreel_cli::{commands, server, telemetry};
use snipreel_core::SnipConfig;
use snipreel_render::{InMemoryJobStore, Orchestrator, OutputStorage, ProcessBackend};

#[derive(Parser)]
#[command(
    name = "snipreel",
    version,
    about = "Snipreel: turn code snippets into animated vertical videos",
    long_about = "Snipreel renders short vertical videos of source code being typed,\nsliding in or glowing, themed and syntax-highlighted."
)]
struct Cli {
    /// Path to the configuration file (defaults are used when it does not exist)
    #[arg(long, global = true, default_value = "snipreel.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the render API server
    Serve {
        /// Address to listen on (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides the config file)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print the visual description of one frame of a request as JSON
    Frame {
        /// Path to a render request JSON file
        #[arg()]
        request: PathBuf,

        /// Frame index to describe
        #[arg(long, default_value_t = 0)]
        frame: u64,
    },

    /// Print how many frames a request renders to
    Duration {
        /// Path to a render request JSON file
        #[arg()]
        request: PathBuf,
    },

    /// List the built-in themes
    Themes,

    /// List the animation presets
    Presets,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = SnipConfig::load_or_default(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    config.apply_env()?;
    telemetry::init(&config.logging);

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            run_async(cmd_serve(config))
        }
        Commands::Frame { request, frame } => {
            let request = commands::load_request(&request)?;
            println!("{}", commands::frame_json(&request, frame, config.video)?);
            Ok(())
        }
        Commands::Duration { request } => {
            let request = commands::load_request(&request)?;
            println!(
                "{}",
                commands::duration_summary(&request, &config.render, config.video)
            );
            Ok(())
        }
        Commands::Themes => {
            println!("{}", commands::themes_listing());
            Ok(())
        }
        Commands::Presets => {
            println!("{}", commands::presets_listing());
            Ok(())
        }
    }
}

async fn cmd_serve(config: SnipConfig) -> Result<()> {
    let orchestrator = Orchestrator::new(
        Arc::new(InMemoryJobStore::new()),
        Arc::new(ProcessBackend::new(&config.renderer)),
        OutputStorage::from_config(&config.storage),
        config.render.clone(),
        config.video,
    );
    server::serve(&config.server, orchestrator).await
}

fn run_async<F>(future: F) -> Result<()>
where
    F: std::future::Future<Output = Result<()>>,
{
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to initialize async runtime")?;
    runtime.block_on(future)
}
