use clap::Parser;
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

use greenroom::core::config;
use greenroom::server::{self, AppState};

#[derive(Parser)]
#[command(
    name = "greenroom",
    about = "Generative-text relay and programme/script backend"
)]
struct Args {
    /// Listening port (overrides PORT and the config file)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let _ = TermLogger::init(
        LevelFilter::Info,
        log_config,
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Using default config: {e}");
        Default::default()
    });
    let mut resolved = config::resolve(&file_config);
    if let Some(port) = args.port {
        resolved.port = port;
    }

    log::info!("Greenroom starting up on port {}", resolved.port);
    server::serve(AppState::new(resolved)).await
}
