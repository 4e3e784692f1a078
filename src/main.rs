use clap::Parser;
use mnemo::core::config;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "mnemo", about = "Terminal client for a memory-augmented chat server")]
struct Args {
    /// Chat server base URL (overrides config file and MNEMO_SERVER_URL)
    #[arg(short, long)]
    server: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to mnemo.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("mnemo.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Config load failed ({e}); continuing with defaults");
            config::MnemoConfig::default()
        }
    };
    let resolved = config::resolve(&file_config, args.server.as_deref());

    log::info!("Mnemo starting up against {}", resolved.base_url);

    mnemo::tui::run(resolved)
}
