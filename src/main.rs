use aidboard::api::Resource;
use aidboard::core::config::{self, AidboardConfig, CliOverrides};
use aidboard::tui;
use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "aidboard", about = "Terminal client for a community mutual-aid fund")]
struct Args {
    /// Collection to open first
    #[arg(short, long, value_enum)]
    resource: Option<Resource>,

    /// Fund API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Start in card view
    #[arg(long)]
    cards: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to aidboard.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("aidboard.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("{}, falling back to defaults", e);
        AidboardConfig::default()
    });
    let cli = CliOverrides {
        resource: args.resource,
        base_url: args.base_url,
        cards: args.cards,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!(
        "Aidboard starting up on {} against {}",
        resolved.resource,
        resolved.api_base_url
    );

    tui::run(resolved)
}
