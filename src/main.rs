use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use bugyard_lib::app::App;
use bugyard_lib::model::config::AppConfig;
use bugyard_lib::model::persistence::FileStorage;
use bugyard_lib::ui::Tui;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Save file path
    #[arg(short, long, default_value = "save.json")]
    save: String,

    /// Log file path (stdout belongs to the terminal UI)
    #[arg(long, default_value = "bugyard.log")]
    log: String,

    /// Run without a terminal for this many ticks, then save and exit
    #[arg(long)]
    headless: Option<u64>,
}

fn init_logging(path: &str) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to open log file {path}"))?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .with_filter(tracing_subscriber::EnvFilter::new(
                    std::env::var("RUST_LOG")
                        .unwrap_or_else(|_| bugyard_lib::DEFAULT_LOG_DIRECTIVES.into()),
                )),
        )
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log)?;

    let config = AppConfig::load(&args.config);
    let storage = Box::new(FileStorage::new(&args.save));
    let mut app = App::new(config, storage)?;

    if let Some(ticks) = args.headless {
        println!("Running headless for {ticks} ticks...");
        app.run_headless(ticks)?;
        println!("Done, yard saved to {}.", args.save);
        return Ok(());
    }

    let mut tui = Tui::new()?;
    let res = app.run(&mut tui);
    tui.restore()?;

    if let Err(e) = res {
        eprintln!("Application error: {e:#}");
    }
    Ok(())
}
