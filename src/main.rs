use std::env;
use std::error::Error;
use std::process;

use clap::Parser;

use crate::input::source::hidraw;
use crate::input::source::hidraw::dualshock::DualShockController;

mod drivers;
mod input;

/// Size of the event channel buffer
const BUFFER_SIZE: usize = 2048;

/// Decode DualShock 4 input reports and log button and stick transitions
#[derive(Parser, Debug)]
#[command(name = "padstream", version, about, long_about = None)]
struct Args {
    /// hidraw device path (e.g. /dev/hidraw0). Discovered by vendor and
    /// product id when omitted.
    #[arg(long)]
    device: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let log_level = match env::var("LOG_LEVEL") {
        Ok(value) => value,
        Err(_) => "info".to_string(),
    };
    env::set_var("RUST_LOG", log_level);
    env_logger::init();
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    log::info!("Starting padstream v{}", VERSION);

    let args = Args::parse();

    // Setup CTRL+C handler
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.unwrap();
        log::info!("Shutting down");
        process::exit(0);
    });

    let path = match args.device {
        Some(path) => path,
        None => match hidraw::discover()? {
            Some(path) => path,
            None => return Err("No DualShock 4 controller found".into()),
        },
    };
    log::info!("Using device {path}");

    let (tx, mut rx) = tokio::sync::mpsc::channel(BUFFER_SIZE);
    let controller = DualShockController::new(path, tx)?;
    let source_task = tokio::task::spawn(controller.run());

    // Log every decoded transition. The loop ends when the source stops and
    // the channel closes.
    while let Some(event) = rx.recv().await {
        log::info!("{event}");
    }

    match source_task.await? {
        Ok(_) => {
            log::info!("The source device task has exited");
        }
        Err(err) => {
            log::error!("Error reading from the source device: {err}");
            return Err(err);
        }
    }

    log::info!("Stopping padstream");
    Ok(())
}
