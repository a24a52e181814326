use color_eyre::{eyre::eyre, Result};
use eframe::egui;
use std::time::Duration;
use touchstick::config::{self, ConsoleConfig};
use touchstick::report_sink::ReportSink;
use touchstick::ui::JoystickConsole;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    setup()?;

    let config = setup_config().await?;
    info!(
        "Starting console with {} joysticks at {} fps",
        config.joysticks.len(),
        config.fps
    );

    // Reports leave the UI thread through this sink
    let (report_sink, report_sender) = ReportSink::spawn(config.report_channel_capacity);
    let telemetry = report_sink.subscribe();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([960.0, 640.0]),
        ..Default::default()
    };

    eframe::run_native(
        "touchstick",
        native_options,
        Box::new(|cc| {
            Ok(Box::new(JoystickConsole::new(
                cc,
                config,
                report_sender,
                telemetry,
            )))
        }),
    )
    .map_err(|e| eyre!("UI terminated with error: {}", e))?;

    // The console dropped every sender, let the sink drain
    if tokio::time::timeout(Duration::from_secs(1), report_sink.join())
        .await
        .is_err()
    {
        warn!("Report sink did not stop in time");
    }
    info!("Console closed");
    Ok(())
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    setup_logging_env();
    Ok(())
}

fn setup_logging_env() {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();
}

async fn setup_config() -> Result<ConsoleConfig> {
    let path = config::config_path();

    // Make sure there is something to edit next time
    ConsoleConfig::ensure_default_config(&path).await?;

    ConsoleConfig::load_from(&path).await
}
