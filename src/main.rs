//! thermowatch - temperature threshold notifier binary
//!
//! Polls a temperature sensor and notifies a remote endpoint whenever the
//! temperature rises above the configured threshold.

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::sync::Arc;
use thermowatch::{
    stop_channel, ComponentReader, Controller, MonitorConfig, SensorReader, SysfsReader,
    TemperatureUnit, TemperatureWatcher, ThresholdStrategy, UrlPathNotifier,
    DEFAULT_INTERVAL_MS, DEFAULT_REMOTE_ENDPOINT, DEFAULT_REQUEST_TIMEOUT_MS, DEFAULT_SENSOR_PATH,
    DEFAULT_THRESHOLD,
};
use tracing::level_filters::LevelFilter;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "thermowatch")]
#[command(about = "Notify a remote endpoint when a temperature threshold is exceeded")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "Austin Couch")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Address of the remote server to which measurements are sent
    #[arg(long, global = true, default_value = DEFAULT_REMOTE_ENDPOINT)]
    remote_endpoint: String,

    /// Events are produced when this temperature threshold is exceeded
    #[arg(long, global = true, default_value_t = DEFAULT_THRESHOLD, allow_negative_numbers = true)]
    temperature_threshold: f64,

    /// Units the temperature notifications are sent in
    #[arg(long, global = true, value_enum, default_value_t = TemperatureUnit::Celsius)]
    temperature_units: TemperatureUnit,

    /// Sensor polling interval in milliseconds
    #[arg(short, long, global = true, default_value_t = DEFAULT_INTERVAL_MS)]
    interval: u64,

    /// Timeout for a single notification request in milliseconds
    #[arg(long, global = true, default_value_t = DEFAULT_REQUEST_TIMEOUT_MS)]
    request_timeout: u64,

    /// Where temperatures are read from
    #[arg(long, global = true, value_enum, default_value_t = SensorKind::Sysfs)]
    sensor: SensorKind,

    /// Sysfs file to read (thermal zone or 1-Wire w1_slave)
    #[arg(long, global = true, default_value = DEFAULT_SENSOR_PATH)]
    sensor_path: String,

    /// Only use components whose label contains this text
    #[arg(long, global = true)]
    component_label: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Watch the sensor and send notifications (default)
    Run,

    /// Take a single reading and exit
    Read(ReadArgs),
}

#[derive(Args)]
struct ReadArgs {
    /// Output format: json or pretty
    #[arg(short, long, default_value = "pretty")]
    format: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SensorKind {
    /// Sysfs temperature file
    Sysfs,
    /// Hardware component reported by the OS
    Component,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(&cli)?;

    match &cli.command {
        Some(Commands::Read(args)) => read_command(&cli, args)?,
        Some(Commands::Run) | None => run_command(&cli).await?,
    }

    Ok(())
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(log_filter(cli, &directives))
        .with_target(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

/// Level from the flags, refined by any `RUST_LOG` directives.
fn log_filter(cli: &Cli, directives: &str) -> EnvFilter {
    let level = if cli.debug {
        LevelFilter::DEBUG
    } else if cli.verbose {
        LevelFilter::INFO
    } else {
        LevelFilter::WARN
    };

    EnvFilter::builder()
        .with_default_directive(level.into())
        .parse_lossy(directives)
}

fn build_config(cli: &Cli) -> anyhow::Result<MonitorConfig> {
    let config = MonitorConfig::default()
        .with_remote_endpoint(&cli.remote_endpoint)
        .with_threshold(cli.temperature_threshold)
        .with_units(cli.temperature_units)
        .with_interval_ms(cli.interval)
        .with_request_timeout_ms(cli.request_timeout);

    config.validate()?;
    Ok(config)
}

fn build_reader(cli: &Cli) -> anyhow::Result<Arc<dyn SensorReader>> {
    let reader: Arc<dyn SensorReader> = match cli.sensor {
        SensorKind::Sysfs => Arc::new(SysfsReader::new(&cli.sensor_path)),
        SensorKind::Component => Arc::new(
            ComponentReader::new(cli.component_label.clone())
                .context("Failed to initialize component sensor")?,
        ),
    };
    Ok(reader)
}

async fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let config = build_config(cli)?;
    let reader = build_reader(cli)?;

    info!("Sending to remote endpoint: {}", config.remote_endpoint);
    info!("  - Threshold: {}", config.threshold);
    info!("  - Units: {}", config.units);
    info!("  - Polling interval: {}ms", config.interval_ms);

    let watcher = TemperatureWatcher::new(config.interval(), reader)
        .with_capacity(config.event_capacity);
    let notifier = UrlPathNotifier::new(&config.remote_endpoint, config.request_timeout())?;
    let strategy = ThresholdStrategy::new(config.threshold, config.units);

    let (stop, signal) = stop_channel();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Interrupt received, shutting down"),
            Err(e) => error!("Failed to listen for interrupt: {}", e),
        }
        stop.stop();
    });

    let mut controller = Controller::new(signal, watcher, strategy, notifier);
    let summary = controller.start().await?;

    info!(
        "Processed {} events, sent {} notifications ({} failed)",
        summary.events_seen, summary.notifications_sent, summary.notify_failures
    );

    Ok(())
}

fn read_command(cli: &Cli, args: &ReadArgs) -> anyhow::Result<()> {
    let reader = build_reader(cli)?;
    let reading = reader.read()?;

    match args.format.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&reading)?;
            println!("{}", json);
        }
        "pretty" => {
            let units = cli.temperature_units;
            println!(
                "🌡️  {:.3} {} ({})",
                units.from_celsius(reading.celsius),
                units.suffix(),
                reading.taken_at.format("%Y-%m-%d %H:%M:%S UTC")
            );
        }
        _ => {
            error!("Unsupported format: {}. Use 'json' or 'pretty'", args.format);
            std::process::exit(1);
        }
    }

    Ok(())
}
