use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use lapsecam::{LapsecamConfig, LoopExit};

#[derive(Parser, Debug)]
#[command(name = "lapsecam")]
#[command(about = "Rust-based time-lapse camera appliance with button menus and a character display")]
#[command(version)]
#[command(long_about = "An unattended time-lapse camera appliance: polls physical buttons, \
renders state to a 16x2 character display, manages a capture schedule with configurable \
interval, resolution and exposure-lock behavior, and writes a machine-readable frame log \
to stdout for a downstream video assembler.")]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "lapsecam.toml", help = "Path to TOML configuration file")]
    config: String,

    /// Enable debug logging (most verbose)
    #[arg(short, long, help = "Enable debug level logging")]
    debug: bool,

    /// Enable verbose logging (info level)
    #[arg(short, long, help = "Enable verbose info level logging")]
    verbose: bool,

    /// Enable quiet mode (errors only)
    #[arg(short, long, help = "Enable quiet mode - only log errors")]
    quiet: bool,

    /// Validate configuration and exit
    #[arg(long, help = "Validate configuration file and exit without starting the appliance")]
    validate_config: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in TOML format and exit")]
    print_config: bool,

    /// Override log format (json, pretty, compact)
    #[arg(long, value_name = "FORMAT", help = "Log output format: json, pretty, or compact")]
    log_format: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Handle special modes that don't require full initialization
    if args.print_config {
        print_default_config()?;
        return Ok(());
    }

    init_logging(&args)?;

    info!("Starting lapsecam v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration file: {}", args.config);

    let config = match LapsecamConfig::load_from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if args.validate_config {
        match config.validate() {
            Ok(()) => {
                println!("✓ Configuration is valid");
                return Ok(());
            }
            Err(e) => {
                error!("Configuration validation failed: {}", e);
                eprintln!("✗ Configuration validation failed: {}", e);
                std::process::exit(1);
            }
        }
    }

    config.validate().map_err(|e| {
        error!("Configuration validation failed: {}", e);
        e
    })?;

    match run_appliance(&config)? {
        LoopExit::Shutdown => {
            // the OS halt is already underway
            info!("Exiting after shutdown gesture");
            Ok(())
        }
        LoopExit::Interrupted => {
            info!("Exiting after interrupt");
            std::process::exit(1);
        }
    }
}

#[cfg(all(target_os = "linux", feature = "hardware"))]
fn run_appliance(config: &LapsecamConfig) -> Result<LoopExit> {
    use lapsecam::{
        CaptureScheduler, GpioButtons, GpioLed, Hd44780Display, LibcameraProvider, MainLoop,
        Peripherals, SystemPower,
    };
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    std::fs::create_dir_all(&config.storage.base_dir)?;

    let interrupt = Arc::new(AtomicBool::new(false));
    {
        let flag = Arc::clone(&interrupt);
        ctrlc::set_handler(move || flag.store(true, Ordering::Relaxed))?;
    }

    let peripherals = Peripherals {
        buttons: GpioButtons::new(&config.pins)?,
        display: Hd44780Display::new(&config.lcd)?,
        indicator: GpioLed::new(config.pins.led)?,
        power: SystemPower,
    };

    let scheduler = CaptureScheduler::new(
        LibcameraProvider::new(&config.camera),
        std::io::stdout(),
        PathBuf::from(&config.storage.base_dir),
        config.camera.rotation,
    );

    let mut main_loop = MainLoop::new(peripherals, scheduler, config, interrupt);
    Ok(main_loop.run()?)
}

#[cfg(not(all(target_os = "linux", feature = "hardware")))]
fn run_appliance(_config: &LapsecamConfig) -> Result<LoopExit> {
    anyhow::bail!("built without hardware support; rebuild on Linux with the `hardware` feature")
}

fn init_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    // Determine log level based on flags
    let log_level = if args.debug {
        "debug"
    } else if args.verbose {
        "info"
    } else if args.quiet {
        "error"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("lapsecam={}", log_level)));

    // Logs go to stderr; stdout carries the frame protocol for the assembler
    let fmt_layer = match args.log_format.as_deref() {
        Some("json") => fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed(),
        Some("compact") => fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .with_target(false)
            .boxed(),
        Some("pretty") => fmt::layer()
            .pretty()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed(),
        Some(format) => {
            eprintln!("Warning: Unknown log format '{}', using default", format);
            fmt::layer().with_writer(std::io::stderr).boxed()
        }
        None => fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .init();

    Ok(())
}

/// Print the default configuration in TOML format
fn print_default_config() -> Result<()> {
    println!("# Lapsecam configuration file");
    println!("# Defaults shown; every key is optional");
    println!();
    let rendered = toml::to_string_pretty(&LapsecamConfig::default())
        .map_err(lapsecam::LapsecamError::from)?;
    println!("{}", rendered);
    Ok(())
}
