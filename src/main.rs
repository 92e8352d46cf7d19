//! pinchtype – gesture-driven virtual keyboard core.
//!
//! CLI entry point.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;
use std::sync::atomic::Ordering;
use std::time::SystemTime;

use clap::Parser;
use log::{LevelFilter, Log, Metadata, Record};

use pinchtype::runner::{KeyboardRunner, print_layout};

#[derive(Parser)]
#[command(
    name = "pinchtype",
    about = "Hold-to-click virtual keyboard driven by hand landmarks"
)]
struct Cli {
    /// Path to configuration file
    #[arg(default_value = "pinchtype.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Print the resolved key layout and exit
    #[arg(short, long)]
    print_layout: bool,
}

/// Simple logger that writes to stderr and optionally to a log file.
///
/// Render hints go to stdout, so logging must stay off it.
struct PinchtypeLogger {
    level: LevelFilter,
    file: Option<Mutex<std::fs::File>>,
}

impl Log for PinchtypeLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.target().starts_with("pinchtype")
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let secs = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        let line = format!("[{secs} {} pinchtype] {}\n", record.level(), record.args());

        eprint!("{line}");

        if let Some(ref file_mutex) = self.file {
            if let Ok(mut f) = file_mutex.lock() {
                let _ = f.write_all(line.as_bytes());
            }
        }
    }

    fn flush(&self) {
        if let Some(ref file_mutex) = self.file {
            if let Ok(mut f) = file_mutex.lock() {
                let _ = f.flush();
            }
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.print_layout {
        return print_layout(&cli.config);
    }

    // Parse config first (before logger init) so we can read the configured log level.
    let mut runner = match KeyboardRunner::new(&cli.config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!(
                "Error: {e}\n\n\
                 To inspect the key layout a config produces, run:\n\
                 \x20 pinchtype --print-layout"
            );
            return ExitCode::FAILURE;
        }
    };

    // Initialize logging: CLI --verbose overrides the config file setting.
    let log_level: LevelFilter = if cli.verbose {
        LevelFilter::Debug
    } else {
        runner
            .config_log_level()
            .parse()
            .unwrap_or(LevelFilter::Info)
    };

    let log_file = runner.config_log_file().and_then(|path| {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Some(Mutex::new(file)),
            Err(e) => {
                eprintln!("Warning: cannot open log file '{path}': {e}");
                None
            }
        }
    });

    let logger = PinchtypeLogger {
        level: log_level,
        file: log_file,
    };
    log::set_boxed_logger(Box::new(logger)).expect("Failed to set logger");
    log::set_max_level(log_level);

    // Set up signal handling for graceful shutdown
    let running = runner.running_flag();
    ctrlc::set_handler(move || {
        running.store(false, Ordering::Relaxed);
    })
    .expect("Error setting Ctrl-C handler");

    log::info!("Loading configuration from: {}", cli.config.display());
    runner.start();

    ExitCode::SUCCESS
}
