//! Frame I/O loop (detector in, render hints out).
//!
//! Pure per-frame logic lives in [`crate::engine`]; this module only moves
//! JSON lines between the collaborators: one detector frame record per
//! stdin line, one [`RenderHints`] object per stdout line.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use log::{debug, info, warn};

use crate::config::{AppConfig, PinchtypeError, parse_config_file};
use crate::engine::{InteractionEngine, RenderHints};
use crate::gesture::FrameRecord;
use crate::layout::KeyLayout;

/// Top-level session runner: owns the parsed config and the shutdown flag.
pub struct KeyboardRunner {
    config: AppConfig,
    running: Arc<AtomicBool>,
}

impl KeyboardRunner {
    pub fn new(config_path: impl AsRef<std::path::Path>) -> Result<Self, PinchtypeError> {
        Ok(Self {
            config: parse_config_file(config_path.as_ref())?,
            running: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Run the frame loop until stdin closes or the running flag clears.
    pub fn start(&mut self) {
        self.running.store(true, Ordering::Relaxed);

        let mut engine = InteractionEngine::new(&self.config);
        info!(
            "Starting interaction loop: {}x{} frame, {} key targets",
            self.config.frame.width,
            self.config.frame.height,
            engine.layout().targets().len()
        );

        let origin = Instant::now();
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut out = stdout.lock();

        for line in stdin.lock().lines() {
            if !self.running.load(Ordering::Relaxed) {
                break;
            }
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    warn!("stdin read failed: {e}");
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }

            // A garbled detector frame is the same as an empty one.
            let record: FrameRecord = match serde_json::from_str(&line) {
                Ok(r) => r,
                Err(e) => {
                    debug!("unparseable frame record: {e}");
                    FrameRecord::default()
                }
            };

            let hints = engine.tick(record.hand.as_ref(), origin.elapsed());
            if !emit(&mut out, &hints) {
                break;
            }
        }

        info!("Interaction loop finished; final text: {:?}", engine.text());
    }

    /// Stop the loop at the next frame boundary.
    #[allow(dead_code)]
    pub fn stop(&self) {
        self.running.store(false, Ordering::Relaxed);
        info!("Keyboard runner stopped");
    }

    /// Get a reference to the running flag for signal handling.
    pub fn running_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    /// Get the log level from the parsed configuration.
    pub fn config_log_level(&self) -> &str {
        &self.config.log_level
    }

    /// Get the optional log file path from the parsed configuration.
    pub fn config_log_file(&self) -> Option<&str> {
        self.config.log_file.as_deref()
    }
}

/// Write one render-hint line; returns false when the renderer went away.
fn emit(out: &mut impl Write, hints: &RenderHints) -> bool {
    match serde_json::to_string(hints) {
        Ok(json) => {
            if writeln!(out, "{json}").is_err() {
                warn!("renderer pipe closed, stopping");
                return false;
            }
            true
        }
        Err(e) => {
            warn!("failed to encode render hints: {e}");
            true
        }
    }
}

/// Print the resolved key rectangles from a config file.
pub fn print_layout(config_path: &std::path::Path) -> ExitCode {
    let config = match parse_config_file(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let layout = KeyLayout::build(&config.layout);
    println!(
        "\n=== pinchtype: Key Layout ({}x{} frame) ===\n",
        config.frame.width, config.frame.height
    );

    for (index, key) in layout.targets().iter().enumerate() {
        let kind: &'static str = key.kind.into();
        println!(
            "{index:>3}  {:<12} {:<10} x={:<7.1} y={:<7.1} w={:<6.1} h={:.1}",
            key.label, kind, key.x, key.y, key.width, key.height,
        );
    }

    println!(
        "\n{} regular + {} special key(s).",
        layout.regular().len(),
        layout.special().len()
    );
    ExitCode::SUCCESS
}
