//! Quiz maze client binary.
//!
//! Composition root: reads configuration from the environment (and `.env`),
//! sets up file logging, builds the runtime, and hands its handle to the
//! line-based shell.
//!
//! # Examples
//!
//! ```bash
//! MAZE_DIFFICULTY=hard MAZE_SEED=42 cargo run -p maze-client
//! ```

mod logging;
mod shell;

use std::io::Write;

use anyhow::Result;
use maze_runtime::{Event, Runtime, RuntimeConfig, RuntimeHandle, Topic};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // 1. Load configuration from environment
    let config = RuntimeConfig::from_env();

    // 2. Setup logging
    let _log_guard = logging::setup_logging(&config.resolved_save_dir())?;
    tracing::info!("Starting quiz maze client");
    tracing::info!("Difficulty: {}", config.difficulty);
    tracing::info!("Persistence: {}", config.enable_persistence);

    // 3. Build runtime
    let runtime = Runtime::builder().config(config).build().await?;
    tracing::info!("Runtime built, seed {}", runtime.seed());

    let handle = runtime.handle();
    spawn_audio(&handle);

    // 4. Run the shell until the player leaves
    shell::run(handle).await?;

    runtime.shutdown().await?;
    tracing::info!("Client shutdown complete");
    Ok(())
}

/// Rings the terminal bell for sound cues. Fire-and-forget.
fn spawn_audio(handle: &RuntimeHandle) {
    let mut cues = handle.subscribe(Topic::Audio);
    tokio::spawn(async move {
        while let Ok(event) = cues.recv().await {
            if let Event::Game(cue) = event {
                tracing::trace!(?cue, "Sound cue");
                let mut stdout = std::io::stdout();
                let _ = stdout.write_all(b"\x07");
                let _ = stdout.flush();
            }
        }
    });
}
