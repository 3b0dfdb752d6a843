use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};

use pronounce_practice::audio::{AudioArtifact, CaptureConfig, CpalMicrophone};
use pronounce_practice::evaluate::EvaluationClient;
use pronounce_practice::session::{Phase, PracticeSession, SessionConfig, Upload};
use pronounce_practice::Config;

/// Push-to-talk pronunciation practice against a remote evaluation service
#[derive(Debug, Parser)]
#[command(name = "pronounce-practice", version)]
struct Cli {
    /// Target word to practice (overrides the config file)
    #[arg(long)]
    word: Option<String>,

    /// Evaluation service endpoint (overrides the config file)
    #[arg(long)]
    endpoint: Option<String>,

    /// Config file (TOML, extension omitted)
    #[arg(long, default_value = "config/pronounce-practice")]
    config: String,

    /// Keep a WAV copy of every attempt in this directory
    #[arg(long)]
    keep_recordings: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let cfg = Config::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config '{}'", cli.config))?;

    let session_cfg = SessionConfig {
        word: cli.word.unwrap_or(cfg.practice.word),
        endpoint: cli.endpoint.unwrap_or(cfg.service.evaluation_url),
        capture: CaptureConfig {
            target_sample_rate: cfg.audio.sample_rate,
            target_channels: cfg.audio.channels,
        },
        recordings_dir: cli
            .keep_recordings
            .or_else(|| cfg.audio.recordings_path.map(PathBuf::from)),
    };

    // Everything runs on one cooperative loop: the microphone's stream handle
    // is not Send, so upload tasks are spawned locally next to it.
    let local = tokio::task::LocalSet::new();
    local.run_until(run(session_cfg)).await
}

async fn run(cfg: SessionConfig) -> Result<()> {
    // Acquired once; on failure the session runs with recording permanently
    // unavailable rather than crashing.
    let mic = match CpalMicrophone::acquire(cfg.capture.clone()).await {
        Ok(mic) => Some(mic),
        Err(e) => {
            warn!("Microphone unavailable: {}", e);
            None
        }
    };

    let client = EvaluationClient::new(cfg.endpoint.clone());
    let mut session = PracticeSession::new(cfg.word.clone(), mic);

    println!("🎤 Pronounce: \"{}\"", session.word());
    println!("Press Enter to record, Enter again to stop. Ctrl-D quits.");

    let (verdict_tx, mut verdict_rx) = mpsc::channel(4);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut attempt_seq = 0u32;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                if line.context("Failed to read stdin")?.is_none() {
                    break; // EOF
                }

                if matches!(session.phase(), Phase::Recording) {
                    if let Some(upload) = session.finish() {
                        attempt_seq += 1;
                        if let Some(dir) = &cfg.recordings_dir {
                            save_attempt(&upload.artifact, dir, session.session_id(), attempt_seq);
                        }

                        let client = client.clone();
                        let tx = verdict_tx.clone();
                        tokio::task::spawn_local(async move {
                            let Upload { artifact, generation } = upload;
                            let outcome = client.evaluate(artifact).await;
                            // A closed channel means the loop is gone; the
                            // verdict is simply dropped.
                            let _ = tx.send((generation, outcome)).await;
                        });
                    }
                } else {
                    session.begin();
                }

                println!("{}", session.status());
            }
            Some((generation, outcome)) = verdict_rx.recv() => {
                session.apply(generation, outcome);
                println!("{}", session.status());
                if let Some(accuracy) = session.last_accuracy() {
                    println!("Accuracy: {}%", accuracy);
                }
            }
        }
    }

    session.teardown();

    let stats = session.stats();
    info!(
        "Session over: {} attempts, {} perfect",
        stats.attempts, stats.passed
    );

    Ok(())
}

fn save_attempt(artifact: &AudioArtifact, dir: &Path, session_id: &str, seq: u32) {
    if let Err(e) = std::fs::create_dir_all(dir) {
        warn!("Could not create recordings dir {:?}: {}", dir, e);
        return;
    }

    let path = dir.join(format!("{}-attempt-{:03}.wav", session_id, seq));
    match artifact.write_to(&path) {
        Ok(()) => info!("Saved attempt recording to {:?}", path),
        Err(e) => warn!("Could not save attempt recording: {}", e),
    }
}
