use anyhow::Context;
use clap::Parser;
use critter_controller::{Collaborators, Controller};
use critter_core::mock::FixedClassifier;
use critter_core::{running_flag, CritterConfig, EventQueue, HungerDrive};
use critter_expression::{LoggingBody, RandomWakeWord, SoundLibrary};
use critter_limbic::{HeartbeatConfig, Watchers};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod console;

use console::{ConsoleCommand, USAGE};

const DEFAULT_CONFIG: &str = "critter.toml";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML config file (defaults to ./critter.toml if present)
    #[arg(short, long, env = "CRITTER_CONFIG")]
    config: Option<PathBuf>,

    /// Folder of .wav assets; overrides the config file
    #[arg(short, long)]
    sound_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => CritterConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => CritterConfig::load_or_default(DEFAULT_CONFIG),
    };
    if let Some(dir) = args.sound_dir {
        config.audio.sound_dir = dir;
    }

    info!("Waking up the critter...");
    let library = Arc::new(SoundLibrary::scan(&config.audio.sound_dir));

    let queue = Arc::new(match config.queue.capacity {
        Some(capacity) => EventQueue::bounded(capacity),
        None => EventQueue::new(),
    });
    let hunger = HungerDrive::shared(config.drives.initial_hunger, Instant::now());
    let (switch, running) = running_flag();

    let controller = Controller::new(
        &config,
        Arc::clone(&queue),
        Arc::clone(&hunger),
        Collaborators {
            body: Arc::new(LoggingBody::with_sound_dir(config.audio.sound_dir.clone())),
            classifier: Arc::new(FixedClassifier::stand_in()),
            library,
        },
        running.clone(),
    );

    let watchers = Watchers::new(
        Arc::clone(&queue),
        controller.subscribe(),
        hunger,
        running,
        HeartbeatConfig::from_config(&config),
    );
    let watcher_handles =
        watchers.spawn_all(Arc::new(RandomWakeWord::new(config.wake_word.probability)));
    let consumer = tokio::spawn(controller.run());

    println!("Critter is awake. {}", USAGE);
    tokio::select! {
        result = console_loop(&queue) => result?,
        _ = tokio::signal::ctrl_c() => info!("Ctrl-C received"),
    }

    switch.stop();
    let final_state = consumer.await.context("Controller task panicked")?;
    for handle in watcher_handles {
        if let Err(e) = handle.await {
            warn!("Watcher task failed: {}", e);
        }
    }
    info!("Goodbye (last state {})", final_state.state());
    Ok(())
}

/// Read commands until `exit`. Once input closes the console goes quiet and
/// only Ctrl-C stops the toy.
async fn console_loop(queue: &EventQueue) -> anyhow::Result<()> {
    let mut lines = stdin_lines();
    prompt()?;

    while let Some(line) = lines.recv().await {
        if line.trim().is_empty() {
            prompt()?;
            continue;
        }
        match ConsoleCommand::parse(&line) {
            Some(ConsoleCommand::Exit) => return Ok(()),
            Some(cmd) => {
                if let Some(event) = cmd.to_event() {
                    queue.post_or_log(event);
                }
            }
            None => println!("Unknown command '{}'. {}", line.trim(), USAGE),
        }
        prompt()?;
    }

    info!("Console input closed; running until Ctrl-C");
    std::future::pending::<()>().await;
    Ok(())
}

fn prompt() -> anyhow::Result<()> {
    print!("> ");
    std::io::stdout().flush()?;
    Ok(())
}

/// Stdin lines, read on a plain thread so a pending read never holds up
/// runtime shutdown.
fn stdin_lines() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(16);
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
    });
    rx
}
