//! # Example: report_card
//!
//! Interactive grade loop: every Enter pushes a new random grade to the
//! subject, `g` graduates.
//!
//! Shows how to:
//! - Register derived views ([`AverageSubscriber`], [`LatestValueSubscriber`]) and a [`LogWriter`].
//! - Turn console input into a [`Command`] stream for the [`Driver`].
//! - Render subscriber state after each pass (rendering is not part of the core).
//!
//! ## Flow
//! ```text
//! stdin thread ──► mpsc ──► Command::Next / Command::Graduate
//!     └─► Driver::run_with()
//!           ├─► RandomGrades::next_grade()
//!           ├─► Subject::set_value() ──► average / latest / log
//!           └─► render()
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=gradecast=info cargo run --example report_card --features logging
//! ```

use std::io::BufRead;
use std::sync::Arc;

use futures::stream::{self, BoxStream, StreamExt};
use gradecast::{
    AverageSubscriber, Command, Config, Driver, LatestValueSubscriber, LogWriter, RandomGrades,
    Subject, cancel_on_signal,
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

const PROMPT: &str = "Press enter to get a new grade, or g to graduate...";

fn parse(line: &str) -> Command {
    if line.trim().eq_ignore_ascii_case("g") {
        Command::Graduate
    } else {
        Command::Next
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = Config::default();
    let average = Arc::new(AverageSubscriber::new());
    let current = Arc::new(LatestValueSubscriber::new());
    let log = Arc::new(LogWriter::new());

    let subject = Subject::builder(cfg.clone())
        .with_subscriber(&average)
        .with_subscriber(&current)
        .with_subscriber(&log)
        .build();

    let token = CancellationToken::new();
    let signals = tokio::spawn(cancel_on_signal(token.clone()));

    // First grade is produced right away, then one per line of input.
    let lines = stdin_commands();
    let triggers = stream::once(async { Command::Next }).chain(lines).boxed();

    let seed: u64 = rand::random();
    let summary = Driver::new(subject, RandomGrades::from_config(&cfg, seed))
        .run_with(triggers, token.clone(), |report| {
            println!("{average}");
            println!("{current}");
            for failure in &report.failures {
                eprintln!("warning: {failure}");
            }
            println!("{PROMPT}");
        })
        .await;

    token.cancel();
    signals.await??;

    println!("No more grades. You have graduated!");
    println!("({} grades, seed {seed})", summary.passes);
    Ok(())
}

/// Maps stdin lines to commands; ends on EOF or read error.
///
/// Lines are read on a plain OS thread. A blocked read there does not keep
/// the process alive once `main` returns, so Ctrl-C exits promptly.
fn stdin_commands() -> BoxStream<'static, Command> {
    let (tx, rx) = mpsc::channel(8);
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.blocking_send(parse(&line)).is_err() {
                break;
            }
        }
    });

    stream::unfold(rx, |mut rx| async move { rx.recv().await.map(|cmd| (cmd, rx)) }).boxed()
}
