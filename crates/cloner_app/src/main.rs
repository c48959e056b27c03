//! Terminal shell for the website cloner: submits one URL, tracks the job,
//! and writes the cloned document to stdout when it completes.

mod effects;
mod render;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use cloner_core::{update, Msg, TrackerPhase, TrackerState};
use cloner_engine::{ClientSettings, HttpJobService, TrackerHandle, TrackerSettings};
use cloner_logging::{cloner_warn, LogDestination};
use effects::EffectRunner;

struct Args {
    url: String,
    base_url: String,
    poll_interval: Duration,
}

fn main() -> anyhow::Result<()> {
    cloner_logging::initialize(LogDestination::Terminal, log::LevelFilter::Info);
    let args = parse_args()?;

    let service = HttpJobService::new(ClientSettings {
        base_url: args.base_url.clone(),
        ..ClientSettings::default()
    })
    .context("failed to construct service client")?;

    // Liveness line before submitting; the tracker itself never probes this.
    let probe_runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build probe runtime")?;
    if !probe_runtime.block_on(service.health()) {
        cloner_warn!("Cloning service at {} did not answer the health probe", args.base_url);
    }

    let tracker = TrackerHandle::new(
        Arc::new(service),
        TrackerSettings {
            poll_interval: args.poll_interval,
        },
    );
    let runner = EffectRunner::new(tracker);

    let mut state = TrackerState::new();
    state = dispatch(state, Msg::InputChanged(args.url), &runner);
    state = dispatch(state, Msg::SubmitClicked, &runner);

    if let Some(reason) = state.validation_error() {
        bail!("invalid URL: {reason}");
    }

    // Dispatch loop: drain tracker events into core messages, render on
    // change, stop once the session reaches a terminal phase.
    loop {
        while let Some(msg) = runner.try_recv() {
            state = dispatch(state, msg, &runner);
        }
        if state.phase() == TrackerPhase::Terminal {
            break;
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    if let Some(message) = state.transport_error() {
        bail!("connection error: {message}");
    }
    if let Some(snapshot) = state.latest_snapshot() {
        if snapshot.status == cloner_core::JobStatus::Failed {
            let detail = snapshot.error_detail.as_deref().unwrap_or("no detail");
            bail!("clone failed: {detail}");
        }
    }
    Ok(())
}

fn dispatch(state: TrackerState, msg: Msg, runner: &EffectRunner) -> TrackerState {
    let (mut state, effects) = update(state, msg);
    runner.run(effects);
    if state.consume_dirty() {
        render::render(&state.view());
    }
    state
}

fn parse_args() -> anyhow::Result<Args> {
    let mut url = None;
    let mut base_url = "http://localhost:8000".to_string();
    let mut poll_interval = Duration::from_secs(3);

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--base-url" => {
                base_url = args
                    .next()
                    .context("--base-url requires a value")?;
            }
            "--poll-interval" => {
                let seconds: f64 = args
                    .next()
                    .context("--poll-interval requires a value")?
                    .parse()
                    .context("--poll-interval must be a number of seconds")?;
                if seconds <= 0.0 {
                    bail!("--poll-interval must be positive");
                }
                poll_interval = Duration::from_secs_f64(seconds);
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other if other.starts_with('-') => {
                bail!("unknown flag: {other}");
            }
            other => {
                if url.replace(other.to_string()).is_some() {
                    bail!("only one URL may be submitted per run");
                }
            }
        }
    }

    let Some(url) = url else {
        print_usage();
        bail!("no URL given");
    };
    Ok(Args {
        url,
        base_url,
        poll_interval,
    })
}

fn print_usage() {
    eprintln!("usage: cloner_app [--base-url URL] [--poll-interval SECONDS] <url>");
}
