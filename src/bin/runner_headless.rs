//! Runs the simulation core without a window, steered by the autopilot,
//! and prints the run summary as JSON.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use bevy::log::LogPlugin;
use bevy::prelude::*;
use clap::Parser;

use rail_runner::gameplay::autopilot::Autopilot;
use rail_runner::gameplay::{FrameCommands, FrameOutcome, GameSession, RecordingHost};
use rail_runner::{ManualClock, RunnerConfig};

#[derive(Parser, Debug)]
#[command(about = "Headless Rail Runner simulation", version)]
struct Args {
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Frame limit; the run stops earlier on game over.
    #[arg(long, default_value_t = 3600)]
    frames: u64,
    #[arg(long)]
    config: Option<PathBuf>,
    /// Simulated frames per second for the wall-clock timers.
    #[arg(long, default_value_t = 60)]
    fps: u32,
    /// Issue no commands; the run ends at the first fatal obstacle.
    #[arg(long)]
    idle: bool,
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    if args.fps == 0 {
        bail!("--fps must be > 0");
    }

    // Shares the game's subscriber setup; nothing else runs in this app.
    let mut log_app = App::new();
    log_app.add_plugins(LogPlugin::default());

    let cfg = match &args.config {
        Some(path) => RunnerConfig::load_from_file(path)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("loading {}", path.display()))?,
        None => RunnerConfig::default(),
    };
    for w in cfg.validate() {
        warn!(target: "config", "validation: {w}");
    }

    let mut session = GameSession::with_seed(cfg, args.seed);
    let mut host = RecordingHost::new();
    let mut clock = ManualClock::new();
    let autopilot = Autopilot::default();
    let step = Duration::from_secs_f64(1.0 / args.fps as f64);

    session.start(&mut host);
    let mut ended = None;
    for _ in 0..args.frames {
        clock.advance(step);
        let commands = if args.idle {
            FrameCommands::default()
        } else {
            autopilot.decide(&session)
        };
        if let FrameOutcome::GameOver(summary) = session.tick(commands, &clock, &mut host) {
            ended = Some(summary);
            break;
        }
    }
    let survived = ended.is_none();
    let summary = match ended {
        Some(s) => s,
        None => session.game_over(&mut host),
    };

    let cues: BTreeMap<String, usize> = host
        .cue_histogram()
        .into_iter()
        .map(|(cue, n)| (format!("{cue:?}"), n))
        .collect();
    let report = serde_json::json!({
        "seed": args.seed,
        "frames_requested": args.frames,
        "survived": survived,
        "milestones": session.milestones(),
        "summary": summary,
        "cues": cues,
    });
    let out = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{out}");
    Ok(())
}
