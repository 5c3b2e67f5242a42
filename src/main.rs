use bevy::prelude::*;

use rail_runner::{GamePlugin, RunnerConfig};

/// Outcome of config loading, logged once the log subscriber exists.
#[derive(Resource, Debug, Default)]
struct ConfigLoadReport {
    used: Vec<String>,
    errors: Vec<String>,
    warnings: Vec<String>,
}

fn log_config_report(report: Res<ConfigLoadReport>) {
    if report.used.is_empty() {
        warn!(target: "config", "no config file loaded; running on defaults");
    } else {
        info!(target: "config", "config loaded from {}", report.used.join(", "));
    }
    for e in &report.errors {
        warn!(target: "config", "{e}");
    }
    for w in &report.warnings {
        warn!(target: "config", "validation: {w}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::{Path, PathBuf};

    use anyhow::{bail, Result};
    use clap::Parser;

    use super::ConfigLoadReport;
    use rail_runner::RunnerConfig;

    const BASE_CONFIG: &str = "assets/config/runner.ron";
    const LOCAL_CONFIG: &str = "assets/config/runner.local.ron";

    #[derive(Parser, Debug)]
    #[command(about = "Three-lane endless runner", version)]
    pub struct Args {
        /// Extra RON layer applied over the base and local config.
        #[arg(long, env = "RUNNER_CONFIG")]
        pub config: Option<PathBuf>,
        /// Fixed RNG seed for a reproducible obstacle sequence.
        #[arg(long)]
        pub seed: Option<u64>,
    }

    pub fn load(args: &Args) -> Result<(RunnerConfig, ConfigLoadReport)> {
        let mut layers: Vec<PathBuf> = vec![BASE_CONFIG.into()];
        if Path::new(LOCAL_CONFIG).exists() {
            layers.push(LOCAL_CONFIG.into());
        }
        if let Some(path) = &args.config {
            if !path.exists() {
                bail!("config override {} does not exist", path.display());
            }
            layers.push(path.clone());
        }
        let (mut cfg, used, errors) = RunnerConfig::load_layered(&layers);
        if args.seed.is_some() {
            cfg.seed = args.seed;
        }
        let warnings = cfg.validate();
        Ok((
            cfg,
            ConfigLoadReport {
                used,
                errors,
                warnings,
            },
        ))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_config() -> anyhow::Result<(RunnerConfig, ConfigLoadReport)> {
    use clap::Parser;
    let args = native::Args::parse();
    native::load(&args)
}

#[cfg(target_arch = "wasm32")]
fn load_config() -> anyhow::Result<(RunnerConfig, ConfigLoadReport)> {
    use anyhow::Context;
    console_error_panic_hook::set_once();
    let cfg: RunnerConfig = ron::from_str(include_str!("../assets/config/runner.ron"))
        .context("parse embedded runner.ron")?;
    let warnings = cfg.validate();
    Ok((
        cfg,
        ConfigLoadReport {
            used: vec!["embedded runner.ron".into()],
            errors: Vec::new(),
            warnings,
        },
    ))
}

fn main() -> anyhow::Result<()> {
    let (cfg, report) = load_config()?;

    App::new()
        .insert_resource(cfg.clone())
        .insert_resource(report)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: cfg.window.title.clone(),
                resolution: (cfg.window.width, cfg.window.height).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(GamePlugin)
        .add_systems(Startup, log_config_report)
        .run();
    Ok(())
}
