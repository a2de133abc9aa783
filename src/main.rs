use std::path::Path;
use std::time::Duration;

use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use plains_core::SimulationPlugin;
use plains_core::content::{ContentPlugin, load_all_content, validate_content};
use plains_core::core::RunConfig;
use plains_core::debug::capture_snapshot;
use plains_core::level::LevelFlowPlugin;
use plains_core::movement::{InputAdapterPlugin, RawControls};

const TICK_HZ: f64 = 60.0;

/// Held controls for a number of ticks.
struct ScriptStep {
    ticks: u32,
    controls: RawControls,
}

fn step(ticks: u32, left: bool, right: bool, jump: bool, attack: bool) -> ScriptStep {
    ScriptStep {
        ticks,
        controls: RawControls {
            left,
            right,
            jump,
            attack,
        },
    }
}

/// Settle, walk right, double jump, swing a few times, walk back.
fn demo_script() -> Vec<ScriptStep> {
    let mut script = vec![
        step(30, false, false, false, false),
        step(60, false, true, false, false),
        step(1, false, true, true, false),
        step(8, false, true, false, false),
        step(1, false, true, true, false),
        step(40, false, true, false, false),
    ];
    for _ in 0..4 {
        script.push(step(1, false, false, false, true));
        script.push(step(24, false, false, false, false));
    }
    script.push(step(90, true, false, false, false));
    script.push(step(60, false, false, false, false));
    script
}

fn main() {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, LogPlugin::default()))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / TICK_HZ,
        )));

    let (registry, defaults) = match load_all_content(Path::new("assets/data")) {
        Ok(content) => content,
        Err(errors) => {
            for e in &errors {
                error!("{}", e);
            }
            std::process::exit(1);
        }
    };
    let problems = validate_content(&registry, &defaults);
    if !problems.is_empty() {
        for problem in &problems {
            error!("{}", problem);
        }
        std::process::exit(1);
    }

    let run_config = match std::env::args().nth(1).map(|arg| arg.parse::<u64>()) {
        Some(Ok(seed)) => RunConfig { seed },
        Some(Err(e)) => {
            error!("Seed must be an unsigned integer: {}", e);
            std::process::exit(2);
        }
        None => RunConfig::default(),
    };
    info!("Run seed {}", run_config.seed);

    app.insert_resource(run_config)
        .add_plugins(SimulationPlugin)
        .add_plugins((
            ContentPlugin { registry, defaults },
            LevelFlowPlugin,
            InputAdapterPlugin { keyboard: false },
        ));
    #[cfg(feature = "dev-tools")]
    app.add_plugins(plains_core::debug::DebugPlugin);

    let script = demo_script();
    let total: u32 = script.iter().map(|s| s.ticks).sum();
    info!("Running {} scripted ticks at {} Hz", total, TICK_HZ);

    for entry in &script {
        app.world_mut().insert_resource(entry.controls);
        for _ in 0..entry.ticks {
            app.update();
        }
    }

    let snapshot = capture_snapshot(app.world_mut());
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            error!("Could not serialize snapshot: {}", e);
            std::process::exit(1);
        }
    }
}
