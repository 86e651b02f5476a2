mod script;

use clap::{Args, Parser, Subcommand, ValueEnum};
use glam::Vec2;
use script::{InputScript, Key};
use serde::Serialize;
use showroom_config::{Format, ShowroomConfig};
use showroom_kernel::{
    AnimationClip, AnimationPlayer, CombatEvent, CombatSim, DrivingSim, LightingSim,
};
use showroom_render::{
    DebugTextRenderer, Frame, Renderer, combat_frame, driving_frame, lighting_frame,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "showroom-cli", about = "Headless runs of the showroom demos")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML or JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct RunArgs {
    /// Number of frames to simulate
    #[arg(short, long, default_value = "600")]
    frames: u64,
    /// Fixed frame delta in seconds
    #[arg(long, default_value_t = 1.0 / 60.0, value_parser = parse_dt)]
    dt: f32,
    /// Actions held for the whole run (comma separated)
    #[arg(long, value_enum, value_delimiter = ',')]
    hold: Vec<Key>,
    /// Horizontal pointer motion per frame
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    look_x: f32,
    /// Vertical pointer motion per frame
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    look_y: f32,
    /// Scroll applied on the first frame
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    scroll: f32,
    /// Print the debug frame every n frames (0 prints only the last)
    #[arg(long, default_value = "0")]
    print_every: u64,
    /// List every draw item in printed frames
    #[arg(long)]
    items: bool,
    /// Emit a JSON summary and the final frame instead of text
    #[arg(long)]
    json: bool,
}

/// Frame deltas must be finite and non-negative.
fn parse_dt(s: &str) -> Result<f32, String> {
    let dt: f32 = s.parse().map_err(|e| format!("{e}"))?;
    if !dt.is_finite() || dt < 0.0 {
        return Err(format!("dt must be a finite value >= 0, got {s}"));
    }
    Ok(dt)
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and default tuning
    Info,
    /// Run the driving demo
    Drive {
        #[command(flatten)]
        run: RunArgs,
    },
    /// Run the combat demo
    Combat {
        #[command(flatten)]
        run: RunArgs,
        /// Spawn seed (overrides the configuration)
        #[arg(short, long)]
        seed: Option<u64>,
        /// Tap shoot every n frames
        #[arg(long)]
        fire_every: Option<u64>,
    },
    /// Run the instanced lighting demo
    Lights {
        #[command(flatten)]
        run: RunArgs,
    },
    /// Configuration utilities
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective configuration
    Dump {
        #[arg(long, value_enum, default_value = "yaml")]
        format: DumpFormat,
    },
    /// Load and validate a configuration file
    Check { path: PathBuf },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DumpFormat {
    Yaml,
    Json,
}

impl From<DumpFormat> for Format {
    fn from(f: DumpFormat) -> Self {
        match f {
            DumpFormat::Yaml => Format::Yaml,
            DumpFormat::Json => Format::Json,
        }
    }
}

#[derive(Serialize)]
struct RunSummary<S: Serialize> {
    demo: &'static str,
    frames: u64,
    dt: f32,
    state: S,
    frame: Frame,
}

#[derive(Serialize)]
struct DriveState {
    position: [f32; 3],
    heading: f32,
    speed: f32,
    camera_yaw: f32,
}

#[derive(Serialize)]
struct CombatState {
    seed: u64,
    player: [f32; 3],
    yaw: f32,
    animation: String,
    clip_switches: u64,
    shots_fired: u64,
    kills: u64,
    projectiles: usize,
    targets: usize,
    spawned: u64,
    expired: u64,
}

#[derive(Serialize)]
struct LightsState {
    elapsed: f32,
    wave_time: f32,
    instances: usize,
    light_positions: Vec<[f32; 3]>,
}

/// Counts clip switches for the run summary.
#[derive(Default)]
struct CountingPlayer {
    switches: u64,
}

impl AnimationPlayer for CountingPlayer {
    fn play(&mut self, clip: &AnimationClip) {
        tracing::debug!(clip = %clip.name, "animation switched");
        self.switches += 1;
    }
}

/// Shared frame loop. `step(Some(i))` advances frame `i` and builds its
/// frame; `step(None)` only builds one.
fn run_loop(run: &RunArgs, mut step: impl FnMut(Option<u64>) -> Frame) -> Frame {
    let mut renderer = if run.items {
        DebugTextRenderer::verbose()
    } else {
        DebugTextRenderer::new()
    };
    let mut last = None;
    for i in 0..run.frames {
        let frame = step(Some(i));
        let scheduled = run.print_every > 0 && (i + 1) % run.print_every == 0;
        if scheduled && !run.json {
            print!("{}", renderer.render(&frame));
        }
        last = Some(frame);
    }
    let frame = last.unwrap_or_else(|| step(None));
    if !run.json && run.print_every == 0 {
        print!("{}", renderer.render(&frame));
    }
    frame
}

fn report<S: Serialize>(
    run: &RunArgs,
    demo: &'static str,
    state: S,
    frame: Frame,
) -> anyhow::Result<()> {
    if run.json {
        let summary = RunSummary {
            demo,
            frames: run.frames,
            dt: run.dt,
            state,
            frame,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("--- {demo} after {} frames at dt={:.4} ---", run.frames, run.dt);
        let value = serde_json::to_value(&state)?;
        if let Some(map) = value.as_object() {
            for (k, v) in map {
                println!("{k}: {v}");
            }
        }
    }
    Ok(())
}

fn script_for(run: &RunArgs, fire_every: Option<u64>) -> InputScript {
    InputScript::new(
        &run.hold,
        Vec2::new(run.look_x, run.look_y),
        run.scroll,
        fire_every,
    )
}

fn drive(config: &ShowroomConfig, run: &RunArgs) -> anyhow::Result<()> {
    let mut sim = DrivingSim::new(config.driving, config.chase);
    let script = script_for(run, None);
    let frame = run_loop(run, |i| {
        if let Some(i) = i {
            sim.step(&script.snapshot(i), run.dt);
        }
        driving_frame(&sim)
    });
    let v = sim.vehicle();
    let state = DriveState {
        position: v.position.to_array(),
        heading: v.heading,
        speed: v.speed,
        camera_yaw: sim.camera().yaw,
    };
    report(run, "driving", state, frame)
}

fn combat(
    config: &ShowroomConfig,
    run: &RunArgs,
    seed: u64,
    fire_every: Option<u64>,
) -> anyhow::Result<()> {
    let mut sim = CombatSim::new(config.combat, config.orbit, config.animation_registry(), seed);
    let mut player = CountingPlayer::default();
    let (mut spawned, mut expired) = (0u64, 0u64);
    let script = script_for(run, fire_every);
    let frame = run_loop(run, |i| {
        if let Some(i) = i {
            let step = sim.step_and_play(&script.snapshot(i), run.dt, &mut player);
            for event in &step.events {
                match event {
                    CombatEvent::Spawned { .. } => spawned += 1,
                    CombatEvent::Expired { .. } => expired += 1,
                    _ => {}
                }
            }
        }
        combat_frame(&sim)
    });
    let world = sim.world();
    let state = CombatState {
        seed,
        player: sim.player().position.to_array(),
        yaw: sim.player().yaw,
        animation: sim.animation().to_string(),
        clip_switches: player.switches,
        shots_fired: world.shots_fired(),
        kills: world.kills(),
        projectiles: world.projectiles().len(),
        targets: world.targets().len(),
        spawned,
        expired,
    };
    report(run, "combat", state, frame)
}

fn lights(config: &ShowroomConfig, run: &RunArgs) -> anyhow::Result<()> {
    let mut sim = LightingSim::new(config.lighting);
    let script = script_for(run, None);
    let frame = run_loop(run, |i| {
        if let Some(i) = i {
            sim.step(&script.snapshot(i), run.dt);
        }
        lighting_frame(&sim)
    });
    let state = LightsState {
        elapsed: sim.elapsed(),
        wave_time: sim.wave_time(),
        instances: sim.instances().len(),
        light_positions: frame
            .lighting
            .points
            .iter()
            .map(|l| l.position.to_array())
            .collect(),
    };
    report(run, "lighting", state, frame)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let config = ShowroomConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Info => {
            println!("showroom-cli v{}", env!("CARGO_PKG_VERSION"));
            println!(
                "driving: max_speed={} bound={}",
                config.driving.max_speed, config.driving.bound
            );
            println!(
                "combat: spawn_interval={}s hit_distance={} seed={}",
                config.combat.spawn_interval, config.combat.hit_distance, config.seed
            );
            println!(
                "lighting: {}x{} field",
                config.lighting.grid, config.lighting.grid
            );
            println!("animations: {} clips", config.animation_registry().len());
        }
        Commands::Drive { run } => drive(&config, &run)?,
        Commands::Combat {
            run,
            seed,
            fire_every,
        } => combat(&config, &run, seed.unwrap_or(config.seed), fire_every)?,
        Commands::Lights { run } => lights(&config, &run)?,
        Commands::Config { action } => match action {
            ConfigCommand::Dump { format } => print!("{}", config.to_text(format.into())?),
            ConfigCommand::Check { path } => {
                let checked = ShowroomConfig::load(&path)?;
                let missing = checked.animation_registry().missing();
                println!("{}: ok", path.display());
                if !missing.is_empty() {
                    println!("animations without a clip: {missing:?}");
                }
            }
        },
    }

    Ok(())
}
