//! Morphbot - articulated robot viewer
//!
//! Shows a robot that morphs between a dinosaur and a car.
//!
//! Usage:
//!   morphbot [--config <path>] [--auto] [--wireframe] [--describe]

use anyhow::{Context, Result};
use clap::Parser;
use morphbot_robot::Robot;
use morphbot_viewer::config::DEFAULT_CONFIG_PATH;
use morphbot_viewer::{ViewerApp, ViewerConfig};
use std::path::PathBuf;
use winit::event_loop::{ControlFlow, EventLoop};

#[derive(Parser)]
#[command(name = "morphbot")]
#[command(about = "Morphbot - view and morph an articulated dinosaur/car robot")]
struct Args {
    /// Path to the viewer config file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Start with auto-stepping enabled
    #[arg(long)]
    auto: bool,

    /// Start in outline-only mode
    #[arg(long)]
    wireframe: bool,

    /// Print the model hierarchy and exit
    #[arg(long)]
    describe: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    morphbot_core::init_logging();

    let mut config = ViewerConfig::load(&args.config)
        .with_context(|| format!("Failed to load config {}", args.config.display()))?;
    config.animation.auto_step |= args.auto;
    config.render.wireframe |= args.wireframe;

    let mut robot = Robot::new();
    if args.describe {
        print!("{}", robot.describe());
        return Ok(());
    }

    if config.render.wireframe {
        robot.change_fill();
    }
    if config.render.joint_markers {
        robot.set_joint_markers(true);
    }

    println!("Controls:");
    println!("  Z X C V B N - Rotate root, right/left shoulder, left/right leg, tail (hold)");
    println!("  A           - Toggle auto morph");
    println!("  R           - Switch dinosaur/car direction");
    println!("  F           - Toggle fill");
    println!("  J           - Toggle joint markers");
    println!("  Arrows      - Pan camera");
    println!("  Left drag   - Rotate camera");
    println!("  Escape      - Exit");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = ViewerApp::new(config, robot);
    event_loop.run_app(&mut app)?;

    Ok(())
}
