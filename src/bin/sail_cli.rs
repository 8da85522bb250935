use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use log::error;
use sail_agent::engine::bot::Bot;
use sail_agent::engine::mask::LandMask;
use sail_agent::engine::simulator::{self, Simulator};
use sail_agent::parsers::course::CourseConfig;

/// Sails the bot around a course with a simple kinematic boat model.
#[derive(Debug, Parser)]
#[command(name = "sail_cli")]
struct Args {
    /// Course file (TOML). Defaults to the built-in round-the-world course.
    #[arg(long)]
    course: Option<PathBuf>,

    /// xz-compressed land mask. Without one the whole world is sea.
    #[arg(long)]
    mask: Option<PathBuf>,

    /// Time step in hours
    #[arg(long, default_value_t = 1.0)]
    dt: f64,

    /// Boat speed at full sail, km/h
    #[arg(long, default_value_t = 30.0)]
    hull_speed: f64,

    /// Give up after this many steps
    #[arg(long, default_value_t = 20_000)]
    max_steps: usize,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<bool, Box<dyn std::error::Error>> {
    println!("--- Sail Agent CLI Debugger ---");

    let config = match &args.course {
        Some(path) => CourseConfig::load(path)?,
        None => CourseConfig::default(),
    };
    let land_mask = match &args.mask {
        Some(path) => LandMask::load(path)?,
        None => LandMask::new(),
    };

    let start = config.start;
    let mut bot = Bot::new(config)?;
    println!("Team: {} ({} checkpoints)", bot.team, bot.route.len());

    let mut sim = Simulator::new(start, args.hull_speed, args.dt, chrono::Utc::now());
    let departure = sim.state.time;
    let start_time = Instant::now();
    let mut reached = 0;

    for step in 1..=args.max_steps {
        sim.step(&mut bot, &simulator::calm, &land_mask);

        if bot.route.reached_count() > reached {
            reached = bot.route.reached_count();
            println!(
                "Step {}: checkpoint {}/{} at Lat: {:.4}, Lon: {:.4}, Elapsed: {:.1}h",
                step,
                reached,
                bot.route.len(),
                sim.state.position.lat,
                sim.state.position.lon,
                sim.state.elapsed_time
            );
        }
        if bot.is_finished() {
            break;
        }
    }

    println!("\nCalculation time: {:?}", start_time.elapsed());
    if bot.is_finished() {
        let days = (sim.state.time - departure).num_hours() as f64 / 24.0;
        println!("Finished in {:.1} days ({})", days, sim.state.time.format("%Y-%m-%d %H:%M UTC"));
        Ok(true)
    } else {
        println!(
            "Gave up after {} steps with {}/{} checkpoints",
            args.max_steps,
            bot.route.reached_count(),
            bot.route.len()
        );
        Ok(false)
    }
}
