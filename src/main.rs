//! Parachuter entry point
//!
//! Headless driver: runs a scripted flight through the simulation core at
//! the fixed tick rate and logs what the presentation layer would draw.
//!
//! Usage: `parachuter [SETTINGS.json] [--seed N] [--ticks N] [--dump-settings]`

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use parachuter::SimSettings;
use parachuter::consts::FRAME_RATE;
use parachuter::sim::{
    BoundaryEvent, PlotColor, Quantity, Session, TickInput, VisualState, tick,
};

/// Thirty seconds of frames
const DEFAULT_TICKS: u64 = FRAME_RATE as u64 * 30;

#[derive(Parser, Debug)]
#[command(name = "parachuter")]
#[command(about = "Headless parachuter kinematics simulation")]
#[command(version)]
struct Args {
    /// JSON settings file (defaults are used for missing fields)
    settings: Option<PathBuf>,

    /// Seed for the quiz color shuffle
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// Maximum ticks to simulate before taking the quiz
    #[arg(long, default_value_t = DEFAULT_TICKS)]
    ticks: u64,

    /// Print the effective settings as JSON and exit
    #[arg(long)]
    dump_settings: bool,
}

/// Scripted controls: fall, burn up, cut thrust, open the chute, drift down
fn scripted_input(tick_index: u64) -> TickInput {
    match tick_index {
        0..60 => TickInput::default(),
        60..100 => TickInput {
            thrust_up: true,
            ..Default::default()
        },
        100..140 => TickInput {
            thrust_down: true,
            ..Default::default()
        },
        140 => TickInput {
            parachute: true,
            ..Default::default()
        },
        _ => TickInput::default(),
    }
}

fn run(session: &mut Session, max_ticks: u64) {
    let dt = session.settings.dt;
    let mut last_visual = session.visual;
    for i in 0..max_ticks {
        tick(session, &scripted_input(i), dt);

        if session.visual != last_visual {
            log::info!(
                "tick {:>4}: sprite {} (y={:.1}, v={:.2})",
                session.time_ticks,
                session.visual.as_str(),
                session.actor.y(),
                session.actor.velocity
            );
            last_visual = session.visual;
        }
        if session.last_boundary == BoundaryEvent::Landed
            && i > 140
            && session.visual == VisualState::Normal
        {
            log::info!("Landed after {} ticks", session.time_ticks);
            break;
        }
    }

    if let Some(sample) = session.telemetry().latest() {
        log::info!(
            "Plot: {}/{} columns, latest rows d={:.1} v={:.1} a={:.1}",
            session.telemetry().len(),
            session.telemetry().capacity(),
            sample.displacement,
            sample.velocity,
            sample.net_acceleration
        );
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Parachuter (headless) starting...");

    let args = Args::parse();
    let settings = match &args.settings {
        Some(path) => SimSettings::load(path)?,
        None => SimSettings::default(),
    };
    if args.dump_settings {
        println!("{}", settings.to_json()?);
        return Ok(());
    }

    let mut session = Session::new(settings, args.seed)?;
    run(&mut session, args.ticks);

    // Take the quiz with a naive guess
    session.open_quiz();
    for (quantity, color) in Quantity::ALL.into_iter().zip(PlotColor::ALL) {
        session.select(quantity, color);
    }
    if let Some(verdicts) = session.submit_quiz() {
        for v in verdicts {
            println!(
                "{:<14} guessed {:<5} actual {:<5} {}",
                v.quantity.label(),
                v.chosen.as_str(),
                v.correct.as_str(),
                if v.is_correct() { "✓" } else { "✗" }
            );
        }
    }
    session.play_again();
    Ok(())
}
