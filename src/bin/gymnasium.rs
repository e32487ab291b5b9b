//! Headless soak run: the player is driven by the same hunter the bots use,
//! so a whole arena can be watched from the logs.

use std::env;

use color_eyre::{eyre::WrapErr, Result};
use log::info;
use merge_snake::{
    arena::{models::Config, utils::level_label},
    sim::{Simulation, PLAYER, SIM_TICK},
    strategies::{Hunter, Strategy},
};
use rand::{rngs::StdRng, SeedableRng};

struct PlayOptions {
    seed:    u64,
    seconds: u64,
}

fn parse_options() -> Result<PlayOptions> {
    let mut args = env::args().skip(1);

    let seed = args
        .next()
        .map(|arg| {
            arg.parse::<u64>()
                .wrap_err_with(|| format!("bad seed {arg:?}"))
        })
        .transpose()?
        .unwrap_or(0);

    let seconds = args
        .next()
        .map(|arg| {
            arg.parse::<u64>()
                .wrap_err_with(|| format!("bad duration {arg:?}"))
        })
        .transpose()?
        .unwrap_or(120);

    Ok(PlayOptions { seed, seconds })
}

fn main() -> Result<()> {
    color_eyre::install()?;
    pretty_env_logger::init();

    let options = parse_options()?;
    info!(
        "soaking seed {} for {} simulated seconds",
        options.seed, options.seconds
    );

    let mut sim = Simulation::with_seed(Config::default(), options.seed);
    let mut autopilot = StdRng::seed_from_u64(options.seed.wrapping_add(1));

    let frames = options.seconds * 60;
    for frame in 0..frames {
        let game = sim.game();
        if game.is_over() {
            break;
        }

        let direction =
            Hunter.get_movement(&game.world, PLAYER, &mut autopilot);
        sim.apply_input(direction);
        sim.advance(SIM_TICK);

        if frame % 600 == 0 {
            let stats = sim.snapshot().stats;
            info!(
                "t={:>4}s score {} max {} length {} bots {}",
                frame / 60,
                stats.score,
                stats.max_level,
                stats.length,
                stats.bots
            );
        }
    }

    let game = sim.game();
    println!("{game}");

    let player = game.player();
    println!(
        "finished after {:.1}s: {}",
        game.clock,
        game.outcome
            .map_or_else(|| "still alive".to_owned(), |cause| cause.to_string())
    );
    println!(
        "score {}, max level {}, length {}",
        player.score,
        level_label(player.max_level),
        player.len()
    );

    Ok(())
}
