use std::time::Duration;

use color_eyre::Result;
use log::{debug, error, info};
use merge_snake::{
    arena::{
        models::{
            Config,
            InputEvent,
            Settings,
            Snapshot,
            SpeedChange,
            Status,
        },
        types::Direction,
    },
    sim::{game::PLAYER_HUE, Simulation},
};
use tokio::{
    sync::{
        mpsc::{self, error::TryRecvError},
        watch,
    },
    time::{self, Instant, MissedTickBehavior},
};
use warp::{
    http::{Method, StatusCode},
    Filter,
};

const NAME: &str = env!("CARGO_PKG_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");
const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");

const FRAME: Duration = Duration::from_millis(16);
const COMMAND_BUFFER: usize = 64;

#[derive(Debug)]
enum Command {
    Turn(Direction),
    Speed(f64),
    Reset(Config),
}

#[derive(Debug)]
struct SimulationGone;
impl warp::reject::Reject for SimulationGone {}

/// Owns the simulation for the lifetime of the server. Commands are drained
/// once per frame, before the frame is simulated.
async fn run_simulation(
    mut sim: Simulation,
    mut commands: mpsc::Receiver<Command>,
    snapshots: watch::Sender<Snapshot>,
) {
    let mut frames = time::interval(FRAME);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut last = Instant::now();

    loop {
        frames.tick().await;

        loop {
            match commands.try_recv() {
                Ok(Command::Turn(direction)) => {
                    if !sim.apply_input(direction) {
                        debug!("ignoring turn {direction}");
                    }
                }
                Ok(Command::Speed(rate)) => {
                    let rate = sim.set_max_tick_rate(rate);
                    info!("max tick rate is now {rate}");
                }
                Ok(Command::Reset(config)) => {
                    info!("resetting arena with {config:?}");
                    sim.reset(config);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    info!("command channel closed, stopping simulation");
                    return;
                }
            }
        }

        let now = Instant::now();
        sim.advance((now - last).as_secs_f64());
        last = now;

        if snapshots.send(sim.snapshot()).is_err() {
            info!("nobody is watching, stopping simulation");
            return;
        }
    }
}

async fn send(
    commands: mpsc::Sender<Command>,
    command: Command,
) -> Result<StatusCode, warp::Rejection> {
    commands.send(command).await.map_err(|e| {
        error!("failed to reach the simulation: {e}");
        warp::reject::custom(SimulationGone)
    })?;
    Ok(StatusCode::ACCEPTED)
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    pretty_env_logger::init();

    #[cfg(debug_assertions)]
    info!("running in debug mode");

    #[cfg(not(debug_assertions))]
    info!("running in release mode");

    let sim = Simulation::new(Config::default());
    let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
    let (snapshot_tx, snapshot_rx) = watch::channel(sim.snapshot());
    tokio::spawn(run_simulation(sim, command_rx, snapshot_tx));

    let with_commands = warp::any().map(move || command_tx.clone());
    let with_snapshots = warp::any().map(move || snapshot_rx.clone());

    let cors = warp::cors()
        .allow_method(Method::GET)
        .allow_method(Method::POST)
        .allow_header("content-type")
        .allow_any_origin();

    let logging = warp::log(NAME);

    let healthz = warp::get().and(warp::path::end()).map(|| {
        warp::reply::json(&Status {
            author:     AUTHOR.to_owned(),
            version:    VERSION.to_owned(),
            player_hue: PLAYER_HUE,
        })
    });

    let state = warp::get()
        .and(warp::path("state"))
        .and(warp::path::end())
        .and(with_snapshots)
        .map(|snapshots: watch::Receiver<Snapshot>| {
            let snapshot = snapshots.borrow().clone();
            warp::reply::json(&snapshot)
        });

    let input = warp::post()
        .and(warp::path("input"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and(with_commands.clone())
        .and_then(
            |event: InputEvent, commands: mpsc::Sender<Command>| async move {
                match event.direction() {
                    Some(direction) => {
                        send(commands, Command::Turn(direction)).await
                    }
                    // unknown keys and tiny swipes are not errors
                    None => Ok(StatusCode::NO_CONTENT),
                }
            },
        );

    let speed = warp::post()
        .and(warp::path("speed"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and(with_commands.clone())
        .and_then(
            |change: SpeedChange, commands: mpsc::Sender<Command>| async move {
                send(commands, Command::Speed(change.max_tick_rate)).await
            },
        );

    let reset = warp::post()
        .and(warp::path("reset"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and(with_commands)
        .and_then(
            |settings: Settings, commands: mpsc::Sender<Command>| async move {
                send(commands, Command::Reset(Config::from(settings))).await
            },
        );

    let api = healthz
        .or(state)
        .or(input)
        .or(speed)
        .or(reset)
        .with(cors)
        .with(logging);

    warp::serve(api).run(([0, 0, 0, 0], 6502)).await;

    Ok(())
}
