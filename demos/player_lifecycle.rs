//! Player Lifecycle
//!
//! This example demonstrates Enter/Update/Exit callbacks and the
//! illegal-transition error.
//!
//! Key concepts:
//! - Callbacks fire Exit-then-Enter on every transition
//! - Update callbacks run only for the current state
//! - Unsubscribing by handle
//! - Exit callbacks still run when a trigger is illegal
//!
//! Run with: RUST_LOG=tickstate=debug cargo run --example player_lifecycle

use tickstate::{state_enum, StateMachine, Timing};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

state_enum! {
    enum Player {
        Idle,
        Running,
        Paused,
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
enum Input {
    Start,
    Pause,
    Resume,
    Stop,
}

fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tickstate=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    println!("=== Player Lifecycle Example ===\n");

    let mut player: StateMachine<Player, Input> = StateMachine::with_default()?;
    player.add_transition(Player::Idle, Player::Running, Input::Start)?;
    player.add_transition(Player::Running, Player::Paused, Input::Pause)?;
    player.add_transition(Player::Paused, Player::Running, Input::Resume)?;
    player.add_transition(Player::Running, Player::Idle, Input::Stop)?;

    for state in [Player::Idle, Player::Running, Player::Paused] {
        player.subscribe(&state, Timing::Enter, move || println!("  enter {state:?}"))?;
        player.subscribe(&state, Timing::Exit, move || println!("  exit  {state:?}"))?;
    }
    let footsteps =
        player.subscribe(&Player::Running, Timing::Update, || println!("  step"))?;

    for input in [Input::Start, Input::Pause, Input::Resume] {
        println!("{input:?}:");
        player.execute(input)?;
        player.on_update();
    }

    println!("\nSilencing footsteps");
    player.unsubscribe(&Player::Running, Timing::Update, footsteps)?;
    player.on_update();

    println!("\nStop:");
    player.execute(Input::Stop)?;

    println!("\nPause while idle:");
    match player.execute(Input::Pause) {
        Ok(()) => println!("  unexpected success"),
        Err(e) => println!("  rejected: {e}"),
    }
    println!("Still in {:?}", player.current());

    println!("\n=== Example Complete ===");
    Ok(())
}
