//! Traffic Light State Machine
//!
//! This example demonstrates a simple cyclic state machine.
//!
//! Key concepts:
//! - Cyclic state transitions built with `cycle`
//! - Enter callbacks announcing each light
//! - Update callbacks driven by a caller-owned tick loop
//!
//! Run with: cargo run --example traffic_light

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tickstate::builder::{cycle, StateMachineBuilder};
use tickstate::state_enum;

state_enum! {
    enum TrafficLight {
        Red,
        Green,
        Yellow,
    }
}

#[derive(Clone, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
enum Signal {
    Timer,
}

fn main() {
    println!("=== Traffic Light State Machine ===\n");

    let ticks_in_state = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&ticks_in_state);

    let mut light = StateMachineBuilder::<TrafficLight, Signal>::from_state_set()
        .initial_default()
        .transitions(cycle(Signal::Timer))
        .on_enter(TrafficLight::Red, || println!("  -> Red    (Stop)"))
        .on_enter(TrafficLight::Green, || println!("  -> Green  (Go!)"))
        .on_enter(TrafficLight::Yellow, || println!("  -> Yellow (Caution)"))
        .on_update(TrafficLight::Green, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .build()
        .unwrap();

    println!("Initial state: {:?}\n", light.current());

    // Six frames per light; the machine itself has no timer.
    for frame in 1..=18 {
        light.on_update();
        if frame % 6 == 0 {
            light.execute(Signal::Timer).unwrap();
        }
    }

    println!(
        "\nFrames spent green: {}",
        ticks_in_state.load(Ordering::SeqCst)
    );
    println!("Final state: {:?}", light.current());

    println!("\n=== Example Complete ===");
}
