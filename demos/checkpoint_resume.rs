//! Checkpoint and Resume
//!
//! This example demonstrates saving a machine's data and restoring it into
//! a fresh machine that has its own callbacks.
//!
//! Key concepts:
//! - Checkpoints hold states, current state and transitions
//! - Callbacks are never serialized
//! - JSON for inspection, binary for compact storage
//!
//! Run with: cargo run --example checkpoint_resume

use tickstate::{state_enum, Checkpoint, StateMachine, Timing};

state_enum! {
    enum Quest {
        NotStarted,
        InProgress,
        Completed,
    }
}

fn build_quest() -> Result<StateMachine<Quest, String>, Box<dyn std::error::Error>> {
    let mut quest = StateMachine::with_default()?;
    quest.add_transition(Quest::NotStarted, Quest::InProgress, "accept".to_string())?;
    quest.add_transition(Quest::InProgress, Quest::Completed, "turn_in".to_string())?;
    Ok(quest)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Checkpoint and Resume Example ===\n");

    let mut quest = build_quest()?;
    quest.execute("accept".to_string())?;
    println!("Quest state before save: {:?}", quest.current());

    let checkpoint = quest.checkpoint();
    let json = checkpoint.to_json()?;
    println!("\nJSON checkpoint:\n{json}");

    let bytes = checkpoint.to_binary()?;
    println!("\nBinary checkpoint: {} bytes", bytes.len());

    // Simulate a restart: new machine, fresh callbacks, restored data.
    let mut resumed: StateMachine<Quest, String> = StateMachine::with_default()?;
    resumed.subscribe(&Quest::Completed, Timing::Enter, || {
        println!("  Reward granted!")
    })?;
    resumed.restore(&Checkpoint::from_binary(&bytes)?)?;
    println!("\nResumed in state: {:?}", resumed.current());

    resumed.execute("turn_in".to_string())?;
    println!("Final state: {:?}", resumed.current());

    println!("\n=== Example Complete ===");
    Ok(())
}
