//! Enemy AI State Machine
//!
//! This example drives a small squad of enemies through a shared
//! Idle -> Chase -> Attack graph loaded from a JSON definition.
//!
//! Key concepts:
//! - One graph shared by many controllers
//! - Actions and decisions registered by name
//! - The host game loop ticks every controller once per frame
//!
//! Run with: RUST_LOG=stategraph=debug cargo run --example enemy_ai

use std::sync::Arc;
use stategraph::category;
use stategraph::controller::Controller;
use stategraph::core::{Action, Decision};
use stategraph::definition::{GraphDefinition, Registry};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub struct EnemyData {
    name: &'static str,
    position: i32,
    sight: i32,
    reach: i32,
    hits: u32,
}

category! {
    pub Enemy => EnemyData
}

const PLAYER_POSITION: i32 = 0;

const DEFINITION: &str = r#"{
    "category": "Enemy",
    "initial": "Idle",
    "states": [
        { "name": "Idle",
          "transitions": [ { "decision": "sees_player", "on_true": "Chase", "on_false": "Idle" } ] },
        { "name": "Chase",
          "actions": ["approach"],
          "transitions": [ { "decision": "in_range", "on_true": "Attack", "on_false": "Chase" } ] },
        { "name": "Attack",
          "actions": ["strike"],
          "transitions": [ { "decision": "in_range", "on_true": "Attack", "on_false": "Chase" } ] }
    ]
}"#;

fn distance(e: &EnemyData) -> i32 {
    (e.position - PLAYER_POSITION).abs()
}

fn registry() -> Registry<Enemy> {
    Registry::<Enemy>::new()
        .decision(
            "sees_player",
            Decision::new(|e: &EnemyData| distance(e) <= e.sight),
        )
        .decision(
            "in_range",
            Decision::new(|e: &EnemyData| distance(e) <= e.reach),
        )
        .action(
            "approach",
            Action::new(|e: &mut EnemyData| e.position -= e.position.signum()),
        )
        .action("strike", Action::new(|e: &mut EnemyData| e.hits += 1))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Enemy AI State Machine ===\n");

    let graph = GraphDefinition::from_json(DEFINITION)
        .and_then(|definition| definition.assemble(&registry()))
        .map(Arc::new)
        .unwrap_or_else(|e| panic!("invalid enemy graph: {e}"));

    let squad = [("grunt", 6, 4, 1), ("sniper", 9, 12, 8), ("sleeper", 30, 2, 1)];
    let mut enemies: Vec<Controller<Enemy>> = squad
        .into_iter()
        .map(|(name, position, sight, reach)| {
            Controller::new(
                Arc::clone(&graph),
                EnemyData {
                    name,
                    position,
                    sight,
                    reach,
                    hits: 0,
                },
            )
        })
        .collect();

    for frame in 1..=8 {
        for enemy in &mut enemies {
            enemy.tick();
        }
        let summary: Vec<String> = enemies
            .iter()
            .map(|e| format!("{}={}", e.data().name, e.current_state_name()))
            .collect();
        println!("frame {frame}: {}", summary.join(", "));
    }

    println!();
    for enemy in &enemies {
        println!(
            "{:>8}: {} hits, path {:?}",
            enemy.data().name,
            enemy.data().hits,
            enemy.history().get_path()
        );
    }

    println!("\n=== Example Complete ===");
}
