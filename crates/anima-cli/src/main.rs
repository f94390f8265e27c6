//! `anima` – agent-simulation driver.
//!
//! This binary is the entry point for a simulation run.  It:
//!
//! 1. Loads `anima.toml` (writing a default one on first run) and applies
//!    `ANIMA_*` environment overrides.
//! 2. Seeds a reproducible random stream and populates the world from the
//!    configured spawn points.
//! 3. Runs the tick loop: every person perceives each tick, and the first
//!    person vocalises on the configured cadence.
//! 4. Prints the grid and per-person stats, then optionally writes each
//!    mind's memory graph as JSON for the external visualiser.

mod config;

use colored::Colorize;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{error, info};

use anima_agent::{telemetry, MindParams, NameRegistry, Person, SineTract};
use anima_mind::MemoryGraph;
use anima_types::EntityKind;
use anima_world::SpatialWorld;

fn main() {
    // Structured logging via RUST_LOG; ANIMA_LOG_FORMAT=json for NDJSON.
    // User-facing output below still uses println! for UX consistency.
    telemetry::init_tracing();

    print_banner();

    // ── Configuration ─────────────────────────────────────────────────────
    let cfg = match config::load() {
        Ok(Some(cfg)) => {
            println!(
                "  Config loaded from {}",
                config::config_path().display().to_string().bold()
            );
            cfg
        }
        Ok(None) => {
            let cfg = config::Config::default();
            match config::save(&cfg) {
                Ok(()) => println!(
                    "  No config found – default written to {}",
                    config::config_path().display().to_string().bold()
                ),
                Err(e) => println!("{}: {}", "Could not write default config".red(), e),
            }
            cfg
        }
        Err(e) => {
            println!("{}: {}", "Config error".red(), e);
            println!("  Using default configuration.");
            config::Config::default()
        }
    };

    // ── World population ──────────────────────────────────────────────────
    let mut rng = ChaCha8Rng::seed_from_u64(cfg.seed);
    let mut world = SpatialWorld::new(cfg.width, cfg.height);
    let mut registry = NameRegistry::new();
    let mut population: Vec<Person> = Vec::new();

    for spawn in &cfg.spawn_points {
        match world.create_entity(spawn.x, spawn.y, EntityKind::Person) {
            Ok(id) => {
                let params = MindParams::generate(&mut rng);
                population.push(Person::new(
                    id,
                    registry.next_name(),
                    params,
                    cfg.ticks_per_hour,
                ));
            }
            Err(e) => {
                println!(
                    "  {} could not spawn at ({},{}): {}",
                    "✗".red(),
                    spawn.x,
                    spawn.y,
                    e
                );
            }
        }
    }

    println!(
        "\n  {} person(s) in a {}×{} world, seed {}, {} tick(s)\n",
        population.len().to_string().bold(),
        cfg.width,
        cfg.height,
        cfg.seed,
        cfg.ticks,
    );
    println!("{}", world.render());

    // ── Tick loop ─────────────────────────────────────────────────────────
    let mut tract = SineTract::default();
    for tick in 0..cfg.ticks {
        if cfg.utter_every > 0 && tick % cfg.utter_every == 0 {
            if let Some(speaker) = population.first_mut() {
                match speaker.act(&mut world, &mut tract, &mut rng) {
                    Ok(sound) => info!(tick, speaker = %speaker, %sound, "utterance"),
                    Err(e) => error!(tick, speaker = %speaker, %e, "vocalisation failed"),
                }
            }
        }
        for person in &mut population {
            person.perceive(&world, &mut rng);
        }
    }

    // ── Report ────────────────────────────────────────────────────────────
    println!("{}", world.render());
    for person in &population {
        println!("{}", person.stats(&world).cyan());
        println!();
    }

    if !cfg.graph_path.is_empty() {
        export_graphs(&population, &cfg.graph_path);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Graph export
// ─────────────────────────────────────────────────────────────────────────────

/// Write every person's memory graph to `<path>`, one JSON object per
/// person keyed by name.
fn export_graphs(population: &[Person], path: &str) {
    let graphs: std::collections::BTreeMap<&str, MemoryGraph> = population
        .iter()
        .map(|p| (p.name(), MemoryGraph::snapshot(p.mind())))
        .collect();
    match serde_json::to_string_pretty(&graphs) {
        Ok(json) => match std::fs::write(path, json) {
            Ok(()) => println!("  {} Memory graphs written to {}", "✓".green(), path.bold()),
            Err(e) => println!("{}: {}", "Graph export failed".red(), e),
        },
        Err(e) => println!("{}: {}", "Graph serialisation failed".red(), e),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Banner
// ─────────────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("{}", r#"   ___        _           "#.bold().cyan());
    println!("{}", r#"  / _ |___  (_)_ _  ___ _ "#.bold().cyan());
    println!("{}", r#" / __ / _ \/ /  ' \/ _ `/ "#.bold().cyan());
    println!("{}", r#"/_/ |_/_//_/_/_/_/_/\_,_/  "#.bold().cyan());
    println!();
    println!(
        "  {} {}",
        "Anima".bold(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
    println!("  Agents with decaying associative memory");
    println!();
}
