// Copyright 2025 Justin Hu
//
// This file is part of Overpower.
//
// Overpower is free software: you can redistribute it and/or modify it under
// the terms of the GNU Affero General Public License as published by the Free
// Software Foundation, either version 3 of the License, or (at your option)
// any later version.
//
// Overpower is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or
// FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License
// for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with Overpower. If not, see <https://www.gnu.org/licenses/>.
//
// SPDX-License-Identifier: AGPL-3.0-or-later


use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use model::GameServerState;

mod model;

/// Runs Overpower turns against a saved game
#[derive(Parser)]
#[command(name = "overpower_server", version)]
struct Cli {
    /// Game state file
    #[arg(long, value_name = "PATH")]
    state: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one turn and save the result
    Turn {
        /// Seed for the landing order, for a reproducible turn
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show scores and pending orders
    Status,
    /// Create the state file from JSON
    Import {
        #[arg(value_name = "JSON")]
        json: PathBuf,
    },
    /// Dump the state file as JSON
    Export {
        #[arg(value_name = "JSON")]
        json: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let cli = Cli::parse();

    match cli.command {
        Command::Turn { seed } => {
            let mut state = GameServerState::from_path(&cli.state)?;
            if let Some(seed) = seed {
                state.reseed(seed);
            }
            match state.run_turn().context("turn aborted, state file left as it was")? {
                Some(summary) => {
                    state.save(&cli.state)?;
                    info!(
                        turn = summary.turn,
                        high_score = summary.high_score,
                        skipped = summary.report.len(),
                        "turn complete"
                    );
                }
                None => info!("nothing to do"),
            }
        }
        Command::Status => {
            let state = GameServerState::from_path(&cli.state)?;
            print_status(&state)?;
        }
        Command::Import { json } => {
            let state = GameServerState::from_json(&json)?;
            state.save(&cli.state)?;
            info!(path = %cli.state.display(), "imported game");
        }
        Command::Export { json } => {
            let state = GameServerState::from_path(&cli.state)?;
            state.export_json(&json)?;
            info!(path = %json.display(), "exported game");
        }
    }

    Ok(())
}

fn print_status(state: &GameServerState) -> Result<()> {
    let store = &state.store;
    let game = store.game.as_ref().context("state file has no game")?;

    println!("{} (turn {})", game.name, game.turn);
    println!("  high score {} of {} to win", game.high_score, game.to_win);
    if let Some(winner) = &game.winner {
        println!("  won by {winner}");
    }
    println!("  {} free auto turns banked", game.free_autos);
    for faction in &store.factions {
        println!(
            "  {}: {} planets, {} turns committed",
            faction.name, faction.score, faction.done_buffer
        );
    }
    println!(
        "  {} launch orders, {} stance orders, {} ships in flight",
        store.orders.len(),
        store.power_orders.len(),
        store.ships.len()
    );
    Ok(())
}
