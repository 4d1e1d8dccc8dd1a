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


use std::fs::{File, read, rename, write};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use overpower_common::{
    TurnOutcome, TurnSummary, battle::Standoff, run_turn, source::MemorySource,
};
use rand::{Rng, SeedableRng, rng};
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};
use serde_cbor::{from_slice, to_vec};
use tracing::{info, warn};

/// Game state plus server information
#[derive(Serialize, Deserialize)]
pub struct GameServerState {
    pub store: MemorySource,
    #[serde(skip, default = "GameServerState::new_rng")]
    pub rng: Pcg64,
}
impl GameServerState {
    pub fn from_path(path: &Path) -> Result<Self> {
        let file =
            read(path).with_context(|| format!("while reading {}", path.to_string_lossy()))?;

        from_slice(&file).with_context(|| format!("while deserializing {}", path.to_string_lossy()))
    }

    /// Read a hand-written or exported JSON game
    pub fn from_json(path: &Path) -> Result<Self> {
        let file =
            read(path).with_context(|| format!("while reading {}", path.to_string_lossy()))?;
        let store: MemorySource = serde_json::from_slice(&file)
            .with_context(|| format!("while parsing {}", path.to_string_lossy()))?;
        if store.game.is_none() {
            bail!("{} has no game in it", path.to_string_lossy());
        }

        Ok(Self {
            store,
            rng: Self::new_rng(),
        })
    }

    /// Write the state out, replacing the file only once the write succeeds
    pub fn save(&self, path: &Path) -> Result<()> {
        let serialized = to_vec(self).context("while serializing game state")?;
        let temporary = temporary_path(path);
        write(&temporary, serialized)
            .with_context(|| format!("while writing {}", temporary.to_string_lossy()))?;
        rename(&temporary, path).with_context(|| {
            format!(
                "while moving {} to {}",
                temporary.to_string_lossy(),
                path.to_string_lossy()
            )
        })
    }

    pub fn export_json(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("while creating {}", path.to_string_lossy()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &self.store)
            .with_context(|| format!("while writing {}", path.to_string_lossy()))
    }

    /// Use a fixed landing order for this run
    pub fn reseed(&mut self, seed: u64) {
        self.rng = Pcg64::seed_from_u64(seed);
    }

    /// Run one turn against a scratch copy, keeping it only if the turn completes
    ///
    /// Returns None if the game was already won
    pub fn run_turn(&mut self) -> Result<Option<TurnSummary>> {
        let mut scratch = self.store.clone();
        let outcome = run_turn(&mut scratch, &mut Standoff, &mut self.rng)?;
        match outcome {
            TurnOutcome::AlreadyWon => {
                info!("game already won, no turn run");
                Ok(None)
            }
            TurnOutcome::Advanced(summary) => {
                for error in &summary.report {
                    warn!(%error, "skipped during turn");
                }
                self.store = scratch;
                Ok(Some(summary))
            }
        }
    }

    fn new_rng() -> Pcg64 {
        Pcg64::from_seed(rng().random())
    }
}

fn temporary_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
