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

//! Done buffers, scores and winners

use std::collections::HashMap;

use crate::{FactionId, board::Board, game::Faction};

/// Count down every faction's done buffer
///
/// Returns true if every faction had the turn committed, which banks a free auto turn
pub fn tick_done_buffers(factions: &mut [Faction]) -> bool {
    factions
        .iter_mut()
        .map(Faction::tick_done_buffer)
        .fold(true, |all, committed| all && committed)
}

/// Planets held by each faction, counting either slot
pub fn tally(board: &Board) -> HashMap<FactionId, u32> {
    let mut scores: HashMap<FactionId, u32> = HashMap::new();
    for faction in board.planets().iter().flat_map(|planet| planet.controllers()) {
        *scores.entry(faction).or_default() += 1;
    }
    scores
}

/// Scores after a turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standings {
    /// Best score of any faction
    pub high_score: u32,
    /// Factions at or past the win threshold, in faction order
    pub winners: Vec<FactionId>,
}

/// Rescore every faction from the board and find any winners
pub fn standings(factions: &mut [Faction], board: &Board, to_win: u32) -> Standings {
    let scores = tally(board);
    let mut high_score = 0;
    let mut winners = Vec::new();
    for faction in factions {
        faction.score = scores.get(&faction.id).copied().unwrap_or_default();
        high_score = high_score.max(faction.score);
        if faction.score >= to_win {
            winners.push(faction.id);
        }
    }
    Standings {
        high_score,
        winners,
    }
}
