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

//! Games and the factions playing them

use serde::{Deserialize, Serialize};

use crate::{FactionId, GameId};

/// Game-wide settings and counters
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Game {
    /// Which game this is
    pub id: GameId,
    /// Username of whoever created the game
    pub owner: String,
    /// Display name
    pub name: String,
    /// Number of turns run so far; only ever incremented by a completed turn
    pub turn: u32,
    /// Whether turns may run on a schedule without every faction committing
    pub auto_turn: bool,
    /// Turns run with every faction committed, banked for later auto turns
    pub free_autos: u32,
    /// Planets a faction must control to win
    pub to_win: u32,
    /// Best faction score as of the last turn
    pub high_score: u32,
    /// Names of the winning factions, once someone has won
    pub winner: Option<String>,
    /// Join password, if the game is private
    pub password: Option<String>,
}

impl Game {
    /// Has some faction already reached the win threshold
    pub fn is_won(&self) -> bool {
        self.high_score >= self.to_win
    }
}

/// A player's side in a game
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Faction {
    /// Which faction this is
    pub id: FactionId,
    /// Username controlling the faction
    pub owner: String,
    /// Display name
    pub name: String,
    /// Turns this faction has pre-committed to; counts down once per turn
    pub done_buffer: u32,
    /// Planets controlled as of the last turn
    pub score: u32,
}

impl Faction {
    /// Count down the done buffer by one turn
    ///
    /// Returns false if the faction had nothing committed, i.e. the buffer was already empty
    pub fn tick_done_buffer(&mut self) -> bool {
        match self.done_buffer.checked_sub(1) {
            Some(left) => {
                self.done_buffer = left;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn faction(done_buffer: u32) -> Faction {
        Faction {
            id: FactionId::from(1),
            owner: "owner".to_string(),
            name: "Faction".to_string(),
            done_buffer,
            score: 0,
        }
    }

    #[test]
    fn done_buffer_counts_down_to_zero() {
        let mut faction = faction(2);
        assert!(faction.tick_done_buffer());
        assert_eq!(faction.done_buffer, 1);
        assert!(faction.tick_done_buffer());
        assert_eq!(faction.done_buffer, 0);
        assert!(!faction.tick_done_buffer());
        assert_eq!(faction.done_buffer, 0);
    }

    #[test]
    fn game_is_won_at_threshold() {
        let mut game = Game {
            id: GameId::from(1),
            owner: "owner".to_string(),
            name: "Game".to_string(),
            turn: 4,
            auto_turn: false,
            free_autos: 0,
            to_win: 5,
            high_score: 4,
            winner: None,
            password: None,
        };
        assert!(!game.is_won());
        game.high_score = 5;
        assert!(game.is_won());
    }
}
