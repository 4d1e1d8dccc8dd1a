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

//! Game state and turn mechanics for Overpower
//!
//! A turn consumes the pending launch and stance orders, flies ships across
//! the hex map under radar cover, fights the battles those ships and
//! contested planets cause, then rescores the factions.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use serde::{Deserialize, Serialize};

pub mod battle;
pub mod board;
pub mod error;
pub mod game;
pub mod hex;
pub mod launch;
pub mod movement;
pub mod order;
pub mod planet;
pub mod power;
pub mod radar;
pub mod record;
pub mod score;
pub mod ship;
pub mod source;
pub mod truce;
pub mod turn;

pub use error::{SoftError, SourceError, TurnError, TurnReport};
pub use turn::{Turn, TurnOutcome, TurnPhase, TurnSummary, run_turn};

/// Refers to a game
#[repr(transparent)]
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GameId(u32);

impl From<u32> for GameId {
    fn from(value: u32) -> Self {
        GameId(value)
    }
}

impl From<GameId> for u32 {
    fn from(value: GameId) -> Self {
        value.0
    }
}

/// Refers to a faction within a game
///
/// Every value is a real faction; an empty slot is `None`, never a reserved id
#[repr(transparent)]
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FactionId(u32);

impl From<u32> for FactionId {
    fn from(value: u32) -> Self {
        FactionId(value)
    }
}

impl From<FactionId> for u32 {
    fn from(value: FactionId) -> Self {
        value.0
    }
}
