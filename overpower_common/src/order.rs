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

//! Orders factions submit between turns

use serde::{Deserialize, Serialize};

use crate::{FactionId, hex::Coord};

/// Launch a ship from one planet at another
///
/// Valid only if both planets exist, the size is at least one, and the
/// faction controls the source planet with a stance set
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Order {
    /// Who gave the order
    pub faction: FactionId,
    /// Planet to launch from
    pub source: Coord,
    /// Planet to fly to
    pub target: Coord,
    /// Requested ship size; clamped to what the source can supply
    pub size: i32,
}

/// Change a controller's stance on a planet
///
/// Applied after combat, so only takes effect if the faction still controls the planet
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct PowerOrder {
    /// Who gave the order
    pub faction: FactionId,
    /// Which planet
    pub loc: Coord,
    /// Positive for antimatter, negative for tachyons, zero for no change
    pub shift: i32,
}

/// A one-sided promise not to fight another faction at a planet
///
/// Only a truce declared by both sides keeps the peace
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Truce {
    /// Who declared the truce
    pub faction: FactionId,
    /// Which planet it covers
    pub loc: Coord,
    /// Who it is offered to
    pub trucee: FactionId,
}
