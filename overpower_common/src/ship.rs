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

//! Ships in flight

use serde::{Deserialize, Serialize};

use crate::{FactionId, hex::Coord};

/// A ship travelling between planets
///
/// Lives until it lands or is found to be going nowhere
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Ship {
    /// Unique within a game
    pub id: ShipId,
    /// Owner
    pub faction: FactionId,
    /// Strength the ship brings to the battle it lands in
    pub size: u32,
    /// Turn the ship was launched on
    pub launched: u32,
    /// Every hex from source to target, both included
    pub path: Vec<Coord>,
}

impl Ship {
    /// Where the ship is headed
    pub fn destination(&self) -> Option<Coord> {
        self.path.last().copied()
    }
}

/// Id used to reference a ship; unique across factions
#[repr(transparent)]
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShipId(u32);

impl From<u32> for ShipId {
    fn from(value: u32) -> Self {
        ShipId(value)
    }
}

impl From<ShipId> for u32 {
    fn from(value: ShipId) -> Self {
        value.0
    }
}
