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

//! Per-turn audit and broadcast records
//!
//! Records are only ever appended (planet views are replaced wholesale); nothing edits them

use serde::{Deserialize, Serialize};

use crate::{
    FactionId,
    hex::Coord,
    order::Order,
    planet::{Control, Planet},
    ship::{Ship, ShipId},
};

/// What came of an order this turn
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct LaunchRecord {
    /// Who gave the order
    pub faction: FactionId,
    /// Turn the order was carried out
    pub turn: u32,
    /// Planet launched from
    pub source: Coord,
    /// Planet flown at
    pub target: Coord,
    /// Size actually launched; zero if the pool was empty
    pub size: u32,
    /// The ship launched, if any
    pub ship: Option<ShipId>,
}

impl LaunchRecord {
    /// Record an order's outcome
    pub fn new(turn: u32, order: &Order, ship: Option<&Ship>) -> Self {
        Self {
            faction: order.faction,
            turn,
            source: order.source,
            target: order.target,
            size: ship.map_or(0, |ship| ship.size),
            ship: ship.map(|ship| ship.id),
        }
    }
}

/// What a faction saw of a ship this turn
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ShipView {
    /// Who saw the ship
    pub observer: FactionId,
    /// Who owns the ship
    pub controller: FactionId,
    /// Which ship
    pub ship: ShipId,
    /// Size of the ship
    pub size: u32,
    /// Turn of the sighting
    pub turn: u32,
    /// Where the ship stopped, if that was seen and it is still flying
    pub loc: Option<Coord>,
    /// Where the ship is going; only the owner knows
    pub dest: Option<Coord>,
    /// Hexes the ship was seen passing through, excluding `loc`
    pub trail: Vec<Coord>,
}

/// One faction's hold on a planet as seen in a record
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Garrison {
    /// Who holds the slot
    pub faction: FactionId,
    /// How strongly
    pub presence: u32,
}

impl From<&Control> for Garrison {
    fn from(value: &Control) -> Self {
        Self {
            faction: value.faction,
            presence: value.presence,
        }
    }
}

/// Both controller slots of a planet at some moment
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct Holding {
    /// Senior controller
    pub primary: Option<Garrison>,
    /// Junior controller
    pub secondary: Option<Garrison>,
}

impl From<&Planet> for Holding {
    fn from(value: &Planet) -> Self {
        Self {
            primary: value.primary.as_ref().map(Garrison::from),
            secondary: value.secondary.as_ref().map(Garrison::from),
        }
    }
}

/// A faction's latest look at a planet it controls
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PlanetView {
    /// Who is looking
    pub observer: FactionId,
    /// Turn the view was taken
    pub turn: u32,
    /// Which planet
    pub loc: Coord,
    /// Planet name
    pub name: String,
    /// Controllers at the time
    pub holding: Holding,
    /// Antimatter pool at the time
    pub antimatter: u32,
    /// Tachyon pool at the time
    pub tachyons: u32,
}

impl PlanetView {
    /// Snapshot a planet for an observer
    pub fn new(observer: FactionId, turn: u32, planet: &Planet) -> Self {
        Self {
            observer,
            turn,
            loc: planet.loc,
            name: planet.name.clone(),
            holding: Holding::from(planet),
            antimatter: planet.antimatter,
            tachyons: planet.tachyons,
        }
    }
}

/// A faction's account of one battle
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct BattleRecord {
    /// Who this account is for
    pub observer: FactionId,
    /// Turn of the battle
    pub turn: u32,
    /// Position among this observer's records for the turn; assigned by the store
    pub index: u32,
    /// Planet fought over
    pub target: Coord,
    /// The landing ship's owner and size; None for a battle between controllers
    pub attacker: Option<Garrison>,
    /// Controllers before the battle
    pub initial: Holding,
    /// Controllers after the battle
    pub result: Holding,
    /// Factions that broke a truce in this battle
    pub betrayals: Vec<FactionId>,
}
