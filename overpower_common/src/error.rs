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

//! Fatal and non-fatal turn errors

use std::fmt::{self, Display, Formatter};

use thiserror::Error;
use tracing::warn;

use crate::{
    hex::Coord,
    order::{Order, PowerOrder},
    ship::ShipId,
    turn::TurnPhase,
};

/// A state source couldn't read or write something
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// Nothing of that kind is stored for the game
    #[error("no {0} stored for this game")]
    Missing(&'static str),
    /// The ship to drop doesn't exist
    #[error("no ship {0:?} stored")]
    UnknownShip(ShipId),
    /// Whatever holds the state failed
    #[error("{0}")]
    Backend(String),
}

/// Collections a turn loads before doing anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// The game itself
    Game,
    /// All factions
    Factions,
    /// All planets
    Planets,
    /// Pending launch orders
    Orders,
    /// Ships in flight
    Ships,
    /// Truce declarations
    Truces,
    /// Pending stance orders
    PowerOrders,
}

impl Display for Resource {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Resource::Game => "game",
            Resource::Factions => "factions",
            Resource::Planets => "planets",
            Resource::Orders => "orders",
            Resource::Ships => "ships",
            Resource::Truces => "truces",
            Resource::PowerOrders => "power orders",
        })
    }
}

/// A failure that aborts the whole turn
///
/// The caller must discard anything the source wrote before the failure
#[derive(Debug, Error)]
pub enum TurnError {
    /// A required collection couldn't be loaded
    #[error("couldn't load {resource}")]
    Load {
        /// What was being loaded
        resource: Resource,
        /// Why it failed
        source: SourceError,
    },
    /// The source refused a write
    #[error("couldn't {action} during {phase:?}")]
    Store {
        /// What was being written
        action: &'static str,
        /// Where the turn had got to
        phase: TurnPhase,
        /// Why it failed
        source: SourceError,
    },
}

/// A problem with one order, ship or landing; the turn skips it and carries on
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SoftError {
    /// Order names a source or target with no planet
    #[error("order {0:?} references a missing planet")]
    UnknownPlanet(Order),
    /// Order asks for less than one unit
    #[error("order {0:?} has size below one")]
    NonPositiveSize(Order),
    /// Ordering faction doesn't control the source planet
    #[error("order {0:?} comes from a faction not controlling its source")]
    NotController(Order),
    /// Ordering faction has no stance at the source planet
    #[error("order {0:?} draws on an unset stance")]
    UnsetStance(Order),
    /// Power order names a location with no planet
    #[error("power order {0:?} references a missing planet")]
    UnknownPowerPlanet(PowerOrder),
    /// Power order from a faction not controlling the planet
    #[error("power order {0:?} comes from a faction not controlling the planet")]
    PowerNotController(PowerOrder),
    /// Ship has nowhere left to go this turn
    #[error("ship {0:?} has no travel distance")]
    NoTravel(ShipId),
    /// Ship arrived somewhere with no planet
    #[error("ship {ship:?} landed at {loc:?} where there is no planet")]
    NoLandingPlanet {
        /// The ship
        ship: ShipId,
        /// Where it arrived
        loc: Coord,
    },
    /// Ships were scheduled to land after an impossible distance
    #[error("ships {ships:?} landed after travelling {distance} hexes")]
    ImproperLandingDistance {
        /// Hexes travelled
        distance: usize,
        /// The ships left unresolved
        ships: Vec<ShipId>,
    },
}

/// Every soft error raised during one turn, in the order they happened
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnReport {
    errors: Vec<SoftError>,
}

impl TurnReport {
    /// Note a soft error and keep going
    pub fn record(&mut self, error: SoftError) {
        warn!(%error, "turn problem");
        self.errors.push(error);
    }

    /// Did the turn run cleanly
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of problems
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// The problems, oldest first
    pub fn errors(&self) -> &[SoftError] {
        &self.errors
    }
}

impl<'a> IntoIterator for &'a TurnReport {
    type Item = &'a SoftError;
    type IntoIter = std::slice::Iter<'a, SoftError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
