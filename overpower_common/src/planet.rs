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

//! Planets, their controllers and their resource pools

use serde::{Deserialize, Serialize};

use crate::{FactionId, hex::Coord};

/// Which resource economy a controller launches ships from
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i8)]
pub enum Stance {
    /// Launches draw on the tachyon pool
    Tachyon = -1,
    /// No economy chosen; launches are refused
    #[default]
    Unset = 0,
    /// Launches draw on the antimatter pool
    Antimatter = 1,
}

impl Stance {
    /// The stance a power order shifts towards, if any
    ///
    /// Positive shifts to antimatter, negative to tachyons, zero leaves it alone
    pub fn from_shift(shift: i32) -> Option<Self> {
        match shift.signum() {
            1 => Some(Stance::Antimatter),
            -1 => Some(Stance::Tachyon),
            _ => None,
        }
    }
}

/// Which controller slot of a planet a faction holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The senior controller
    Primary,
    /// The junior controller
    Secondary,
}

/// One faction's hold on a planet
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Control {
    /// Who holds this slot
    pub faction: FactionId,
    /// How strongly they hold it
    pub presence: u32,
    /// Which pool they launch from
    pub stance: Stance,
}

/// A planet on the map
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Planet {
    /// Unique within a game
    pub name: String,
    /// Where the planet sits; unique within a game
    pub loc: Coord,
    /// Senior controller, if any
    pub primary: Option<Control>,
    /// Junior controller, if any
    pub secondary: Option<Control>,
    /// Antimatter available for launches
    pub antimatter: u32,
    /// Tachyons available for launches
    pub tachyons: u32,
}

impl Planet {
    /// The controlling factions, primary first
    pub fn controllers(&self) -> impl Iterator<Item = FactionId> + '_ {
        self.primary
            .iter()
            .chain(self.secondary.iter())
            .map(|control| control.faction)
    }

    /// Which slot, if any, this faction holds
    ///
    /// The secondary slot is checked first; a faction holding both is treated as secondary
    pub fn role_of(&self, faction: FactionId) -> Option<Role> {
        if self.secondary.is_some_and(|control| control.faction == faction) {
            Some(Role::Secondary)
        } else if self.primary.is_some_and(|control| control.faction == faction) {
            Some(Role::Primary)
        } else {
            None
        }
    }

    /// Is this faction one of the controllers
    pub fn is_controlled_by(&self, faction: FactionId) -> bool {
        self.role_of(faction).is_some()
    }

    /// Get a controller slot
    pub fn control(&self, role: Role) -> Option<&Control> {
        match role {
            Role::Primary => self.primary.as_ref(),
            Role::Secondary => self.secondary.as_ref(),
        }
    }

    /// Get a controller slot mutably
    pub fn control_mut(&mut self, role: Role) -> Option<&mut Control> {
        match role {
            Role::Primary => self.primary.as_mut(),
            Role::Secondary => self.secondary.as_mut(),
        }
    }

    /// Both controllers, if the planet is shared
    pub fn contested(&self) -> Option<(FactionId, FactionId)> {
        Some((self.primary?.faction, self.secondary?.faction))
    }

    /// Take up to `wanted` units out of the pool the stance draws on
    ///
    /// Returns the amount actually taken, or None if the stance is unset
    pub fn draw(&mut self, stance: Stance, wanted: u32) -> Option<u32> {
        let pool = match stance {
            Stance::Tachyon => &mut self.tachyons,
            Stance::Antimatter => &mut self.antimatter,
            Stance::Unset => return None,
        };
        let taken = wanted.min(*pool);
        *pool -= taken;
        Some(taken)
    }
}
