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

//! Ship movement and landing order

use std::collections::BTreeMap;

use rand::{Rng, seq::SliceRandom};

use crate::{
    hex::{Coord, SHIP_SPEED},
    ship::Ship,
};

/// The stretch of its path a ship covers in one turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Travel<'a> {
    /// Hexes covered, starting with the one the ship began the turn on
    pub hops: &'a [Coord],
    /// Did the ship reach the end of its path
    pub landed: bool,
}

impl Travel<'_> {
    /// Hexes moved; None if the ship didn't move at all
    pub fn distance(&self) -> Option<usize> {
        self.hops.len().checked_sub(1)
    }

    /// Where the ship ended the turn
    pub fn at(&self) -> Option<Coord> {
        self.hops.last().copied()
    }
}

/// Work out how far a ship gets on the given turn
///
/// A ship launched on turn L covers `path[k * SHIP_SPEED ..= (k + 1) * SHIP_SPEED]`
/// on turn L + k, stopping early at the end of its path. A ship with nothing
/// left to cover gets an empty travel.
pub fn travelled(ship: &Ship, turn: u32) -> Travel<'_> {
    let grounded = Travel {
        hops: &[],
        landed: false,
    };
    let Some(last) = ship.path.len().checked_sub(1) else {
        return grounded;
    };
    let Some(legs) = turn.checked_sub(ship.launched) else {
        return grounded;
    };
    let Some(start) = (legs as usize)
        .checked_mul(SHIP_SPEED)
        .filter(|&start| start <= last)
    else {
        return grounded;
    };
    let end = start.saturating_add(SHIP_SPEED).min(last);
    Travel {
        hops: &ship.path[start..=end],
        landed: end == last,
    }
}

/// Landings waiting to be resolved, grouped by distance travelled
#[derive(Debug, Clone)]
pub struct LandingSchedule<T> {
    tiers: BTreeMap<usize, Vec<T>>,
}

impl<T> Default for LandingSchedule<T> {
    fn default() -> Self {
        Self {
            tiers: BTreeMap::new(),
        }
    }
}

impl<T> LandingSchedule<T> {
    /// Create an empty schedule
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a landing after travelling `distance` hexes
    pub fn schedule(&mut self, distance: usize, landing: T) {
        self.tiers.entry(distance).or_default().push(landing);
    }

    /// Number of landings queued
    pub fn len(&self) -> usize {
        self.tiers.values().map(Vec::len).sum()
    }

    /// Nothing queued
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Order the landings for resolution
    ///
    /// Shorter trips land first; within a distance the order is shuffled.
    /// Only distances 1 to SHIP_SPEED can be resolved; anything else is
    /// handed back untouched as the second element.
    pub fn into_order<R: Rng + ?Sized>(
        mut self,
        rng: &mut R,
    ) -> (Vec<T>, BTreeMap<usize, Vec<T>>) {
        let mut order = Vec::with_capacity(self.len());
        for distance in 1..=SHIP_SPEED {
            if let Some(mut tier) = self.tiers.remove(&distance) {
                tier.shuffle(rng);
                order.extend(tier);
            }
        }
        (order, self.tiers)
    }
}
