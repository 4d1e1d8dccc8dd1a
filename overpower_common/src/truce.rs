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

//! Which factions have agreed not to fight where

use std::collections::{HashMap, HashSet};

use crate::{FactionId, hex::Coord, order::Truce};

/// Directed truce declarations at one planet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TruceSet {
    declared: HashSet<(FactionId, FactionId)>,
}

impl TruceSet {
    /// Record that `by` offers a truce to `towards`
    pub fn declare(&mut self, by: FactionId, towards: FactionId) {
        self.declared.insert((by, towards));
    }

    /// Has `by` offered a truce to `towards`
    pub fn is_declared(&self, by: FactionId, towards: FactionId) -> bool {
        self.declared.contains(&(by, towards))
    }

    /// Are these two fighting; only a truce declared both ways stops them
    pub fn is_at_war(&self, a: FactionId, b: FactionId) -> bool {
        !(self.is_declared(a, b) && self.is_declared(b, a))
    }

    /// No declarations at all
    pub fn is_empty(&self) -> bool {
        self.declared.is_empty()
    }
}

/// Truce declarations for a whole game, grouped by planet
///
/// Built once at the start of a turn and only read afterwards
#[derive(Debug, Default)]
pub struct TruceIndex {
    by_loc: HashMap<Coord, TruceSet>,
    none: TruceSet,
}

impl TruceIndex {
    /// Group truce records by location
    pub fn new(truces: &[Truce]) -> Self {
        let mut by_loc: HashMap<Coord, TruceSet> = HashMap::new();
        for truce in truces {
            by_loc
                .entry(truce.loc)
                .or_default()
                .declare(truce.faction, truce.trucee);
        }
        Self {
            by_loc,
            none: TruceSet::default(),
        }
    }

    /// Declarations at a location; empty if there are none
    pub fn at(&self, loc: &Coord) -> &TruceSet {
        self.by_loc.get(loc).unwrap_or(&self.none)
    }

    /// Are these two fighting at this location
    pub fn is_at_war(&self, loc: &Coord, a: FactionId, b: FactionId) -> bool {
        self.at(loc).is_at_war(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn truce(faction: u32, q: i32, trucee: u32) -> Truce {
        Truce {
            faction: FactionId::from(faction),
            loc: Coord::new(q, 0),
            trucee: FactionId::from(trucee),
        }
    }

    #[test]
    fn no_truce_means_war() {
        let index = TruceIndex::new(&[]);
        assert!(index.is_at_war(&Coord::new(0, 0), FactionId::from(1), FactionId::from(2)));
        assert!(index.at(&Coord::new(0, 0)).is_empty());
    }

    #[test]
    fn one_sided_truce_means_war() {
        let index = TruceIndex::new(&[truce(1, 0, 2)]);
        assert!(index.is_at_war(&Coord::new(0, 0), FactionId::from(1), FactionId::from(2)));
        assert!(index.is_at_war(&Coord::new(0, 0), FactionId::from(2), FactionId::from(1)));
    }

    #[test]
    fn bilateral_truce_means_peace() {
        let index = TruceIndex::new(&[truce(1, 0, 2), truce(2, 0, 1)]);
        assert!(!index.is_at_war(&Coord::new(0, 0), FactionId::from(1), FactionId::from(2)));
        assert!(!index.is_at_war(&Coord::new(0, 0), FactionId::from(2), FactionId::from(1)));
    }

    #[test]
    fn truces_are_per_location() {
        let index = TruceIndex::new(&[truce(1, 0, 2), truce(2, 1, 1)]);
        assert!(index.is_at_war(&Coord::new(0, 0), FactionId::from(1), FactionId::from(2)));
        assert!(index.is_at_war(&Coord::new(1, 0), FactionId::from(1), FactionId::from(2)));
        assert!(index.at(&Coord::new(1, 0)).is_declared(FactionId::from(2), FactionId::from(1)));
    }

    #[test]
    fn truce_with_third_party_does_not_count() {
        let index = TruceIndex::new(&[truce(1, 0, 2), truce(2, 0, 3)]);
        assert!(index.is_at_war(&Coord::new(0, 0), FactionId::from(1), FactionId::from(2)));
    }
}
