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

//! The planet grid a turn works on

use std::collections::HashMap;

use crate::{hex::Coord, planet::Planet};

/// Every planet in the game, addressed by index and by location
///
/// Planets are owned here for the whole turn; other phases refer to them by
/// location or index, never by a held reference
#[derive(Debug, Default)]
pub struct Board {
    planets: Vec<Planet>,
    grid: HashMap<Coord, usize>,
}

impl Board {
    /// Build the grid; a later planet at an already-used location replaces the earlier one
    pub fn new(planets: Vec<Planet>) -> Self {
        let mut board = Self {
            planets: Vec::with_capacity(planets.len()),
            grid: HashMap::with_capacity(planets.len()),
        };
        for planet in planets {
            match board.index_of(&planet.loc) {
                Some(index) => board.planets[index] = planet,
                None => {
                    board.grid.insert(planet.loc, board.planets.len());
                    board.planets.push(planet);
                }
            }
        }
        board
    }

    /// Index of the planet at a location
    pub fn index_of(&self, loc: &Coord) -> Option<usize> {
        self.grid.get(loc).copied()
    }

    /// Planet at a location
    pub fn get(&self, loc: &Coord) -> Option<&Planet> {
        self.index_of(loc).map(|index| &self.planets[index])
    }

    /// Planet at a location, mutably
    pub fn get_mut(&mut self, loc: &Coord) -> Option<&mut Planet> {
        self.index_of(loc).map(|index| &mut self.planets[index])
    }

    /// All planets, in load order
    pub fn planets(&self) -> &[Planet] {
        &self.planets
    }

    /// All planets, mutably
    pub fn planets_mut(&mut self) -> &mut [Planet] {
        &mut self.planets
    }

    /// Number of planets
    pub fn len(&self) -> usize {
        self.planets.len()
    }

    /// Is the map empty
    pub fn is_empty(&self) -> bool {
        self.planets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planet(name: &str, q: i32, r: i32) -> Planet {
        Planet {
            name: name.to_string(),
            loc: Coord::new(q, r),
            primary: None,
            secondary: None,
            antimatter: 0,
            tachyons: 0,
        }
    }

    #[test]
    fn lookup_by_location() {
        let board = Board::new(vec![planet("Sol", 0, 0), planet("Deneb", 4, -2)]);
        assert_eq!(board.len(), 2);
        assert_eq!(board.index_of(&Coord::new(4, -2)), Some(1));
        assert_eq!(
            board.get(&Coord::new(0, 0)).map(|p| p.name.as_str()),
            Some("Sol")
        );
        assert!(board.get(&Coord::new(1, 1)).is_none());
    }

    #[test]
    fn duplicate_location_replaces() {
        let board = Board::new(vec![planet("Sol", 0, 0), planet("Other", 0, 0)]);
        assert_eq!(board.len(), 1);
        assert_eq!(
            board.get(&Coord::new(0, 0)).map(|p| p.name.as_str()),
            Some("Other")
        );
    }

    #[test]
    fn mutation_through_location() {
        let mut board = Board::new(vec![planet("Sol", 0, 0)]);
        if let Some(sol) = board.get_mut(&Coord::new(0, 0)) {
            sol.antimatter = 12;
        }
        assert_eq!(board.planets()[0].antimatter, 12);
    }
}
