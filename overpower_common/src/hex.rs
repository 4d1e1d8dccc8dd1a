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

//! Hex-grid coordinates, paths and coordinate lists

use std::ops::{Add, AddAssign, Deref, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// How many hexes a ship covers in one turn
pub const SHIP_SPEED: usize = 10;

/// A hex-grid axial coordinate
///
/// Flat-topped hexes
///
/// +q = down-right, +r = down
#[derive(
    Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
)]
pub struct Coord {
    q: i32,
    r: i32,
}

impl Add for Coord {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            q: self.q + rhs.q,
            r: self.r + rhs.r,
        }
    }
}
impl AddAssign for Coord {
    fn add_assign(&mut self, rhs: Self) {
        self.q += rhs.q;
        self.r += rhs.r;
    }
}
impl Sub for Coord {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            q: self.q - rhs.q,
            r: self.r - rhs.r,
        }
    }
}
impl SubAssign for Coord {
    fn sub_assign(&mut self, rhs: Self) {
        self.q -= rhs.q;
        self.r -= rhs.r;
    }
}

impl Coord {
    /// Unit steps, clockwise from straight up
    const DIRECTIONS: [Self; 6] = [
        Self::new(0, -1),
        Self::new(1, -1),
        Self::new(1, 0),
        Self::new(0, 1),
        Self::new(-1, 1),
        Self::new(-1, 0),
    ];

    /// Create a coordinate from axial components
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Axial q component
    pub fn q(&self) -> i32 {
        self.q
    }

    /// Axial r component
    pub fn r(&self) -> i32 {
        self.r
    }

    /// Get the neighbours of this position
    pub fn neighbours(&self) -> [Self; 6] {
        Self::DIRECTIONS.map(|step| *self + step)
    }

    /// Get the length of this vector, in cells
    ///
    /// Note: not the cartesian length
    pub fn norm(&self) -> i32 {
        (self.q.abs() + (self.q + self.r).abs() + self.r.abs()) / 2
    }

    /// Number of hops between two cells
    pub fn distance(&self, other: &Self) -> i32 {
        (*self - *other).norm()
    }

    /// Construct a coordinate from fractional q and r
    pub fn round(q: f64, r: f64) -> Self {
        let s = -q - r;

        let mut q_int = q.round_ties_even() as i32;
        let mut r_int = r.round_ties_even() as i32;
        let s_int = s.round_ties_even() as i32;

        let dq = (q - q_int as f64).abs();
        let dr = (r - r_int as f64).abs();
        let ds = (s - s_int as f64).abs();

        if dq > dr && dq > ds {
            q_int = -r_int - s_int;
        } else if dr > ds {
            r_int = -q_int - s_int;
        }
        // don't care about s coordinate
        Self { q: q_int, r: r_int }
    }

    /// Shortest path from here to the target, inclusive of both ends
    ///
    /// Consecutive entries are neighbours; the path has `distance + 1` entries
    pub fn path_to(&self, target: &Self) -> Vec<Self> {
        let hops = self.distance(target);
        if hops == 0 {
            return vec![*self];
        }

        // nudge off hex edges so ties round the same way along the whole line
        const NUDGE: f64 = 1e-6;
        let (q0, r0) = (self.q as f64 + NUDGE, self.r as f64 + NUDGE);
        let (q1, r1) = (target.q as f64 + NUDGE, target.r as f64 + NUDGE);

        (0..=hops)
            .map(|step| {
                let t = step as f64 / hops as f64;
                Self::round(q0 + (q1 - q0) * t, r0 + (r1 - r0) * t)
            })
            .collect()
    }
}

/// An ordered list of coordinates, used for radar coverage and trails
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct CoordList(Vec<Coord>);

impl CoordList {
    /// Create an empty list
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a coordinate
    pub fn push(&mut self, coord: Coord) {
        self.0.push(coord);
    }

    /// Is this coordinate in the list
    pub fn contains(&self, coord: &Coord) -> bool {
        self.0.contains(coord)
    }

    /// The entries of `path` that are also in this list, in path order
    pub fn intersect(&self, path: &[Coord]) -> CoordList {
        path.iter()
            .filter(|coord| self.contains(coord))
            .copied()
            .collect()
    }

    /// Unwrap into the underlying vector
    pub fn into_vec(self) -> Vec<Coord> {
        self.0
    }
}

impl Deref for CoordList {
    type Target = [Coord];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Coord>> for CoordList {
    fn from(value: Vec<Coord>) -> Self {
        Self(value)
    }
}

impl FromIterator<Coord> for CoordList {
    fn from_iter<T: IntoIterator<Item = Coord>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for CoordList {
    type Item = Coord;
    type IntoIter = std::vec::IntoIter<Coord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbours_are_one_hop_away() {
        let centre = Coord::new(3, -2);
        for neighbour in centre.neighbours() {
            assert_eq!(centre.distance(&neighbour), 1);
        }
    }

    #[test]
    fn norm_counts_cells() {
        assert_eq!(Coord::new(0, 0).norm(), 0);
        assert_eq!(Coord::new(2, -1).norm(), 2);
        assert_eq!(Coord::new(3, 2).norm(), 5);
        assert_eq!(Coord::new(-4, 4).norm(), 4);
    }

    #[test]
    fn round_snaps_to_nearest_cell() {
        assert_eq!(Coord::round(0.9, 0.1), Coord::new(1, 0));
        assert_eq!(Coord::round(-0.2, 1.1), Coord::new(0, 1));
    }

    #[test]
    fn path_to_self_is_single_cell() {
        let here = Coord::new(5, 5);
        assert_eq!(here.path_to(&here), vec![here]);
    }

    #[test]
    fn path_is_inclusive_and_contiguous() {
        let from = Coord::new(-3, 1);
        let to = Coord::new(4, -6);
        let path = from.path_to(&to);

        assert_eq!(path.len() as i32, from.distance(&to) + 1);
        assert_eq!(path.first(), Some(&from));
        assert_eq!(path.last(), Some(&to));
        for hop in path.windows(2) {
            assert_eq!(hop[0].distance(&hop[1]), 1);
        }
    }

    #[test]
    fn path_along_axis_is_straight() {
        let path = Coord::new(0, 0).path_to(&Coord::new(0, 3));
        assert_eq!(
            path,
            vec![
                Coord::new(0, 0),
                Coord::new(0, 1),
                Coord::new(0, 2),
                Coord::new(0, 3)
            ]
        );
    }

    #[test]
    fn intersect_keeps_path_order() {
        let radar: CoordList = vec![Coord::new(2, 0), Coord::new(0, 0), Coord::new(9, 9)].into();
        let path = Coord::new(0, 0).path_to(&Coord::new(3, 0));

        let spotted = radar.intersect(&path);
        assert_eq!(&*spotted, &[Coord::new(0, 0), Coord::new(2, 0)]);
    }

    #[test]
    fn intersect_with_empty_list_is_empty() {
        let path = Coord::new(0, 0).path_to(&Coord::new(3, 0));
        assert!(CoordList::new().intersect(&path).is_empty());
    }
}
