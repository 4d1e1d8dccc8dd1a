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

//! Radar coverage and ship sightings

use std::collections::HashMap;

use crate::{
    FactionId,
    hex::CoordList,
    movement::Travel,
    planet::Planet,
    record::ShipView,
    ship::Ship,
};

/// The hexes each faction can see, i.e. the planets it controls
#[derive(Debug, Default)]
pub struct Radar {
    coverage: HashMap<FactionId, CoordList>,
}

impl Radar {
    /// Collect coverage from planet control
    pub fn new<'a>(planets: impl IntoIterator<Item = &'a Planet>) -> Self {
        let mut coverage: HashMap<FactionId, CoordList> = HashMap::new();
        for planet in planets {
            for faction in planet.controllers() {
                coverage.entry(faction).or_default().push(planet.loc);
            }
        }
        Self { coverage }
    }

    /// Hexes a faction can see, if it controls anything
    pub fn coverage(&self, faction: FactionId) -> Option<&CoordList> {
        self.coverage.get(&faction)
    }

    /// What an observer sees of a ship's movement this turn, if anything
    ///
    /// Owners see everything, including the destination. Anyone else sees the
    /// travelled hexes under their radar, and where the ship stopped only if
    /// that hex is covered too. Nobody is shown the location of a ship that
    /// has landed.
    pub fn sight(
        &self,
        observer: FactionId,
        ship: &Ship,
        travel: &Travel<'_>,
        turn: u32,
    ) -> Option<ShipView> {
        let (spotted, stop_seen, dest) = if observer == ship.faction {
            (travel.hops.to_vec(), true, ship.destination())
        } else {
            let coverage = self.coverage(observer)?;
            let stop_seen = travel.at().is_some_and(|at| coverage.contains(&at));
            (coverage.intersect(travel.hops).into_vec(), stop_seen, None)
        };

        let (&last, before) = spotted.split_last()?;
        let (loc, trail) = if stop_seen && !travel.landed {
            (Some(last), before.to_vec())
        } else {
            (None, spotted)
        };

        Some(ShipView {
            observer,
            controller: ship.faction,
            ship: ship.id,
            size: ship.size,
            turn,
            loc,
            dest,
            trail,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        hex::Coord,
        movement::travelled,
        planet::{Control, Stance},
        ship::ShipId,
    };

    fn planet(q: i32, r: i32, primary: Option<u32>, secondary: Option<u32>) -> Planet {
        let control = |faction: u32| Control {
            faction: FactionId::from(faction),
            presence: 1,
            stance: Stance::Antimatter,
        };
        Planet {
            name: format!("P{q}{r}"),
            loc: Coord::new(q, r),
            primary: primary.map(control),
            secondary: secondary.map(control),
            antimatter: 0,
            tachyons: 0,
        }
    }

    fn ship(to: Coord) -> Ship {
        Ship {
            id: ShipId::from(9),
            faction: FactionId::from(1),
            size: 4,
            launched: 1,
            path: Coord::new(0, 0).path_to(&to),
        }
    }

    #[test]
    fn coverage_from_both_slots() {
        let planets = [planet(0, 0, Some(1), Some(2)), planet(3, 0, Some(2), None)];
        let radar = Radar::new(&planets);
        assert_eq!(
            &**radar.coverage(FactionId::from(2)).unwrap(),
            &[Coord::new(0, 0), Coord::new(3, 0)]
        );
        assert_eq!(
            &**radar.coverage(FactionId::from(1)).unwrap(),
            &[Coord::new(0, 0)]
        );
        assert!(radar.coverage(FactionId::from(3)).is_none());
    }

    #[test]
    fn owner_sees_everything_in_flight() {
        let radar = Radar::default();
        let ship = ship(Coord::new(14, 0));
        let travel = travelled(&ship, 1);

        let view = radar.sight(FactionId::from(1), &ship, &travel, 1).unwrap();
        assert_eq!(view.loc, travel.at());
        assert_eq!(view.dest, Some(Coord::new(14, 0)));
        assert_eq!(view.trail, travel.hops[..travel.hops.len() - 1].to_vec());
        assert_eq!(view.controller, FactionId::from(1));
        assert_eq!(view.size, 4);
    }

    #[test]
    fn owner_sees_landing_without_location() {
        let radar = Radar::default();
        let ship = ship(Coord::new(2, 0));
        let travel = travelled(&ship, 1);

        let view = radar.sight(FactionId::from(1), &ship, &travel, 1).unwrap();
        assert_eq!(view.loc, None);
        assert_eq!(view.dest, Some(Coord::new(2, 0)));
        assert_eq!(view.trail, travel.hops.to_vec());
    }

    #[test]
    fn stranger_sees_only_covered_hexes() {
        let planets = [planet(1, 0, Some(2), None), planet(5, 5, Some(2), None)];
        let radar = Radar::new(&planets);
        let ship = ship(Coord::new(14, 0));
        let travel = travelled(&ship, 1);

        let view = radar.sight(FactionId::from(2), &ship, &travel, 1).unwrap();
        assert_eq!(view.trail, vec![Coord::new(1, 0)]);
        assert_eq!(view.loc, None);
        assert_eq!(view.dest, None);
        assert_eq!(view.observer, FactionId::from(2));
    }

    #[test]
    fn stranger_sees_ship_stopped_under_radar() {
        let stop = Coord::new(crate::hex::SHIP_SPEED as i32, 0);
        let planets = [planet(stop.q(), stop.r(), None, Some(3))];
        let radar = Radar::new(&planets);
        let ship = ship(Coord::new(14, 0));
        let travel = travelled(&ship, 1);
        assert_eq!(travel.at(), Some(stop));

        let view = radar.sight(FactionId::from(3), &ship, &travel, 1).unwrap();
        assert_eq!(view.loc, Some(stop));
        assert!(view.trail.is_empty());
        assert_eq!(view.dest, None);
    }

    #[test]
    fn stranger_without_cover_sees_nothing() {
        let planets = [planet(0, 5, Some(2), None)];
        let radar = Radar::new(&planets);
        let ship = ship(Coord::new(6, 0));
        let travel = travelled(&ship, 1);

        assert!(radar.sight(FactionId::from(2), &ship, &travel, 1).is_none());
        assert!(radar.sight(FactionId::from(4), &ship, &travel, 1).is_none());
    }

    #[test]
    fn stranger_never_sees_landing_location() {
        let planets = [planet(3, 0, Some(2), None)];
        let radar = Radar::new(&planets);
        let ship = ship(Coord::new(3, 0));
        let travel = travelled(&ship, 1);
        assert!(travel.landed);

        let view = radar.sight(FactionId::from(2), &ship, &travel, 1).unwrap();
        assert_eq!(view.loc, None);
        assert_eq!(view.trail, vec![Coord::new(3, 0)]);
    }
}
