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

//! The combat contract

use crate::{
    planet::Planet,
    record::{BattleRecord, Garrison, Holding},
    ship::Ship,
    truce::TruceSet,
};

/// Everything a battle at one planet gets to see
#[derive(Debug)]
pub struct BattleContext<'a> {
    /// The planet fought over; the resolver updates its controllers in place
    pub planet: &'a mut Planet,
    /// The ship landing, or None when the planet's own controllers fight
    pub ship: Option<&'a Ship>,
    /// Turn the battle happens on
    pub turn: u32,
    /// Truces declared at this planet
    pub truces: &'a TruceSet,
}

/// Decides battles
///
/// Called once for each shared planet whose controllers are at war, before
/// anything moves, and once for each landing ship, in landing order. Each call
/// may rewrite the planet's controllers and returns the audit records to keep.
pub trait BattleResolver {
    /// Fight it out
    fn resolve(&mut self, battle: BattleContext<'_>) -> Vec<BattleRecord>;
}

/// A resolver that never changes hands
///
/// Records the battle for every faction involved and leaves the planet alone
#[derive(Debug, Default, Clone, Copy)]
pub struct Standoff;

impl BattleResolver for Standoff {
    fn resolve(&mut self, battle: BattleContext<'_>) -> Vec<BattleRecord> {
        let holding = Holding::from(&*battle.planet);
        let attacker = battle.ship.map(|ship| Garrison {
            faction: ship.faction,
            presence: ship.size,
        });

        let mut observers: Vec<_> = battle.planet.controllers().collect();
        if let Some(attacker) = attacker
            && !observers.contains(&attacker.faction)
        {
            observers.push(attacker.faction);
        }

        observers
            .into_iter()
            .map(|observer| BattleRecord {
                observer,
                turn: battle.turn,
                index: 0,
                target: battle.planet.loc,
                attacker,
                initial: holding,
                result: holding,
                betrayals: Vec::new(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        FactionId,
        hex::Coord,
        planet::{Control, Stance},
        ship::ShipId,
    };

    fn planet() -> Planet {
        Planet {
            name: "Mira".to_string(),
            loc: Coord::new(2, 2),
            primary: Some(Control {
                faction: FactionId::from(1),
                presence: 5,
                stance: Stance::Antimatter,
            }),
            secondary: Some(Control {
                faction: FactionId::from(2),
                presence: 2,
                stance: Stance::Tachyon,
            }),
            antimatter: 3,
            tachyons: 3,
        }
    }

    #[test]
    fn standoff_records_for_controllers() {
        let mut planet = planet();
        let before = planet.clone();
        let truces = TruceSet::default();

        let records = Standoff.resolve(BattleContext {
            planet: &mut planet,
            ship: None,
            turn: 6,
            truces: &truces,
        });

        assert_eq!(planet, before);
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|record| record.attacker.is_none()));
        assert!(records.iter().all(|record| record.initial == record.result));
        assert_eq!(records[0].observer, FactionId::from(1));
        assert_eq!(records[1].observer, FactionId::from(2));
    }

    #[test]
    fn standoff_includes_the_attacker() {
        let mut planet = planet();
        let truces = TruceSet::default();
        let ship = Ship {
            id: ShipId::from(3),
            faction: FactionId::from(4),
            size: 7,
            launched: 6,
            path: vec![Coord::new(2, 1), Coord::new(2, 2)],
        };

        let records = Standoff.resolve(BattleContext {
            planet: &mut planet,
            ship: Some(&ship),
            turn: 6,
            truces: &truces,
        });

        assert_eq!(records.len(), 3);
        assert_eq!(records[2].observer, FactionId::from(4));
        assert_eq!(
            records[2].attacker,
            Some(Garrison {
                faction: FactionId::from(4),
                presence: 7
            })
        );
    }
}
