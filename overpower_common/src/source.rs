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

//! Where a turn gets its state from and writes it back to

use std::marker::PhantomData;

use num_traits::PrimInt;
use serde::{Deserialize, Serialize};

use crate::{
    FactionId,
    error::SourceError,
    game::{Faction, Game},
    hex::Coord,
    order::{Order, PowerOrder, Truce},
    planet::Planet,
    record::{BattleRecord, LaunchRecord, PlanetView, ShipView},
    ship::{Ship, ShipId},
};

/// One game's stored state
///
/// A turn reads everything up front, then writes through these methods. The
/// implementation must keep other turns for the same game out until the turn
/// finishes, and must be able to throw away every write if it fails.
pub trait Source {
    /// The game
    fn game(&self) -> Result<Game, SourceError>;
    /// Every faction in the game
    fn factions(&self) -> Result<Vec<Faction>, SourceError>;
    /// Every planet on the map
    fn planets(&self) -> Result<Vec<Planet>, SourceError>;
    /// Pending launch orders
    fn orders(&self) -> Result<Vec<Order>, SourceError>;
    /// Ships in flight
    fn ships(&self) -> Result<Vec<Ship>, SourceError>;
    /// Truce declarations
    fn truces(&self) -> Result<Vec<Truce>, SourceError>;
    /// Pending stance orders
    fn power_orders(&self) -> Result<Vec<PowerOrder>, SourceError>;

    /// Store a new ship and hand it back with its id
    fn create_ship(
        &mut self,
        faction: FactionId,
        size: u32,
        turn: u32,
        path: Vec<Coord>,
    ) -> Result<Ship, SourceError>;
    /// Remember what came of an order
    fn add_launch_record(
        &mut self,
        turn: u32,
        order: &Order,
        ship: Option<&Ship>,
    ) -> Result<(), SourceError>;
    /// Forget every pending launch order
    fn clear_orders(&mut self) -> Result<(), SourceError>;
    /// Remove a ship that landed or went nowhere
    fn drop_ship(&mut self, ship: &Ship) -> Result<(), SourceError>;
    /// Tell a faction what it saw of a ship
    fn add_ship_view(&mut self, view: ShipView) -> Result<(), SourceError>;
    /// Show a faction the current state of a planet it holds
    fn update_planet_view(
        &mut self,
        faction: FactionId,
        turn: u32,
        planet: &Planet,
    ) -> Result<(), SourceError>;
    /// Keep a battle account
    fn add_battle_record(&mut self, record: BattleRecord) -> Result<(), SourceError>;
    /// Forget every pending stance order
    fn clear_power_orders(&mut self) -> Result<(), SourceError>;
    /// Write back the game
    fn save_game(&mut self, game: &Game) -> Result<(), SourceError>;
    /// Write back a faction
    fn save_faction(&mut self, faction: &Faction) -> Result<(), SourceError>;
    /// Write back a planet
    fn save_planet(&mut self, planet: &Planet) -> Result<(), SourceError>;
}

/// A game held entirely in memory
///
/// Serializable, so the whole game can be kept in a single file
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MemorySource {
    /// The game; missing until set
    pub game: Option<Game>,
    /// Factions, in id order
    pub factions: Vec<Faction>,
    /// Planets
    pub planets: Vec<Planet>,
    /// Pending launch orders
    #[serde(default)]
    pub orders: Vec<Order>,
    /// Ships in flight
    #[serde(default)]
    pub ships: Vec<Ship>,
    /// Truce declarations
    #[serde(default)]
    pub truces: Vec<Truce>,
    /// Pending stance orders
    #[serde(default)]
    pub power_orders: Vec<PowerOrder>,
    /// Every launch outcome so far
    #[serde(default)]
    pub launch_records: Vec<LaunchRecord>,
    /// Every ship sighting so far
    #[serde(default)]
    pub ship_views: Vec<ShipView>,
    /// Latest view of each planet, per faction
    #[serde(default)]
    pub planet_views: Vec<PlanetView>,
    /// Every battle account so far
    #[serde(default)]
    pub battle_records: Vec<BattleRecord>,
    #[serde(default)]
    ship_ids: IdGenerator<ShipId, u32>,
}

impl MemorySource {
    /// Hold a game with no factions, planets or orders yet
    pub fn new(game: Game) -> Self {
        Self {
            game: Some(game),
            ..Default::default()
        }
    }
}

impl Source for MemorySource {
    fn game(&self) -> Result<Game, SourceError> {
        self.game.clone().ok_or(SourceError::Missing("game"))
    }

    fn factions(&self) -> Result<Vec<Faction>, SourceError> {
        Ok(self.factions.clone())
    }

    fn planets(&self) -> Result<Vec<Planet>, SourceError> {
        Ok(self.planets.clone())
    }

    fn orders(&self) -> Result<Vec<Order>, SourceError> {
        Ok(self.orders.clone())
    }

    fn ships(&self) -> Result<Vec<Ship>, SourceError> {
        Ok(self.ships.clone())
    }

    fn truces(&self) -> Result<Vec<Truce>, SourceError> {
        Ok(self.truces.clone())
    }

    fn power_orders(&self) -> Result<Vec<PowerOrder>, SourceError> {
        Ok(self.power_orders.clone())
    }

    fn create_ship(
        &mut self,
        faction: FactionId,
        size: u32,
        turn: u32,
        path: Vec<Coord>,
    ) -> Result<Ship, SourceError> {
        let ships = &self.ships;
        let id = self
            .ship_ids
            .find(|id| ships.iter().all(|ship| ship.id != *id))
            .ok_or_else(|| SourceError::Backend("ran out of ship ids".to_string()))?;
        let ship = Ship {
            id,
            faction,
            size,
            launched: turn,
            path,
        };
        self.ships.push(ship.clone());
        Ok(ship)
    }

    fn add_launch_record(
        &mut self,
        turn: u32,
        order: &Order,
        ship: Option<&Ship>,
    ) -> Result<(), SourceError> {
        self.launch_records
            .push(LaunchRecord::new(turn, order, ship));
        Ok(())
    }

    fn clear_orders(&mut self) -> Result<(), SourceError> {
        self.orders.clear();
        Ok(())
    }

    fn drop_ship(&mut self, ship: &Ship) -> Result<(), SourceError> {
        let index = self
            .ships
            .iter()
            .position(|stored| stored.id == ship.id)
            .ok_or(SourceError::UnknownShip(ship.id))?;
        self.ships.remove(index);
        Ok(())
    }

    fn add_ship_view(&mut self, view: ShipView) -> Result<(), SourceError> {
        self.ship_views.push(view);
        Ok(())
    }

    fn update_planet_view(
        &mut self,
        faction: FactionId,
        turn: u32,
        planet: &Planet,
    ) -> Result<(), SourceError> {
        let view = PlanetView::new(faction, turn, planet);
        match self
            .planet_views
            .iter_mut()
            .find(|stored| stored.observer == faction && stored.loc == planet.loc)
        {
            Some(stored) => *stored = view,
            None => self.planet_views.push(view),
        }
        Ok(())
    }

    fn add_battle_record(&mut self, mut record: BattleRecord) -> Result<(), SourceError> {
        let earlier = self
            .battle_records
            .iter()
            .filter(|stored| stored.observer == record.observer && stored.turn == record.turn)
            .count();
        record.index = u32::try_from(earlier)
            .map_err(|_| SourceError::Backend("too many battle records".to_string()))?;
        self.battle_records.push(record);
        Ok(())
    }

    fn clear_power_orders(&mut self) -> Result<(), SourceError> {
        self.power_orders.clear();
        Ok(())
    }

    fn save_game(&mut self, game: &Game) -> Result<(), SourceError> {
        self.game = Some(game.clone());
        Ok(())
    }

    fn save_faction(&mut self, faction: &Faction) -> Result<(), SourceError> {
        let stored = self
            .factions
            .iter_mut()
            .find(|stored| stored.id == faction.id)
            .ok_or(SourceError::Missing("faction"))?;
        *stored = faction.clone();
        Ok(())
    }

    fn save_planet(&mut self, planet: &Planet) -> Result<(), SourceError> {
        let stored = self
            .planets
            .iter_mut()
            .find(|stored| stored.loc == planet.loc)
            .ok_or(SourceError::Missing("planet"))?;
        *stored = planet.clone();
        Ok(())
    }
}

/// Hands out ids counting up from one
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdGenerator<T: From<U>, U: PrimInt> {
    next: U,
    _t: PhantomData<T>,
}
impl<T: From<U>, U: PrimInt> Default for IdGenerator<T, U> {
    fn default() -> Self {
        Self {
            next: U::one(),
            _t: PhantomData,
        }
    }
}
impl<T: From<U>, U: PrimInt> Iterator for IdGenerator<T, U> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.next.into();
        self.next = self.next.checked_add(&U::one())?;
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameId;

    fn game() -> Game {
        Game {
            id: GameId::from(1),
            owner: "owner".to_string(),
            name: "Game".to_string(),
            turn: 1,
            auto_turn: false,
            free_autos: 0,
            to_win: 10,
            high_score: 0,
            winner: None,
            password: None,
        }
    }

    fn planet(q: i32) -> Planet {
        Planet {
            name: format!("P{q}"),
            loc: Coord::new(q, 0),
            primary: None,
            secondary: None,
            antimatter: 1,
            tachyons: 1,
        }
    }

    #[test]
    fn missing_game_is_an_error() {
        let source = MemorySource::default();
        assert_eq!(source.game(), Err(SourceError::Missing("game")));
    }

    #[test]
    fn ship_ids_count_up_and_skip_taken() {
        let mut source = MemorySource::new(game());
        source.ships.push(Ship {
            id: ShipId::from(2),
            faction: FactionId::from(1),
            size: 1,
            launched: 0,
            path: vec![Coord::new(0, 0)],
        });

        let first = source
            .create_ship(FactionId::from(1), 3, 1, vec![Coord::new(0, 0)])
            .unwrap();
        let second = source
            .create_ship(FactionId::from(1), 3, 1, vec![Coord::new(0, 0)])
            .unwrap();

        assert_eq!(first.id, ShipId::from(1));
        assert_eq!(second.id, ShipId::from(3));
        assert_eq!(source.ships.len(), 3);
    }

    #[test]
    fn dropping_unknown_ship_fails() {
        let mut source = MemorySource::new(game());
        let ship = source
            .create_ship(FactionId::from(1), 3, 1, vec![Coord::new(0, 0)])
            .unwrap();
        assert_eq!(source.drop_ship(&ship), Ok(()));
        assert_eq!(
            source.drop_ship(&ship),
            Err(SourceError::UnknownShip(ship.id))
        );
    }

    #[test]
    fn planet_views_are_replaced() {
        let mut source = MemorySource::new(game());
        let mut planet = planet(0);
        source
            .update_planet_view(FactionId::from(1), 1, &planet)
            .unwrap();
        planet.antimatter = 7;
        source
            .update_planet_view(FactionId::from(1), 2, &planet)
            .unwrap();
        source
            .update_planet_view(FactionId::from(2), 2, &planet)
            .unwrap();

        assert_eq!(source.planet_views.len(), 2);
        assert_eq!(source.planet_views[0].turn, 2);
        assert_eq!(source.planet_views[0].antimatter, 7);
    }

    #[test]
    fn battle_records_are_indexed_per_observer_and_turn() {
        let mut source = MemorySource::new(game());
        let record = |observer: u32, turn: u32| BattleRecord {
            observer: FactionId::from(observer),
            turn,
            index: 99,
            target: Coord::new(0, 0),
            attacker: None,
            initial: Default::default(),
            result: Default::default(),
            betrayals: Vec::new(),
        };
        source.add_battle_record(record(1, 1)).unwrap();
        source.add_battle_record(record(1, 1)).unwrap();
        source.add_battle_record(record(2, 1)).unwrap();
        source.add_battle_record(record(1, 2)).unwrap();

        let indices: Vec<_> = source
            .battle_records
            .iter()
            .map(|record| record.index)
            .collect();
        assert_eq!(indices, vec![0, 1, 0, 0]);
    }

    #[test]
    fn saving_unknown_planet_fails() {
        let mut source = MemorySource::new(game());
        source.planets.push(planet(0));
        assert_eq!(source.save_planet(&planet(0)), Ok(()));
        assert_eq!(
            source.save_planet(&planet(1)),
            Err(SourceError::Missing("planet"))
        );
    }
}
