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

//! Running a turn, one phase at a time

use std::mem::take;

use rand::Rng;
use tracing::{debug, info};

use crate::{
    FactionId,
    battle::{BattleContext, BattleResolver},
    board::Board,
    error::{Resource, SoftError, SourceError, TurnError, TurnReport},
    game::{Faction, Game},
    launch::{self, Passes},
    movement::{LandingSchedule, travelled},
    order::{Order, PowerOrder},
    planet::Role,
    power,
    radar::Radar,
    score,
    ship::Ship,
    source::Source,
    truce::TruceIndex,
};

/// Steps of a turn, in the order they run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnPhase {
    /// Build the truce and radar indices
    Index,
    /// Drop stance orders that can't apply
    ScreenPowerOrders,
    /// Count down done buffers and bank free autos
    DoneBuffers,
    /// Fight at planets whose controllers are at war
    Preemptive,
    /// Launch ships for primary controllers
    PrimaryLaunches,
    /// Launch ships for secondary controllers
    SecondaryLaunches,
    /// Empty the launch order queue
    ClearOrders,
    /// Move ships and report sightings
    Movement,
    /// Land ships, shortest trips first
    Landings,
    /// Apply stance orders
    StanceChanges,
    /// Empty the stance order queue
    ClearPowerOrders,
    /// Bump the turn counter
    AdvanceTurn,
    /// Rescore, broadcast planet views and look for winners
    Scoring,
    /// Write back the game, factions and planets
    Commit,
    /// Nothing left to do
    Done,
}

impl TurnPhase {
    /// The phase after this one
    pub fn next(self) -> Self {
        match self {
            TurnPhase::Index => TurnPhase::ScreenPowerOrders,
            TurnPhase::ScreenPowerOrders => TurnPhase::DoneBuffers,
            TurnPhase::DoneBuffers => TurnPhase::Preemptive,
            TurnPhase::Preemptive => TurnPhase::PrimaryLaunches,
            TurnPhase::PrimaryLaunches => TurnPhase::SecondaryLaunches,
            TurnPhase::SecondaryLaunches => TurnPhase::ClearOrders,
            TurnPhase::ClearOrders => TurnPhase::Movement,
            TurnPhase::Movement => TurnPhase::Landings,
            TurnPhase::Landings => TurnPhase::StanceChanges,
            TurnPhase::StanceChanges => TurnPhase::ClearPowerOrders,
            TurnPhase::ClearPowerOrders => TurnPhase::AdvanceTurn,
            TurnPhase::AdvanceTurn => TurnPhase::Scoring,
            TurnPhase::Scoring => TurnPhase::Commit,
            TurnPhase::Commit | TurnPhase::Done => TurnPhase::Done,
        }
    }
}

/// What a finished turn produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnSummary {
    /// The turn number the game is now on
    pub turn: u32,
    /// Best score after the turn
    pub high_score: u32,
    /// Factions at or past the win threshold
    pub winners: Vec<FactionId>,
    /// Everything that was skipped along the way
    pub report: TurnReport,
}

/// How a turn invocation ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The game was already over; nothing was touched
    AlreadyWon,
    /// The turn ran to completion
    Advanced(TurnSummary),
}

/// A turn in progress over one game's state
///
/// Holds the working copy of everything loaded from the source. Mutations to
/// the game, factions and planets stay here until [`TurnPhase::Commit`].
pub struct Turn<'s, S: Source + ?Sized> {
    source: &'s mut S,
    phase: TurnPhase,
    game: Game,
    factions: Vec<Faction>,
    board: Board,
    orders: Vec<Order>,
    passes: Passes,
    ships: Vec<Ship>,
    landings: LandingSchedule<Ship>,
    truces: TruceIndex,
    radar: Radar,
    power_orders: Vec<PowerOrder>,
    winners: Vec<FactionId>,
    report: TurnReport,
}

impl<'s, S: Source + ?Sized> Turn<'s, S> {
    /// Load everything a turn needs
    ///
    /// Returns None if some faction has already won
    pub fn load(source: &'s mut S) -> Result<Option<Self>, TurnError> {
        let game = source.game().map_err(load_error(Resource::Game))?;
        let planets = source.planets().map_err(load_error(Resource::Planets))?;
        let factions = source.factions().map_err(load_error(Resource::Factions))?;
        let orders = source.orders().map_err(load_error(Resource::Orders))?;
        let ships = source.ships().map_err(load_error(Resource::Ships))?;
        let truces = source.truces().map_err(load_error(Resource::Truces))?;
        let power_orders = source
            .power_orders()
            .map_err(load_error(Resource::PowerOrders))?;

        if game.is_won() {
            debug!(game = ?game.id, "game already won, skipping turn");
            return Ok(None);
        }

        Ok(Some(Self {
            source,
            phase: TurnPhase::Index,
            game,
            factions,
            board: Board::new(planets),
            orders,
            passes: Passes::default(),
            ships,
            landings: LandingSchedule::new(),
            truces: TruceIndex::new(&truces),
            radar: Radar::default(),
            power_orders,
            winners: Vec::new(),
            report: TurnReport::default(),
        }))
    }

    /// The phase that runs next
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Soft errors so far
    pub fn report(&self) -> &TurnReport {
        &self.report
    }

    /// Working copy of the game
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Working copy of the factions
    pub fn factions(&self) -> &[Faction] {
        &self.factions
    }

    /// Working copy of the map
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Run the current phase and move on to the next
    ///
    /// Returns the phase that will run next; stepping a finished turn does nothing
    pub fn step<B, R>(&mut self, battles: &mut B, rng: &mut R) -> Result<TurnPhase, TurnError>
    where
        B: BattleResolver + ?Sized,
        R: Rng + ?Sized,
    {
        let phase = self.phase;
        if phase == TurnPhase::Done {
            return Ok(phase);
        }
        debug!(?phase, turn = self.game.turn, "running turn phase");

        match phase {
            TurnPhase::Index => {
                self.radar = Radar::new(self.board.planets());
            }
            TurnPhase::ScreenPowerOrders => {
                self.power_orders =
                    power::screen(take(&mut self.power_orders), &self.board, &mut self.report);
            }
            TurnPhase::DoneBuffers => {
                if score::tick_done_buffers(&mut self.factions) {
                    self.game.free_autos = self.game.free_autos.saturating_add(1);
                }
            }
            TurnPhase::Preemptive => self.preemptive_battles(battles)?,
            TurnPhase::PrimaryLaunches => {
                self.passes = launch::triage(take(&mut self.orders), &self.board, &mut self.report);
                let orders = take(&mut self.passes.primary);
                self.launch(&orders, Role::Primary)?;
            }
            TurnPhase::SecondaryLaunches => {
                let orders = take(&mut self.passes.secondary);
                self.launch(&orders, Role::Secondary)?;
            }
            TurnPhase::ClearOrders => {
                self.source
                    .clear_orders()
                    .or_store("clear orders", phase)?;
            }
            TurnPhase::Movement => self.movement()?,
            TurnPhase::Landings => self.landings(battles, rng)?,
            TurnPhase::StanceChanges => power::apply(&self.power_orders, &mut self.board),
            TurnPhase::ClearPowerOrders => {
                self.source
                    .clear_power_orders()
                    .or_store("clear power orders", phase)?;
            }
            TurnPhase::AdvanceTurn => {
                self.game.turn += 1;
            }
            TurnPhase::Scoring => self.scoring()?,
            TurnPhase::Commit => self.commit()?,
            TurnPhase::Done => {}
        }

        self.phase = phase.next();
        Ok(self.phase)
    }

    /// Wrap up a turn that has reached [`TurnPhase::Done`]
    pub fn finish(self) -> TurnSummary {
        TurnSummary {
            turn: self.game.turn,
            high_score: self.game.high_score,
            winners: self.winners,
            report: self.report,
        }
    }

    fn preemptive_battles<B: BattleResolver + ?Sized>(
        &mut self,
        battles: &mut B,
    ) -> Result<(), TurnError> {
        let at_war: Vec<usize> = self
            .board
            .planets()
            .iter()
            .enumerate()
            .filter(|(_, planet)| {
                planet
                    .contested()
                    .is_some_and(|(a, b)| self.truces.is_at_war(&planet.loc, a, b))
            })
            .map(|(index, _)| index)
            .collect();

        for index in at_war {
            let planet = &mut self.board.planets_mut()[index];
            let truces = self.truces.at(&planet.loc);
            let records = battles.resolve(BattleContext {
                planet,
                ship: None,
                turn: self.game.turn,
                truces,
            });
            for record in records {
                self.source
                    .add_battle_record(record)
                    .or_store("record battle", TurnPhase::Preemptive)?;
            }
        }
        Ok(())
    }

    fn launch(&mut self, orders: &[Order], role: Role) -> Result<(), TurnError> {
        let phase = self.phase;
        let turn = self.game.turn;
        for order in orders {
            let Some(launch) = launch::draw(order, role, &mut self.board, &mut self.report) else {
                continue;
            };
            if launch.size > 0 {
                let ship = self
                    .source
                    .create_ship(launch.faction, launch.size, turn, launch.path)
                    .or_store("create ship", phase)?;
                self.source
                    .add_launch_record(turn, order, Some(&ship))
                    .or_store("record launch", phase)?;
                self.ships.push(ship);
            } else {
                self.source
                    .add_launch_record(turn, order, None)
                    .or_store("record launch", phase)?;
            }
        }
        Ok(())
    }

    fn movement(&mut self) -> Result<(), TurnError> {
        let turn = self.game.turn;
        for ship in take(&mut self.ships) {
            let travel = travelled(&ship, turn);
            let Some(distance) = travel.distance() else {
                self.report.record(SoftError::NoTravel(ship.id));
                self.source
                    .drop_ship(&ship)
                    .or_store("drop ship", TurnPhase::Movement)?;
                continue;
            };

            for observer in self.factions.iter().map(|faction| faction.id) {
                if let Some(view) = self.radar.sight(observer, &ship, &travel, turn) {
                    self.source
                        .add_ship_view(view)
                        .or_store("record ship view", TurnPhase::Movement)?;
                }
            }

            if travel.landed {
                self.landings.schedule(distance, ship);
            } else {
                self.ships.push(ship);
            }
        }
        Ok(())
    }

    fn landings<B, R>(&mut self, battles: &mut B, rng: &mut R) -> Result<(), TurnError>
    where
        B: BattleResolver + ?Sized,
        R: Rng + ?Sized,
    {
        let (order, strays) = take(&mut self.landings).into_order(rng);
        for ship in order {
            if let Some(loc) = ship.destination() {
                match self.board.index_of(&loc) {
                    Some(index) => {
                        let planet = &mut self.board.planets_mut()[index];
                        let truces = self.truces.at(&loc);
                        let records = battles.resolve(BattleContext {
                            planet,
                            ship: Some(&ship),
                            turn: self.game.turn,
                            truces,
                        });
                        for record in records {
                            self.source
                                .add_battle_record(record)
                                .or_store("record battle", TurnPhase::Landings)?;
                        }
                    }
                    None => self.report.record(SoftError::NoLandingPlanet { ship: ship.id, loc }),
                }
            }
            self.source
                .drop_ship(&ship)
                .or_store("drop ship", TurnPhase::Landings)?;
        }

        for (distance, ships) in strays {
            self.report.record(SoftError::ImproperLandingDistance {
                distance,
                ships: ships.iter().map(|ship| ship.id).collect(),
            });
            for ship in &ships {
                self.source
                    .drop_ship(ship)
                    .or_store("drop ship", TurnPhase::Landings)?;
            }
        }
        Ok(())
    }

    fn scoring(&mut self) -> Result<(), TurnError> {
        let turn = self.game.turn;
        for planet in self.board.planets() {
            for faction in planet.controllers() {
                self.source
                    .update_planet_view(faction, turn, planet)
                    .or_store("update planet view", TurnPhase::Scoring)?;
            }
        }

        let standings = score::standings(&mut self.factions, &self.board, self.game.to_win);
        self.game.high_score = standings.high_score;
        if !standings.winners.is_empty() {
            let names = self
                .factions
                .iter()
                .filter(|faction| standings.winners.contains(&faction.id))
                .map(|faction| faction.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            info!(game = ?self.game.id, turn, winners = %names, "game won");
            if self.game.winner.is_none() {
                self.game.winner = Some(names);
            }
        }
        self.winners = standings.winners;
        Ok(())
    }

    fn commit(&mut self) -> Result<(), TurnError> {
        self.source
            .save_game(&self.game)
            .or_store("save game", TurnPhase::Commit)?;
        for faction in &self.factions {
            self.source
                .save_faction(faction)
                .or_store("save faction", TurnPhase::Commit)?;
        }
        for planet in self.board.planets() {
            self.source
                .save_planet(planet)
                .or_store("save planet", TurnPhase::Commit)?;
        }
        Ok(())
    }
}

/// Run one whole turn
///
/// Landing order within a distance is drawn from `rng`. On error the caller
/// must throw away whatever the source has written.
pub fn run_turn<S, B, R>(
    source: &mut S,
    battles: &mut B,
    rng: &mut R,
) -> Result<TurnOutcome, TurnError>
where
    S: Source + ?Sized,
    B: BattleResolver + ?Sized,
    R: Rng + ?Sized,
{
    let Some(mut turn) = Turn::load(source)? else {
        return Ok(TurnOutcome::AlreadyWon);
    };
    while turn.step(battles, rng)? != TurnPhase::Done {}
    Ok(TurnOutcome::Advanced(turn.finish()))
}

fn load_error(resource: Resource) -> impl FnOnce(SourceError) -> TurnError {
    move |source| TurnError::Load { resource, source }
}

trait OrStore<T> {
    fn or_store(self, action: &'static str, phase: TurnPhase) -> Result<T, TurnError>;
}

impl<T> OrStore<T> for Result<T, SourceError> {
    fn or_store(self, action: &'static str, phase: TurnPhase) -> Result<T, TurnError> {
        self.map_err(|source| TurnError::Store {
            action,
            phase,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    use super::*;
    use crate::{
        GameId,
        battle::Standoff,
        hex::Coord,
        planet::{Control, Planet, Stance},
        source::MemorySource,
    };

    fn source() -> MemorySource {
        let mut source = MemorySource::new(Game {
            id: GameId::from(1),
            owner: "owner".to_string(),
            name: "Game".to_string(),
            turn: 1,
            auto_turn: false,
            free_autos: 0,
            to_win: 3,
            high_score: 0,
            winner: None,
            password: None,
        });
        source.factions.push(Faction {
            id: FactionId::from(1),
            owner: "alice".to_string(),
            name: "Red".to_string(),
            done_buffer: 2,
            score: 0,
        });
        source.planets.push(Planet {
            name: "Home".to_string(),
            loc: Coord::new(0, 0),
            primary: Some(Control {
                faction: FactionId::from(1),
                presence: 3,
                stance: Stance::Antimatter,
            }),
            secondary: None,
            antimatter: 5,
            tachyons: 5,
        });
        source
    }

    #[test]
    fn phases_run_in_order() {
        let mut phase = TurnPhase::Index;
        let mut seen = vec![phase];
        while phase != TurnPhase::Done {
            phase = phase.next();
            seen.push(phase);
        }
        assert_eq!(seen.len(), 15);
        assert_eq!(seen[3], TurnPhase::Preemptive);
        assert_eq!(seen[8], TurnPhase::Landings);
        assert_eq!(TurnPhase::Done.next(), TurnPhase::Done);
    }

    #[test]
    fn stepping_exposes_working_state() {
        let mut source = source();
        let mut rng = Pcg64::seed_from_u64(0);
        let mut turn = Turn::load(&mut source).unwrap().unwrap();

        while turn.phase() != TurnPhase::AdvanceTurn {
            turn.step(&mut Standoff, &mut rng).unwrap();
        }
        assert_eq!(turn.game().turn, 1);
        assert_eq!(turn.game().free_autos, 1);
        assert_eq!(turn.factions()[0].done_buffer, 1);

        assert_eq!(
            turn.step(&mut Standoff, &mut rng).unwrap(),
            TurnPhase::Scoring
        );
        assert_eq!(turn.game().turn, 2);

        while turn.step(&mut Standoff, &mut rng).unwrap() != TurnPhase::Done {}
        assert_eq!(
            turn.step(&mut Standoff, &mut rng).unwrap(),
            TurnPhase::Done
        );
        let summary = turn.finish();
        assert_eq!(summary.turn, 2);
        assert_eq!(summary.high_score, 1);
        assert!(summary.report.is_empty());
    }

    #[test]
    fn stance_changes_show_on_working_board() {
        let mut source = source();
        source.power_orders = vec![
            PowerOrder {
                faction: FactionId::from(1),
                loc: Coord::new(0, 0),
                shift: -1,
            },
            PowerOrder {
                faction: FactionId::from(2),
                loc: Coord::new(0, 0),
                shift: 1,
            },
        ];
        let mut rng = Pcg64::seed_from_u64(0);
        let mut turn = Turn::load(&mut source).unwrap().unwrap();
        let stance = |turn: &Turn<'_, MemorySource>| {
            turn.board()
                .get(&Coord::new(0, 0))
                .and_then(|planet| planet.primary)
                .map(|control| control.stance)
        };

        while turn.phase() != TurnPhase::StanceChanges {
            turn.step(&mut Standoff, &mut rng).unwrap();
        }
        assert_eq!(turn.report().len(), 1);
        assert!(matches!(
            turn.report().errors(),
            [SoftError::PowerNotController(_)]
        ));
        assert_eq!(stance(&turn), Some(Stance::Antimatter));

        turn.step(&mut Standoff, &mut rng).unwrap();
        assert_eq!(stance(&turn), Some(Stance::Tachyon));
        assert_eq!(turn.board().len(), 1);
    }

    #[test]
    fn nothing_is_written_before_commit() {
        let mut source = source();
        let mut rng = Pcg64::seed_from_u64(0);
        {
            let mut turn = Turn::load(&mut source).unwrap().unwrap();
            while turn.phase() != TurnPhase::Commit {
                turn.step(&mut Standoff, &mut rng).unwrap();
            }
        }
        assert_eq!(source.game.as_ref().map(|game| game.turn), Some(1));
        assert_eq!(source.factions[0].score, 0);
        assert_eq!(source.planet_views.len(), 1);
    }

    #[test]
    fn store_failure_names_the_phase() {
        let mut source = source();
        source.factions.clear();
        let extra = Faction {
            id: FactionId::from(9),
            owner: "nobody".to_string(),
            name: "Ghost".to_string(),
            done_buffer: 0,
            score: 0,
        };
        let mut rng = Pcg64::seed_from_u64(0);
        let mut turn = Turn::load(&mut source).unwrap().unwrap();
        turn.factions.push(extra);

        let error = loop {
            match turn.step(&mut Standoff, &mut rng) {
                Ok(TurnPhase::Done) => panic!("turn should not finish"),
                Ok(_) => {}
                Err(error) => break error,
            }
        };
        assert!(matches!(
            error,
            TurnError::Store {
                action: "save faction",
                phase: TurnPhase::Commit,
                source: SourceError::Missing("faction"),
            }
        ));
    }
}
