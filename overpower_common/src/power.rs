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

//! Stance changes

use crate::{
    board::Board,
    error::{SoftError, TurnReport},
    order::PowerOrder,
    planet::Stance,
};

/// Keep only power orders from a current controller of an existing planet
pub fn screen(orders: Vec<PowerOrder>, board: &Board, report: &mut TurnReport) -> Vec<PowerOrder> {
    orders
        .into_iter()
        .filter(|order| match board.get(&order.loc) {
            None => {
                report.record(SoftError::UnknownPowerPlanet(*order));
                false
            }
            Some(planet) if !planet.is_controlled_by(order.faction) => {
                report.record(SoftError::PowerNotController(*order));
                false
            }
            Some(_) => true,
        })
        .collect()
}

/// Apply stance changes to whoever still holds each planet
///
/// Orders from factions that lost control since screening are skipped
pub fn apply(orders: &[PowerOrder], board: &mut Board) {
    for order in orders {
        let Some(stance) = Stance::from_shift(order.shift) else {
            continue;
        };
        let Some(planet) = board.get_mut(&order.loc) else {
            continue;
        };
        let held = planet
            .role_of(order.faction)
            .and_then(|role| planet.control_mut(role));
        if let Some(control) = held {
            control.stance = stance;
        }
    }
}
