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

//! Turning launch orders into ships

use crate::{
    FactionId,
    board::Board,
    error::{SoftError, TurnReport},
    hex::Coord,
    order::Order,
    planet::Role,
};

/// Orders split by the slot the ordering faction holds at the source
///
/// Secondary controllers launch only after every primary controller has drawn
/// on the shared pools.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Passes {
    /// Orders from primary controllers
    pub primary: Vec<Order>,
    /// Orders from secondary controllers
    pub secondary: Vec<Order>,
}

/// Resources drawn for one order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launch {
    /// Who the ship will belong to
    pub faction: FactionId,
    /// What was actually drawn; zero means no ship
    pub size: u32,
    /// Route to the target; empty when no ship launches
    pub path: Vec<Coord>,
}

/// Validate orders and split them into launch passes
pub fn triage(orders: Vec<Order>, board: &Board, report: &mut TurnReport) -> Passes {
    let mut passes = Passes::default();
    for order in orders {
        let Some(role) = checked_role(&order, board, report) else {
            continue;
        };
        match role {
            Role::Primary => passes.primary.push(order),
            Role::Secondary => passes.secondary.push(order),
        }
    }
    passes
}

fn checked_role(order: &Order, board: &Board, report: &mut TurnReport) -> Option<Role> {
    let (Some(source), Some(_)) = (board.get(&order.source), board.get(&order.target)) else {
        report.record(SoftError::UnknownPlanet(*order));
        return None;
    };
    if order.size < 1 {
        report.record(SoftError::NonPositiveSize(*order));
        return None;
    }
    let role = source.role_of(order.faction);
    if role.is_none() {
        report.record(SoftError::NotController(*order));
    }
    role
}

/// Draw resources for an order from the slot the faction holds
///
/// The request is clamped to what the stance's pool holds, and the pool is
/// reduced by what was taken. Returns None (after recording why) if the order
/// can't be carried out at all.
pub fn draw(order: &Order, role: Role, board: &mut Board, report: &mut TurnReport) -> Option<Launch> {
    let Some(target) = board.get(&order.target).map(|target| target.loc) else {
        report.record(SoftError::UnknownPlanet(*order));
        return None;
    };
    let Some(source) = board.get_mut(&order.source) else {
        report.record(SoftError::UnknownPlanet(*order));
        return None;
    };
    let Ok(wanted @ 1..) = u32::try_from(order.size) else {
        report.record(SoftError::NonPositiveSize(*order));
        return None;
    };
    let Some(&control) = source.control(role).filter(|control| control.faction == order.faction) else {
        report.record(SoftError::NotController(*order));
        return None;
    };
    let Some(size) = source.draw(control.stance, wanted) else {
        report.record(SoftError::UnsetStance(*order));
        return None;
    };

    let path = if size > 0 {
        source.loc.path_to(&target)
    } else {
        Vec::new()
    };
    Some(Launch {
        faction: control.faction,
        size,
        path,
    })
}
