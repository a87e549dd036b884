// This file is part of Vantage.

// Copyright (C) 2021-2026 Vantage Foundation.
// SPDX-License-Identifier: GPL-3.0-or-later WITH Classpath-exception-2.0

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Collaborator traits that `module-dex` and `module-oracle` call into.
//! Split one file per concern, the way `modules/support` in the wider
//! workspace keeps `dex.rs`, `homa.rs`, `honzon.rs` etc. separate.

#![cfg_attr(not(feature = "std"), no_std)]

mod bank;
mod bridge;
mod clock;
mod governance;
mod staking;

pub use bank::Bank;
pub use bridge::{CircuitBreakerControl, OracleAnomalyHandler, PriceOracle};
pub use clock::Clock;
pub use governance::Governance;
pub use staking::{Staking, ValidatorInfo};
