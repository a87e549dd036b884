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

use vantage_primitives::{Dec, Denom, PoolId};

/// Implemented by `module-dex`, called by `module-oracle` when aggregation
/// detects an anomaly severe enough to pause trading (spec.md §4.6 "Triggers:
/// ... oracle aggregation anomaly"). Kept one-directional (oracle -> dex)
/// per SPEC_FULL.md §2 so `module-dex` never needs to depend on
/// `module-oracle`.
pub trait CircuitBreakerControl {
	fn trigger(pool_id: PoolId, reason: &'static str);
}

/// A read-only view onto the latest aggregated price for an asset, for
/// collaborators that only need to observe consensus prices (e.g. a future
/// CDP/lending module) without depending on the whole `module-oracle` crate.
pub trait PriceOracle {
	fn consensus_price(denom: &Denom) -> Option<Dec>;
}

/// Implemented by whatever glues `module-oracle` to the pools that trade an
/// asset, called when aggregation finds an anomaly serious enough to warrant
/// pausing trading (spec.md §4.6 "Triggers: ... oracle aggregation anomaly").
/// `module-oracle` has no notion of `PoolId` itself, so unlike
/// `CircuitBreakerControl` this is keyed by asset; a runtime composes it with
/// a lookup from asset to the pools that reference it.
pub trait OracleAnomalyHandler {
	fn on_price_anomaly(asset: &Denom);
}

impl OracleAnomalyHandler for () {
	fn on_price_anomaly(_asset: &Denom) {}
}
