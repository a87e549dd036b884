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

use sp_std::vec::Vec;
use vantage_primitives::Amount;

/// A single bonded validator as seen by the host chain's staking module, per
/// spec.md §6 `Staking{bonded_set()...}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorInfo<ValidatorId> {
	pub validator: ValidatorId,
	pub voting_power: Amount,
	/// Geographic region tag, used by the Byzantine/geo-diversity guard in
	/// oracle aggregation (spec.md §1). `None` when the host chain has no
	/// GeoIP data for this validator (surfaces as `GeoIPUnavailable`
	/// upstream, not here).
	pub region: Option<Vec<u8>>,
}

/// Validator accounting, external to the core per spec.md §1.
pub trait Staking<ValidatorId> {
	/// The currently active bonded set and each member's voting power,
	/// sorted by `ValidatorId` so iteration order is deterministic.
	fn bonded_set() -> Vec<ValidatorInfo<ValidatorId>>;

	fn total_active_voting_power() -> Amount;

	/// Slashes `validator` by `fraction` (an 18-decimal `Dec` encoded as a
	/// per-mille-style `Amount` numerator over `Amount::from(1_000_000u128)`
	/// is avoided here: the fraction is applied by the caller via
	/// `vantage_primitives::Dec`, this trait only carries out the cut).
	fn slash(validator: &ValidatorId, fraction: vantage_primitives::Dec);

	fn jail(validator: &ValidatorId);
}
