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

use codec::{Decode, Encode, MaxEncodedLen};
use frame_support::{traits::ConstU32, BoundedVec};
use scale_info::TypeInfo;
#[cfg(feature = "std")]
use serde::{Deserialize, Serialize};
use sp_runtime::RuntimeDebug;
use vantage_primitives::{Amount, BlockHeight, Dec, Moment};

/// Short geographic region tag (e.g. `"us-east"`), per spec.md §3
/// `ValidatorPrice.region` / `ValidatorOracle.region`.
pub type Region = BoundedVec<u8, ConstU32<16>>;

/// spec.md §3 "ValidatorPrice (submission)". Keyed by `(asset, validator)`.
#[derive(Encode, Decode, Clone, PartialEq, Eq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub struct ValidatorPriceInfo {
	pub price: Dec,
	pub block_height: BlockHeight,
	pub voting_power: Amount,
	pub region: Option<Region>,
}

/// spec.md §3 "OraclePrice (consensus)". Keyed by `asset`.
#[derive(Encode, Decode, Clone, PartialEq, Eq, RuntimeDebug, TypeInfo, MaxEncodedLen, Default)]
pub struct OraclePriceInfo {
	pub price: Dec,
	pub block_height: BlockHeight,
	pub block_time: Moment,
	pub num_validators: u32,
}

/// Outlier severity classification, spec.md §4.10 step 4 / GLOSSARY.
#[derive(Encode, Decode, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, RuntimeDebug, TypeInfo, MaxEncodedLen, Default)]
pub enum OutlierSeverity {
	#[default]
	None,
	Low,
	Moderate,
	High,
	Extreme,
}

impl OutlierSeverity {
	/// Reputation weight, spec.md §4.11 "Reputation score".
	pub fn reputation_weight(self) -> Dec {
		match self {
			OutlierSeverity::None => Dec::from_inner(0),
			OutlierSeverity::Low => Dec::saturating_from_rational(1, 10),
			OutlierSeverity::Moderate => Dec::saturating_from_rational(25, 100),
			OutlierSeverity::High => Dec::saturating_from_rational(5, 10),
			OutlierSeverity::Extreme => Dec::one(),
		}
	}
}

use sp_arithmetic::FixedPointNumber;

const MAX_OUTLIER_HISTORY: u32 = 64;

/// One entry of `ValidatorOracle.outlier_history`, spec.md §3.
#[derive(Encode, Decode, Clone, Copy, PartialEq, Eq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub struct OutlierRecord {
	pub block_height: BlockHeight,
	pub severity: OutlierSeverity,
}

/// spec.md §3 "ValidatorOracle (performance)". Keyed by `validator`.
#[derive(Encode, Decode, Clone, PartialEq, Eq, RuntimeDebug, TypeInfo, MaxEncodedLen, Default)]
pub struct ValidatorOracleInfo {
	pub miss_counter: u64,
	pub total_submissions: u64,
	pub outlier_history: BoundedVec<OutlierRecord, ConstU32<MAX_OUTLIER_HISTORY>>,
	pub is_active: bool,
	pub region: Option<Region>,
	/// Block height of this validator's first recorded submission, the
	/// anchor for the §4.11 `GracePeriod`.
	pub first_seen: BlockHeight,
	/// Ring of recent submission heights, used to evaluate `SlashWindow` /
	/// `MinValidPerWindow` miss-rate slashing without an unbounded scan.
	pub recent_submissions: BoundedVec<BlockHeight, ConstU32<128>>,
}

impl ValidatorOracleInfo {
	/// `1 / (1 + sum(weight(severity)))`, spec.md §4.11.
	pub fn reputation_score(&self) -> Dec {
		let total: Dec = self
			.outlier_history
			.iter()
			.fold(Dec::from_inner(0), |acc, r| acc.saturating_add(r.severity.reputation_weight()));
		Dec::one().saturating_div(Dec::one().saturating_add(total))
	}

	/// Outliers recorded in the last `window` blocks ending at `now`.
	pub fn outliers_in_window(&self, now: BlockHeight, window: BlockHeight) -> u32 {
		self.outlier_history
			.iter()
			.filter(|r| now.saturating_sub(r.block_height) <= window)
			.count() as u32
	}

	pub fn valid_submissions_in_window(&self, now: BlockHeight, window: BlockHeight) -> u32 {
		self.recent_submissions
			.iter()
			.filter(|h| now.saturating_sub(**h) <= window)
			.count() as u32
	}
}

/// spec.md §3 "PriceSnapshot". Keyed by `(asset, block_height)`. `volume` is
/// `None` in every snapshot this module writes: the submission protocol
/// carries no trade-volume field (spec.md §6 `SubmitPrice{validator, asset,
/// price, region}` has none), so the §4.12 volume-weighted TWAP always falls
/// back to its "uniform" branch. The field is kept so a future richer
/// submission message can populate it without a storage migration.
#[derive(Encode, Decode, Clone, PartialEq, Eq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub struct PriceSnapshotInfo {
	pub price: Dec,
	pub block_time: Moment,
	pub cum_accumulator: Dec,
	pub volume: Option<Amount>,
}

/// spec.md §6 parameter set (oracle half) plus the §4.10/§4.11 thresholds
/// that are configurable rather than hardcoded.
#[derive(Encode, Decode, Clone, PartialEq, Eq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub struct OracleParams {
	pub vote_period: BlockHeight,
	pub vote_threshold: Dec,
	pub base_z_threshold: Dec,
	pub slash_fraction_extreme: Dec,
	pub slash_fraction_high: Dec,
	pub slash_fraction_moderate: Dec,
	pub slash_fraction_low: Dec,
	pub slash_window: BlockHeight,
	pub min_valid_per_window: u32,
	pub slash_fraction_miss: Dec,
	pub grace_period: BlockHeight,
	pub outlier_reputation_window: BlockHeight,
	pub twap_lookback_window: BlockHeight,
	pub repeat_offender_threshold: u32,
	pub low_severity_repeat_threshold: u32,
}

impl Default for OracleParams {
	fn default() -> Self {
		Self {
			vote_period: 10,
			vote_threshold: Dec::saturating_from_rational(2, 3),
			base_z_threshold: Dec::saturating_from_rational(35, 10), // 3.5
			slash_fraction_extreme: Dec::saturating_from_rational(5, 10_000), // 0.05%
			slash_fraction_high: Dec::saturating_from_rational(2, 10_000),    // 0.02%
			slash_fraction_moderate: Dec::saturating_from_rational(1, 10_000), // 0.01%
			slash_fraction_low: Dec::saturating_from_rational(5, 10_000), // 0.005%
			slash_window: 100,
			min_valid_per_window: 50,
			slash_fraction_miss: Dec::saturating_from_rational(1, 10_000),
			grace_period: 100,
			outlier_reputation_window: 1_000,
			twap_lookback_window: 2_000,
			repeat_offender_threshold: 3,
			low_severity_repeat_threshold: 6,
		}
	}
}

impl OracleParams {
	pub fn is_valid(&self) -> bool {
		let zero = Dec::from_inner(0);
		let one = Dec::one();
		self.vote_period > 0
			&& self.vote_threshold > zero
			&& self.vote_threshold <= one
			&& self.base_z_threshold > zero
			&& self.slash_window > 0
			&& self.repeat_offender_threshold > 0
			&& self.low_severity_repeat_threshold > 0
	}
}
