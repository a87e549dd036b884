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

//! Slashing-fraction and jail decisions from an outlier classification,
//! spec.md §4.11. Kept as a pure function over already-read validator state
//! so `lib.rs` only has to apply the verdict, mirroring how `module_dex`
//! keeps `engine.rs` free of storage access.

use sp_arithmetic::FixedPointNumber;
use vantage_primitives::{BlockHeight, Dec};

use crate::types::{OracleParams, OutlierSeverity, ValidatorOracleInfo};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlashVerdict {
	pub fraction: Dec,
	pub jail: bool,
}

impl SlashVerdict {
	fn none() -> Self {
		Self { fraction: Dec::from_inner(0), jail: false }
	}
}

/// Decides the slash for a single outlier classification, per spec.md §4.11:
/// - `Extreme` -> 0.05% of stake, jail on repeat.
/// - `High` -> 0.02%, jail only on repeat.
/// - `Moderate` -> grace (no slash) first time, else 0.01%.
/// - `Low` -> no slash unless six or more outliers within the reputation
///   window.
/// - Grace period: no slash during the validator's first `grace_period`
///   blocks of participation.
/// - Repeated-offender (3+ outliers in-window): the applicable fraction
///   doubles.
pub fn decide(
	severity: OutlierSeverity,
	validator: &ValidatorOracleInfo,
	params: &OracleParams,
	current_height: BlockHeight,
) -> SlashVerdict {
	if current_height.saturating_sub(validator.first_seen) < params.grace_period {
		return SlashVerdict::none();
	}

	let in_window = validator.outliers_in_window(current_height, params.outlier_reputation_window);
	let is_repeat_offender = in_window >= params.repeat_offender_threshold;

	let mut verdict = match severity {
		OutlierSeverity::None => SlashVerdict::none(),
		OutlierSeverity::Low => {
			if in_window >= params.low_severity_repeat_threshold {
				SlashVerdict { fraction: params.slash_fraction_low, jail: false }
			} else {
				SlashVerdict::none()
			}
		}
		OutlierSeverity::Moderate => {
			// "grace (no slash) first time": the validator's *previous*
			// history (before this occurrence) determines whether this is
			// the first Moderate hit.
			let prior_moderate_or_worse = validator
				.outlier_history
				.iter()
				.filter(|r| current_height.saturating_sub(r.block_height) <= params.outlier_reputation_window)
				.filter(|r| r.severity >= OutlierSeverity::Moderate)
				.count();
			if prior_moderate_or_worse == 0 {
				SlashVerdict::none()
			} else {
				SlashVerdict { fraction: params.slash_fraction_moderate, jail: false }
			}
		}
		OutlierSeverity::High => SlashVerdict { fraction: params.slash_fraction_high, jail: is_repeat_offender },
		OutlierSeverity::Extreme => SlashVerdict { fraction: params.slash_fraction_extreme, jail: is_repeat_offender },
	};

	if is_repeat_offender && !verdict.fraction.is_zero() {
		verdict.fraction = verdict.fraction.saturating_mul(Dec::saturating_from_integer(2u32));
	}
	verdict
}

/// Miss-rate slashing, spec.md §4.11: "if valid submissions in the last
/// `SlashWindow` blocks < `MinValidPerWindow`, apply `SlashFraction` and
/// increment miss counter."
pub fn decide_miss_rate(validator: &ValidatorOracleInfo, params: &OracleParams, current_height: BlockHeight) -> Option<Dec> {
	let valid = validator.valid_submissions_in_window(current_height, params.slash_window);
	if valid < params.min_valid_per_window {
		Some(params.slash_fraction_miss)
	} else {
		None
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::types::OutlierRecord;

	fn params() -> OracleParams {
		OracleParams::default()
	}

	#[test]
	fn extreme_slash_matches_s4_example() {
		let validator = ValidatorOracleInfo { first_seen: 0, ..Default::default() };
		let verdict = decide(OutlierSeverity::Extreme, &validator, &params(), 1_000);
		assert_eq!(verdict.fraction, Dec::saturating_from_rational(5, 10_000));
		assert!(!verdict.jail);
	}

	#[test]
	fn grace_period_suppresses_slash() {
		let validator = ValidatorOracleInfo { first_seen: 900, ..Default::default() };
		let verdict = decide(OutlierSeverity::Extreme, &validator, &params(), 950);
		assert_eq!(verdict.fraction, Dec::from_inner(0));
	}

	#[test]
	fn repeat_offender_doubles_fraction_and_jails() {
		let mut validator = ValidatorOracleInfo { first_seen: 0, ..Default::default() };
		for h in [100u64, 150, 200] {
			validator
				.outlier_history
				.try_push(OutlierRecord { block_height: h, severity: OutlierSeverity::High })
				.unwrap();
		}
		let verdict = decide(OutlierSeverity::High, &validator, &params(), 250);
		assert_eq!(verdict.fraction, params().slash_fraction_high.saturating_mul(Dec::saturating_from_integer(2u32)));
		assert!(verdict.jail);
	}

	#[test]
	fn moderate_first_hit_is_grace_then_slashed() {
		let validator = ValidatorOracleInfo { first_seen: 0, ..Default::default() };
		let first = decide(OutlierSeverity::Moderate, &validator, &params(), 500);
		assert_eq!(first.fraction, Dec::from_inner(0));
	}
}
