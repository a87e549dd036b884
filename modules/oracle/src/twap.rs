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

//! The five TWAP aggregators and the "robust TWAP" combiner of spec.md
//! §4.12, over a chronologically ordered slice of `PriceSnapshotInfo`. Pure
//! functions, mirroring how `module_dex::engine` keeps pool math free of
//! storage access.

use sp_arithmetic::FixedPointNumber;
use sp_std::vec::Vec;
use vantage_primitives::{Amount, Dec};

use crate::types::PriceSnapshotInfo;

/// Arithmetic time-weighted average: `sum(price_i * dt_i) / total_dt`.
/// `None` if fewer than two snapshots (no interval to weight by).
pub fn arithmetic_time_weighted(snapshots: &[PriceSnapshotInfo]) -> Option<Dec> {
	if snapshots.len() < 2 {
		return None;
	}
	let mut weighted_sum = Dec::from_inner(0);
	let mut total_dt = 0u64;
	for pair in snapshots.windows(2) {
		let dt = pair[1].block_time.saturating_sub(pair[0].block_time).max(0) as u64;
		weighted_sum = weighted_sum.saturating_add(pair[0].price.saturating_mul(Dec::saturating_from_integer(dt)));
		total_dt = total_dt.saturating_add(dt);
	}
	if total_dt == 0 {
		return Some(snapshots[0].price);
	}
	Some(weighted_sum.saturating_div(Dec::saturating_from_integer(total_dt)))
}

/// Volume-weighted average using each snapshot's `volume` when every
/// snapshot in the window carries one; falls back to an unweighted (uniform)
/// average otherwise, per spec.md §4.12 "using per-snapshot volume if
/// present, else uniform".
pub fn volume_weighted(snapshots: &[PriceSnapshotInfo]) -> Option<Dec> {
	if snapshots.is_empty() {
		return None;
	}
	if snapshots.iter().all(|s| s.volume.is_some()) {
		let total_volume: Amount = snapshots
			.iter()
			.filter_map(|s| s.volume)
			.fold(Amount::zero(), |acc, v| acc.checked_add(v).unwrap_or(acc));
		if total_volume.is_zero() {
			return uniform_average(snapshots);
		}
		let mut weighted_sum = Dec::from_inner(0);
		for s in snapshots {
			let v = s.volume.unwrap_or(Amount::zero());
			let v_u128 = u128::try_from(v).unwrap_or(0);
			let total_u128 = u128::try_from(total_volume).unwrap_or(1).max(1);
			let weight = Dec::saturating_from_rational(v_u128, total_u128);
			weighted_sum = weighted_sum.saturating_add(s.price.saturating_mul(weight));
		}
		Some(weighted_sum)
	} else {
		uniform_average(snapshots)
	}
}

fn uniform_average(snapshots: &[PriceSnapshotInfo]) -> Option<Dec> {
	if snapshots.is_empty() {
		return None;
	}
	let sum = snapshots.iter().fold(Dec::from_inner(0), |acc, s| acc.saturating_add(s.price));
	Some(sum.saturating_div(Dec::saturating_from_integer(snapshots.len() as u32)))
}

/// Exponential moving average with smoothing `alpha = 0.3`, per spec.md
/// §4.12. Seeded with the oldest snapshot's price.
pub fn exponential(snapshots: &[PriceSnapshotInfo]) -> Option<Dec> {
	let (first, rest) = snapshots.split_first()?;
	let alpha = Dec::saturating_from_rational(3, 10);
	let mut ema = first.price;
	for s in rest {
		ema = alpha.saturating_mul(s.price).saturating_add((Dec::one().saturating_sub(alpha)).saturating_mul(ema));
	}
	Some(ema)
}

/// Drops the top and bottom 10% by price (by count, floor-rounded) before
/// averaging the remainder, per spec.md §4.12.
pub fn trimmed(snapshots: &[PriceSnapshotInfo]) -> Option<Dec> {
	if snapshots.is_empty() {
		return None;
	}
	let mut prices: Vec<Dec> = snapshots.iter().map(|s| s.price).collect();
	prices.sort();
	let n = prices.len();
	let trim = n / 10;
	let kept = &prices[trim..n - trim];
	if kept.is_empty() {
		return Some(prices[n / 2]);
	}
	let sum = kept.iter().fold(Dec::from_inner(0), |acc, p| acc.saturating_add(*p));
	Some(sum.saturating_div(Dec::saturating_from_integer(kept.len() as u32)))
}

/// Scalar Kalman filter, `process_noise = 0.01`, `measurement_noise = 0.1`,
/// per spec.md §4.12. State/variance are seeded from the first snapshot.
pub fn kalman(snapshots: &[PriceSnapshotInfo]) -> Option<Dec> {
	let (first, rest) = snapshots.split_first()?;
	let process_noise = Dec::saturating_from_rational(1, 100);
	let measurement_noise = Dec::saturating_from_rational(1, 10);

	let mut estimate = first.price;
	let mut variance = Dec::one();
	for s in rest {
		let predicted_variance = variance.saturating_add(process_noise);
		let kalman_gain = predicted_variance.saturating_div(predicted_variance.saturating_add(measurement_noise));
		estimate = estimate.saturating_add(kalman_gain.saturating_mul(s.price.saturating_sub(estimate)));
		variance = (Dec::one().saturating_sub(kalman_gain)).saturating_mul(predicted_variance);
	}
	Some(estimate)
}

/// The canonical "robust TWAP": the median of the five methods above when
/// all five are defined, else the median of whichever subset is defined.
/// spec.md §4.12: adding/removing one snapshot changes this by at most the
/// largest single-method change, since a median can move by at most one
/// input's worth of change.
pub fn robust(snapshots: &[PriceSnapshotInfo]) -> Option<Dec> {
	let mut values: Vec<Dec> = [
		arithmetic_time_weighted(snapshots),
		volume_weighted(snapshots),
		exponential(snapshots),
		trimmed(snapshots),
		kalman(snapshots),
	]
	.into_iter()
	.flatten()
	.collect();
	if values.is_empty() {
		return None;
	}
	values.sort();
	let n = values.len();
	Some(if n % 2 == 1 {
		values[n / 2]
	} else {
		(values[n / 2 - 1].saturating_add(values[n / 2])) / Dec::saturating_from_integer(2u32)
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	fn snap(price: u32, time: i64) -> PriceSnapshotInfo {
		PriceSnapshotInfo {
			price: Dec::saturating_from_integer(price),
			block_time: time,
			cum_accumulator: Dec::from_inner(0),
			volume: None,
		}
	}

	#[test]
	fn arithmetic_twap_matches_s5_average() {
		let snapshots = vec![snap(100, 0), snap(110, 10), snap(105, 30)];
		let twap = arithmetic_time_weighted(&snapshots).unwrap();
		// (100*10 + 110*20) / 30 = (1000+2200)/30 = 106.67
		assert!(twap > Dec::saturating_from_integer(106u32));
		assert!(twap < Dec::saturating_from_integer(107u32));
	}

	#[test]
	fn robust_twap_is_defined_with_single_snapshot() {
		let snapshots = vec![snap(100, 0)];
		// arithmetic/volume need >=1, exponential/kalman/trimmed define on one.
		assert!(robust(&snapshots).is_some());
	}

	#[test]
	fn trimmed_drops_extremes() {
		let mut snapshots: Vec<_> = (1..=10).map(|i| snap(i * 10, i as i64)).collect();
		snapshots.push(snap(100_000, 11));
		let t = trimmed(&snapshots).unwrap();
		assert!(t < Dec::saturating_from_integer(1_000u32));
	}
}
