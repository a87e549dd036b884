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

//! The statistical outlier pipeline of spec.md §4.10 step 4, kept as pure
//! functions over `Dec` slices so it can be tested directly against the S4
//! worked example and is idempotent-by-construction (Testable Property 6):
//! none of these functions read any storage, so running them twice on the
//! same input gives the same output.

use sp_arithmetic::FixedPointNumber;
use sp_std::vec::Vec;
use vantage_primitives::Dec;

use crate::types::OutlierSeverity;

/// Median of a non-empty, already-sorted slice. Even-length slices average
/// the two middle elements; `Dec`'s `i128` inner representation makes that
/// division exact down to the same 18-decimal precision as any other `Dec`.
pub fn median_sorted(sorted: &[Dec]) -> Dec {
	let n = sorted.len();
	if n == 0 {
		return Dec::from_inner(0);
	}
	if n % 2 == 1 {
		sorted[n / 2]
	} else {
		let a = sorted[n / 2 - 1];
		let b = sorted[n / 2];
		a.saturating_add(b) / Dec::saturating_from_integer(2u32)
	}
}

fn abs(d: Dec) -> Dec {
	Dec::from_inner(d.into_inner().unsigned_abs() as i128)
}

/// `median(|p_i - median|) * 1.4826`, spec.md §4.10.
pub fn mad(sorted_prices: &[Dec], median: Dec) -> Dec {
	let mut deviations: Vec<Dec> = sorted_prices.iter().map(|p| abs(p.saturating_sub(median))).collect();
	deviations.sort();
	let base = median_sorted(&deviations);
	base.saturating_mul(Dec::saturating_from_rational(14_826u32, 10_000u32))
}

/// `tau = base_threshold * (1 + sigma * 10)`, spec.md §4.10.
pub fn z_threshold(base_threshold: Dec, sigma: Dec) -> Dec {
	let factor = Dec::one().saturating_add(sigma.saturating_mul(Dec::saturating_from_integer(10u32)));
	base_threshold.saturating_mul(factor)
}

/// Modified z-score classification. When `mad_value` is zero, any price that
/// differs from the median at all is `Extreme` (spec.md §4.10: "if MAD = 0
/// treat any p_i != median as extreme").
pub fn classify(price: Dec, median: Dec, mad_value: Dec, tau: Dec) -> OutlierSeverity {
	if mad_value.is_zero() {
		return if price == median { OutlierSeverity::None } else { OutlierSeverity::Extreme };
	}
	let z = Dec::saturating_from_rational(6_745u32, 10_000u32)
		.saturating_mul(abs(price.saturating_sub(median)))
		.saturating_div(mad_value);

	if z < tau.saturating_mul(Dec::saturating_from_rational(5, 10)) {
		OutlierSeverity::None
	} else if z < tau.saturating_mul(Dec::saturating_from_rational(7, 10)) {
		OutlierSeverity::Low
	} else if z < tau {
		OutlierSeverity::Moderate
	} else if z < tau.saturating_mul(Dec::saturating_from_rational(14, 10)) {
		OutlierSeverity::High
	} else {
		OutlierSeverity::Extreme
	}
}

/// `k = min(3, 1.5 + 5*sigma)`, spec.md §4.10 IQR test.
pub fn iqr_k(sigma: Dec) -> Dec {
	let raw = Dec::saturating_from_rational(15, 10).saturating_add(sigma.saturating_mul(Dec::saturating_from_integer(5u32)));
	raw.min(Dec::saturating_from_integer(3u32))
}

/// Nearest-rank Q1/Q3 over an already-sorted, non-empty slice.
pub fn quartiles(sorted: &[Dec]) -> (Dec, Dec) {
	let n = sorted.len();
	if n == 1 {
		return (sorted[0], sorted[0]);
	}
	let q1_idx = (n - 1) * 1 / 4;
	let q3_idx = (n - 1) * 3 / 4;
	(sorted[q1_idx], sorted[q3_idx])
}

/// Indices of `sorted` that fall inside `[q1 - k*iqr, q3 + k*iqr]`.
pub fn iqr_survivor_mask(sorted: &[Dec], k: Dec) -> Vec<bool> {
	let (q1, q3) = quartiles(sorted);
	let iqr = q3.saturating_sub(q1);
	let lower = q1.saturating_sub(k.saturating_mul(iqr));
	let upper = q3.saturating_add(k.saturating_mul(iqr));
	sorted.iter().map(|p| *p >= lower && *p <= upper).collect()
}

/// One-sided Grubbs critical values at alpha=0.05, indexed by sample size
/// `n` (table entries for `n` in `[7, 40]`; `n < 7` never calls this per
/// spec.md §4.10 "applied only if survivors >= 7", `n > 40` reuses the
/// largest tabulated value, a conservative approximation for large samples
/// this module is not expected to see in practice).
const GRUBBS_CRITICAL: [(u32, u32, u32); 34] = [
	// (n, numerator, denominator) representing G_crit scaled by 1000.
	(7, 2020, 1000),
	(8, 2126, 1000),
	(9, 2215, 1000),
	(10, 2290, 1000),
	(11, 2355, 1000),
	(12, 2412, 1000),
	(13, 2462, 1000),
	(14, 2507, 1000),
	(15, 2549, 1000),
	(16, 2585, 1000),
	(17, 2620, 1000),
	(18, 2651, 1000),
	(19, 2681, 1000),
	(20, 2709, 1000),
	(21, 2733, 1000),
	(22, 2758, 1000),
	(23, 2781, 1000),
	(24, 2802, 1000),
	(25, 2822, 1000),
	(26, 2841, 1000),
	(27, 2859, 1000),
	(28, 2876, 1000),
	(29, 2893, 1000),
	(30, 2908, 1000),
	(31, 2924, 1000),
	(32, 2938, 1000),
	(33, 2952, 1000),
	(34, 2965, 1000),
	(35, 2979, 1000),
	(36, 2991, 1000),
	(37, 3003, 1000),
	(38, 3014, 1000),
	(39, 3025, 1000),
	(40, 3036, 1000),
];

pub fn grubbs_critical(n: usize) -> Dec {
	let n = n as u32;
	for (table_n, num, den) in GRUBBS_CRITICAL {
		if n <= table_n {
			return Dec::saturating_from_rational(num, den);
		}
	}
	let (_, num, den) = GRUBBS_CRITICAL[GRUBBS_CRITICAL.len() - 1];
	Dec::saturating_from_rational(num, den)
}

/// Population mean and standard deviation of `prices`, via `Dec`
/// checked arithmetic throughout.
pub fn mean_stddev(prices: &[Dec]) -> (Dec, Dec) {
	let n = prices.len();
	if n == 0 {
		return (Dec::from_inner(0), Dec::from_inner(0));
	}
	let count = Dec::saturating_from_integer(n as u32);
	let sum = prices.iter().fold(Dec::from_inner(0), |acc, p| acc.saturating_add(*p));
	let mean = sum.saturating_div(count);
	let variance = prices
		.iter()
		.fold(Dec::from_inner(0), |acc, p| {
			let d = abs(p.saturating_sub(mean));
			acc.saturating_add(d.saturating_mul(d))
		})
		.saturating_div(count);
	(mean, sqrt_dec(variance))
}

/// Newton's method square root over `Dec`, floor-converging like
/// `vantage_primitives::isqrt` but for fixed-point magnitudes.
fn sqrt_dec(x: Dec) -> Dec {
	if x <= Dec::from_inner(0) {
		return Dec::from_inner(0);
	}
	let mut guess = x.max(Dec::one());
	for _ in 0..64 {
		let next = (guess.saturating_add(x.saturating_div(guess))) / Dec::saturating_from_integer(2u32);
		if abs(next.saturating_sub(guess)) < Dec::from_inner(1) {
			return next;
		}
		guess = next;
	}
	guess
}

/// Returns the index (within `prices`) of the single worst Grubbs outlier, if
/// its statistic exceeds the one-sided critical value for this sample size.
/// Only called with `prices.len() >= 7`, per spec.md §4.10.
pub fn grubbs_worst_outlier(prices: &[Dec]) -> Option<usize> {
	let n = prices.len();
	if n < 7 {
		return None;
	}
	let (mean, stddev) = mean_stddev(prices);
	if stddev.is_zero() {
		return None;
	}
	let mut worst_idx = 0usize;
	let mut worst_g = Dec::from_inner(0);
	for (i, p) in prices.iter().enumerate() {
		let g = abs(p.saturating_sub(mean)).saturating_div(stddev);
		if g > worst_g {
			worst_g = g;
			worst_idx = i;
		}
	}
	if worst_g > grubbs_critical(n) {
		Some(worst_idx)
	} else {
		None
	}
}
