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

//! Sandwich / front-run detection over the bounded per-pool transaction
//! window (spec.md §4.7). Pure functions over a `&[TxRecord<_>]` slice so the
//! classification logic is testable without touching storage, mirroring how
//! `engine.rs` keeps the swap math free of `Pallet<T>`.

use sp_std::vec::Vec;
use vantage_primitives::{Amount, Moment};

use crate::types::TxRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MevKind {
	Sandwich,
	FrontRun,
	BackRun,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MevFinding<AccountId> {
	pub kind: MevKind,
	pub attacker: AccountId,
	pub victim: AccountId,
	/// `attacker_amount / victim_amount`, floor-divided to an integer ratio
	/// for reporting; the threshold comparison itself is done on the exact
	/// `Amount`s in `exceeds_ratio`.
	pub ratio_numerator: Amount,
	pub ratio_denominator: Amount,
}

/// Keeps only the records within `window_seconds` of `now`, newest first.
/// Called before classification so older entries in the ring buffer (which
/// is pruned lazily, not swept in the background per Design Notes §9) never
/// enter a sandwich decision.
pub fn records_in_window<'a, AccountId>(
	records: &'a [TxRecord<AccountId>],
	now: Moment,
	window_seconds: Moment,
) -> Vec<&'a TxRecord<AccountId>> {
	records
		.iter()
		.filter(|r| now.saturating_sub(r.timestamp) <= window_seconds)
		.collect()
}

fn exceeds_ratio(attacker_amount: Amount, victim_amount: Amount, min_ratio_num: u128, min_ratio_den: u128) -> bool {
	if victim_amount.is_zero() {
		return false;
	}
	// `attacker_amount / victim_amount >= min_ratio` without floating point:
	// `attacker_amount * min_ratio_den >= victim_amount * min_ratio_num`.
	let lhs = attacker_amount.as_u256().full_mul(Amount::from(min_ratio_den).as_u256());
	let rhs = victim_amount.as_u256().full_mul(Amount::from(min_ratio_num).as_u256());
	lhs >= rhs
}

/// True if `actual` is within `tolerance_pct`% of `reference` on either side,
/// i.e. the spec.md §4.7 "closeness of attacker-sell output to attacker-buy
/// input (±10%)" check. `tolerance_pct` is out of `tolerance_den` (10/100).
fn within_tolerance(actual: Amount, reference: Amount, tolerance_pct: u128, tolerance_den: u128) -> bool {
	if reference.is_zero() {
		return actual.is_zero();
	}
	let diff = if actual >= reference {
		actual.checked_sub(reference).unwrap_or(Amount::zero())
	} else {
		reference.checked_sub(actual).unwrap_or(Amount::zero())
	};
	let lhs = diff.as_u256().full_mul(Amount::from(tolerance_den).as_u256());
	let rhs = reference.as_u256().full_mul(Amount::from(tolerance_pct).as_u256());
	lhs <= rhs
}

/// Classifies the newest trade in `window` against everything before it.
/// A sandwich needs the same trader on both sides of an opposing-direction
/// victim trade: buy, victim buy (same direction, pushed price up), sell back
/// for a profit bigger than `sandwich_min_ratio` times the victim's trade
/// size, within `window`.
pub fn classify<AccountId: PartialEq + Clone>(
	window: &[&TxRecord<AccountId>],
	sandwich_min_ratio_num: u128,
	sandwich_min_ratio_den: u128,
) -> Option<MevFinding<AccountId>> {
	if window.len() < 3 {
		return None;
	}
	// Records are assumed newest-last (append order); inspect the most recent
	// triple of (front-run, victim, back-run) at the tail of the window.
	let back = window[window.len() - 1];
	for i in (0..window.len() - 1).rev() {
		let victim = window[i];
		if victim.trader == back.trader {
			continue;
		}
		for j in (0..i).rev() {
			let front = window[j];
			if front.trader != back.trader {
				continue;
			}
			if front.sell_a_for_b != back.sell_a_for_b && front.sell_a_for_b == victim.sell_a_for_b {
				// front and victim both sold the same side, back reverses it:
				// classic sandwich shape. Confidence combines the spec's
				// factors (a) and (b): the attacker's buy must dwarf the
				// victim's trade, and the attacker's recovered output must
				// land within 10% of what they originally put in (the "round
				// trip" signature of a sandwich, not a coincidental
				// same-trader reopening of an unrelated position).
				let ratio_ok = exceeds_ratio(front.amount_in, victim.amount_in, sandwich_min_ratio_num, sandwich_min_ratio_den);
				let closeness_ok = within_tolerance(back.amount_out, front.amount_in, 10, 100);
				if ratio_ok && closeness_ok {
					return Some(MevFinding {
						kind: MevKind::Sandwich,
						attacker: back.trader.clone(),
						victim: victim.trader.clone(),
						ratio_numerator: front.amount_in,
						ratio_denominator: victim.amount_in,
					});
				}
			}
		}
	}
	None
}
