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

#![cfg(test)]

use super::*;
use crate::mock::*;
use frame_support::assert_noop;
use sha2::{Digest, Sha256};
use sp_arithmetic::FixedPointNumber;
use vantage_primitives::Denom;

fn uatom() -> Denom {
	Denom::try_from("uatom").unwrap()
}

fn upaw() -> Denom {
	Denom::try_from("upaw").unwrap()
}

fn create_s1_pool() -> PoolId {
	give_balance(ALICE, &uatom(), Amount::from(1_000_000u128));
	give_balance(ALICE, &upaw(), Amount::from(2_000_000u128));
	Dex::create_pool(
		RuntimeOrigin::signed(ALICE),
		b"uatom".to_vec(),
		b"upaw".to_vec(),
		Amount::from(1_000_000u128),
		Amount::from(2_000_000u128),
	)
	.unwrap();
	1
}

#[test]
fn s1_create_and_swap_matches_worked_example() {
	ExtBuilder::default().build().execute_with(|| {
		let pool_id = create_s1_pool();
		let pool = Dex::pools(pool_id).unwrap();
		assert_eq!(u128::try_from(pool.total_shares).unwrap(), 1_414_213);
		assert_eq!(u128::try_from(pool.reserve_a).unwrap(), 1_000_000);
		assert_eq!(u128::try_from(pool.reserve_b).unwrap(), 2_000_000);

		give_balance(BOB, &uatom(), Amount::from(100_000u128));
		set_block_time(1_000);
		Dex::swap(RuntimeOrigin::signed(BOB), pool_id, true, Amount::from(100_000u128), Amount::from(1u128), 1_060).unwrap();

		let pool = Dex::pools(pool_id).unwrap();
		assert_eq!(u128::try_from(pool.reserve_a).unwrap(), 1_100_000);
		assert_eq!(u128::try_from(pool.reserve_b).unwrap(), 1_818_678);
		assert!(engine::k_non_decreasing(
			Amount::from(1_000_000u128),
			Amount::from(2_000_000u128),
			pool.reserve_a,
			pool.reserve_b
		));
	});
}

#[test]
fn s1_swap_too_small_is_rejected() {
	ExtBuilder::default().build().execute_with(|| {
		let pool_id = create_s1_pool();
		give_balance(BOB, &uatom(), Amount::from(1u128));
		set_block_time(1_000);
		assert_noop!(
			Dex::swap(RuntimeOrigin::signed(BOB), pool_id, true, Amount::from(1u128), Amount::from(0u128), 1_060),
			Error::<Test>::SwapTooSmall
		);
	});
}

fn s2_commit_hash(nonce: &[u8]) -> SwapHash {
	let mut buf = Vec::new();
	for chunk in [
		ALICE.encode(),
		1u64.encode(),
		true.encode(),
		Amount::from(900_000u128).encode(),
		Amount::from(1u128).encode(),
		1_700_000_000i64.encode(),
		nonce.to_vec(),
	] {
		buf.extend_from_slice(&chunk);
		buf.push(b'|');
	}
	let mut hasher = Sha256::new();
	hasher.update(&buf);
	hasher.finalize().into()
}

#[test]
fn s2_commit_reveal_happy_path() {
	ExtBuilder::default().build().execute_with(|| {
		let pool_id = create_s1_pool();
		give_balance(ALICE, &uatom(), Amount::from(900_000u128));
		let nonce = b"noncenonce012345".to_vec();
		let hash = s2_commit_hash(&nonce);

		set_block_height(100);
		Dex::commit_swap(RuntimeOrigin::signed(ALICE), hash).unwrap();

		set_block_height(110);
		set_block_time(1_700_000_000);
		assert_noop!(
			Dex::reveal_swap(
				RuntimeOrigin::signed(ALICE),
				pool_id,
				true,
				Amount::from(900_000u128),
				Amount::from(1u128),
				1_700_000_000,
				nonce.clone(),
			),
			Error::<Test>::RevealTooEarly
		);

		set_block_height(111);
		Dex::reveal_swap(
			RuntimeOrigin::signed(ALICE),
			pool_id,
			true,
			Amount::from(900_000u128),
			Amount::from(1u128),
			1_700_000_000,
			nonce,
		)
		.unwrap();
	});
}

#[test]
fn s3_sandwich_third_leg_is_rejected() {
	ExtBuilder::default().build().execute_with(|| {
		let pool_id = create_s1_pool();
		const ATTACKER: AccountId = 10;
		const VICTIM: AccountId = 11;
		give_balance(ATTACKER, &uatom(), Amount::from(1_000_000u128));
		give_balance(ATTACKER, &upaw(), Amount::from(1_000_000u128));
		give_balance(VICTIM, &uatom(), Amount::from(200_000u128));

		// Amounts are sized so every leg clears the 10% max-price-impact guard
		// (step 5) on its own, keeping the rejection attributable to the MEV
		// check (step 7) that follows it rather than a coincidental impact
		// breach: front 5% of reserve_a, victim 2.5x smaller (clears
		// `sandwich_min_ratio`), back sized to land within 10% of the front's
		// input (clears `within_tolerance`).
		set_block_time(0);
		Dex::swap(RuntimeOrigin::signed(ATTACKER), pool_id, true, Amount::from(50_000u128), Amount::from(1u128), 60).unwrap();

		set_block_time(5);
		Dex::swap(RuntimeOrigin::signed(VICTIM), pool_id, true, Amount::from(20_000u128), Amount::from(1u128), 60).unwrap();

		set_block_time(10);
		let result = Dex::swap(RuntimeOrigin::signed(ATTACKER), pool_id, false, Amount::from(91_919u128), Amount::from(1u128), 60);
		assert_noop!(result, Error::<Test>::MEVDetected);
	});
}

#[test]
fn s5_twap_accumulates_monotonically() {
	ExtBuilder::default().build().execute_with(|| {
		let pool_id = create_s1_pool();
		give_balance(BOB, &uatom(), Amount::from(1_000_000u128));

		set_block_time(0);
		Dex::swap(RuntimeOrigin::signed(BOB), pool_id, true, Amount::from(10_000u128), Amount::from(1u128), 60).unwrap();
		let twap_at_0 = Dex::pool_twaps(pool_id);

		set_block_time(10);
		Dex::swap(RuntimeOrigin::signed(BOB), pool_id, true, Amount::from(10_000u128), Amount::from(1u128), 70).unwrap();

		set_block_time(30);
		Dex::swap(RuntimeOrigin::signed(BOB), pool_id, true, Amount::from(10_000u128), Amount::from(1u128), 90).unwrap();
		let twap_at_30 = Dex::pool_twaps(pool_id);

		assert!(twap_at_30.total_seconds > twap_at_0.total_seconds);
		assert!(twap_at_30.cum_price_a >= twap_at_0.cum_price_a);
	});
}

#[test]
fn twap_a_windowed_query_matches_hand_computed_average() {
	ExtBuilder::default().build().execute_with(|| {
		let pool_id = create_s1_pool();
		give_balance(BOB, &uatom(), Amount::from(1_000_000u128));

		// Three 10,000-uatom swaps at t=0/20/50 (block heights 1/2/3 so each
		// gets its own `PoolTwapSnapshots` row instead of overwriting the
		// last). Reserves after each swap, worked by hand with the same
		// floor-division the engine uses:
		//   swap 1: 1,000,000/2,000,000 -> 1,010,000/1,980,257
		//   swap 2: 1,010,000/1,980,257 -> 1,020,000/1,960,901
		//   swap 3: 1,020,000/1,960,901 -> 1,030,000/1,941,920
		set_block_height(1);
		set_block_time(0);
		Dex::swap(RuntimeOrigin::signed(BOB), pool_id, true, Amount::from(10_000u128), Amount::from(1u128), 60).unwrap();

		set_block_height(2);
		set_block_time(20);
		Dex::swap(RuntimeOrigin::signed(BOB), pool_id, true, Amount::from(10_000u128), Amount::from(1u128), 70).unwrap();

		set_block_height(3);
		set_block_time(50);
		Dex::swap(RuntimeOrigin::signed(BOB), pool_id, true, Amount::from(10_000u128), Amount::from(1u128), 100).unwrap();

		let pool = Dex::pools(pool_id).unwrap();
		assert_eq!(u128::try_from(pool.reserve_a).unwrap(), 1_030_000);
		assert_eq!(u128::try_from(pool.reserve_b).unwrap(), 1_941_920);

		// The last update (at t=50) accumulated the post-swap-3 spot price
		// over the dt=30 span since the t=20 snapshot, so the 30-second
		// window average recovers exactly that spot price.
		let want = Dec::checked_from_rational(1_941_920u128, 1_030_000u128).unwrap();
		assert_eq!(Dex::twap_a(pool_id, 30), Some(want));

		// A lookback longer than any retained history has no qualifying
		// snapshot to anchor the window on.
		assert_eq!(Dex::twap_a(pool_id, 1_000), None);
	});
}

/// spec.md §8 S6 is the "swap fails on post-check `k` invariant (simulated)"
/// example: `engine::swap`'s constant-product formula guarantees a
/// non-decreasing `k` by construction, so the guard in `do_swap` step 8 can
/// never actually fire through the public dispatchable — see
/// `engine::k_non_decreasing_rejects_a_simulated_decrease` for direct coverage
/// of that guard against a corrupted reserve pair. What this test covers is a
/// different, genuinely reachable rejection: an invalid-amount precondition
/// failing before any reserve mutation, leaving pool and TWAP state untouched.
#[test]
fn failed_precondition_check_leaves_state_untouched() {
	ExtBuilder::default().build().execute_with(|| {
		let pool_id = create_s1_pool();
		let pool_before = Dex::pools(pool_id).unwrap();
		let twap_before = Dex::pool_twaps(pool_id);

		give_balance(BOB, &uatom(), Amount::from(0u128));
		set_block_time(1_000);
		let result = Dex::swap(RuntimeOrigin::signed(BOB), pool_id, true, Amount::from(0u128), Amount::from(0u128), 1_060);
		assert_noop!(result, Error::<Test>::InvalidAmount);

		let pool_after = Dex::pools(pool_id).unwrap();
		let twap_after = Dex::pool_twaps(pool_id);
		assert_eq!(pool_before, pool_after);
		assert_eq!(twap_before, twap_after);
	});
}

#[test]
fn circuit_breaker_blocks_swaps_until_duration_elapses() {
	ExtBuilder::default().build().execute_with(|| {
		let pool_id = create_s1_pool();
		set_block_time(0);
		Dex::trigger_circuit_breaker(RuntimeOrigin::signed(EMERGENCY_ADMIN), pool_id, b"manual".to_vec()).unwrap();

		give_balance(BOB, &uatom(), Amount::from(100_000u128));
		assert_noop!(
			Dex::swap(RuntimeOrigin::signed(BOB), pool_id, true, Amount::from(100_000u128), Amount::from(1u128), 60),
			Error::<Test>::CircuitBreakerActive
		);

		set_block_time(301);
		Dex::swap(RuntimeOrigin::signed(BOB), pool_id, true, Amount::from(100_000u128), Amount::from(1u128), 361).unwrap();
	});
}
