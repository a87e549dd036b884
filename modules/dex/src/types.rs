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
use sp_arithmetic::FixedPointNumber;
use sp_runtime::RuntimeDebug;
use vantage_primitives::{Amount, BlockHeight, Dec, Denom, Moment};

/// spec.md §3 "Pool". `token_a < token_b` always (enforced at creation by
/// `TradingPair::canonicalize`).
#[derive(Encode, Decode, Clone, PartialEq, Eq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub struct PoolInfo<AccountId> {
	pub token_a: Denom,
	pub token_b: Denom,
	pub reserve_a: Amount,
	pub reserve_b: Amount,
	pub total_shares: Amount,
	pub creator: AccountId,
}

/// spec.md §3 "PoolTWAP".
#[derive(Encode, Decode, Clone, PartialEq, Eq, RuntimeDebug, TypeInfo, MaxEncodedLen, Default)]
pub struct PoolTwap {
	pub cum_price_a: Dec,
	pub cum_price_b: Dec,
	pub last_block_time: Moment,
	pub total_seconds: u64,
}

/// One historical point of `PoolTwap`'s accumulator, kept so spec.md §4.8's
/// windowed `twap(pool_id, lookback_seconds)` query can look up "the
/// accumulator value `lookback_seconds` ago" instead of only ever seeing the
/// latest running total. Mirrors `module-oracle`'s
/// `PriceSnapshotInfo`/`SnapshotIndex` ring-buffer pattern.
#[derive(Encode, Decode, Clone, PartialEq, Eq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub struct PoolTwapSnapshot {
	pub cum_price_a: Dec,
	pub cum_price_b: Dec,
	pub block_time: Moment,
}

/// spec.md §3 "CircuitBreakerState". `paused_until == 0` means not paused.
#[derive(Encode, Decode, Clone, PartialEq, Eq, RuntimeDebug, TypeInfo, MaxEncodedLen, Default)]
pub struct CircuitBreakerState<AccountId> {
	pub paused_until: Moment,
	pub triggered_by: Option<AccountId>,
	pub trigger_reason: BoundedVec<u8, ConstU32<64>>,
	pub notifications_sent: u32,
	pub last_notification: Moment,
}

impl<AccountId> CircuitBreakerState<AccountId> {
	pub fn is_paused(&self, now: Moment) -> bool {
		// "exactly equal is not paused" per spec.md §8 boundary behavior.
		self.paused_until > now
	}
}

/// spec.md §3 "SwapCommit".
#[derive(Encode, Decode, Clone, PartialEq, Eq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub struct SwapCommit {
	pub commit_height: BlockHeight,
	pub expiry_height: BlockHeight,
}

/// The 32 raw bytes of a commitment's sha256 hash. Stored decoded (rather
/// than as the 64 hex characters the wire message carries) so reveal only
/// has to compare byte slices, not re-encode to hex.
pub type SwapHash = [u8; 32];

/// spec.md §3 "TransactionRecord (MEV window)", one entry per swap inside
/// `SandwichDetectionWindow`. Stored as a bounded ring buffer per pool
/// (Design Notes §9: "modeled as bounded ring buffers ... pruned lazily on
/// each touch; no background sweeper task"), not a literal triple-keyed map.
#[derive(Encode, Decode, Clone, PartialEq, Eq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub struct TxRecord<AccountId> {
	pub block_height: BlockHeight,
	pub tx_index: u32,
	pub trader: AccountId,
	/// `true` when the trade sells `token_a` for `token_b`.
	pub sell_a_for_b: bool,
	pub amount_in: Amount,
	pub amount_out: Amount,
	pub timestamp: Moment,
}

pub const MAX_MEV_WINDOW: u32 = 256;
pub type TxWindow<AccountId> = BoundedVec<TxRecord<AccountId>, ConstU32<MAX_MEV_WINDOW>>;

/// spec.md §6 "Parameter set" (DEX half) plus spec.md §4 thresholds that are
/// configurable rather than hardcoded. Design Notes §9 item 1 ("two competing
/// `DefaultParams` definitions ... the richer one") is resolved here: this is
/// the richer shape, with the LP/protocol fee split and all guard thresholds.
#[derive(Encode, Decode, Clone, PartialEq, Eq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub struct DexParams {
	pub swap_fee: Dec,
	pub lp_fee: Dec,
	pub protocol_fee: Dec,
	pub min_liquidity: Amount,
	pub max_slippage_percent: Dec,
	pub max_pool_drain_percent: Dec,
	pub max_price_impact: Dec,
	pub circuit_breaker_threshold: Dec,
	pub circuit_breaker_duration_seconds: Moment,
	pub notification_throttle_seconds: Moment,
	pub flash_loan_protection_blocks: BlockHeight,
	pub enable_commit_reveal: bool,
	pub commit_reveal_delay: BlockHeight,
	pub commit_timeout_blocks: BlockHeight,
	pub sandwich_detection_window_seconds: Moment,
	pub sandwich_min_ratio: Dec,
}

impl Default for DexParams {
	fn default() -> Self {
		Self {
			swap_fee: Dec::from_rational(3, 1000),        // 0.003
			lp_fee: Dec::from_rational(25, 10_000),       // 0.0025
			protocol_fee: Dec::from_rational(5, 10_000),  // 0.0005
			min_liquidity: Amount::from(1_000u128),
			max_slippage_percent: Dec::from_rational(5, 100),
			max_pool_drain_percent: Dec::from_rational(30, 100),
			max_price_impact: Dec::from_rational(10, 100),
			circuit_breaker_threshold: Dec::from_rational(20, 100),
			circuit_breaker_duration_seconds: 300,
			notification_throttle_seconds: 60,
			flash_loan_protection_blocks: 1,
			enable_commit_reveal: true,
			commit_reveal_delay: 10,
			commit_timeout_blocks: 100,
			sandwich_detection_window_seconds: 60,
			sandwich_min_ratio: Dec::from_rational(2, 1),
		}
	}
}

impl DexParams {
	/// Invariant from spec.md §6: `lp_fee + protocol_fee == swap_fee`, every
	/// fee in `[0,1]`, `max_slippage_percent >= 0.001`.
	pub fn is_valid(&self) -> bool {
		let zero = Dec::from_inner(0);
		let one = Dec::one();
		let in_unit = |d: Dec| d >= zero && d <= one;

		in_unit(self.swap_fee)
			&& in_unit(self.lp_fee)
			&& in_unit(self.protocol_fee)
			&& self.lp_fee.saturating_add(self.protocol_fee) == self.swap_fee
			&& !self.min_liquidity.is_zero()
			&& self.max_slippage_percent >= Dec::from_rational(1, 1000)
			&& self.max_slippage_percent <= one
			&& in_unit(self.max_pool_drain_percent)
			&& self.max_pool_drain_percent > zero
			&& in_unit(self.max_price_impact)
			&& self.max_price_impact > zero
	}
}
