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

//! Constant-product pool engine, swap controller, commit-reveal anti-MEV
//! layer and circuit breaker.

#![cfg_attr(not(feature = "std"), no_std)]
#![allow(clippy::unused_unit)]

use frame_support::{pallet_prelude::*, transactional, BoundedVec};
use frame_system::pallet_prelude::*;
use module_support::{Bank, CircuitBreakerControl, Clock, Governance};
use sha2::{Digest, Sha256};
use sp_arithmetic::FixedPointNumber;
use sp_std::vec::Vec;
use vantage_primitives::{Amount, BlockHeight, Dec, Denom, MathError, Moment, PoolId, TradingPair};

mod engine;
mod mev;
mod types;

#[cfg(test)]
mod mock;
#[cfg(test)]
mod tests;

pub use engine::EngineError;
pub use mev::{MevFinding, MevKind};
pub use module::*;
pub use types::{
	CircuitBreakerState, DexParams, PoolInfo, PoolTwap, PoolTwapSnapshot, SwapCommit, SwapHash, TxRecord, TxWindow, MAX_MEV_WINDOW,
};

/// Number of expired `SwapCommit`s opportunistically reaped per
/// commit/reveal call, per spec.md §4.5 "Pruning".
const COMMIT_REAP_BATCH: u32 = 4;

/// Bound on `PoolTwapSnapshotIndex`'s ring buffer, same order of magnitude as
/// `module-oracle`'s `MAX_SNAPSHOT_INDEX`.
const MAX_POOL_TWAP_SNAPSHOTS: u32 = 512;

#[frame_support::pallet]
pub mod module {
	use super::*;

	#[pallet::config]
	pub trait Config: frame_system::Config {
		type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

		type Bank: Bank<Self::AccountId>;
		type Governance: Governance<Self::AccountId>;
		type Clock: Clock;

		/// The account that escrows every pool's reserves.
		#[pallet::constant]
		type ModuleAccount: Get<Self::AccountId>;

		/// The account the protocol fee share is paid to.
		#[pallet::constant]
		type ProtocolFeeAccount: Get<Self::AccountId>;
	}

	#[pallet::error]
	pub enum Error<T> {
		InvalidDenom,
		SameToken,
		InvalidAmount,
		InvalidPoolId,
		InvalidNonce,
		DeadlineExceeded,
		PoolNotFound,
		PoolAlreadyExists,
		InsufficientLiquidity,
		InsufficientShares,
		MinimumReserves,
		SwapTooSmall,
		SlippageExceeded,
		PriceImpactTooHigh,
		MaxPoolDrainExceeded,
		CircuitBreakerActive,
		FlashLoanDetected,
		MEVDetected,
		CommitmentNotFound,
		DuplicateCommitment,
		RevealTooEarly,
		CommitmentExpired,
		CommitRevealDisabled,
		InvalidCommitHash,
		Overflow,
		Underflow,
		DivisionByZero,
		Unauthorized,
		InvariantViolation,
	}

	impl<T> From<MathError> for Error<T> {
		fn from(e: MathError) -> Self {
			match e {
				MathError::Overflow => Error::<T>::Overflow,
				MathError::Underflow => Error::<T>::Underflow,
				MathError::DivisionByZero => Error::<T>::DivisionByZero,
			}
		}
	}

	impl<T> From<EngineError> for Error<T> {
		fn from(e: EngineError) -> Self {
			match e {
				EngineError::Math(m) => m.into(),
				EngineError::InsufficientLiquidity => Error::<T>::InsufficientLiquidity,
				EngineError::SwapTooSmall => Error::<T>::SwapTooSmall,
			}
		}
	}

	#[pallet::event]
	#[pallet::generate_deposit(pub(crate) fn deposit_event)]
	pub enum Event<T: Config> {
		PoolCreated {
			pool_id: PoolId,
			creator: T::AccountId,
			token_a: Denom,
			token_b: Denom,
		},
		LiquidityAdded {
			pool_id: PoolId,
			who: T::AccountId,
			shares: Amount,
			amount_a: Amount,
			amount_b: Amount,
		},
		LiquidityRemoved {
			pool_id: PoolId,
			who: T::AccountId,
			shares: Amount,
			amount_a: Amount,
			amount_b: Amount,
		},
		SwapExecuted {
			pool_id: PoolId,
			trader: T::AccountId,
			sell_a_for_b: bool,
			amount_in: Amount,
			amount_out: Amount,
			fee: Amount,
			price_impact: Dec,
			block_height: BlockHeight,
		},
		SwapCommitted {
			trader: T::AccountId,
			expiry_height: BlockHeight,
		},
		SwapRevealed {
			trader: T::AccountId,
			pool_id: PoolId,
		},
		CircuitBreakerTriggered {
			pool_id: PoolId,
			triggered_by: Option<T::AccountId>,
			paused_until: Moment,
		},
		CircuitBreakerCleared {
			pool_id: PoolId,
		},
		MevDetected {
			pool_id: PoolId,
			kind: MevKind,
			attacker: T::AccountId,
			victim: T::AccountId,
		},
		ParamsUpdated,
	}

	#[pallet::storage]
	#[pallet::getter(fn next_pool_id)]
	pub type NextPoolId<T: Config> = StorageValue<_, PoolId, ValueQuery>;

	#[pallet::storage]
	#[pallet::getter(fn pools)]
	pub type Pools<T: Config> = StorageMap<_, Twox64Concat, PoolId, PoolInfo<T::AccountId>, OptionQuery>;

	#[pallet::storage]
	pub type PoolIdByPair<T: Config> = StorageMap<_, Blake2_128Concat, TradingPair, PoolId, OptionQuery>;

	#[pallet::storage]
	#[pallet::getter(fn liquidity_positions)]
	pub type LiquidityPositions<T: Config> =
		StorageDoubleMap<_, Twox64Concat, PoolId, Blake2_128Concat, T::AccountId, Amount, ValueQuery>;

	#[pallet::storage]
	#[pallet::getter(fn pool_twaps)]
	pub type PoolTwaps<T: Config> = StorageMap<_, Twox64Concat, PoolId, PoolTwap, ValueQuery>;

	/// Historical accumulator points for the windowed TWAP query (spec.md
	/// §4.8), keyed by `(pool_id, block_height)`.
	#[pallet::storage]
	pub type PoolTwapSnapshots<T: Config> =
		StorageDoubleMap<_, Twox64Concat, PoolId, Twox64Concat, BlockHeight, PoolTwapSnapshot, OptionQuery>;

	/// Ordered (ascending) heights that have a snapshot for this pool, the
	/// same bounded-index idiom `module-oracle::SnapshotIndex` uses for lazy
	/// pruning without an unbounded double-map iteration.
	#[pallet::storage]
	pub type PoolTwapSnapshotIndex<T: Config> =
		StorageMap<_, Twox64Concat, PoolId, BoundedVec<BlockHeight, ConstU32<MAX_POOL_TWAP_SNAPSHOTS>>, ValueQuery>;

	#[pallet::storage]
	#[pallet::getter(fn circuit_breakers)]
	pub type CircuitBreakers<T: Config> =
		StorageMap<_, Twox64Concat, PoolId, CircuitBreakerState<T::AccountId>, ValueQuery>;

	#[pallet::storage]
	pub type SwapCommits<T: Config> =
		StorageDoubleMap<_, Blake2_128Concat, T::AccountId, Blake2_128Concat, SwapHash, SwapCommit, OptionQuery>;

	/// Every outstanding commitment key, so expired ones can be found and
	/// reaped without an unbounded double-map iteration; bounded the same way
	/// as `TxWindow` per Design Notes §9.
	#[pallet::storage]
	pub type PendingCommitments<T: Config> =
		StorageValue<_, BoundedVec<(T::AccountId, SwapHash), ConstU32<1024>>, ValueQuery>;

	#[pallet::storage]
	#[pallet::getter(fn tx_windows)]
	pub type TxWindows<T: Config> = StorageMap<_, Twox64Concat, PoolId, TxWindow<T::AccountId>, ValueQuery>;

	#[pallet::storage]
	pub type LastLiquidityAdd<T: Config> =
		StorageDoubleMap<_, Twox64Concat, PoolId, Blake2_128Concat, T::AccountId, BlockHeight, OptionQuery>;

	#[pallet::storage]
	#[pallet::getter(fn params)]
	pub type Params<T: Config> = StorageValue<_, DexParams, ValueQuery>;

	#[pallet::genesis_config]
	pub struct GenesisConfig {
		pub params: DexParams,
	}

	impl Default for GenesisConfig {
		fn default() -> Self {
			Self { params: DexParams::default() }
		}
	}

	#[pallet::genesis_build]
	impl<T: Config> GenesisBuild<T> for GenesisConfig {
		fn build(&self) {
			assert!(self.params.is_valid(), "dex genesis params fail is_valid()");
			Params::<T>::put(self.params.clone());
		}
	}

	#[pallet::pallet]
	#[pallet::without_storage_info]
	pub struct Pallet<T>(_);

	#[pallet::hooks]
	impl<T: Config> Hooks<BlockNumberFor<T>> for Pallet<T> {}

	#[pallet::call]
	impl<T: Config> Pallet<T> {
		#[pallet::weight(10_000)]
		#[transactional]
		pub fn create_pool(
			origin: OriginFor<T>,
			token_a: Vec<u8>,
			token_b: Vec<u8>,
			amount_a: Amount,
			amount_b: Amount,
		) -> DispatchResult {
			let who = ensure_signed(origin)?;
			Self::do_create_pool(who, token_a, token_b, amount_a, amount_b)
		}

		#[pallet::weight(10_000)]
		#[transactional]
		pub fn add_liquidity(
			origin: OriginFor<T>,
			pool_id: PoolId,
			amount_a: Amount,
			amount_b: Amount,
		) -> DispatchResult {
			let who = ensure_signed(origin)?;
			Self::do_add_liquidity(who, pool_id, amount_a, amount_b)
		}

		#[pallet::weight(10_000)]
		#[transactional]
		pub fn remove_liquidity(origin: OriginFor<T>, pool_id: PoolId, shares: Amount) -> DispatchResult {
			let who = ensure_signed(origin)?;
			Self::do_remove_liquidity(who, pool_id, shares)
		}

		#[pallet::weight(10_000)]
		#[transactional]
		pub fn swap(
			origin: OriginFor<T>,
			pool_id: PoolId,
			sell_a_for_b: bool,
			amount_in: Amount,
			min_amount_out: Amount,
			deadline: Moment,
		) -> DispatchResult {
			let who = ensure_signed(origin)?;
			Self::do_swap(who, pool_id, sell_a_for_b, amount_in, min_amount_out, deadline)?;
			Ok(())
		}

		#[pallet::weight(10_000)]
		#[transactional]
		pub fn commit_swap(origin: OriginFor<T>, swap_hash: SwapHash) -> DispatchResult {
			let who = ensure_signed(origin)?;
			Self::do_commit_swap(who, swap_hash)
		}

		#[pallet::weight(10_000)]
		#[transactional]
		pub fn reveal_swap(
			origin: OriginFor<T>,
			pool_id: PoolId,
			sell_a_for_b: bool,
			amount_in: Amount,
			min_amount_out: Amount,
			deadline: Moment,
			nonce: Vec<u8>,
		) -> DispatchResult {
			let who = ensure_signed(origin)?;
			Self::do_reveal_swap(who, pool_id, sell_a_for_b, amount_in, min_amount_out, deadline, nonce)
		}

		/// Operator command gated by the configured emergency admin, per
		/// spec.md §4.6 "Triggers: ... operator command".
		#[pallet::weight(10_000)]
		#[transactional]
		pub fn trigger_circuit_breaker(origin: OriginFor<T>, pool_id: PoolId, reason: Vec<u8>) -> DispatchResult {
			let who = ensure_signed(origin)?;
			let admin = T::Governance::emergency_admin().ok_or(Error::<T>::Unauthorized)?;
			ensure!(who == admin, Error::<T>::Unauthorized);
			ensure!(Pools::<T>::contains_key(pool_id), Error::<T>::PoolNotFound);
			Self::do_trigger_circuit_breaker(pool_id, Some(who), &reason);
			Ok(())
		}

		#[pallet::weight(10_000)]
		#[transactional]
		pub fn update_params(origin: OriginFor<T>, params: DexParams) -> DispatchResult {
			ensure!(T::Governance::module_authority() == ensure_signed(origin)?, Error::<T>::Unauthorized);
			ensure!(params.is_valid(), Error::<T>::InvalidAmount);
			Params::<T>::put(params);
			Self::deposit_event(Event::ParamsUpdated);
			Ok(())
		}
	}

	impl<T: Config> Pallet<T> {
		fn do_create_pool(
			who: T::AccountId,
			token_a: Vec<u8>,
			token_b: Vec<u8>,
			amount_a: Amount,
			amount_b: Amount,
		) -> DispatchResult {
			ensure!(!amount_a.is_zero() && !amount_b.is_zero(), Error::<T>::InvalidAmount);
			let denom_a = Denom::try_from(token_a.as_slice()).map_err(|_| Error::<T>::InvalidDenom)?;
			let denom_b = Denom::try_from(token_b.as_slice()).map_err(|_| Error::<T>::InvalidDenom)?;
			let (pair, swapped) = TradingPair::canonicalize(denom_a, denom_b).ok_or(Error::<T>::SameToken)?;
			ensure!(PoolIdByPair::<T>::get(&pair).is_none(), Error::<T>::PoolAlreadyExists);

			let (reserve_a, reserve_b) = if swapped { (amount_b, amount_a) } else { (amount_a, amount_b) };
			let total_shares = engine::initial_shares(reserve_a, reserve_b).map_err(Error::<T>::from)?;
			ensure!(!total_shares.is_zero(), Error::<T>::InsufficientLiquidity);
			let min_liquidity = Params::<T>::get().min_liquidity;
			ensure!(total_shares >= min_liquidity, Error::<T>::MinimumReserves);

			T::Bank::transfer(&who, &T::ModuleAccount::get(), &pair.token_a, reserve_a)?;
			T::Bank::transfer(&who, &T::ModuleAccount::get(), &pair.token_b, reserve_b)?;

			let pool_id = NextPoolId::<T>::mutate(|id| {
				let assigned = *id;
				*id = id.saturating_add(1);
				assigned
			});

			Pools::<T>::insert(
				pool_id,
				PoolInfo {
					token_a: pair.token_a.clone(),
					token_b: pair.token_b.clone(),
					reserve_a,
					reserve_b,
					total_shares,
					creator: who.clone(),
				},
			);
			PoolIdByPair::<T>::insert(&pair, pool_id);
			LiquidityPositions::<T>::insert(pool_id, &who, total_shares);

			log::debug!(target: "vantage::dex", "pool {} created by {:?}", pool_id, who);
			Self::deposit_event(Event::PoolCreated {
				pool_id,
				creator: who,
				token_a: pair.token_a,
				token_b: pair.token_b,
			});
			Ok(())
		}

		fn do_add_liquidity(who: T::AccountId, pool_id: PoolId, amount_a: Amount, amount_b: Amount) -> DispatchResult {
			ensure!(!amount_a.is_zero() && !amount_b.is_zero(), Error::<T>::InvalidAmount);
			let mut pool = Pools::<T>::get(pool_id).ok_or(Error::<T>::PoolNotFound)?;

			let result = engine::add_liquidity(pool.reserve_a, pool.reserve_b, pool.total_shares, amount_a, amount_b)
				.map_err(Error::<T>::from)?;

			T::Bank::transfer(&who, &T::ModuleAccount::get(), &pool.token_a, result.amount_a_used)?;
			T::Bank::transfer(&who, &T::ModuleAccount::get(), &pool.token_b, result.amount_b_used)?;

			pool.reserve_a = pool.reserve_a.checked_add(result.amount_a_used).map_err(Error::<T>::from)?;
			pool.reserve_b = pool.reserve_b.checked_add(result.amount_b_used).map_err(Error::<T>::from)?;
			pool.total_shares = pool.total_shares.checked_add(result.shares_issued).map_err(Error::<T>::from)?;
			Pools::<T>::insert(pool_id, &pool);

			LiquidityPositions::<T>::mutate(pool_id, &who, |shares| {
				*shares = shares.checked_add(result.shares_issued).unwrap_or(*shares);
			});
			LastLiquidityAdd::<T>::insert(pool_id, &who, T::Clock::block_height());

			Self::deposit_event(Event::LiquidityAdded {
				pool_id,
				who,
				shares: result.shares_issued,
				amount_a: result.amount_a_used,
				amount_b: result.amount_b_used,
			});
			Ok(())
		}

		fn do_remove_liquidity(who: T::AccountId, pool_id: PoolId, shares: Amount) -> DispatchResult {
			ensure!(!shares.is_zero(), Error::<T>::InvalidAmount);
			let mut pool = Pools::<T>::get(pool_id).ok_or(Error::<T>::PoolNotFound)?;
			let held = LiquidityPositions::<T>::get(pool_id, &who);
			ensure!(held >= shares, Error::<T>::InsufficientShares);

			let result = engine::remove_liquidity(pool.reserve_a, pool.reserve_b, pool.total_shares, shares)
				.map_err(Error::<T>::from)?;

			let remaining_shares = pool.total_shares.checked_sub(shares).map_err(Error::<T>::from)?;
			ensure!(
				remaining_shares.is_zero() || remaining_shares >= Params::<T>::get().min_liquidity,
				Error::<T>::MinimumReserves
			);

			pool.reserve_a = pool.reserve_a.checked_sub(result.amount_a).map_err(Error::<T>::from)?;
			pool.reserve_b = pool.reserve_b.checked_sub(result.amount_b).map_err(Error::<T>::from)?;
			pool.total_shares = remaining_shares;

			T::Bank::transfer(&T::ModuleAccount::get(), &who, &pool.token_a, result.amount_a)?;
			T::Bank::transfer(&T::ModuleAccount::get(), &who, &pool.token_b, result.amount_b)?;

			let remaining_held = held.checked_sub(shares).map_err(Error::<T>::from)?;
			if remaining_held.is_zero() {
				LiquidityPositions::<T>::remove(pool_id, &who);
			} else {
				LiquidityPositions::<T>::insert(pool_id, &who, remaining_held);
			}
			Pools::<T>::insert(pool_id, &pool);

			Self::deposit_event(Event::LiquidityRemoved {
				pool_id,
				who,
				shares,
				amount_a: result.amount_a,
				amount_b: result.amount_b,
			});
			Ok(())
		}

		/// Implements the fixed eight-step validation order of spec.md §4.4,
		/// shared by the direct `swap` call and `reveal_swap`.
		fn do_swap(
			who: T::AccountId,
			pool_id: PoolId,
			sell_a_for_b: bool,
			amount_in: Amount,
			min_amount_out: Amount,
			deadline: Moment,
		) -> Result<Amount, DispatchError> {
			ensure!(!amount_in.is_zero(), Error::<T>::InvalidAmount);
			let now = T::Clock::block_time();
			let block_height = T::Clock::block_height();

			// 1. Circuit breaker.
			let breaker = CircuitBreakers::<T>::get(pool_id);
			ensure!(!breaker.is_paused(now), Error::<T>::CircuitBreakerActive);

			// 2. Deadline.
			ensure!(deadline >= now, Error::<T>::DeadlineExceeded);

			let mut pool = Pools::<T>::get(pool_id).ok_or(Error::<T>::PoolNotFound)?;
			let params = Params::<T>::get();
			let (reserve_in, reserve_out) = if sell_a_for_b {
				(pool.reserve_a, pool.reserve_b)
			} else {
				(pool.reserve_b, pool.reserve_a)
			};

			let swap_result = engine::swap(reserve_in, reserve_out, amount_in, params.swap_fee, params.lp_fee, params.protocol_fee)
				.map_err(Error::<T>::from)?;

			// 3. Slippage.
			ensure!(swap_result.amount_out >= min_amount_out, Error::<T>::SlippageExceeded);

			// 4. Max pool drain.
			let max_drain = reserve_out.mul_div(
				Amount::from((params.max_pool_drain_percent.into_inner().unsigned_abs()) as u128),
				Amount::from(Dec::DIV.unsigned_abs() as u128),
			)?;
			ensure!(swap_result.amount_out <= max_drain, Error::<T>::MaxPoolDrainExceeded);

			// 5. Price impact.
			let expected_out = engine::expected_out_no_slippage(amount_in, reserve_in, reserve_out).map_err(Error::<T>::from)?;
			let impact = engine::price_impact(swap_result.amount_out, expected_out).map_err(Error::<T>::from)?;
			if impact > params.circuit_breaker_threshold {
				Self::do_trigger_circuit_breaker(pool_id, None, b"price impact breach");
			}
			ensure!(impact <= params.max_price_impact, Error::<T>::PriceImpactTooHigh);

			// 6. Flash-loan / JIT protection.
			if let Some(added_at) = LastLiquidityAdd::<T>::get(pool_id, &who) {
				ensure!(
					block_height.saturating_sub(added_at) >= params.flash_loan_protection_blocks,
					Error::<T>::FlashLoanDetected
				);
			}

			// 7. MEV scan over the rolling window. The current swap has not
			// been committed to `TxWindows` yet, so it is scanned as a
			// tentative trailing record: the classifier treats it as the
			// prospective "back" leg of a sandwich against everything already
			// in the window, per spec.md §4.7 "append a tentative record; run
			// the sandwich detector".
			let window_records = TxWindows::<T>::get(pool_id);
			let timestamp = now;
			let mut in_window = mev::records_in_window(&window_records, timestamp, params.sandwich_detection_window_seconds);
			let tentative = TxRecord {
				block_height,
				tx_index: 0,
				trader: who.clone(),
				sell_a_for_b,
				amount_in,
				amount_out: swap_result.amount_out,
				timestamp,
			};
			in_window.push(&tentative);
			let sandwich_min_ratio_num = u128::try_from(params.sandwich_min_ratio.into_inner().unsigned_abs())
				.unwrap_or(u128::MAX);
			let sandwich_min_ratio_den = Dec::DIV.unsigned_abs() as u128;
			if let Some(finding) = mev::classify(&in_window, sandwich_min_ratio_num, sandwich_min_ratio_den) {
				if finding.attacker == who {
					Self::deposit_event(Event::MevDetected {
						pool_id,
						kind: finding.kind,
						attacker: finding.attacker,
						victim: finding.victim,
					});
					return Err(Error::<T>::MEVDetected.into());
				}
			}

			// 8. Execute, update TWAP, commit the MEV record, emit the event.
			if !engine::k_non_decreasing(reserve_in, reserve_out, swap_result.new_reserve_in, swap_result.new_reserve_out) {
				log::error!(target: "vantage::dex", "k decreased on pool {}", pool_id);
				return Err(Error::<T>::InvariantViolation.into());
			}

			let (token_in, token_out) = if sell_a_for_b {
				(pool.token_a.clone(), pool.token_b.clone())
			} else {
				(pool.token_b.clone(), pool.token_a.clone())
			};
			T::Bank::transfer(&who, &T::ModuleAccount::get(), &token_in, amount_in)?;
			T::Bank::transfer(&T::ModuleAccount::get(), &who, &token_out, swap_result.amount_out)?;
			if !swap_result.protocol_fee_amount.is_zero() {
				T::Bank::transfer(
					&T::ModuleAccount::get(),
					&T::ProtocolFeeAccount::get(),
					&token_in,
					swap_result.protocol_fee_amount,
				)?;
			}

			if sell_a_for_b {
				pool.reserve_a = swap_result.new_reserve_in;
				pool.reserve_b = swap_result.new_reserve_out;
			} else {
				pool.reserve_b = swap_result.new_reserve_in;
				pool.reserve_a = swap_result.new_reserve_out;
			}
			Pools::<T>::insert(pool_id, &pool);

			Self::update_twap(pool_id, &pool, now);
			Self::push_tx_record(
				pool_id,
				TxRecord {
					block_height,
					tx_index: 0,
					trader: who.clone(),
					sell_a_for_b,
					amount_in,
					amount_out: swap_result.amount_out,
					timestamp,
				},
			);

			Self::deposit_event(Event::SwapExecuted {
				pool_id,
				trader: who,
				sell_a_for_b,
				amount_in,
				amount_out: swap_result.amount_out,
				fee: swap_result.lp_fee_amount.checked_add(swap_result.protocol_fee_amount).unwrap_or(Amount::zero()),
				price_impact: impact,
				block_height,
			});

			Ok(swap_result.amount_out)
		}

		fn update_twap(pool_id: PoolId, pool: &PoolInfo<T::AccountId>, now: Moment) {
			PoolTwaps::<T>::mutate(pool_id, |twap| {
				let dt = if twap.last_block_time == 0 {
					0
				} else {
					now.saturating_sub(twap.last_block_time).max(0) as u64
				};
				if !pool.reserve_a.is_zero() && !pool.reserve_b.is_zero() {
					if let (Ok(ra), Ok(rb)) = (u128::try_from(pool.reserve_a), u128::try_from(pool.reserve_b)) {
						if let Some(price_a) = Dec::checked_from_rational(rb, ra) {
							twap.cum_price_a = twap.cum_price_a.saturating_add(price_a.saturating_mul(Dec::saturating_from_integer(dt)));
						}
						if let Some(price_b) = Dec::checked_from_rational(ra, rb) {
							twap.cum_price_b = twap.cum_price_b.saturating_add(price_b.saturating_mul(Dec::saturating_from_integer(dt)));
						}
					}
				}
				twap.total_seconds = twap.total_seconds.saturating_add(dt);
				twap.last_block_time = now;
			});

			let twap = PoolTwaps::<T>::get(pool_id);
			Self::push_twap_snapshot(pool_id, &twap);
		}

		fn push_twap_snapshot(pool_id: PoolId, twap: &PoolTwap) {
			let height = T::Clock::block_height();
			PoolTwapSnapshots::<T>::insert(
				pool_id,
				height,
				PoolTwapSnapshot { cum_price_a: twap.cum_price_a, cum_price_b: twap.cum_price_b, block_time: twap.last_block_time },
			);
			PoolTwapSnapshotIndex::<T>::mutate(pool_id, |idx| {
				if idx.is_full() {
					if let Some(oldest) = idx.first().copied() {
						PoolTwapSnapshots::<T>::remove(pool_id, oldest);
					}
					idx.remove(0);
				}
				let _ = idx.try_push(height);
			});
		}

		fn push_tx_record(pool_id: PoolId, record: TxRecord<T::AccountId>) {
			TxWindows::<T>::mutate(pool_id, |window| {
				if window.is_full() {
					window.remove(0);
				}
				let _ = window.try_push(record);
			});
		}

		pub(crate) fn do_trigger_circuit_breaker(pool_id: PoolId, triggered_by: Option<T::AccountId>, reason: &[u8]) {
			let now = T::Clock::block_time();
			let params = Params::<T>::get();
			CircuitBreakers::<T>::mutate(pool_id, |state| {
				state.paused_until = now.saturating_add(params.circuit_breaker_duration_seconds);
				state.triggered_by = triggered_by.clone();
				state.trigger_reason = BoundedVec::try_from(reason.to_vec()).unwrap_or_default();
				if now.saturating_sub(state.last_notification) >= params.notification_throttle_seconds {
					state.notifications_sent = state.notifications_sent.saturating_add(1);
					state.last_notification = now;
				}
			});
			log::warn!(target: "vantage::dex", "circuit breaker triggered on pool {}", pool_id);
			Self::deposit_event(Event::CircuitBreakerTriggered {
				pool_id,
				triggered_by,
				paused_until: now.saturating_add(params.circuit_breaker_duration_seconds),
			});
		}

		fn do_commit_swap(who: T::AccountId, swap_hash: SwapHash) -> DispatchResult {
			ensure!(Params::<T>::get().enable_commit_reveal, Error::<T>::CommitRevealDisabled);
			ensure!(SwapCommits::<T>::get(&who, swap_hash).is_none(), Error::<T>::DuplicateCommitment);

			let commit_height = T::Clock::block_height();
			let expiry_height = commit_height.saturating_add(Params::<T>::get().commit_timeout_blocks);
			SwapCommits::<T>::insert(&who, swap_hash, SwapCommit { commit_height, expiry_height });
			PendingCommitments::<T>::mutate(|list| {
				if list.is_full() {
					list.remove(0);
				}
				let _ = list.try_push((who.clone(), swap_hash));
			});

			Self::reap_expired_commitments(commit_height);
			Self::deposit_event(Event::SwapCommitted { trader: who, expiry_height });
			Ok(())
		}

		fn do_reveal_swap(
			who: T::AccountId,
			pool_id: PoolId,
			sell_a_for_b: bool,
			amount_in: Amount,
			min_amount_out: Amount,
			deadline: Moment,
			nonce: Vec<u8>,
		) -> DispatchResult {
			ensure!(Params::<T>::get().enable_commit_reveal, Error::<T>::CommitRevealDisabled);
			ensure!(nonce.len() >= 16, Error::<T>::InvalidNonce);

			let expected_hash = Self::compute_commit_hash(&who, pool_id, sell_a_for_b, amount_in, min_amount_out, deadline, &nonce);
			let commit = SwapCommits::<T>::get(&who, expected_hash).ok_or(Error::<T>::CommitmentNotFound)?;

			let current_height = T::Clock::block_height();
			let params = Params::<T>::get();
			ensure!(
				current_height >= commit.commit_height.saturating_add(params.commit_reveal_delay),
				Error::<T>::RevealTooEarly
			);
			ensure!(current_height <= commit.expiry_height, Error::<T>::CommitmentExpired);

			SwapCommits::<T>::remove(&who, expected_hash);
			Self::reap_expired_commitments(current_height);

			Self::do_swap(who.clone(), pool_id, sell_a_for_b, amount_in, min_amount_out, deadline)?;
			Self::deposit_event(Event::SwapRevealed { trader: who, pool_id });
			Ok(())
		}

		/// Canonical serialization for the commit-reveal hash: every field
		/// SCALE-encoded and joined by `|`. spec.md §4.5 specifies UTF-8 text
		/// fields joined the same way; SCALE bytes are substituted because
		/// `T::AccountId` has no canonical UTF-8 form in a generic pallet, and
		/// SCALE encoding is exactly as deterministic across replicas.
		fn compute_commit_hash(
			trader: &T::AccountId,
			pool_id: PoolId,
			sell_a_for_b: bool,
			amount_in: Amount,
			min_amount_out: Amount,
			deadline: Moment,
			nonce: &[u8],
		) -> SwapHash {
			let mut buf = Vec::new();
			for chunk in [
				trader.encode(),
				pool_id.encode(),
				sell_a_for_b.encode(),
				amount_in.encode(),
				min_amount_out.encode(),
				deadline.encode(),
				nonce.to_vec(),
			] {
				buf.extend_from_slice(&chunk);
				buf.push(b'|');
			}
			let mut hasher = Sha256::new();
			hasher.update(&buf);
			hasher.finalize().into()
		}

		fn reap_expired_commitments(current_height: BlockHeight) {
			PendingCommitments::<T>::mutate(|list| {
				let mut reaped = 0u32;
				let mut i = 0usize;
				while i < list.len() && reaped < COMMIT_REAP_BATCH {
					let (trader, hash) = list[i].clone();
					let expired = SwapCommits::<T>::get(&trader, hash)
						.map(|c| c.expiry_height < current_height)
						.unwrap_or(true);
					if expired {
						SwapCommits::<T>::remove(&trader, hash);
						list.remove(i);
						reaped = reaped.saturating_add(1);
					} else {
						i += 1;
					}
				}
			});
		}

		/// Public read-only TWAP query, per spec.md §4.8:
		/// `(cum_price[now] - cum_price[now - lookback]) / lookback_seconds`,
		/// found by searching the snapshot rows for the latest one at or
		/// before `now - lookback_seconds`. `NotEnoughData` folds into `None`
		/// here since the pallet has no dedicated error for a pure view
		/// function; callers treat `None` as the sentinel, including when no
		/// snapshot reaches that far back.
		pub fn twap_a(pool_id: PoolId, lookback_seconds: u64) -> Option<Dec> {
			if lookback_seconds == 0 {
				return None;
			}
			let twap = PoolTwaps::<T>::get(pool_id);
			let now = twap.last_block_time;
			if now == 0 {
				return None;
			}
			let cutoff = now.saturating_sub(lookback_seconds as i64);

			let heights = PoolTwapSnapshotIndex::<T>::get(pool_id);
			let past = heights
				.iter()
				.rev()
				.filter_map(|h| PoolTwapSnapshots::<T>::get(pool_id, *h))
				.find(|s| s.block_time <= cutoff)?;

			let diff = twap.cum_price_a.saturating_sub(past.cum_price_a);
			Some(diff.saturating_div(Dec::saturating_from_integer(lookback_seconds)))
		}
	}

	impl<T: Config> CircuitBreakerControl for Pallet<T> {
		fn trigger(pool_id: PoolId, reason: &'static str) {
			Self::do_trigger_circuit_breaker(pool_id, None, reason.as_bytes());
		}
	}
}
