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

//! Validator-weighted price oracle: submission store (spec.md §4.9),
//! outlier-filtered aggregation (§4.10), slashing/reputation (§4.11) and the
//! advanced TWAP variants (§4.12).

#![cfg_attr(not(feature = "std"), no_std)]
#![allow(clippy::unused_unit)]

use frame_support::{pallet_prelude::*, transactional, BoundedVec};
use frame_system::pallet_prelude::*;
use module_support::{Clock, Governance, OracleAnomalyHandler, Staking};
use sp_arithmetic::FixedPointNumber;
use sp_std::vec::Vec;
use vantage_primitives::{Amount, BlockHeight, Dec, Denom, Moment};

mod slashing;
mod stats;
mod twap;
mod types;

#[cfg(test)]
mod mock;

pub use module::*;
pub use types::{OracleParams, OraclePriceInfo, OutlierSeverity, Region, ValidatorOracleInfo, ValidatorPriceInfo};

const MAX_TRACKED_ASSETS: u32 = 64;
const MAX_SNAPSHOT_INDEX: u32 = 512;

#[frame_support::pallet]
pub mod module {
	use super::*;

	#[pallet::config]
	pub trait Config: frame_system::Config {
		type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

		type Staking: Staking<Self::AccountId>;
		type Governance: Governance<Self::AccountId>;
		type Clock: Clock;
		type AnomalyHandler: OracleAnomalyHandler;
	}

	#[pallet::error]
	pub enum Error<T> {
		InvalidDenom,
		InvalidAmount,
		NotBondedValidator,
		AssetNotTracked,
		AssetAlreadyTracked,
		InsufficientSubmissions,
		OracleUnauthorized,
		OraclePaused,
		Unauthorized,
	}

	#[pallet::event]
	#[pallet::generate_deposit(pub(crate) fn deposit_event)]
	pub enum Event<T: Config> {
		PriceSubmitted {
			validator: T::AccountId,
			asset: Denom,
			price: Dec,
		},
		PriceAggregated {
			asset: Denom,
			price: Dec,
			num_validators: u32,
			num_outliers: u32,
			median: Dec,
			mad: Dec,
		},
		ValidatorSlashed {
			validator: T::AccountId,
			asset: Denom,
			fraction: Dec,
			severity: OutlierSeverity,
		},
		AssetTracked {
			asset: Denom,
		},
		AssetUntracked {
			asset: Denom,
		},
		OraclePaused,
		OracleResumed,
		ParamsUpdated,
	}

	#[pallet::storage]
	pub type ValidatorPrices<T: Config> =
		StorageDoubleMap<_, Blake2_128Concat, Denom, Blake2_128Concat, T::AccountId, ValidatorPriceInfo, OptionQuery>;

	#[pallet::storage]
	#[pallet::getter(fn oracle_prices)]
	pub type OraclePrices<T: Config> = StorageMap<_, Blake2_128Concat, Denom, OraclePriceInfo, OptionQuery>;

	#[pallet::storage]
	#[pallet::getter(fn validator_oracles)]
	pub type ValidatorOracles<T: Config> = StorageMap<_, Blake2_128Concat, T::AccountId, ValidatorOracleInfo, ValueQuery>;

	#[pallet::storage]
	pub type PriceSnapshots<T: Config> =
		StorageDoubleMap<_, Blake2_128Concat, Denom, Twox64Concat, BlockHeight, types::PriceSnapshotInfo, OptionQuery>;

	/// Ordered (ascending) heights that have a snapshot for this asset, so
	/// lazy pruning never requires an unbounded double-map iteration;
	/// ring-buffer approach from Design Notes §9, same shape as
	/// `module_dex::PendingCommitments`.
	#[pallet::storage]
	pub type SnapshotIndex<T: Config> =
		StorageMap<_, Blake2_128Concat, Denom, BoundedVec<BlockHeight, ConstU32<MAX_SNAPSHOT_INDEX>>, ValueQuery>;

	#[pallet::storage]
	#[pallet::getter(fn tracked_assets)]
	pub type TrackedAssets<T: Config> = StorageValue<_, BoundedVec<Denom, ConstU32<MAX_TRACKED_ASSETS>>, ValueQuery>;

	#[pallet::storage]
	#[pallet::getter(fn asset_volatility)]
	pub type AssetVolatility<T: Config> = StorageMap<_, Blake2_128Concat, Denom, Dec, ValueQuery>;

	#[pallet::storage]
	#[pallet::getter(fn params)]
	pub type Params<T: Config> = StorageValue<_, OracleParams, ValueQuery>;

	#[pallet::storage]
	#[pallet::getter(fn paused)]
	pub type Paused<T: Config> = StorageValue<_, bool, ValueQuery>;

	#[pallet::genesis_config]
	pub struct GenesisConfig {
		pub params: OracleParams,
		pub tracked_assets: Vec<Vec<u8>>,
	}

	impl Default for GenesisConfig {
		fn default() -> Self {
			Self { params: OracleParams::default(), tracked_assets: Vec::new() }
		}
	}

	#[pallet::genesis_build]
	impl<T: Config> GenesisBuild<T> for GenesisConfig {
		fn build(&self) {
			assert!(self.params.is_valid(), "oracle genesis params fail is_valid()");
			Params::<T>::put(self.params.clone());
			let mut tracked = BoundedVec::default();
			for raw in &self.tracked_assets {
				let denom = Denom::try_from(raw.as_slice()).expect("invalid genesis asset denom");
				tracked.try_push(denom).expect("too many genesis tracked assets");
			}
			TrackedAssets::<T>::put(tracked);
		}
	}

	#[pallet::pallet]
	#[pallet::without_storage_info]
	pub struct Pallet<T>(_);

	#[pallet::hooks]
	impl<T: Config> Hooks<BlockNumberFor<T>> for Pallet<T> {
		/// Runs end-of-vote-period aggregation for every tracked asset, per
		/// spec.md §4.10: "Executed at the end of each vote period
		/// (`block_height % VotePeriod == 0`)". Modeled as a privileged,
		/// message-less step per spec.md §5, so it runs in `on_finalize`
		/// rather than as a dispatchable.
		fn on_finalize(_n: BlockNumberFor<T>) {
			if Paused::<T>::get() {
				return;
			}
			let params = Params::<T>::get();
			let current_height = T::Clock::block_height();
			if params.vote_period == 0 || current_height % params.vote_period != 0 {
				return;
			}
			for asset in TrackedAssets::<T>::get().into_iter() {
				Self::run_aggregation(&asset, current_height);
			}
		}
	}

	#[pallet::call]
	impl<T: Config> Pallet<T> {
		#[pallet::weight(10_000)]
		#[transactional]
		pub fn submit_price(origin: OriginFor<T>, asset: Vec<u8>, price: Dec, region: Vec<u8>) -> DispatchResult {
			let who = ensure_signed(origin)?;
			ensure!(!Paused::<T>::get(), Error::<T>::OraclePaused);
			ensure!(price > Dec::from_inner(0), Error::<T>::InvalidAmount);
			let denom = Denom::try_from(asset.as_slice()).map_err(|_| Error::<T>::InvalidDenom)?;
			ensure!(TrackedAssets::<T>::get().contains(&denom), Error::<T>::AssetNotTracked);

			let bonded = T::Staking::bonded_set();
			let info = bonded
				.iter()
				.find(|v| v.validator == who)
				.ok_or(Error::<T>::NotBondedValidator)?;

			let current_height = T::Clock::block_height();
			let region_tag = if region.is_empty() {
				None
			} else {
				Some(BoundedVec::try_from(region).unwrap_or_default())
			};

			ValidatorPrices::<T>::insert(
				&denom,
				&who,
				ValidatorPriceInfo {
					price,
					block_height: current_height,
					voting_power: info.voting_power,
					region: region_tag.clone(),
				},
			);

			ValidatorOracles::<T>::mutate(&who, |v| {
				if v.total_submissions == 0 {
					v.first_seen = current_height;
				}
				v.total_submissions = v.total_submissions.saturating_add(1);
				v.is_active = true;
				v.region = region_tag;
				if v.recent_submissions.is_full() {
					v.recent_submissions.remove(0);
				}
				let _ = v.recent_submissions.try_push(current_height);
			});

			Self::deposit_event(Event::PriceSubmitted { validator: who, asset: denom, price });
			Ok(())
		}

		#[pallet::weight(10_000)]
		#[transactional]
		pub fn add_tracked_asset(origin: OriginFor<T>, asset: Vec<u8>) -> DispatchResult {
			ensure!(T::Governance::module_authority() == ensure_signed(origin)?, Error::<T>::Unauthorized);
			let denom = Denom::try_from(asset.as_slice()).map_err(|_| Error::<T>::InvalidDenom)?;
			TrackedAssets::<T>::try_mutate(|list| {
				ensure!(!list.contains(&denom), Error::<T>::AssetAlreadyTracked);
				list.try_push(denom.clone()).map_err(|_| Error::<T>::InvalidDenom)
			})?;
			Self::deposit_event(Event::AssetTracked { asset: denom });
			Ok(())
		}

		#[pallet::weight(10_000)]
		#[transactional]
		pub fn remove_tracked_asset(origin: OriginFor<T>, asset: Vec<u8>) -> DispatchResult {
			ensure!(T::Governance::module_authority() == ensure_signed(origin)?, Error::<T>::Unauthorized);
			let denom = Denom::try_from(asset.as_slice()).map_err(|_| Error::<T>::InvalidDenom)?;
			TrackedAssets::<T>::try_mutate(|list| {
				let pos = list.iter().position(|d| d == &denom).ok_or(Error::<T>::AssetNotTracked)?;
				list.remove(pos);
				Ok::<_, Error<T>>(())
			})?;
			Self::deposit_event(Event::AssetUntracked { asset: denom });
			Ok(())
		}

		#[pallet::weight(10_000)]
		#[transactional]
		pub fn update_params(origin: OriginFor<T>, params: OracleParams) -> DispatchResult {
			ensure!(T::Governance::module_authority() == ensure_signed(origin)?, Error::<T>::Unauthorized);
			ensure!(params.is_valid(), Error::<T>::InvalidAmount);
			Params::<T>::put(params);
			Self::deposit_event(Event::ParamsUpdated);
			Ok(())
		}

		/// Gated by the configured emergency admin, per spec.md §6 "Authority
		/// model": "Emergency pause additionally accepts a configured admin
		/// address."
		#[pallet::weight(10_000)]
		#[transactional]
		pub fn emergency_pause_oracle(origin: OriginFor<T>) -> DispatchResult {
			let who = ensure_signed(origin)?;
			let admin = T::Governance::emergency_admin().ok_or(Error::<T>::OracleUnauthorized)?;
			ensure!(who == admin, Error::<T>::OracleUnauthorized);
			Paused::<T>::put(true);
			Self::deposit_event(Event::OraclePaused);
			Ok(())
		}

		#[pallet::weight(10_000)]
		#[transactional]
		pub fn resume_oracle(origin: OriginFor<T>) -> DispatchResult {
			ensure!(T::Governance::module_authority() == ensure_signed(origin)?, Error::<T>::Unauthorized);
			Paused::<T>::put(false);
			Self::deposit_event(Event::OracleResumed);
			Ok(())
		}
	}

	impl<T: Config> Pallet<T> {
		/// spec.md §4.10, steps 1-8. Pulled out of the `on_finalize` hook so
		/// tests can drive a single asset's aggregation deterministically
		/// without advancing through a full vote period.
		pub fn run_aggregation(asset: &Denom, current_height: BlockHeight) {
			let params = Params::<T>::get();
			let bonded = T::Staking::bonded_set();
			let total_voting_power = T::Staking::total_active_voting_power();

			// 1-2. Collect + staleness filter.
			let mut submissions: Vec<(T::AccountId, ValidatorPriceInfo)> = bonded
				.iter()
				.filter_map(|v| {
					ValidatorPrices::<T>::get(asset, &v.validator).and_then(|info| {
						if current_height.saturating_sub(info.block_height) <= params.vote_period {
							Some((v.validator.clone(), info))
						} else {
							None
						}
					})
				})
				.collect();
			// Deterministic order regardless of `bonded_set` iteration order,
			// per Design Notes §9 "no hash-map iteration order is ever
			// observable": sort is stable on price first, address second.
			submissions.sort_by(|a, b| a.1.price.cmp(&b.1.price).then_with(|| a.0.cmp(&b.0)));

			// 3. Threshold.
			let submitted_power: Amount = submissions
				.iter()
				.fold(Amount::zero(), |acc, (_, info)| acc.checked_add(info.voting_power).unwrap_or(acc));
			let required = Self::fraction_of(total_voting_power, params.vote_threshold);
			if submitted_power < required {
				Self::record_misses(&bonded, &submissions);
				Self::check_miss_slashing(&bonded, &params, current_height);
				return;
			}

			let prices: Vec<Dec> = submissions.iter().map(|(_, info)| info.price).collect();
			let sigma = AssetVolatility::<T>::get(asset);

			// 4. Outlier pipeline.
			let survivor_mask = Self::outlier_pipeline(&prices, sigma, &params);
			let num_outliers = survivor_mask.iter().filter(|keep| !**keep).count() as u32;

			let median = {
				let mut sorted = prices.clone();
				sorted.sort();
				stats::median_sorted(&sorted)
			};
			let mad_value = {
				let mut sorted = prices.clone();
				sorted.sort();
				stats::mad(&sorted, median)
			};

			// 5. Consensus price: voting-power-weighted median of survivors.
			let survivors: Vec<&(T::AccountId, ValidatorPriceInfo)> = submissions
				.iter()
				.zip(survivor_mask.iter())
				.filter_map(|(entry, keep)| if *keep { Some(entry) } else { None })
				.collect();
			let consensus_price = Self::weighted_median(&survivors);

			// 6. Write OraclePrice + PriceSnapshot.
			let block_time = T::Clock::block_time();
			OraclePrices::<T>::insert(
				asset,
				OraclePriceInfo {
					price: consensus_price,
					block_height: current_height,
					block_time,
					num_validators: submissions.len() as u32,
				},
			);
			Self::push_snapshot(asset, consensus_price, block_time, &params);

			// 7. Attribute outliers, slash.
			let tau = stats::z_threshold(params.base_z_threshold, sigma);
			for ((validator, info), keep) in submissions.iter().zip(survivor_mask.iter()) {
				if *keep {
					continue;
				}
				let severity = stats::classify(info.price, median, mad_value, tau);
				Self::slash_outlier(validator, asset, severity, &params, current_height);
			}

			// Oracle aggregation anomaly: a majority-Extreme round signals a
			// Byzantine or badly miscalibrated feed, per spec.md §4.6
			// "Triggers: ... oracle aggregation anomaly".
			if num_outliers as usize * 2 > submissions.len() {
				T::AnomalyHandler::on_price_anomaly(asset);
			}

			// 8. Emit.
			Self::deposit_event(Event::PriceAggregated {
				asset: asset.clone(),
				price: consensus_price,
				num_validators: submissions.len() as u32,
				num_outliers,
				median,
				mad: mad_value,
			});

			Self::check_miss_slashing(&bonded, &params, current_height);

			// Rows cleared as aggregation consumes them, spec.md §4.9.
			for (validator, _) in &submissions {
				ValidatorPrices::<T>::remove(asset, validator);
			}
		}

		/// IQR filter, then modified-z classification, then Grubbs, applied
		/// in sequence as spec.md §4.10 orders them; "Minimum-retained"
		/// restores the three closest-to-median if fewer than three survive.
		fn outlier_pipeline(prices: &[Dec], sigma: Dec, params: &OracleParams) -> Vec<bool> {
			let n = prices.len();
			let mut sorted_idx: Vec<usize> = (0..n).collect();
			sorted_idx.sort_by(|&a, &b| prices[a].cmp(&prices[b]));
			let sorted_prices: Vec<Dec> = sorted_idx.iter().map(|&i| prices[i]).collect();

			let median = stats::median_sorted(&sorted_prices);
			let mad_value = stats::mad(&sorted_prices, median);
			let tau = stats::z_threshold(params.base_z_threshold, sigma);

			let mut keep = vec![true; n];

			// Modified z-score: drop anything classified Moderate or worse.
			for (i, p) in prices.iter().enumerate() {
				let severity = stats::classify(*p, median, mad_value, tau);
				if severity >= OutlierSeverity::Moderate {
					keep[i] = false;
				}
			}

			// IQR test over the full sorted set (independent pass per
			// spec.md §4.10, not chained off the z-score survivors).
			let k = stats::iqr_k(sigma);
			let mask = stats::iqr_survivor_mask(&sorted_prices, k);
			for (pos, &orig_idx) in sorted_idx.iter().enumerate() {
				if !mask[pos] {
					keep[orig_idx] = false;
				}
			}

			// Grubbs, one-sided, only with >= 7 survivors so far.
			let mut survivor_prices: Vec<(usize, Dec)> =
				(0..n).filter(|&i| keep[i]).map(|i| (i, prices[i])).collect();
			while survivor_prices.len() >= 7 {
				let values: Vec<Dec> = survivor_prices.iter().map(|(_, p)| *p).collect();
				match stats::grubbs_worst_outlier(&values) {
					Some(idx) => {
						let (orig_idx, _) = survivor_prices.remove(idx);
						keep[orig_idx] = false;
					}
					None => break,
				}
			}

			// Minimum-retained: restore the 3 closest to median if fewer
			// than 3 survive.
			let retained = keep.iter().filter(|k| **k).count();
			if retained < 3 && n >= 3 {
				let mut by_distance: Vec<usize> = (0..n).collect();
				by_distance.sort_by(|&a, &b| {
					let da = (prices[a].into_inner() - median.into_inner()).unsigned_abs();
					let db = (prices[b].into_inner() - median.into_inner()).unsigned_abs();
					da.cmp(&db).then_with(|| a.cmp(&b))
				});
				keep = vec![false; n];
				for &i in by_distance.iter().take(3) {
					keep[i] = true;
				}
			}
			keep
		}

		/// Voting-power-weighted median, ties broken toward the lower price
		/// (spec.md §4.10 step 5). `survivors` is already sorted ascending
		/// by `(price, address)`. The threshold check is `2 * cumulative >=
		/// total` rather than `cumulative > total / 2`: the latter's
		/// integer-truncated `half` makes an exact even-weight split (e.g.
		/// two equal-weight survivors, `total = 2`, `half = 1`) overshoot to
		/// the *second*, higher-priced entry instead of stopping at the
		/// first; comparing the doubled cumulative against the untruncated
		/// total breaks that tie toward the lower price while leaving
		/// odd-weight splits (where no exact tie exists) unaffected.
		fn weighted_median(survivors: &[&(T::AccountId, ValidatorPriceInfo)]) -> Dec {
			if survivors.is_empty() {
				return Dec::from_inner(0);
			}
			let total: Amount = survivors
				.iter()
				.fold(Amount::zero(), |acc, (_, info)| acc.checked_add(info.voting_power).unwrap_or(acc));
			let total_u128 = u128::try_from(total).unwrap_or(0);
			let mut cumulative: u128 = 0;
			for (_, info) in survivors {
				cumulative = cumulative.saturating_add(u128::try_from(info.voting_power).unwrap_or(0));
				if cumulative.saturating_mul(2) >= total_u128 {
					return info.price;
				}
			}
			survivors[survivors.len() - 1].1.price
		}

		/// `total * fraction`, via the same widened-intermediate `mul_div` the
		/// swap-fee math uses, so the `2/3` vote threshold never gets tripped
		/// up by premature truncation.
		fn fraction_of(total: Amount, fraction: Dec) -> Amount {
			let numerator = Amount::from(fraction.into_inner().unsigned_abs());
			let denominator = Amount::from(Dec::DIV.unsigned_abs());
			total.mul_div(numerator, denominator).unwrap_or(Amount::zero())
		}

		fn record_misses(bonded: &[module_support::ValidatorInfo<T::AccountId>], submissions: &[(T::AccountId, ValidatorPriceInfo)]) {
			for v in bonded {
				if !submissions.iter().any(|(who, _)| who == &v.validator) {
					ValidatorOracles::<T>::mutate(&v.validator, |info| {
						info.miss_counter = info.miss_counter.saturating_add(1);
					});
				}
			}
		}

		/// Miss-rate slashing, spec.md §4.11: evaluated for every bonded
		/// validator each vote period, independent of whether this round's
		/// submissions were usable for price aggregation.
		fn check_miss_slashing(bonded: &[module_support::ValidatorInfo<T::AccountId>], params: &OracleParams, current_height: BlockHeight) {
			for v in bonded {
				let state = ValidatorOracles::<T>::get(&v.validator);
				if let Some(fraction) = slashing::decide_miss_rate(&state, params, current_height) {
					T::Staking::slash(&v.validator, fraction);
					ValidatorOracles::<T>::mutate(&v.validator, |info| {
						info.miss_counter = info.miss_counter.saturating_add(1);
					});
				}
			}
		}

		fn slash_outlier(
			validator: &T::AccountId,
			asset: &Denom,
			severity: OutlierSeverity,
			params: &OracleParams,
			current_height: BlockHeight,
		) {
			let state = ValidatorOracles::<T>::get(validator);
			let verdict = slashing::decide(severity, &state, params, current_height);

			ValidatorOracles::<T>::mutate(validator, |v| {
				if v.outlier_history.is_full() {
					v.outlier_history.remove(0);
				}
				let _ = v.outlier_history.try_push(types::OutlierRecord { block_height: current_height, severity });
			});

			if !verdict.fraction.is_zero() {
				T::Staking::slash(validator, verdict.fraction);
				if verdict.jail {
					T::Staking::jail(validator);
				}
				Self::deposit_event(Event::ValidatorSlashed {
					validator: validator.clone(),
					asset: asset.clone(),
					fraction: verdict.fraction,
					severity,
				});
			}
		}

		fn push_snapshot(asset: &Denom, price: Dec, block_time: Moment, params: &OracleParams) {
			let last = SnapshotIndex::<T>::get(asset).last().copied().and_then(|h| PriceSnapshots::<T>::get(asset, h));
			let cum_accumulator = match &last {
				Some(prev) => {
					let dt = block_time.saturating_sub(prev.block_time).max(0) as u64;
					prev.cum_accumulator.saturating_add(prev.price.saturating_mul(Dec::saturating_from_integer(dt)))
				}
				None => Dec::from_inner(0),
			};

			let height = T::Clock::block_height();
			PriceSnapshots::<T>::insert(asset, height, types::PriceSnapshotInfo { price, block_time, cum_accumulator, volume: None });
			SnapshotIndex::<T>::mutate(asset, |idx| {
				if idx.is_full() {
					if let Some(oldest) = idx.first().copied() {
						PriceSnapshots::<T>::remove(asset, oldest);
					}
					idx.remove(0);
				}
				let _ = idx.try_push(height);
			});

			Self::update_volatility(asset, params);
		}

		/// 100-block rolling coefficient of variation of the asset's TWAP
		/// snapshots, used as `sigma` in spec.md §4.10's adaptive thresholds.
		fn update_volatility(asset: &Denom, _params: &OracleParams) {
			let heights = SnapshotIndex::<T>::get(asset);
			let current = T::Clock::block_height();
			let recent: Vec<Dec> = heights
				.iter()
				.filter(|h| current.saturating_sub(**h) <= 100)
				.filter_map(|h| PriceSnapshots::<T>::get(asset, h).map(|s| s.price))
				.collect();
			if recent.len() < 2 {
				return;
			}
			let (mean, stddev) = stats::mean_stddev(&recent);
			if mean.is_zero() {
				return;
			}
			let cv = stddev.saturating_div(mean);
			AssetVolatility::<T>::insert(asset, cv);
		}

		/// Public read access to the five §4.12 TWAP variants and their
		/// robust median, over the retained snapshot window.
		pub fn twap_variants(asset: &Denom) -> Option<Dec> {
			let heights = SnapshotIndex::<T>::get(asset);
			let snapshots: Vec<types::PriceSnapshotInfo> =
				heights.iter().filter_map(|h| PriceSnapshots::<T>::get(asset, h)).collect();
			twap::robust(&snapshots)
		}
	}

	impl<T: Config> module_support::PriceOracle for Pallet<T> {
		fn consensus_price(denom: &Denom) -> Option<Dec> {
			OraclePrices::<T>::get(denom).map(|info| info.price)
		}
	}
}
