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

//! Pure constant-product pool math (spec.md §4.3), kept free of any storage
//! access so it can be unit tested directly against the worked examples in
//! spec.md §8, the way `modules/dex::calculate_swap_target_amount` is a
//! plain associated function taking pool balances rather than `Self`.

use sp_arithmetic::FixedPointNumber;
use vantage_primitives::{dec::apply_fraction_floor, Amount, Dec, MathError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
	Math(MathError),
	InsufficientLiquidity,
	SwapTooSmall,
}

impl From<MathError> for EngineError {
	fn from(e: MathError) -> Self {
		EngineError::Math(e)
	}
}

/// `isqrt(amount_a * amount_b)`, per spec.md §4.3 `CreatePool`.
pub fn initial_shares(amount_a: Amount, amount_b: Amount) -> Result<Amount, EngineError> {
	Ok(amount_a.checked_mul(amount_b)?.isqrt())
}

pub struct AddLiquidityResult {
	pub shares_issued: Amount,
	pub amount_a_used: Amount,
	pub amount_b_used: Amount,
}

/// spec.md §4.3 `AddLiquidity`: the caller's amounts are upper bounds, the
/// engine debits only the ratio-matching quantities.
pub fn add_liquidity(
	reserve_a: Amount,
	reserve_b: Amount,
	total_shares: Amount,
	amount_a: Amount,
	amount_b: Amount,
) -> Result<AddLiquidityResult, EngineError> {
	let shares_from_a = amount_a.mul_div(total_shares, reserve_a)?;
	let shares_from_b = amount_b.mul_div(total_shares, reserve_b)?;
	let shares_issued = shares_from_a.min(shares_from_b);
	if shares_issued.is_zero() {
		return Err(EngineError::InsufficientLiquidity);
	}
	// Back out the exact amounts that correspond to `shares_issued` so we
	// never consume more than the caller offered.
	let amount_a_used = shares_issued.mul_div(reserve_a, total_shares)?;
	let amount_b_used = shares_issued.mul_div(reserve_b, total_shares)?;
	Ok(AddLiquidityResult {
		shares_issued,
		amount_a_used,
		amount_b_used,
	})
}

pub struct RemoveLiquidityResult {
	pub amount_a: Amount,
	pub amount_b: Amount,
}

/// spec.md §4.3 `RemoveLiquidity`, both amounts rounded down.
pub fn remove_liquidity(
	reserve_a: Amount,
	reserve_b: Amount,
	total_shares: Amount,
	shares: Amount,
) -> Result<RemoveLiquidityResult, EngineError> {
	let amount_a = shares.mul_div(reserve_a, total_shares)?;
	let amount_b = shares.mul_div(reserve_b, total_shares)?;
	Ok(RemoveLiquidityResult { amount_a, amount_b })
}

pub struct SwapResult {
	pub amount_in_after_fee: Amount,
	pub amount_out: Amount,
	pub lp_fee_amount: Amount,
	pub protocol_fee_amount: Amount,
	pub new_reserve_in: Amount,
	pub new_reserve_out: Amount,
}

/// spec.md §4.3 `Swap`: constant-product with fee, truncating division.
/// `lp_fee`/`protocol_fee` are fractions of `amount_in`, not of the
/// already-fee-deducted amount, matching `lp_fee + protocol_fee == swap_fee`.
pub fn swap(
	reserve_in: Amount,
	reserve_out: Amount,
	amount_in: Amount,
	swap_fee: Dec,
	lp_fee: Dec,
	protocol_fee: Dec,
) -> Result<SwapResult, EngineError> {
	let amount_in_after_fee = apply_fraction_floor(amount_in, swap_fee)?;
	let new_reserve_in_before_out = reserve_in.checked_add(amount_in_after_fee)?;
	let amount_out = reserve_out.mul_div(amount_in_after_fee, new_reserve_in_before_out)?;

	if amount_out.is_zero() {
		return Err(EngineError::SwapTooSmall);
	}
	if amount_out >= reserve_out {
		return Err(EngineError::InsufficientLiquidity);
	}

	// `apply_fraction_floor(x, 1 - f)` returns `floor(x * f)`; reuse that
	// helper instead of a second rounding rule for the fee split. Whatever
	// the floor division drops is credited to the protocol share so
	// `lp_fee_amount + protocol_fee_amount + amount_in_after_fee == amount_in`
	// holds exactly regardless of rounding.
	let lp_fee_amount = apply_fraction_floor(amount_in, Dec::one().saturating_sub(lp_fee))?;
	let total_fee = amount_in.checked_sub(amount_in_after_fee)?;
	let protocol_fee_amount = total_fee.checked_sub(lp_fee_amount).unwrap_or(Amount::zero());

	let new_reserve_in = reserve_in.checked_add(amount_in)?;
	let new_reserve_out = reserve_out.checked_sub(amount_out)?;

	Ok(SwapResult {
		amount_in_after_fee,
		amount_out,
		lp_fee_amount,
		protocol_fee_amount,
		new_reserve_in,
		new_reserve_out,
	})
}

/// `k_after >= k_before`, per Testable Property 1. Computed in the widened
/// `mul_div` intermediate so the comparison itself cannot silently overflow.
pub fn k_non_decreasing(
	old_reserve_in: Amount,
	old_reserve_out: Amount,
	new_reserve_in: Amount,
	new_reserve_out: Amount,
) -> bool {
	let k_before = old_reserve_in.as_u256().full_mul(old_reserve_out.as_u256());
	let k_after = new_reserve_in.as_u256().full_mul(new_reserve_out.as_u256());
	k_after >= k_before
}

/// `expected_out_no_slippage = amount_in * reserve_out / reserve_in`, the
/// price-impact baseline from spec.md §4.4 step 5.
pub fn expected_out_no_slippage(amount_in: Amount, reserve_in: Amount, reserve_out: Amount) -> Result<Amount, EngineError> {
	Ok(amount_in.mul_div(reserve_out, reserve_in)?)
}

/// `impact = |1 - actual_out / expected_out_no_slippage|`.
pub fn price_impact(actual_out: Amount, expected_out: Amount) -> Result<Dec, EngineError> {
	if expected_out.is_zero() {
		return Ok(Dec::one());
	}
	let actual: u128 = u128::try_from(actual_out)?;
	let expected: u128 = u128::try_from(expected_out)?;
	let ratio = Dec::checked_from_rational(actual, expected).ok_or(EngineError::Math(MathError::DivisionByZero))?;
	let diff = Dec::one().saturating_sub(ratio);
	// `Dec` has no public `abs()`; rebuild from the inner magnitude instead.
	Ok(Dec::from_inner(diff.into_inner().unsigned_abs() as i128))
}
