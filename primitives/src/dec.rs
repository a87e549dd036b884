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

use crate::amount::Amount;
use crate::error::MathError;
use primitive_types::{U256, U512};
use sp_arithmetic::{FixedI128, FixedPointNumber};

/// A signed 18-decimal fixed-point number, used for ratios, fees and prices.
/// `sp_arithmetic::FixedI128` already carries exactly this representation
/// (i128 storage, `DIV = 10^18`) and the checked-arithmetic trait impls the
/// spec asks for, the same way Acala's `ExchangeRate`/`Rate` aliases reuse
/// `FixedU128` rather than hand-rolling a fixed-point type.
pub type Dec = FixedI128;

/// Truncating (round-toward-zero) conversion of `amount_in * (1 - fraction)`
/// to an `Amount`, used by the swap fee calculation in spec.md §4.3.
pub fn apply_fraction_floor(amount: Amount, fraction: Dec) -> Result<Amount, MathError> {
	let one = Dec::one();
	let keep = one.checked_sub(&fraction).ok_or(MathError::Underflow)?;
	if keep.is_negative() {
		return Err(MathError::Underflow);
	}
	let amount_u128: u128 = u128::try_from(amount)?;
	// `keep` has 18 decimal places; scale amount up before the integer
	// division below so the floor happens only once, at the very end.
	let scaled = U256::from(amount_u128)
		.checked_mul(U256::from(keep.into_inner().unsigned_abs()))
		.ok_or(MathError::Overflow)?;
	let divisor = U256::from(Dec::DIV.unsigned_abs());
	let floored = scaled.checked_div(divisor).ok_or(MathError::DivisionByZero)?;
	if floored > U256::from(u128::MAX) {
		return Err(MathError::Overflow);
	}
	Ok(Amount::from(floored.low_u128()))
}

/// `(a * b) / c` over `Amount`s, widening the intermediate product to 512
/// bits so it can never overflow before the division narrows it back to 256
/// bits, per spec.md §4.1.
pub fn mul_div_amount(a: Amount, b: Amount, c: Amount) -> Result<Amount, MathError> {
	if c.is_zero() {
		return Err(MathError::DivisionByZero);
	}
	let wide = U512::from(a.as_u256()) * U512::from(b.as_u256());
	let result = wide / U512::from(c.as_u256());
	if result > U512::from(U256::MAX) {
		return Err(MathError::Overflow);
	}
	// `result` is confirmed to fit in 256 bits above; read back the low 32
	// bytes of its little-endian representation instead of further
	// truncating to `u128`, or any true result above `u128::MAX` (and at or
	// below `U256::MAX`) would silently lose its high bits here instead of
	// round-tripping exactly.
	let mut le_bytes = [0u8; 64];
	result.to_little_endian(&mut le_bytes);
	Ok(Amount::from_u256(U256::from_little_endian(&le_bytes[..32])))
}

/// Floor of the integer square root via Newton's method:
/// `isqrt(x)^2 <= x < (isqrt(x)+1)^2`, per spec.md §4.1.
pub fn isqrt(x: U256) -> U256 {
	if x.is_zero() {
		return U256::zero();
	}
	if x < U256::from(4u8) {
		return U256::one();
	}
	// Initial guess: 2^ceil(bits/2), guaranteed to be >= the true root.
	let bits = x.bits();
	let mut z = U256::one() << ((bits + 1) / 2);
	loop {
		let next = (z + x / z) >> 1;
		if next >= z {
			break;
		}
		z = next;
	}
	z
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn isqrt_of_perfect_square() {
		assert_eq!(isqrt(U256::from(4_000_000_000_000u128)), U256::from(2_000_000u128));
	}

	#[test]
	fn isqrt_of_s1_example() {
		// CreatePool(Alice, "uatom", "upaw", 1_000_000, 2_000_000) -> total_shares
		assert_eq!(isqrt(U256::from(2_000_000_000_000u128)), U256::from(1_414_213u128));
	}

	#[test]
	fn apply_fraction_floor_matches_s1_fee() {
		let amount_in = Amount::from(100_000u128);
		let fee = Dec::from_rational(3, 1000); // 0.003
		let got = apply_fraction_floor(amount_in, fee).unwrap();
		assert_eq!(u128::try_from(got).unwrap(), 99_700u128);
	}

	#[test]
	fn mul_div_amount_preserves_results_above_u128_max() {
		// (u128::MAX * 2) / 1 does not fit in 128 bits but fits easily in the
		// 256-bit `Amount`; a truncating low-128-bit extraction would produce
		// `u128::MAX - 1` instead of the true value.
		let a = Amount::from(u128::MAX);
		let b = Amount::from(2u128);
		let c = Amount::from(1u128);
		let got = mul_div_amount(a, b, c).unwrap();

		let want = U256::from(u128::MAX) * U256::from(2u128);
		assert_eq!(got.as_u256(), want);
		assert!(u128::try_from(got).is_err(), "true result exceeds u128::MAX and must not round-trip through it");
	}
}
