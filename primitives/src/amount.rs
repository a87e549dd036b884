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

use crate::error::MathError;
use codec::{Decode, Encode, MaxEncodedLen};
use primitive_types::U256;
use scale_info::TypeInfo;
#[cfg(feature = "std")]
use serde::{Deserialize, Serialize};
use sp_runtime::RuntimeDebug;

/// A non-negative 256-bit token quantity. All divisions truncate toward zero,
/// matching spec.md §4.1.
#[derive(Encode, Decode, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, RuntimeDebug, TypeInfo, MaxEncodedLen)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub struct Amount(U256);

impl Amount {
	pub const fn zero() -> Self {
		Self(U256::zero())
	}

	/// Builds an `Amount` directly from a 256-bit value, for callers in this
	/// crate that already hold a `U256` result (e.g. `mul_div_amount`'s
	/// widened intermediate) and would otherwise have to round-trip through
	/// `u128` and silently drop the high bits.
	pub(crate) const fn from_u256(v: U256) -> Self {
		Self(v)
	}

	pub fn is_zero(&self) -> bool {
		self.0.is_zero()
	}

	pub fn checked_add(self, rhs: Self) -> Result<Self, MathError> {
		self.0.checked_add(rhs.0).map(Self).ok_or(MathError::Overflow)
	}

	pub fn checked_sub(self, rhs: Self) -> Result<Self, MathError> {
		self.0.checked_sub(rhs.0).map(Self).ok_or(MathError::Underflow)
	}

	pub fn checked_mul(self, rhs: Self) -> Result<Self, MathError> {
		self.0.checked_mul(rhs.0).map(Self).ok_or(MathError::Overflow)
	}

	pub fn checked_div(self, rhs: Self) -> Result<Self, MathError> {
		if rhs.0.is_zero() {
			return Err(MathError::DivisionByZero);
		}
		Ok(Self(self.0 / rhs.0))
	}

	/// `(self * b) / c`, computed with a 512-bit intermediate product so that
	/// `self * b` can never overflow before the division narrows it back down,
	/// per spec.md §4.1.
	pub fn mul_div(self, b: Self, c: Self) -> Result<Self, MathError> {
		crate::dec::mul_div_amount(self, b, c)
	}

	/// Floor of the integer square root, via Newton's method, satisfying
	/// `isqrt(x)^2 <= x < (isqrt(x)+1)^2` per spec.md §4.1.
	pub fn isqrt(self) -> Self {
		Self(crate::dec::isqrt(self.0))
	}

	pub fn as_u256(&self) -> U256 {
		self.0
	}
}

impl From<u128> for Amount {
	fn from(v: u128) -> Self {
		Self(U256::from(v))
	}
}

impl From<u64> for Amount {
	fn from(v: u64) -> Self {
		Self(U256::from(v))
	}
}

impl TryFrom<Amount> for u128 {
	type Error = MathError;

	fn try_from(value: Amount) -> Result<Self, Self::Error> {
		if value.0 > U256::from(u128::MAX) {
			Err(MathError::Overflow)
		} else {
			Ok(value.0.low_u128())
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn checked_ops_detect_division_by_zero() {
		let a = Amount::from(10u128);
		assert_eq!(a.checked_div(Amount::zero()), Err(MathError::DivisionByZero));
	}

	#[test]
	fn checked_sub_detects_underflow() {
		let a = Amount::from(1u128);
		let b = Amount::from(2u128);
		assert_eq!(a.checked_sub(b), Err(MathError::Underflow));
	}

	#[test]
	fn isqrt_floor_property_holds() {
		for x in [0u128, 1, 2, 3, 4, 1_000_000, u128::from(u64::MAX) * 7] {
			let a = Amount::from(x);
			let root = a.isqrt();
			let root_sq = root.checked_mul(root).unwrap();
			let next = root.checked_add(Amount::from(1u128)).unwrap();
			let next_sq = next.checked_mul(next).unwrap();
			assert!(root_sq <= a);
			assert!(a < next_sq);
		}
	}

	#[test]
	fn mul_div_matches_unbounded_arithmetic() {
		let a = Amount::from(1_000_000u128);
		let b = Amount::from(2_000_000u128);
		let c = Amount::from(1_100_000u128);
		let got = a.mul_div(b, c).unwrap();
		let want = (1_000_000u128 * 2_000_000u128) / 1_100_000u128;
		assert_eq!(u128::try_from(got).unwrap(), want);
	}
}
