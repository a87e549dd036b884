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

//! Deterministic primitives shared by `module-dex` and `module-oracle`:
//! the 256-bit `Amount` and 18-decimal `Dec` number types, denom/address
//! identifiers, and the `TradingPair` canonicalization rule.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod amount;
mod dec;
mod denom;
mod error;

pub use amount::Amount;
pub use dec::{isqrt, mul_div_amount, Dec};
pub use denom::{Denom, MAX_DENOM_LEN, MIN_DENOM_LEN};
pub use error::MathError;

use codec::{Decode, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
#[cfg(feature = "std")]
use serde::{Deserialize, Serialize};
use sp_runtime::RuntimeDebug;

/// Index of a block in the host chain. Mirrors `frame_system::Config::BlockNumber`
/// truncated to the width the spec asks for (`u64` block heights).
pub type BlockHeight = u64;

/// Unix timestamp in seconds, as delivered by the host chain's `Clock` collaborator.
pub type Moment = i64;

/// Identity of a pool, assigned from a monotonically increasing counter.
pub type PoolId = u64;

/// Bech32-style address string, opaque to the core (parsing/verification is an
/// external collaborator's job per spec.md §1). Bounded to keep storage costs
/// benchmarkable, matching `frame_support`'s general aversion to unbounded `Vec<u8>`.
pub type Address = frame_support::BoundedVec<u8, frame_support::traits::ConstU32<128>>;

/// A canonicalized `(token_a, token_b)` pair with `token_a < token_b` (strict
/// lexicographic order on the underlying bytes), per spec.md §3 "Pool".
#[derive(Encode, Decode, Clone, PartialEq, Eq, PartialOrd, Ord, RuntimeDebug, TypeInfo, MaxEncodedLen)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub struct TradingPair {
	pub token_a: Denom,
	pub token_b: Denom,
}

impl TradingPair {
	/// Builds the canonical pair, swapping inputs (and reporting the swap) so
	/// that `token_a < token_b` always holds. Returns `None` if the two denoms
	/// are equal (`SameToken` is the caller's concern to raise, not ours).
	pub fn canonicalize(x: Denom, y: Denom) -> Option<(Self, bool)> {
		if x == y {
			return None;
		}
		if x < y {
			Some((Self { token_a: x, token_b: y }, false))
		} else {
			Some((Self { token_a: y, token_b: x }, true))
		}
	}
}
