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
use sp_runtime::RuntimeDebug;

/// `[a-zA-Z][a-zA-Z0-9/]{2,127}`, per spec.md §3.
pub const MIN_DENOM_LEN: usize = 3;
pub const MAX_DENOM_LEN: u32 = 128;

/// A token denomination string, validated against the spec's regex at
/// construction time so that every `Denom` value in storage is already known
/// to be well-formed.
#[derive(Encode, Decode, Clone, PartialEq, Eq, PartialOrd, Ord, RuntimeDebug, TypeInfo, MaxEncodedLen)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub struct Denom(BoundedVec<u8, ConstU32<MAX_DENOM_LEN>>);

impl Denom {
	pub fn as_bytes(&self) -> &[u8] {
		&self.0
	}

	fn is_valid(bytes: &[u8]) -> bool {
		if bytes.len() < MIN_DENOM_LEN || bytes.len() > MAX_DENOM_LEN as usize {
			return false;
		}
		match bytes.first() {
			Some(&c) if c.is_ascii_alphabetic() => {}
			_ => return false,
		}
		bytes.iter().all(|&c| c.is_ascii_alphanumeric() || c == b'/')
	}
}

impl TryFrom<&[u8]> for Denom {
	type Error = ();

	fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
		if !Self::is_valid(bytes) {
			return Err(());
		}
		BoundedVec::try_from(bytes.to_vec()).map(Self).map_err(|_| ())
	}
}

impl TryFrom<&str> for Denom {
	type Error = ();

	fn try_from(s: &str) -> Result<Self, Self::Error> {
		Self::try_from(s.as_bytes())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn accepts_well_formed_denoms() {
		assert!(Denom::try_from("uatom").is_ok());
		assert!(Denom::try_from("ibc/27394FB092D2ECCD56123C74F36E4C1F926001CEADA9CA97EA622B25F41E5EB2").is_ok());
	}

	#[test]
	fn rejects_short_or_numeric_leading_denoms() {
		assert!(Denom::try_from("ab").is_err());
		assert!(Denom::try_from("1atom").is_err());
		assert!(Denom::try_from("ua-tom").is_err());
	}
}
