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

use vantage_primitives::{BlockHeight, Moment};

/// Deterministic time, external to the core per spec.md §6. Extends the
/// single-method `T::Time: frame_support::traits::Time` bound used by
/// `modules/dex-oracle` with a block-height accessor, since the spec needs
/// both wall-clock seconds (TWAP, circuit-breaker expiry, deadlines) and
/// block height (commit-reveal windows, vote periods) and neither substitutes
/// for the other.
pub trait Clock {
	fn block_height() -> BlockHeight;
	fn block_time() -> Moment;
}
