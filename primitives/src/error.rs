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

/// Failure modes of the deterministic math in this crate. Pallets map these
/// onto their own `Error<T>::Overflow` / `Error<T>::DivisionByZero` variants
/// with `.map_err`, keeping the arithmetic core free of any pallet coupling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
	Overflow,
	Underflow,
	DivisionByZero,
}
