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

use sp_runtime::DispatchResult;
use vantage_primitives::{Amount, Denom};

/// Token custody, external to the core per spec.md §1. Shaped after
/// `orml_traits::MultiCurrency`, the trait Acala's own `modules/dex` uses for
/// the same purpose (`T::Currency: MultiCurrencyExtended<...>`), narrowed to
/// the transfer-only surface the DEX and Oracle modules need.
pub trait Bank<AccountId> {
	/// Moves `amount` of `denom` from `from` to `to`. `from`/`to` may be the
	/// module's own account (pool escrow, protocol fee sink).
	fn transfer(from: &AccountId, to: &AccountId, denom: &Denom, amount: Amount) -> DispatchResult;

	/// Spendable balance of `denom` held by `who`, used only for stateful
	/// pre-checks (e.g. "creator can afford both legs of CreatePool").
	fn balance(who: &AccountId, denom: &Denom) -> Amount;
}
