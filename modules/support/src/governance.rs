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

/// Parameter control, external to the core per spec.md §1 and §6. Most
/// pallets express this as `type GovernanceOrigin: EnsureOrigin<...>`
/// directly (see `modules/rate-limit`); `module-oracle`'s emergency-pause
/// path additionally needs a plain address comparison against a configured
/// admin (Design Notes §9 item 2), so this trait is kept address-shaped
/// rather than origin-shaped to serve both call sites uniformly.
pub trait Governance<AccountId> {
	/// The configured module authority (typically a governance account).
	fn module_authority() -> AccountId;

	/// The configured emergency admin, if one has been set. `None` means
	/// emergency pause is disabled entirely (Design Notes §9 item 2: "the
	/// admin path gated by non-empty `emergency_admin`").
	fn emergency_admin() -> Option<AccountId>;
}
