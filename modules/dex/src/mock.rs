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

//! Mocks for `module-dex`.

#![cfg(test)]

use super::*;
use crate as module_dex;

use frame_support::{derive_impl, parameter_types, traits::GenesisBuild};
use module_support::{Bank, Clock as ClockTrait, Governance};
use sp_runtime::{traits::IdentityLookup, BuildStorage, DispatchError, DispatchResult};
use std::cell::RefCell;
use std::collections::BTreeMap;
use vantage_primitives::{Amount, BlockHeight, Denom, Moment};

pub type AccountId = u64;

pub const ALICE: AccountId = 1;
pub const BOB: AccountId = 2;
pub const MODULE_ACCOUNT: AccountId = 100;
pub const PROTOCOL_FEE_ACCOUNT: AccountId = 101;
pub const GOVERNANCE_ACCOUNT: AccountId = 200;
pub const EMERGENCY_ADMIN: AccountId = 201;

type Block = frame_system::mocking::MockBlock<Test>;

frame_support::construct_runtime!(
	pub enum Test {
		System: frame_system,
		Dex: module_dex,
	}
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig as frame_system::DefaultConfig)]
impl frame_system::Config for Test {
	type Block = Block;
	type AccountId = AccountId;
	type Lookup = IdentityLookup<Self::AccountId>;
	type AccountData = ();
	type RuntimeEvent = RuntimeEvent;
}

thread_local! {
	static BALANCES: RefCell<BTreeMap<(AccountId, Denom), Amount>> = RefCell::new(BTreeMap::new());
	static BLOCK_HEIGHT: RefCell<BlockHeight> = RefCell::new(1);
	static BLOCK_TIME: RefCell<Moment> = RefCell::new(1_000);
}

pub struct MockBank;
impl Bank<AccountId> for MockBank {
	fn transfer(from: &AccountId, to: &AccountId, denom: &Denom, amount: Amount) -> DispatchResult {
		BALANCES.with(|b| {
			let mut b = b.borrow_mut();
			let from_balance = b.get(&(*from, denom.clone())).copied().unwrap_or(Amount::zero());
			let new_from = from_balance.checked_sub(amount).map_err(|_| DispatchError::Other("insufficient balance"))?;
			b.insert((*from, denom.clone()), new_from);
			let to_balance = b.get(&(*to, denom.clone())).copied().unwrap_or(Amount::zero());
			let new_to = to_balance.checked_add(amount).map_err(|_| DispatchError::Other("overflow"))?;
			b.insert((*to, denom.clone()), new_to);
			Ok(())
		})
	}

	fn balance(who: &AccountId, denom: &Denom) -> Amount {
		BALANCES.with(|b| b.borrow().get(&(*who, denom.clone())).copied().unwrap_or(Amount::zero()))
	}
}

pub struct MockClock;
impl ClockTrait for MockClock {
	fn block_height() -> BlockHeight {
		BLOCK_HEIGHT.with(|h| *h.borrow())
	}

	fn block_time() -> Moment {
		BLOCK_TIME.with(|t| *t.borrow())
	}
}

pub fn set_block_height(height: BlockHeight) {
	BLOCK_HEIGHT.with(|h| *h.borrow_mut() = height);
}

pub fn set_block_time(time: Moment) {
	BLOCK_TIME.with(|t| *t.borrow_mut() = time);
}

pub fn advance_block(height_delta: BlockHeight, time_delta: Moment) {
	BLOCK_HEIGHT.with(|h| *h.borrow_mut() += height_delta);
	BLOCK_TIME.with(|t| *t.borrow_mut() += time_delta);
}

pub struct MockGovernance;
impl Governance<AccountId> for MockGovernance {
	fn module_authority() -> AccountId {
		GOVERNANCE_ACCOUNT
	}

	fn emergency_admin() -> Option<AccountId> {
		Some(EMERGENCY_ADMIN)
	}
}

parameter_types! {
	pub const ModuleAccount: AccountId = MODULE_ACCOUNT;
	pub const ProtocolFeeAccount: AccountId = PROTOCOL_FEE_ACCOUNT;
}

impl module_dex::Config for Test {
	type RuntimeEvent = RuntimeEvent;
	type Bank = MockBank;
	type Governance = MockGovernance;
	type Clock = MockClock;
	type ModuleAccount = ModuleAccount;
	type ProtocolFeeAccount = ProtocolFeeAccount;
}

pub fn give_balance(who: AccountId, denom: &Denom, amount: Amount) {
	BALANCES.with(|b| {
		b.borrow_mut().insert((who, denom.clone()), amount);
	});
}

pub struct ExtBuilder {
	params: DexParams,
}

impl Default for ExtBuilder {
	fn default() -> Self {
		Self { params: DexParams::default() }
	}
}

impl ExtBuilder {
	pub fn params(mut self, params: DexParams) -> Self {
		self.params = params;
		self
	}

	pub fn build(self) -> sp_io::TestExternalities {
		BALANCES.with(|b| b.borrow_mut().clear());
		BLOCK_HEIGHT.with(|h| *h.borrow_mut() = 1);
		BLOCK_TIME.with(|t| *t.borrow_mut() = 1_000);

		let mut t = frame_system::GenesisConfig::<Test>::default().build_storage().unwrap();
		GenesisBuild::<Test>::assimilate_storage(&module_dex::GenesisConfig { params: self.params }, &mut t).unwrap();

		let mut ext = sp_io::TestExternalities::new(t);
		ext.execute_with(|| System::set_block_number(1));
		ext
	}
}
