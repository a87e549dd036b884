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

//! Mocks for `module-oracle`.

#![cfg(test)]

use super::*;
use crate as module_oracle;

use frame_support::{derive_impl, traits::GenesisBuild};
use module_support::{Clock as ClockTrait, Governance, OracleAnomalyHandler as AnomalyHandlerTrait, Staking, ValidatorInfo};
use sp_runtime::{traits::IdentityLookup, BuildStorage};
use std::cell::RefCell;
use vantage_primitives::{Amount, BlockHeight, Dec, Denom, Moment};

pub type AccountId = u64;

pub const V1: AccountId = 1;
pub const V2: AccountId = 2;
pub const V3: AccountId = 3;
pub const V4: AccountId = 4;
pub const GOVERNANCE_ACCOUNT: AccountId = 200;
pub const EMERGENCY_ADMIN: AccountId = 201;

type Block = frame_system::mocking::MockBlock<Test>;

frame_support::construct_runtime!(
	pub enum Test {
		System: frame_system,
		Oracle: module_oracle,
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
	static BONDED: RefCell<Vec<ValidatorInfo<AccountId>>> = RefCell::new(Vec::new());
	static BLOCK_HEIGHT: RefCell<BlockHeight> = RefCell::new(1);
	static BLOCK_TIME: RefCell<Moment> = RefCell::new(1_000);
	static SLASHES: RefCell<Vec<(AccountId, Dec)>> = RefCell::new(Vec::new());
	static JAILS: RefCell<Vec<AccountId>> = RefCell::new(Vec::new());
	static ANOMALIES: RefCell<Vec<Denom>> = RefCell::new(Vec::new());
}

pub struct MockStaking;
impl Staking<AccountId> for MockStaking {
	fn bonded_set() -> Vec<ValidatorInfo<AccountId>> {
		BONDED.with(|b| b.borrow().clone())
	}

	fn total_active_voting_power() -> Amount {
		BONDED.with(|b| {
			b.borrow()
				.iter()
				.fold(Amount::zero(), |acc, v| acc.checked_add(v.voting_power).unwrap_or(acc))
		})
	}

	fn slash(validator: &AccountId, fraction: Dec) {
		SLASHES.with(|s| s.borrow_mut().push((*validator, fraction)));
	}

	fn jail(validator: &AccountId) {
		JAILS.with(|j| j.borrow_mut().push(*validator));
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

pub struct MockGovernance;
impl Governance<AccountId> for MockGovernance {
	fn module_authority() -> AccountId {
		GOVERNANCE_ACCOUNT
	}

	fn emergency_admin() -> Option<AccountId> {
		Some(EMERGENCY_ADMIN)
	}
}

pub struct MockAnomalyHandler;
impl AnomalyHandlerTrait for MockAnomalyHandler {
	fn on_price_anomaly(asset: &Denom) {
		ANOMALIES.with(|a| a.borrow_mut().push(asset.clone()));
	}
}

impl module_oracle::Config for Test {
	type RuntimeEvent = RuntimeEvent;
	type Staking = MockStaking;
	type Governance = MockGovernance;
	type Clock = MockClock;
	type AnomalyHandler = MockAnomalyHandler;
}

pub fn set_block_height(height: BlockHeight) {
	BLOCK_HEIGHT.with(|h| *h.borrow_mut() = height);
}

pub fn set_block_time(time: Moment) {
	BLOCK_TIME.with(|t| *t.borrow_mut() = time);
}

pub fn set_bonded(validators: Vec<(AccountId, u128)>) {
	BONDED.with(|b| {
		*b.borrow_mut() = validators
			.into_iter()
			.map(|(validator, voting_power)| ValidatorInfo { validator, voting_power: Amount::from(voting_power), region: None })
			.collect();
	});
}

pub fn slashes() -> Vec<(AccountId, Dec)> {
	SLASHES.with(|s| s.borrow().clone())
}

pub fn jails() -> Vec<AccountId> {
	JAILS.with(|j| j.borrow().clone())
}

pub fn anomalies() -> Vec<Denom> {
	ANOMALIES.with(|a| a.borrow().clone())
}

pub struct ExtBuilder {
	params: OracleParams,
	tracked_assets: Vec<Vec<u8>>,
}

impl Default for ExtBuilder {
	fn default() -> Self {
		Self { params: OracleParams::default(), tracked_assets: Vec::new() }
	}
}

impl ExtBuilder {
	pub fn params(mut self, params: OracleParams) -> Self {
		self.params = params;
		self
	}

	pub fn tracked_assets(mut self, assets: Vec<Vec<u8>>) -> Self {
		self.tracked_assets = assets;
		self
	}

	pub fn build(self) -> sp_io::TestExternalities {
		BONDED.with(|b| b.borrow_mut().clear());
		BLOCK_HEIGHT.with(|h| *h.borrow_mut() = 1);
		BLOCK_TIME.with(|t| *t.borrow_mut() = 1_000);
		SLASHES.with(|s| s.borrow_mut().clear());
		JAILS.with(|j| j.borrow_mut().clear());
		ANOMALIES.with(|a| a.borrow_mut().clear());

		let mut t = frame_system::GenesisConfig::<Test>::default().build_storage().unwrap();
		GenesisBuild::<Test>::assimilate_storage(
			&module_oracle::GenesisConfig { params: self.params, tracked_assets: self.tracked_assets },
			&mut t,
		)
		.unwrap();

		let mut ext = sp_io::TestExternalities::new(t);
		ext.execute_with(|| System::set_block_number(1));
		ext
	}
}
