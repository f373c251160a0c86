//! Contracts standing in for the router and the tokens in unit tests.
#![allow(unreachable_pub)]

use alloc::{string::ToString, vec, vec::Vec};

use alloy_primitives::{
    aliases::{U160, U24},
    Address, U256,
};
use alloy_sol_types::{Revert, SolCall, SolError};
use stylus_sdk::{
    block,
    call::RawCall,
    contract, msg,
    prelude::*,
    storage::{StorageBool, StorageMap, StorageU256},
};

use crate::{token::erc20::Erc20Abi, utils::ReentrantCallHandler};

/// The only fee tier [`SwapRouterMock`] has a pool for.
pub const POOL_FEE: U24 = U24::from_limbs([500]);

/// Revert reason of [`SwapRouterMock`] when the output is below the minimum.
pub const TOO_LITTLE_RECEIVED: &str = "Too little received";

/// Revert reason of [`SwapRouterMock`] for a fee tier without a pool.
pub const NO_POOL: &str = "No pool for fee tier";

fn revert(reason: &str) -> Vec<u8> {
    Revert { reason: reason.to_string() }.abi_encode()
}

#[storage]
pub struct Ledger {
    balances: StorageMap<Address, StorageU256>,
    allowances: StorageMap<Address, StorageMap<Address, StorageU256>>,
}

impl Ledger {
    fn balance_of(&self, account: Address) -> U256 {
        self.balances.get(account)
    }

    fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances.get(owner).get(spender)
    }

    fn mint(&mut self, to: Address, value: U256) {
        let balance = self.balances.get(to);
        self.balances.setter(to).set(balance + value);
    }

    fn approve(&mut self, owner: Address, spender: Address, value: U256) {
        self.allowances.setter(owner).setter(spender).set(value);
    }

    fn transfer(
        &mut self,
        from: Address,
        to: Address,
        value: U256,
    ) -> Result<(), Vec<u8>> {
        let from_balance = self.balances.get(from);
        if from_balance < value {
            return Err(revert("insufficient balance"));
        }
        self.balances.setter(from).set(from_balance - value);
        let to_balance = self.balances.get(to);
        self.balances.setter(to).set(to_balance + value);
        Ok(())
    }

    fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        value: U256,
    ) -> Result<(), Vec<u8>> {
        let allowance = self.allowance(from, spender);
        if allowance < value {
            return Err(revert("insufficient allowance"));
        }
        self.approve(from, spender, allowance - value);
        self.transfer(from, to, value)
    }
}

/// ERC-20 token returning `bool`, optionally with USDT-like approvals or
/// answering `false` to every state-changing call.
#[storage]
pub struct Erc20Mock {
    ledger: Ledger,
    strict_approval: StorageBool,
    return_false: StorageBool,
}

unsafe impl TopLevelStorage for Erc20Mock {}

#[public]
impl Erc20Mock {
    pub fn mint(&mut self, to: Address, value: U256) {
        self.ledger.mint(to, value);
    }

    /// Rejects changing a non-zero allowance to another non-zero value.
    pub fn set_strict_approval(&mut self, strict: bool) {
        self.strict_approval.set(strict);
    }

    pub fn set_return_false(&mut self, return_false: bool) {
        self.return_false.set(return_false);
    }

    pub fn balance_of(&self, account: Address) -> U256 {
        self.ledger.balance_of(account)
    }

    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.ledger.allowance(owner, spender)
    }

    pub fn approve(
        &mut self,
        spender: Address,
        value: U256,
    ) -> Result<bool, Vec<u8>> {
        if self.return_false.get() {
            return Ok(false);
        }
        let owner = msg::sender();
        if self.strict_approval.get()
            && !value.is_zero()
            && !self.ledger.allowance(owner, spender).is_zero()
        {
            return Err(revert("approve from non-zero to non-zero allowance"));
        }
        self.ledger.approve(owner, spender, value);
        Ok(true)
    }

    pub fn transfer(
        &mut self,
        to: Address,
        value: U256,
    ) -> Result<bool, Vec<u8>> {
        if self.return_false.get() {
            return Ok(false);
        }
        self.ledger.transfer(msg::sender(), to, value)?;
        Ok(true)
    }

    pub fn transfer_from(
        &mut self,
        from: Address,
        to: Address,
        value: U256,
    ) -> Result<bool, Vec<u8>> {
        if self.return_false.get() {
            return Ok(false);
        }
        self.ledger.transfer_from(msg::sender(), from, to, value)?;
        Ok(true)
    }
}

/// ERC-20 token whose state-changing functions return no value.
#[storage]
pub struct NoReturnErc20Mock {
    ledger: Ledger,
}

unsafe impl TopLevelStorage for NoReturnErc20Mock {}

#[public]
impl NoReturnErc20Mock {
    pub fn mint(&mut self, to: Address, value: U256) {
        self.ledger.mint(to, value);
    }

    pub fn balance_of(&self, account: Address) -> U256 {
        self.ledger.balance_of(account)
    }

    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.ledger.allowance(owner, spender)
    }

    pub fn approve(&mut self, spender: Address, value: U256) {
        self.ledger.approve(msg::sender(), spender, value);
    }

    pub fn transfer(
        &mut self,
        to: Address,
        value: U256,
    ) -> Result<(), Vec<u8>> {
        self.ledger.transfer(msg::sender(), to, value)
    }

    pub fn transfer_from(
        &mut self,
        from: Address,
        to: Address,
        value: U256,
    ) -> Result<(), Vec<u8>> {
        self.ledger.transfer_from(msg::sender(), from, to, value)
    }
}

/// Wrapped native token minting 1:1 for the value deposited.
#[storage]
pub struct WethMock {
    ledger: Ledger,
    reject_deposits: StorageBool,
}

unsafe impl TopLevelStorage for WethMock {}

#[public]
impl WethMock {
    #[payable]
    pub fn deposit(&mut self) -> Result<(), Vec<u8>> {
        if self.reject_deposits.get() {
            return Err(revert("deposits paused"));
        }
        self.ledger.mint(msg::sender(), msg::value());
        Ok(())
    }

    pub fn set_reject_deposits(&mut self, reject: bool) {
        self.reject_deposits.set(reject);
    }

    pub fn balance_of(&self, account: Address) -> U256 {
        self.ledger.balance_of(account)
    }

    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.ledger.allowance(owner, spender)
    }

    pub fn approve(&mut self, spender: Address, value: U256) -> bool {
        self.ledger.approve(msg::sender(), spender, value);
        true
    }

    pub fn transfer(
        &mut self,
        to: Address,
        value: U256,
    ) -> Result<bool, Vec<u8>> {
        self.ledger.transfer(msg::sender(), to, value)?;
        Ok(true)
    }

    pub fn transfer_from(
        &mut self,
        from: Address,
        to: Address,
        value: U256,
    ) -> Result<bool, Vec<u8>> {
        self.ledger.transfer_from(msg::sender(), from, to, value)?;
        Ok(true)
    }
}

/// Single-pool router paying out at a fixed rate from its own balance.
///
/// The pool only exists for [`POOL_FEE`]. The router pulls the input token
/// from the caller with `transferFrom`, so the caller must approve it
/// beforehand.
#[storage]
pub struct SwapRouterMock {
    numerator: StorageU256,
    denominator: StorageU256,
    shortfall: StorageU256,
}

unsafe impl TopLevelStorage for SwapRouterMock {}

#[public]
impl SwapRouterMock {
    /// Pays `numerator / denominator` output tokens per input token.
    pub fn set_rate(&mut self, numerator: U256, denominator: U256) {
        self.numerator.set(numerator);
        self.denominator.set(denominator);
    }

    /// Delivers `shortfall` tokens less than reported, like a token taking
    /// a fee on transfer.
    pub fn set_shortfall(&mut self, shortfall: U256) {
        self.shortfall.set(shortfall);
    }

    pub fn quote(&self, amount_in: U256) -> U256 {
        (amount_in * self.numerator.get())
            .checked_div(self.denominator.get())
            .unwrap_or_default()
    }

    #[payable]
    pub fn exact_input_single(
        &mut self,
        params: (Address, Address, U24, Address, U256, U256, U256, U160),
    ) -> Result<U256, Vec<u8>> {
        let (
            token_in,
            token_out,
            fee,
            recipient,
            deadline,
            amount_in,
            amount_out_minimum,
            _sqrt_price_limit_x96,
        ) = params;

        if deadline < U256::from(block::timestamp()) {
            return Err(revert("Transaction too old"));
        }
        if fee != POOL_FEE {
            return Err(revert(NO_POOL));
        }

        let amount_out = self.quote(amount_in);
        if amount_out < amount_out_minimum {
            return Err(revert(TOO_LITTLE_RECEIVED));
        }

        let pull = Erc20Abi::transferFromCall {
            from: msg::sender(),
            to: contract::address(),
            value: amount_in,
        };
        RawCall::new()
            .call_with_reentrant_handling(token_in, &pull.abi_encode())?;

        let delivered = amount_out.saturating_sub(self.shortfall.get());
        let push = Erc20Abi::transferCall { to: recipient, value: delivered };
        RawCall::new()
            .call_with_reentrant_handling(token_out, &push.abi_encode())?;

        Ok(amount_out)
    }
}
