//! Wrappers around ERC-20 operations that throw on failure (when the token
//! contract returns false).
//!
//! Tokens that return no value (and instead revert or throw on failure) are
//! also supported, non-reverting calls are assumed to be successful.
//!
//! To use this library, embed [`SafeErc20`] in your contract, which allows
//! you to call the safe operations as
//! `contract.safe_erc20.safe_transfer(token_addr, ...)`, etc.
use alloc::{vec, vec::Vec};

use alloy_primitives::{Address, U256};
use alloy_sol_types::SolCall;
pub use sol::*;
use stylus_sdk::{
    call::{MethodError, RawCall},
    prelude::*,
    types::AddressVM,
};

use crate::{token::erc20::Erc20Abi, utils::ReentrantCallHandler};

#[cfg_attr(coverage_nightly, coverage(off))]
mod sol {
    use alloy_sol_macro::sol;

    sol! {
        /// An operation with an ERC-20 token failed.
        ///
        /// * `token` - Address of the ERC-20 token.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error SafeErc20FailedOperation(address token);
    }
}

/// A [`SafeErc20`] error.
#[derive(SolidityError, Debug)]
pub enum Error {
    /// An operation with an ERC-20 token failed.
    SafeErc20FailedOperation(SafeErc20FailedOperation),
}

#[cfg_attr(coverage_nightly, coverage(off))]
impl MethodError for Error {
    fn encode(self) -> Vec<u8> {
        self.into()
    }
}

/// State of a [`SafeErc20`] Contract.
#[storage]
pub struct SafeErc20 {}

/// NOTE: Implementation of [`TopLevelStorage`] to be able use `&mut self` when
/// calling other contracts and not `&mut (impl TopLevelStorage +
/// BorrowMut<Self>)`. Should be fixed in the future by the Stylus team.
unsafe impl TopLevelStorage for SafeErc20 {}

/// Required interface of a [`SafeErc20`] utility contract.
pub trait ISafeErc20 {
    /// The error type associated to this trait implementation.
    type Error: Into<Vec<u8>>;

    /// Transfer `value` amount of `token` from the calling contract to `to`.
    /// If `token` returns no value, non-reverting calls are assumed to be
    /// successful.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `token` - Address of the ERC-20 token contract.
    /// * `to` - Account to transfer tokens to.
    /// * `value` - Number of tokens to transfer.
    ///
    /// # Errors
    ///
    /// * [`Error::SafeErc20FailedOperation`] - If the `token` address is not
    ///   a contract, the contract fails to execute the call or the call
    ///   returns value that is not `true`.
    fn safe_transfer(
        &mut self,
        token: Address,
        to: Address,
        value: U256,
    ) -> Result<(), Self::Error>;

    /// Set the calling contract's allowance toward `spender` to `value`. If
    /// `token` returns no value, non-reverting calls are assumed to be
    /// successful. Meant to be used with tokens that require the approval
    /// to be set to zero before setting it to a non-zero value, such as
    /// USDT.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `token` - Address of the ERC-20 token contract.
    /// * `spender` - Account that will spend the tokens.
    /// * `value` - Value to approve.
    ///
    /// # Errors
    ///
    /// * [`Error::SafeErc20FailedOperation`] - If the `token` address is not
    ///   a contract, the contract fails to execute the call or the call
    ///   returns value that is not `true`.
    fn force_approve(
        &mut self,
        token: Address,
        spender: Address,
        value: U256,
    ) -> Result<(), Self::Error>;
}

impl ISafeErc20 for SafeErc20 {
    type Error = Error;

    fn safe_transfer(
        &mut self,
        token: Address,
        to: Address,
        value: U256,
    ) -> Result<(), Self::Error> {
        let call = Erc20Abi::transferCall { to, value };

        Self::call_optional_return(token, &call)
    }

    fn force_approve(
        &mut self,
        token: Address,
        spender: Address,
        value: U256,
    ) -> Result<(), Self::Error> {
        let approve_call = Erc20Abi::approveCall { spender, value };

        // Try performing the approval with the desired value.
        if Self::call_optional_return(token, &approve_call).is_ok() {
            return Ok(());
        }

        // If that fails, reset the allowance to zero, then retry the desired
        // approval.
        let reset_approval_call =
            Erc20Abi::approveCall { spender, value: U256::ZERO };
        Self::call_optional_return(token, &reset_approval_call)?;
        Self::call_optional_return(token, &approve_call)
    }
}

impl SafeErc20 {
    /// Returns the `token` balance of `account`.
    ///
    /// # Arguments
    ///
    /// * `token` - Address of the ERC-20 token contract.
    /// * `account` - Account to read the balance of.
    ///
    /// # Errors
    ///
    /// * [`Error::SafeErc20FailedOperation`] - If the `token` address is not
    ///   a contract, or the call fails or returns malformed data.
    pub fn balance_of(token: Address, account: Address) -> Result<U256, Error> {
        if !Address::has_code(&token) {
            return Err(SafeErc20FailedOperation { token }.into());
        }

        let call = Erc20Abi::balanceOfCall { account };
        let result = RawCall::new()
            .call_with_reentrant_handling(token, &call.abi_encode())
            .map_err(|_| SafeErc20FailedOperation { token })?;

        match result.get(..32) {
            Some(word) => Ok(U256::from_be_slice(word)),
            None => Err(SafeErc20FailedOperation { token }.into()),
        }
    }

    /// Imitates a Stylus high-level call, relaxing the requirement on the
    /// return value: if data is returned, it must not be `false`, otherwise
    /// calls are assumed to be successful.
    ///
    /// # Arguments
    ///
    /// * `token` - Address of the ERC-20 token contract.
    /// * `call` - [`Erc20Abi`] call that implements [`SolCall`] trait.
    ///
    /// # Errors
    ///
    /// * [`Error::SafeErc20FailedOperation`] - If the `token` address is not
    ///   a contract, the contract fails to execute the call or the call
    ///   returns value that is not `true`.
    fn call_optional_return(
        token: Address,
        call: &impl SolCall,
    ) -> Result<(), Error> {
        if !Address::has_code(&token) {
            return Err(SafeErc20FailedOperation { token }.into());
        }

        // Only the first word of the return data is inspected.
        match RawCall::new()
            .call_with_reentrant_handling(token, &call.abi_encode())
        {
            Ok(data) if data.is_empty() => Ok(()),
            Ok(data) if data.get(..32).is_some_and(Self::encodes_true) => {
                Ok(())
            }
            _ => Err(SafeErc20FailedOperation { token }.into()),
        }
    }

    /// Returns true if a slice of bytes is an ABI encoded `true` value.
    ///
    /// # Arguments
    ///
    /// * `data` - Slice of bytes.
    fn encodes_true(data: &[u8]) -> bool {
        data.split_last().is_some_and(|(last, rest)| {
            *last == 1 && rest.iter().all(|&byte| byte == 0)
        })
    }
}
