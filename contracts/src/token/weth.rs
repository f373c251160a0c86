//! Bindings for the wrapped native token (WETH).
//!
//! Swap routers only operate on tokens, so native value sent to the adapter
//! is wrapped 1:1 with [`Weth::deposit`] before it is swapped.
use alloy_primitives::{Address, U256};
use alloy_sol_types::SolCall;
use stylus_sdk::call::RawCall;

use crate::{
    token::erc20::utils::safe_erc20::{Error, SafeErc20FailedOperation},
    utils::ReentrantCallHandler,
};

pub use abi::IWeth;

mod abi {
    #![allow(missing_docs)]
    #![cfg_attr(coverage_nightly, coverage(off))]

    alloy_sol_types::sol! {
        /// Wrapped native token, on top of the regular ERC-20 surface.
        interface IWeth {
            function deposit() external payable;
            function withdraw(uint256 wad) external;
        }
    }
}

/// Calls into a wrapped native token contract.
pub struct Weth;

impl Weth {
    /// Wraps `value` of native currency held by the calling contract into
    /// `weth`, credited to the calling contract.
    ///
    /// # Arguments
    ///
    /// * `weth` - Address of the wrapped native token.
    /// * `value` - Amount of native currency to wrap.
    ///
    /// # Errors
    ///
    /// * [`Error::SafeErc20FailedOperation`] - If the deposit reverted.
    pub fn deposit(weth: Address, value: U256) -> Result<(), Error> {
        let call = IWeth::depositCall {};
        RawCall::new_with_value(value)
            .call_with_reentrant_handling(weth, &call.abi_encode())
            .map_err(|_| SafeErc20FailedOperation { token: weth })?;
        Ok(())
    }
}
