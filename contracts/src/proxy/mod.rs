//! Proxy plumbing for the upgradeable swap adapter.
//!
//! The adapter is deployed once as a logic contract and reached through an
//! [`erc1967::Erc1967Proxy`], which keeps every piece of adapter state in
//! its own storage. Upgrades follow the UUPS pattern, so the upgrade entry
//! point lives in the logic contract itself, see
//! [`utils::uups_upgradeable`].
use alloc::vec::Vec;

use alloy_primitives::Address;
use stylus_sdk::{
    call::{self, Call, Error},
    prelude::*,
};

pub mod erc1967;
pub mod utils;

/// Fallback delegation to another contract through `delegatecall`.
///
/// The contract receiving the delegated call is the _implementation_. It is
/// returned by [`IProxy::implementation`]. Return data and revert data of
/// the implementation are handed back to the caller of the proxy untouched.
pub trait IProxy: TopLevelStorage + Sized {
    /// Delegates `calldata` to `implementation`.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `implementation` - The address of the implementation contract.
    /// * `calldata` - The calldata to delegate to the implementation contract.
    ///
    /// # Errors
    ///
    /// * The revert data of `implementation`.
    fn delegate(
        &mut self,
        implementation: Address,
        calldata: &[u8],
    ) -> Result<Vec<u8>, Error> {
        unsafe {
            call::delegate_call(Call::new_in(self), implementation, calldata)
        }
    }

    /// Returns the address the fallback function delegates to.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    fn implementation(&self) -> Address;

    /// Delegates `calldata` to [`IProxy::implementation`].
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `calldata` - The calldata to delegate to the implementation contract.
    ///
    /// # Errors
    ///
    /// * The revert data of the implementation.
    fn do_fallback(&mut self, calldata: &[u8]) -> Result<Vec<u8>, Vec<u8>> {
        let implementation = self.implementation();
        Ok(self.delegate(implementation, calldata)?)
    }
}
