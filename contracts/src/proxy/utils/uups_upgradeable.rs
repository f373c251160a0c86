//! An upgradeability mechanism designed for UUPS (Universal Upgradeable Proxy
//! Standard) proxies as defined in [ERC-1822].
//!
//! [ERC-1822]: https://eips.ethereum.org/EIPS/eip-1822
//!
//! The upgrade entry point lives in the implementation, not in the proxy.
//! When the implementation runs behind an [`Erc1967Proxy`], calling
//! `upgradeToAndCall` on the proxy rewrites the proxy's ERC-1967
//! implementation slot.
//!
//! A Stylus contract cannot compare its own address with the proxy's
//! implementation slot from inside a delegate call, so the implementation
//! marks itself as the logic contract in its constructor instead. The flag
//! lives at [`LOGIC_FLAG_SLOT`] in the implementation's own storage, and is
//! never set in the storage of a proxy.
//!
//! [`Erc1967Proxy`]: crate::proxy::erc1967::Erc1967Proxy
use alloc::{string::String, vec, vec::Vec};

use alloy_primitives::{Address, B256, U256};
use alloy_sol_types::SolCall;
pub use sol::*;
use stylus_sdk::{
    abi::Bytes,
    call::{MethodError, RawCall},
    prelude::*,
};

use crate::{
    proxy::{
        erc1967::{
            self,
            utils::{
                ERC1967InvalidImplementation, ERC1967NonPayable,
                IMPLEMENTATION_SLOT,
            },
            Erc1967Utils,
        },
        utils::erc1822::Erc1822ProxiableInterface,
    },
    utils::{address, storage_slot::StorageSlot, ReentrantCallHandler},
};

/// The version of the upgrade interface of the contract.
pub const UPGRADE_INTERFACE_VERSION: &str = "5.0.0";

/// Slot of the flag that marks the logic contract.
///
/// Equal to `keccak256("swapper.proxy.uups.logic.flag")`.
pub const LOGIC_FLAG_SLOT: B256 = B256::new(
    keccak_const::Keccak256::new()
        .update(b"swapper.proxy.uups.logic.flag")
        .finalize(),
);

const LOGIC_FLAG_SLOT_KEY: U256 = U256::from_be_bytes(LOGIC_FLAG_SLOT.0);

#[cfg_attr(coverage_nightly, coverage(off))]
mod sol {
    use alloy_sol_macro::sol;

    sol! {
        /// The call is from an unauthorized context.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error UUPSUnauthorizedCallContext();

        /// The storage `slot` is unsupported as a UUID.
        ///
        /// * `slot` - The unsupported UUID returned by the implementation.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error UUPSUnsupportedProxiableUUID(bytes32 slot);
    }
}

/// An [`UUPSUpgradeable`] error.
#[derive(SolidityError, Debug)]
pub enum Error {
    /// The call is from an unauthorized context.
    UnauthorizedCallContext(UUPSUnauthorizedCallContext),
    /// The storage `slot` is unsupported as a UUID.
    UnsupportedProxiableUUID(UUPSUnsupportedProxiableUUID),
    /// The new implementation is invalid.
    InvalidImplementation(ERC1967InvalidImplementation),
    /// An upgrade without a setup call received value.
    NonPayable(ERC1967NonPayable),
    /// There's no code at `target` (it is not a contract).
    EmptyCode(address::AddressEmptyCode),
    /// The setup call reverted without a reason.
    FailedCall(address::FailedCall),
    /// The setup call reverted with a reason.
    FailedCallWithReason(address::FailedCallWithReason),
}

impl From<erc1967::utils::Error> for Error {
    fn from(e: erc1967::utils::Error) -> Self {
        match e {
            erc1967::utils::Error::InvalidImplementation(e) => {
                Error::InvalidImplementation(e)
            }
            erc1967::utils::Error::NonPayable(e) => Error::NonPayable(e),
            erc1967::utils::Error::EmptyCode(e) => Error::EmptyCode(e),
            erc1967::utils::Error::FailedCall(e) => Error::FailedCall(e),
            erc1967::utils::Error::FailedCallWithReason(e) => {
                Error::FailedCallWithReason(e)
            }
        }
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
impl MethodError for Error {
    fn encode(self) -> Vec<u8> {
        self.into()
    }
}

/// Interface for a UUPS (Universal Upgradeable Proxy Standard) upgradeable
/// contract.
pub trait IUUPSUpgradeable {
    /// The version of the upgrade interface of the contract.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    #[must_use]
    fn upgrade_interface_version(&self) -> String {
        UPGRADE_INTERFACE_VERSION.into()
    }

    /// Upgrades the implementation of the proxy to `new_implementation`,
    /// and subsequently executes the function call encoded in `data`.
    ///
    /// Implementations must reject callers not authorized to upgrade.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `new_implementation` - The address of the new implementation.
    /// * `data` - Setup calldata for the new implementation. May be empty.
    ///
    /// # Errors
    ///
    /// * [`Error::UnauthorizedCallContext`] - If not called through a proxy.
    /// * [`Error::InvalidImplementation`] - If `new_implementation` does not
    ///   answer `proxiableUUID`, or has no code.
    /// * [`Error::UnsupportedProxiableUUID`] - If `new_implementation`
    ///   reports another slot.
    /// * [`Error::NonPayable`] - If `data` is empty and value was sent.
    /// * [`Error::FailedCall`] - If the setup call reverted without data.
    /// * [`Error::FailedCallWithReason`] - If the setup call reverted with
    ///   data.
    ///
    /// # Events
    ///
    /// * [`erc1967::Upgraded`].
    fn upgrade_to_and_call(
        &mut self,
        new_implementation: Address,
        data: Bytes,
    ) -> Result<(), Vec<u8>>;
}

/// State of a [`UUPSUpgradeable`] contract.
///
/// Has no sequential fields, the logic flag lives at [`LOGIC_FLAG_SLOT`].
#[storage]
pub struct UUPSUpgradeable {}

impl UUPSUpgradeable {
    /// Marks the current storage as the one of the logic contract.
    ///
    /// Must be called from the constructor of the implementation.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    pub fn constructor(&mut self) {
        StorageSlot::set_bool(self, LOGIC_FLAG_SLOT_KEY, true);
    }

    /// Whether execution happens in the storage of the logic contract.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    #[must_use]
    pub fn is_logic(&self) -> bool {
        StorageSlot::get_bool(self, LOGIC_FLAG_SLOT_KEY)
    }

    /// Checks that execution happens through a proxy that points at an
    /// implementation.
    ///
    /// The check cannot tell which implementation the proxy points at: the
    /// address of the running logic contract is unknown inside a delegate
    /// call, since it keeps no immutable copy of it. Any storage without the
    /// logic flag and with a non-zero implementation slot passes, including
    /// a proxy that currently delegates to another UUPS implementation.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    ///
    /// # Errors
    ///
    /// * [`Error::UnauthorizedCallContext`] - If called on the logic contract
    ///   directly, or on a proxy with an empty implementation slot.
    pub fn only_proxy(&self) -> Result<(), Error> {
        if self.is_logic() || Erc1967Utils::get_implementation(self).is_zero()
        {
            return Err(UUPSUnauthorizedCallContext {}.into());
        }

        Ok(())
    }

    /// Checks that execution does not happen through a proxy.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    ///
    /// # Errors
    ///
    /// * [`Error::UnauthorizedCallContext`] - If called through a proxy.
    pub fn not_delegated(&self) -> Result<(), Error> {
        if self.is_logic() {
            Ok(())
        } else {
            Err(UUPSUnauthorizedCallContext {}.into())
        }
    }

    /// Returns [`IMPLEMENTATION_SLOT`] when called on the logic contract.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    ///
    /// # Errors
    ///
    /// * [`Error::UnauthorizedCallContext`] - If called through a proxy.
    pub fn proxiable_uuid(&self) -> Result<B256, Error> {
        self.not_delegated()?;
        Ok(IMPLEMENTATION_SLOT)
    }

    /// Upgrades to `new_implementation` after checking that it is UUPS
    /// compatible, then runs `data` against it.
    ///
    /// Callers are expected to have checked [`Self::only_proxy`] and their
    /// own authorization first.
    ///
    /// # Arguments
    ///
    /// * `context` - Write access to the proxy's storage.
    /// * `new_implementation` - The address of the new implementation.
    /// * `data` - Setup calldata for the new implementation. May be empty.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidImplementation`] - If `new_implementation` does not
    ///   answer `proxiableUUID`.
    /// * [`Error::UnsupportedProxiableUUID`] - If `new_implementation`
    ///   reports another slot.
    /// * See [`Erc1967Utils::upgrade_to_and_call`] for the remaining errors.
    ///
    /// # Events
    ///
    /// * [`erc1967::Upgraded`].
    pub fn _upgrade_to_and_call_uups<T: TopLevelStorage + HostAccess>(
        context: &mut T,
        new_implementation: Address,
        data: &[u8],
    ) -> Result<(), Error> {
        let call = Erc1822ProxiableInterface::proxiableUUIDCall {};
        let invalid = || {
            Error::InvalidImplementation(ERC1967InvalidImplementation {
                implementation: new_implementation,
            })
        };

        let returned = RawCall::new()
            .call_with_reentrant_handling(new_implementation, &call.abi_encode())
            .map_err(|_| invalid())?;
        let slot =
            Erc1822ProxiableInterface::proxiableUUIDCall::abi_decode_returns(
                &returned, true,
            )
            .map_err(|_| invalid())?
            ._0;

        if slot != IMPLEMENTATION_SLOT {
            return Err(UUPSUnsupportedProxiableUUID { slot }.into());
        }

        Erc1967Utils::upgrade_to_and_call(context, new_implementation, data)?;

        Ok(())
    }
}
