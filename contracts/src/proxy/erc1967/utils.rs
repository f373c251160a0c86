//! Getters and event emitting update functions for the [ERC-1967]
//! implementation slot.
//!
//! [ERC-1967]: https://eips.ethereum.org/EIPS/eip-1967
use alloc::vec::Vec;

use alloy_primitives::{b256, Address, B256, U256};
pub use sol::*;
use stylus_sdk::{call::MethodError, evm, msg, prelude::*, types::AddressVM};

use crate::{
    proxy::erc1967::Upgraded,
    utils::{
        address::{self, AddressUtils},
        storage_slot::StorageSlot,
    },
};

#[cfg_attr(coverage_nightly, coverage(off))]
mod sol {
    use alloy_sol_macro::sol;

    sol! {
        /// The `implementation` of the proxy is invalid.
        ///
        /// * `implementation` - Address of the invalid implementation.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error ERC1967InvalidImplementation(address implementation);

        /// An upgrade without a setup call received value that would be
        /// stuck in the proxy.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error ERC1967NonPayable();
    }
}

/// An [`Erc1967Utils`] error.
#[derive(SolidityError, Debug)]
pub enum Error {
    /// The `implementation` of the proxy is invalid.
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

impl From<address::Error> for Error {
    fn from(e: address::Error) -> Self {
        match e {
            address::Error::EmptyCode(e) => Error::EmptyCode(e),
            address::Error::FailedCall(e) => Error::FailedCall(e),
            address::Error::FailedCallWithReason(e) => {
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

/// Storage slot with the address of the current implementation.
///
/// Equal to `keccak256("eip1967.proxy.implementation") - 1`.
pub const IMPLEMENTATION_SLOT: B256 =
    b256!("360894a13ba1a3210667c828492db98dca3e2076cc3735a920a3ca505d382bbc");

pub(crate) const IMPLEMENTATION_SLOT_KEY: U256 =
    U256::from_be_bytes(IMPLEMENTATION_SLOT.0);

/// Reads and updates the [ERC-1967] implementation slot.
///
/// [ERC-1967]: https://eips.ethereum.org/EIPS/eip-1967
pub struct Erc1967Utils;

impl Erc1967Utils {
    /// Returns the current implementation address, or [`Address::ZERO`]
    /// when none was ever set.
    ///
    /// # Arguments
    ///
    /// * `context` - Read access to the storage of the proxy.
    #[must_use]
    pub fn get_implementation(context: &impl HostAccess) -> Address {
        StorageSlot::get_address(context, IMPLEMENTATION_SLOT_KEY)
    }

    /// Points the proxy at `new_implementation` and runs `data` against it
    /// as a setup call.
    ///
    /// The upgrade only accepts value when a setup call is performed,
    /// otherwise [`msg::value`] is rejected so it cannot get stuck in the
    /// proxy.
    ///
    /// # Arguments
    ///
    /// * `context` - Write access to the storage of the proxy.
    /// * `new_implementation` - The new implementation address.
    /// * `data` - Setup calldata for `new_implementation`. May be empty.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidImplementation`] - If `new_implementation` has no
    ///   code.
    /// * [`Error::NonPayable`] - If `data` is empty and value was sent.
    /// * [`Error::EmptyCode`] - If the setup call did not reach any code.
    /// * [`Error::FailedCall`] - If the setup call reverted without data.
    /// * [`Error::FailedCallWithReason`] - If the setup call reverted with
    ///   data.
    ///
    /// # Events
    ///
    /// * [`Upgraded`].
    pub fn upgrade_to_and_call<T: TopLevelStorage + HostAccess>(
        context: &mut T,
        new_implementation: Address,
        data: &[u8],
    ) -> Result<(), Error> {
        Erc1967Utils::_set_implementation(&mut *context, new_implementation)?;

        evm::log(Upgraded { implementation: new_implementation });

        if data.is_empty() {
            Erc1967Utils::_check_non_payable()
        } else {
            AddressUtils::function_delegate_call(
                context,
                new_implementation,
                data,
            )?;
            Ok(())
        }
    }
}

impl Erc1967Utils {
    fn _check_non_payable() -> Result<(), Error> {
        if msg::value().is_zero() {
            Ok(())
        } else {
            Err(ERC1967NonPayable {}.into())
        }
    }

    fn _set_implementation(
        context: &mut impl HostAccess,
        new_implementation: Address,
    ) -> Result<(), Error> {
        if !new_implementation.has_code() {
            return Err(ERC1967InvalidImplementation {
                implementation: new_implementation,
            }
            .into());
        }

        StorageSlot::set_address(
            context,
            IMPLEMENTATION_SLOT_KEY,
            new_implementation,
        );

        Ok(())
    }
}
