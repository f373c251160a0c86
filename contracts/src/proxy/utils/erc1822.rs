//! Universal Upgradeable Proxy Standard (UUPS) as defined in
//! [ERC-1822]: <https://eips.ethereum.org/EIPS/eip-1822>.
use alloc::vec::Vec;

use alloy_primitives::B256;

/// Public interface of a UUPS compatible implementation.
///
/// Before an upgrade is accepted, the new implementation is asked for the
/// slot it expects its address to be stored at. Anything but the ERC-1967
/// implementation slot aborts the upgrade.
pub trait IErc1822Proxiable {
    /// Returns the storage slot that the proxiable contract assumes is being
    /// used to store the implementation address.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    ///
    /// # Errors
    ///
    /// * May return an error based on the implementation.
    fn proxiable_uuid(&self) -> Result<B256, Vec<u8>>;
}

pub use abi::*;

mod abi {
    #![allow(missing_docs)]
    #![cfg_attr(coverage_nightly, coverage(off))]

    alloy_sol_types::sol! {
        /// Solidity interface of an ERC-1822 proxiable contract.
        interface Erc1822ProxiableInterface {
            function proxiableUUID() external view returns (bytes32);
        }
    }
}
