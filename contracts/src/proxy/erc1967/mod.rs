//! [ERC-1967] proxy that fronts the swap adapter.
//!
//! The proxy stores the address of its implementation at
//! [`utils::IMPLEMENTATION_SLOT`], so it never collides with the sequential
//! storage layout of the adapter running behind it. Every call the proxy
//! does not handle itself is delegated to that implementation.
//!
//! [ERC-1967]: https://eips.ethereum.org/EIPS/eip-1967
use alloc::{vec, vec::Vec};

use alloy_primitives::Address;
use stylus_sdk::prelude::*;

pub mod utils;

pub use sol::*;
pub use utils::{Erc1967Utils, Error};

#[cfg_attr(coverage_nightly, coverage(off))]
mod sol {
    use alloy_sol_macro::sol;

    sol! {
        /// Emitted when the implementation is upgraded.
        ///
        /// * `implementation` - Address of the new implementation.
        #[derive(Debug)]
        #[allow(missing_docs)]
        event Upgraded(address indexed implementation);
    }
}

/// State of an [`Erc1967Proxy`].
///
/// The proxy has no sequential fields. Its only state lives at
/// [`utils::IMPLEMENTATION_SLOT`].
#[storage]
pub struct Erc1967Proxy {}

/// NOTE: Implementation of [`TopLevelStorage`] to be able use `&mut self` when
/// calling other contracts and not `&mut (impl TopLevelStorage +
/// BorrowMut<Self>)`. Should be fixed in the future by the Stylus team.
unsafe impl TopLevelStorage for Erc1967Proxy {}

impl Erc1967Proxy {
    /// Sets the implementation and runs `data` against it, typically the
    /// encoded `initialize` call of the implementation.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `implementation` - Address of the implementation contract.
    /// * `data` - Setup calldata. May be empty, in which case no value may be
    ///   sent along.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidImplementation`] - If `implementation` has no code.
    /// * [`Error::NonPayable`] - If `data` is empty and value was sent.
    /// * [`Error::FailedCall`] - If the setup call reverted without data.
    /// * [`Error::FailedCallWithReason`] - If the setup call reverted with
    ///   data.
    ///
    /// # Events
    ///
    /// * [`Upgraded`].
    pub fn constructor(
        &mut self,
        implementation: Address,
        data: &[u8],
    ) -> Result<(), Error> {
        Erc1967Utils::upgrade_to_and_call(self, implementation, data)
    }

    /// Returns the current implementation address.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    #[must_use]
    pub fn implementation(&self) -> Address {
        Erc1967Utils::get_implementation(self)
    }
}

#[cfg(test)]
mod tests {
    use alloc::{vec, vec::Vec};

    use alloy_primitives::{Address, U256};
    use alloy_sol_macro::sol;
    use alloy_sol_types::{SolCall, SolValue};
    use motsu::prelude::*;
    use stylus_sdk::{
        abi::Bytes, prelude::*, storage::StorageU256, ArbResult,
    };

    use super::*;
    use crate::{proxy::IProxy, utils::address::FailedCallWithReason};

    const FROZEN: &[u8] = b"counter is frozen";

    #[storage]
    struct ProxyExample {
        erc1967: Erc1967Proxy,
    }

    unsafe impl TopLevelStorage for ProxyExample {}

    #[public]
    impl ProxyExample {
        #[constructor]
        #[payable]
        fn constructor(
            &mut self,
            implementation: Address,
            data: Bytes,
        ) -> Result<(), Error> {
            self.erc1967.constructor(implementation, &data)
        }

        fn implementation(&self) -> Address {
            self.erc1967.implementation()
        }

        #[fallback]
        fn fallback(&mut self, calldata: &[u8]) -> ArbResult {
            self.do_fallback(calldata)
        }
    }

    impl IProxy for ProxyExample {
        fn implementation(&self) -> Address {
            self.erc1967.implementation()
        }
    }

    #[storage]
    struct Counter {
        value: StorageU256,
    }

    unsafe impl TopLevelStorage for Counter {}

    #[public]
    impl Counter {
        fn value(&self) -> U256 {
            self.value.get()
        }

        fn double(&self, value: U256) -> U256 {
            value * U256::from(2)
        }

        fn freeze(&mut self) -> Result<(), Vec<u8>> {
            Err(FROZEN.to_vec())
        }
    }

    sol! {
        interface ICounter {
            function value() external view returns (uint256);
            function double(uint256 value) external view returns (uint256);
            function freeze() external;
        }
    }

    fn no_data() -> Bytes {
        Vec::new().into()
    }

    #[motsu::test]
    fn constructs_without_setup_call(
        proxy: Contract<ProxyExample>,
        counter: Contract<Counter>,
        alice: Address,
    ) {
        proxy
            .sender(alice)
            .constructor(counter.address(), no_data())
            .motsu_expect("should set the implementation");

        assert_eq!(proxy.sender(alice).implementation(), counter.address());
        proxy.assert_emitted(&Upgraded { implementation: counter.address() });
    }

    #[motsu::test]
    fn constructs_with_setup_call(
        proxy: Contract<ProxyExample>,
        counter: Contract<Counter>,
        alice: Address,
    ) {
        let data = ICounter::doubleCall { value: U256::from(21) }.abi_encode();

        proxy
            .sender(alice)
            .constructor(counter.address(), data.into())
            .motsu_expect("should run the setup call");

        assert_eq!(proxy.sender(alice).implementation(), counter.address());
        proxy.assert_emitted(&Upgraded { implementation: counter.address() });
    }

    #[motsu::test]
    fn reverting_setup_call_aborts_construction(
        proxy: Contract<ProxyExample>,
        counter: Contract<Counter>,
        alice: Address,
    ) {
        let data = ICounter::freezeCall {}.abi_encode();

        let err = proxy
            .sender(alice)
            .constructor(counter.address(), data.into())
            .motsu_expect_err("should surface the setup revert");

        assert!(matches!(
            err,
            Error::FailedCallWithReason(FailedCallWithReason { reason })
                if reason.to_vec() == FROZEN
        ));
        assert_eq!(proxy.sender(alice).implementation(), Address::ZERO);
    }

    #[motsu::test]
    fn fallback_returns_implementation_output(
        proxy: Contract<ProxyExample>,
        counter: Contract<Counter>,
        alice: Address,
    ) {
        proxy
            .sender(alice)
            .constructor(counter.address(), no_data())
            .motsu_unwrap();

        let call = ICounter::doubleCall { value: U256::from(21) }.abi_encode();
        let result = proxy
            .sender(alice)
            .fallback(&call)
            .motsu_expect("should forward the call");

        assert_eq!(result, U256::from(42).abi_encode());
    }

    #[motsu::test]
    fn fallback_hands_back_revert_data(
        proxy: Contract<ProxyExample>,
        counter: Contract<Counter>,
        alice: Address,
    ) {
        proxy
            .sender(alice)
            .constructor(counter.address(), no_data())
            .motsu_unwrap();

        let call = ICounter::freezeCall {}.abi_encode();
        let err = proxy
            .sender(alice)
            .fallback(&call)
            .motsu_expect_err("should forward the revert");

        assert_eq!(err, FROZEN.to_vec());
    }

    #[motsu::test]
    fn rejects_implementation_without_code(
        proxy: Contract<ProxyExample>,
        alice: Address,
        bob: Address,
    ) {
        let err = proxy
            .sender(alice)
            .constructor(bob, no_data())
            .motsu_expect_err("should reject an account without code");

        assert!(matches!(
            err,
            Error::InvalidImplementation(utils::ERC1967InvalidImplementation {
                implementation
            }) if implementation == bob
        ));
        assert_eq!(proxy.sender(alice).implementation(), Address::ZERO);
    }

    #[motsu::test]
    fn rejects_value_without_setup_call(
        proxy: Contract<ProxyExample>,
        counter: Contract<Counter>,
        alice: Address,
    ) {
        let value = U256::from(1);
        alice.fund(value);

        let err = proxy
            .sender_and_value(alice, value)
            .constructor(counter.address(), no_data())
            .motsu_expect_err("should reject stuck value");

        assert!(matches!(err, Error::NonPayable(_)));
    }
}
