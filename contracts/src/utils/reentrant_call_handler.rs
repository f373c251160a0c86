//! Raw external calls that respect the `reentrant` feature.
//!
//! Every call the adapter makes to the router, the wrapped native token or
//! an output token goes through [`ReentrantCallHandler`]. With the
//! `reentrant` feature enabled the storage cache is flushed before the call,
//! so a callee re-entering the adapter never observes stale cached values.
//! Without it the call is made as is.
//!
//! See [RawCall::call] and [RawCall::flush_storage_cache].
//!
//! [RawCall::call]: https://docs.rs/stylus-sdk/0.9.0/stylus_sdk/call/struct.RawCall.html#method.call
//! [RawCall::flush_storage_cache]: https://docs.rs/stylus-sdk/0.9.0/stylus_sdk/call/struct.RawCall.html#method.flush_storage_cache

use alloy_primitives::Address;
use stylus_sdk::{call::RawCall, ArbResult};

/// Performs a raw contract call with reentrancy safeguards.
pub trait ReentrantCallHandler {
    /// Executes a contract call, flushing the storage cache first when the
    /// `reentrant` feature is enabled.
    ///
    /// # Arguments
    ///
    /// * `contract` - The address of the contract being called.
    /// * `call_data` - The encoded data for the contract call.
    ///
    /// # Errors
    ///
    /// * The raw revert data of the callee, unmodified.
    fn call_with_reentrant_handling(
        self,
        contract: Address,
        call_data: &[u8],
    ) -> ArbResult;
}

impl ReentrantCallHandler for RawCall {
    fn call_with_reentrant_handling(
        self,
        contract: Address,
        call_data: &[u8],
    ) -> ArbResult {
        #[cfg(feature = "reentrant")]
        unsafe {
            self.flush_storage_cache().call(contract, call_data)
        }
        #[cfg(not(feature = "reentrant"))]
        unsafe {
            self.call(contract, call_data)
        }
    }
}
