//! Low-level delegate calls used by the proxy and the upgrade flow.

use alloc::vec::Vec;

use alloy_primitives::Address;
pub use sol::*;
use stylus_sdk::{
    call::{self, Call, MethodError},
    prelude::*,
    types::AddressVM,
};

#[cfg_attr(coverage_nightly, coverage(off))]
mod sol {
    use alloy_sol_macro::sol;

    sol! {
        /// There's no code at `target` (it is not a contract).
        ///
        /// * `target` - Address of the target contract.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error AddressEmptyCode(address target);

        /// A call to `target` failed without a revert reason.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error FailedCall();

        /// A call to `target` failed with a revert reason.
        ///
        /// * `reason` - The revert data returned by the call.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error FailedCallWithReason(bytes reason);
    }
}

/// An [`AddressUtils`] error.
#[derive(SolidityError, Debug)]
pub enum Error {
    /// There's no code at `target` (it is not a contract).
    EmptyCode(AddressEmptyCode),
    /// A call to `target` failed without a revert reason.
    FailedCall(FailedCall),
    /// A call to `target` failed with a revert reason.
    FailedCallWithReason(FailedCallWithReason),
}

#[cfg_attr(coverage_nightly, coverage(off))]
impl MethodError for Error {
    fn encode(self) -> Vec<u8> {
        self.into()
    }
}

/// Helpers for calling into other contracts by address.
pub struct AddressUtils;

impl AddressUtils {
    /// Delegate-calls `target` with `data`, running its code against the
    /// storage of `context`.
    ///
    /// # Arguments
    ///
    /// * `context` - Mutable access to the calling contract's state.
    /// * `target` - The address of the code to run.
    /// * `data` - Calldata passed to `target`.
    ///
    /// # Errors
    ///
    /// * [`Error::EmptyCode`] - If nothing was returned and `target` has no
    ///   code.
    /// * [`Error::FailedCall`] - If the call reverted without data.
    /// * [`Error::FailedCallWithReason`] - If the call reverted with data.
    pub fn function_delegate_call(
        context: &mut impl TopLevelStorage,
        target: Address,
        data: &[u8],
    ) -> Result<Vec<u8>, Error> {
        let result =
            unsafe { call::delegate_call(Call::new_in(context), target, data) };
        Self::verify_call_result_from_target(target, result)
    }

    /// Checks the outcome of a low-level call to `target`.
    ///
    /// An empty successful result from an address without code is an
    /// error, since the call did not reach any contract.
    ///
    /// # Arguments
    ///
    /// * `target` - The address of the called contract.
    /// * `result` - The result of the call.
    ///
    /// # Errors
    ///
    /// * [`Error::EmptyCode`] - If `target` has no code.
    /// * [`Error::FailedCall`] - If the call reverted without data.
    /// * [`Error::FailedCallWithReason`] - If the call reverted with data.
    pub fn verify_call_result_from_target<T: AsRef<[u8]>>(
        target: Address,
        result: Result<T, call::Error>,
    ) -> Result<T, Error> {
        match result {
            Ok(returndata) => {
                if returndata.as_ref().is_empty() && !target.has_code() {
                    return Err(AddressEmptyCode { target }.into());
                }
                Ok(returndata)
            }
            Err(e) => Err(Self::revert(e)),
        }
    }

    fn revert(error: call::Error) -> Error {
        match &error {
            call::Error::Revert(data) if data.is_empty() => {
                FailedCall {}.into()
            }
            _ => FailedCallWithReason { reason: error.encode().into() }.into(),
        }
    }
}
