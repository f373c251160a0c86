//! Uniswap V3 `SwapRouter` single-pool exact input swaps.
//!
//! The router is called with a raw call, so its revert data reaches the
//! adapter unchanged. [`RouterRevert`] keeps those bytes and only peeks at
//! them to tell a slippage failure apart from any other failure.
use alloc::{string::String, vec::Vec};

use alloy_primitives::{Address, U256};
use alloy_sol_types::{Revert, SolCall, SolError};
pub use sol::*;
use stylus_sdk::call::RawCall;

use crate::utils::ReentrantCallHandler;

#[cfg_attr(coverage_nightly, coverage(off))]
mod sol {
    #![allow(missing_docs)]

    use alloy_sol_macro::sol;

    sol! {
        /// Parameters of [`ISwapRouter::exactInputSingleCall`].
        #[derive(Debug)]
        struct ExactInputSingleParams {
            /// Token sold.
            address tokenIn;
            /// Token bought.
            address tokenOut;
            /// Fee tier of the pool, in hundredths of a basis point.
            uint24 fee;
            /// Account credited with `tokenOut`.
            address recipient;
            /// Timestamp after which the swap is rejected.
            uint256 deadline;
            /// Exact amount of `tokenIn` sold.
            uint256 amountIn;
            /// Minimum amount of `tokenOut` bought, or the swap reverts.
            uint256 amountOutMinimum;
            /// Price limit of the pool, `0` for none.
            uint160 sqrtPriceLimitX96;
        }

        /// Uniswap V3 `SwapRouter`.
        interface ISwapRouter {
            function exactInputSingle(ExactInputSingleParams calldata params) external payable returns (uint256 amountOut);
        }
    }

    sol! {
        /// The router answered with data that is not a `uint256`.
        ///
        /// * `router` - Address of the router.
        #[derive(Debug)]
        error SwapRouterInvalidResponse(address router);
    }
}

/// Revert reason of the V3 `SwapRouter` when the output of a swap is below
/// `amountOutMinimum`.
pub const SLIPPAGE_REASON: &str = "Too little received";

/// Raw revert data of a failed router call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterRevert {
    /// The bytes the router reverted with.
    pub data: Vec<u8>,
}

impl RouterRevert {
    /// Returns the reason string if the data is an `Error(string)`.
    #[must_use]
    pub fn reason(&self) -> Option<String> {
        Revert::abi_decode(&self.data, true).ok().map(|revert| revert.reason)
    }

    /// Whether the router rejected the swap for its output being below the
    /// requested minimum.
    #[must_use]
    pub fn is_slippage(&self) -> bool {
        self.reason().is_some_and(|reason| reason == SLIPPAGE_REASON)
    }
}

impl From<RouterRevert> for Vec<u8> {
    fn from(value: RouterRevert) -> Self {
        value.data
    }
}

/// A [`SwapRouter`] error.
#[derive(Debug)]
pub enum Error {
    /// The router rejected the swap because of slippage.
    SlippageExceeded(RouterRevert),
    /// The router call failed for another reason.
    CallFailed(RouterRevert),
    /// The router answered with data that is not a `uint256`.
    InvalidResponse(SwapRouterInvalidResponse),
}

impl From<Error> for Vec<u8> {
    fn from(value: Error) -> Self {
        match value {
            Error::SlippageExceeded(revert) | Error::CallFailed(revert) => {
                revert.into()
            }
            Error::InvalidResponse(e) => e.abi_encode(),
        }
    }
}

/// Calls into a Uniswap V3 `SwapRouter`.
pub struct SwapRouter;

impl SwapRouter {
    /// Swaps `params.amountIn` of `params.tokenIn` for as much
    /// `params.tokenOut` as possible in a single pool.
    ///
    /// The caller must have approved the router for `params.amountIn` of
    /// `params.tokenIn`.
    ///
    /// # Arguments
    ///
    /// * `router` - Address of the router.
    /// * `params` - Swap parameters.
    ///
    /// # Errors
    ///
    /// * [`Error::SlippageExceeded`] - If the router reverted with
    ///   [`SLIPPAGE_REASON`].
    /// * [`Error::CallFailed`] - If the router reverted for another reason.
    /// * [`Error::InvalidResponse`] - If the router did not return a
    ///   `uint256`.
    pub fn exact_input_single(
        router: Address,
        params: ExactInputSingleParams,
    ) -> Result<U256, Error> {
        let call = ISwapRouter::exactInputSingleCall { params };

        match RawCall::new()
            .call_with_reentrant_handling(router, &call.abi_encode())
        {
            Ok(data) => Self::decode_amount_out(router, &data),
            Err(data) => Err(Self::classify(RouterRevert { data })),
        }
    }

    fn decode_amount_out(router: Address, data: &[u8]) -> Result<U256, Error> {
        ISwapRouter::exactInputSingleCall::abi_decode_returns(data, true)
            .map(|returns| returns.amountOut)
            .map_err(|_| {
                Error::InvalidResponse(SwapRouterInvalidResponse { router })
            })
    }

    fn classify(revert: RouterRevert) -> Error {
        if revert.is_slippage() {
            Error::SlippageExceeded(revert)
        } else {
            Error::CallFailed(revert)
        }
    }
}
