//! Uniswap V3 periphery bindings.
//!
//! Only the single-pool exact input swap of the V3 `SwapRouter` is bound.
//! Pools are addressed by the token pair and their fee tier, expressed in
//! hundredths of a basis point (`500` is 0.05%).
pub mod router;

pub use router::{ExactInputSingleParams, ISwapRouter, RouterRevert, SwapRouter};
