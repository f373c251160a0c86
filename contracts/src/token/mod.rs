//! Token bindings used by the swap adapter.
pub mod erc20;
pub mod weth;
