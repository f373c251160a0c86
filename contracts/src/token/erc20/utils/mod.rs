//! Utilities for the ERC-20 standard.
pub mod safe_erc20;

pub use safe_erc20::{ISafeErc20, SafeErc20};
