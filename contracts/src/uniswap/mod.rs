//! Bindings for Uniswap contracts.
pub mod v3;
