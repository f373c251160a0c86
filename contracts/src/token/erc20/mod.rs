//! ERC-20 plumbing for tokens the adapter holds only for the duration of a
//! swap.
//!
//! The adapter never implements ERC-20 itself. It talks to the wrapped
//! native token and to arbitrary output tokens through raw calls built
//! from [`abi::Erc20Abi`], and routes every state-changing call through
//! [`utils::SafeErc20`], which tolerates tokens that return no value.
pub mod abi;
pub mod utils;

pub use abi::Erc20Abi;
