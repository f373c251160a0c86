//! Native currency to ERC-20 swaps through a Uniswap V3 router.
//!
//! [`adapter::SwapAdapter`] is the upgradeable logic contract. It is meant
//! to be deployed once, then reached through an
//! [`crate::proxy::erc1967::Erc1967Proxy`] whose constructor runs the
//! encoded [`abi::SwapAdapterAbi::initializeCall`].
pub mod abi;
pub mod adapter;

pub use abi::SwapAdapterAbi;
pub use adapter::{Error, ISwapAdapter, SwapAdapter};
