/*!
# Swapper for Stylus

An upgradeable adapter for
[Arbitrum Stylus](https://docs.arbitrum.io/stylus/stylus-gentle-introduction)
that exchanges native currency for any ERC-20 token in a single
transaction, using a Uniswap V3 `SwapRouter` as the execution venue.

The adapter is meant to live behind an [ERC-1967] proxy and is upgraded
through the UUPS mechanism. Upgrades are gated by the adapter's owner.

## Usage

Embed [`swap::SwapAdapter`] into your entrypoint and forward its
interfaces:

```ignore
use swapper_stylus::swap::{Error, ISwapAdapter, SwapAdapter};

#[entrypoint]
#[storage]
struct MySwapper {
    adapter: SwapAdapter,
}

#[public]
#[implements(ISwapAdapter<Error = Error>)]
impl MySwapper { }
```

[ERC-1967]: https://eips.ethereum.org/EIPS/eip-1967
*/

#![allow(
    clippy::module_name_repetitions,
    clippy::used_underscore_items,
    clippy::pub_underscore_fields
)]
#![cfg_attr(not(any(test, feature = "std")), no_std, no_main)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![deny(rustdoc::broken_intra_doc_links)]
extern crate alloc;

pub mod access;
pub mod proxy;
pub mod swap;
pub mod token;
pub mod uniswap;
pub mod utils;

#[cfg(test)]
pub(crate) mod mock;
