#![cfg_attr(not(any(test, feature = "export-abi")), no_main)]
extern crate alloc;

use alloc::{string::String, vec, vec::Vec};

use alloy_primitives::aliases::U24;
use swapper_stylus::{
    access::ownable::{self, IOwnable},
    proxy::utils::{erc1822::IErc1822Proxiable, IUUPSUpgradeable},
    swap::{Error, ISwapAdapter, SwapAdapter},
};
use stylus_sdk::{
    abi::Bytes,
    alloy_primitives::{Address, B256, U256},
    prelude::*,
};

/// Logic contract of the swapper. Lives behind an ERC-1967 proxy.
#[entrypoint]
#[storage]
struct Erc20Swapper {
    adapter: SwapAdapter,
}

#[public]
#[implements(ISwapAdapter<Error = Error>, IOwnable<Error = ownable::Error>, IUUPSUpgradeable, IErc1822Proxiable)]
impl Erc20Swapper {
    #[constructor]
    fn constructor(&mut self) {
        self.adapter.constructor();
    }
}

#[public]
impl ISwapAdapter for Erc20Swapper {
    type Error = Error;

    fn initialize(
        &mut self,
        router: Address,
        wrapped_native: Address,
    ) -> Result<(), Self::Error> {
        self.adapter.initialize(router, wrapped_native)
    }

    #[payable]
    fn swap_native_to_token(
        &mut self,
        token_out: Address,
        min_amount_out: U256,
        pool_fee: U24,
    ) -> Result<U256, Self::Error> {
        self.adapter.swap_native_to_token(token_out, min_amount_out, pool_fee)
    }

    fn swap_router(&self) -> Address {
        self.adapter.swap_router()
    }

    #[selector(name = "WETH")]
    fn weth(&self) -> Address {
        self.adapter.weth()
    }
}

#[public]
impl IOwnable for Erc20Swapper {
    type Error = ownable::Error;

    fn owner(&self) -> Address {
        self.adapter.owner()
    }

    fn transfer_ownership(
        &mut self,
        new_owner: Address,
    ) -> Result<(), Self::Error> {
        self.adapter.transfer_ownership(new_owner)
    }

    fn renounce_ownership(&mut self) -> Result<(), Self::Error> {
        self.adapter.renounce_ownership()
    }
}

#[public]
impl IUUPSUpgradeable for Erc20Swapper {
    #[selector(name = "UPGRADE_INTERFACE_VERSION")]
    fn upgrade_interface_version(&self) -> String {
        self.adapter.upgrade_interface_version()
    }

    #[payable]
    fn upgrade_to_and_call(
        &mut self,
        new_implementation: Address,
        data: Bytes,
    ) -> Result<(), Vec<u8>> {
        self.adapter.upgrade_to_and_call(new_implementation, data)
    }
}

#[public]
impl IErc1822Proxiable for Erc20Swapper {
    #[selector(name = "proxiableUUID")]
    fn proxiable_uuid(&self) -> Result<B256, Vec<u8>> {
        self.adapter.proxiable_uuid()
    }
}
