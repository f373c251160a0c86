//! Upgradeable adapter swapping native currency for ERC-20 tokens.
//!
//! A swap runs in a single call:
//!
//! 1. The attached value is wrapped into the wrapped native token.
//! 2. The router is approved for exactly that amount.
//! 3. The router swaps it in the pool selected by the fee tier, crediting
//!    the adapter.
//! 4. The adapter forwards what the swap produced to the caller.
//!
//! The router enforces `min_amount_out` itself. Its revert data is handed
//! back to the caller unchanged, so a slippage failure still reads
//! `Error("Too little received")`.
//!
//! Only the balance delta of the output token is forwarded. Tokens the
//! adapter held before the call stay where they are.
//!
//! The adapter is deployed behind an [`Erc1967Proxy`] and upgraded with
//! [`IUUPSUpgradeable::upgrade_to_and_call`], which only the owner set at
//! initialization may call.
//!
//! [`Erc1967Proxy`]: crate::proxy::erc1967::Erc1967Proxy
use alloc::{string::String, vec, vec::Vec};

use alloy_primitives::{
    aliases::{U160, U24},
    Address, B256, U256,
};
use alloy_sol_types::SolError;
pub use sol::*;
use stylus_sdk::{
    abi::Bytes, block, contract, evm, msg, prelude::*,
    storage::StorageAddress,
};

use crate::{
    access::ownable::{
        self, IOwnable, Ownable, OwnableInvalidOwner,
        OwnableUnauthorizedAccount,
    },
    proxy::utils::{
        erc1822::IErc1822Proxiable,
        initializable::{self, AlreadyInitialized, Initializable},
        uups_upgradeable::{
            IUUPSUpgradeable, UUPSUpgradeable, UPGRADE_INTERFACE_VERSION,
        },
    },
    token::{
        erc20::utils::safe_erc20::{
            self, ISafeErc20, SafeErc20, SafeErc20FailedOperation,
        },
        weth::Weth,
    },
    uniswap::v3::router::{
        self, ExactInputSingleParams, RouterRevert, SwapRouter,
        SwapRouterInvalidResponse,
    },
};

#[cfg_attr(coverage_nightly, coverage(off))]
mod sol {
    use alloy_sol_macro::sol;

    sol! {
        /// Emitted when `caller` swapped `amount_in` of native currency for
        /// `amount_out` of `token_out`.
        ///
        /// * `caller` - Account that sent the value and got the tokens.
        /// * `token_out` - Token bought.
        /// * `amount_in` - Native currency sold.
        /// * `amount_out` - Tokens forwarded to `caller`.
        #[derive(Debug)]
        #[allow(missing_docs)]
        event SwapExecuted(
            address indexed caller,
            address indexed token_out,
            uint256 amount_in,
            uint256 amount_out
        );
    }

    sol! {
        /// The adapter has no router or wrapped native token yet.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error SwapAdapterNotInitialized();

        /// A swap was requested without attaching any value.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error SwapAdapterZeroInput();

        /// The router address is invalid (e.g. the zero address).
        ///
        /// * `router` - The rejected router.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error SwapAdapterInvalidRouter(address router);

        /// The wrapped native token address is invalid (e.g. the zero
        /// address).
        ///
        /// * `wrapped_native` - The rejected token.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error SwapAdapterInvalidWrappedNative(address wrapped_native);

        /// The swap produced less than the requested minimum.
        ///
        /// * `received` - Tokens the adapter actually received.
        /// * `minimum` - Tokens requested at least.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error SwapAdapterInsufficientOutput(uint256 received, uint256 minimum);
    }
}

/// A [`SwapAdapter`] error.
///
/// Router failures keep the router's revert data, which is returned to the
/// caller as is.
#[derive(Debug)]
pub enum Error {
    /// The adapter was already initialized.
    AlreadyInitialized(AlreadyInitialized),
    /// The adapter has no router or wrapped native token yet.
    NotInitialized(SwapAdapterNotInitialized),
    /// A swap was requested without attaching any value.
    ZeroInput(SwapAdapterZeroInput),
    /// The router address is invalid.
    InvalidRouter(SwapAdapterInvalidRouter),
    /// The wrapped native token address is invalid.
    InvalidWrappedNative(SwapAdapterInvalidWrappedNative),
    /// The swap produced less than the requested minimum.
    InsufficientOutput(SwapAdapterInsufficientOutput),
    /// The router rejected the swap because of slippage.
    SlippageExceeded(RouterRevert),
    /// The router call failed for another reason.
    RouterCallFailed(RouterRevert),
    /// The router answered with data that is not a `uint256`.
    InvalidRouterResponse(SwapRouterInvalidResponse),
    /// Wrapping, approving, reading or forwarding a token failed.
    SafeErc20FailedOperation(SafeErc20FailedOperation),
    /// The caller is not the owner.
    UnauthorizedAccount(OwnableUnauthorizedAccount),
    /// The owner is not a valid owner account.
    InvalidOwner(OwnableInvalidOwner),
}

impl From<Error> for Vec<u8> {
    fn from(value: Error) -> Self {
        match value {
            Error::AlreadyInitialized(e) => e.abi_encode(),
            Error::NotInitialized(e) => e.abi_encode(),
            Error::ZeroInput(e) => e.abi_encode(),
            Error::InvalidRouter(e) => e.abi_encode(),
            Error::InvalidWrappedNative(e) => e.abi_encode(),
            Error::InsufficientOutput(e) => e.abi_encode(),
            Error::SlippageExceeded(revert)
            | Error::RouterCallFailed(revert) => revert.into(),
            Error::InvalidRouterResponse(e) => e.abi_encode(),
            Error::SafeErc20FailedOperation(e) => e.abi_encode(),
            Error::UnauthorizedAccount(e) => e.abi_encode(),
            Error::InvalidOwner(e) => e.abi_encode(),
        }
    }
}

impl From<initializable::Error> for Error {
    fn from(e: initializable::Error) -> Self {
        match e {
            initializable::Error::AlreadyInitialized(e) => {
                Error::AlreadyInitialized(e)
            }
        }
    }
}

impl From<ownable::Error> for Error {
    fn from(e: ownable::Error) -> Self {
        match e {
            ownable::Error::UnauthorizedAccount(e) => {
                Error::UnauthorizedAccount(e)
            }
            ownable::Error::InvalidOwner(e) => Error::InvalidOwner(e),
        }
    }
}

impl From<safe_erc20::Error> for Error {
    fn from(e: safe_erc20::Error) -> Self {
        match e {
            safe_erc20::Error::SafeErc20FailedOperation(e) => {
                Error::SafeErc20FailedOperation(e)
            }
        }
    }
}

impl From<router::Error> for Error {
    fn from(e: router::Error) -> Self {
        match e {
            router::Error::SlippageExceeded(revert) => {
                Error::SlippageExceeded(revert)
            }
            router::Error::CallFailed(revert) => Error::RouterCallFailed(revert),
            router::Error::InvalidResponse(e) => Error::InvalidRouterResponse(e),
        }
    }
}

/// State of a [`SwapAdapter`] contract.
///
/// New fields may only be appended, since the layout lives on in the
/// storage of the proxy across upgrades.
#[storage]
pub struct SwapAdapter {
    /// Guards [`ISwapAdapter::initialize`].
    pub(crate) initializable: Initializable,
    /// Account allowed to upgrade the adapter.
    pub(crate) ownable: Ownable,
    /// UUPS upgrade logic.
    pub(crate) uups: UUPSUpgradeable,
    /// Uniswap V3 `SwapRouter`.
    pub(crate) router: StorageAddress,
    /// Wrapped native token.
    pub(crate) wrapped_native: StorageAddress,
    /// Token calls tolerating missing return values.
    pub(crate) safe_erc20: SafeErc20,
}

/// NOTE: Implementation of [`TopLevelStorage`] to be able use `&mut self` when
/// calling other contracts and not `&mut (impl TopLevelStorage +
/// BorrowMut<Self>)`. Should be fixed in the future by the Stylus team.
unsafe impl TopLevelStorage for SwapAdapter {}

/// Interface of a [`SwapAdapter`].
pub trait ISwapAdapter {
    /// The error type associated to the trait implementation.
    type Error: Into<Vec<u8>>;

    /// Sets the router and the wrapped native token, and makes the caller
    /// the owner. Succeeds at most once for the lifetime of the storage it
    /// runs against.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `router` - Uniswap V3 `SwapRouter`.
    /// * `wrapped_native` - Wrapped native token.
    ///
    /// # Errors
    ///
    /// * [`Error::AlreadyInitialized`] - If called more than once.
    /// * [`Error::InvalidRouter`] - If `router` is [`Address::ZERO`].
    /// * [`Error::InvalidWrappedNative`] - If `wrapped_native` is
    ///   [`Address::ZERO`].
    ///
    /// # Events
    ///
    /// * [`initializable::Initialized`].
    /// * [`ownable::OwnershipTransferred`].
    fn initialize(
        &mut self,
        router: Address,
        wrapped_native: Address,
    ) -> Result<(), Self::Error>;

    /// Swaps the attached native currency for `token_out` in the pool with
    /// fee tier `pool_fee`, and sends the tokens bought to the caller.
    ///
    /// Returns the amount of `token_out` sent to the caller.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `token_out` - Token to buy.
    /// * `min_amount_out` - Minimum amount of `token_out` to receive.
    /// * `pool_fee` - Fee tier of the pool, in hundredths of a basis point.
    ///
    /// # Errors
    ///
    /// * [`Error::NotInitialized`] - If the adapter was not initialized.
    /// * [`Error::ZeroInput`] - If no value was attached.
    /// * [`Error::SlippageExceeded`] - If the router could not produce
    ///   `min_amount_out`. Carries the router's revert data.
    /// * [`Error::RouterCallFailed`] - If the router failed otherwise.
    ///   Carries the router's revert data.
    /// * [`Error::InvalidRouterResponse`] - If the router returned malformed
    ///   data.
    /// * [`Error::InsufficientOutput`] - If fewer than `min_amount_out`
    ///   tokens actually arrived.
    /// * [`Error::SafeErc20FailedOperation`] - If wrapping, approving,
    ///   reading the balance or forwarding the tokens failed.
    ///
    /// # Events
    ///
    /// * [`SwapExecuted`].
    fn swap_native_to_token(
        &mut self,
        token_out: Address,
        min_amount_out: U256,
        pool_fee: U24,
    ) -> Result<U256, Self::Error>;

    /// Returns the router, or [`Address::ZERO`] before initialization.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    fn swap_router(&self) -> Address;

    /// Returns the wrapped native token, or [`Address::ZERO`] before
    /// initialization.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    fn weth(&self) -> Address;
}

#[public]
#[implements(ISwapAdapter<Error = Error>, IOwnable<Error = ownable::Error>, IUUPSUpgradeable, IErc1822Proxiable)]
impl SwapAdapter {
    /// Marks this deployment as the logic contract and locks its own
    /// storage against initialization.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    #[constructor]
    pub fn constructor(&mut self) {
        self.uups.constructor();
        self.initializable._disable_initializers();
    }
}

#[public]
impl ISwapAdapter for SwapAdapter {
    type Error = Error;

    fn initialize(
        &mut self,
        router: Address,
        wrapped_native: Address,
    ) -> Result<(), Self::Error> {
        if self.initializable.is_initialized() {
            return Err(Error::AlreadyInitialized(AlreadyInitialized {}));
        }
        if router.is_zero() {
            return Err(Error::InvalidRouter(SwapAdapterInvalidRouter {
                router,
            }));
        }
        if wrapped_native.is_zero() {
            return Err(Error::InvalidWrappedNative(
                SwapAdapterInvalidWrappedNative { wrapped_native },
            ));
        }

        self.initializable.initialize()?;
        self.router.set(router);
        self.wrapped_native.set(wrapped_native);
        self.ownable.initialize(msg::sender())?;

        Ok(())
    }

    #[payable]
    fn swap_native_to_token(
        &mut self,
        token_out: Address,
        min_amount_out: U256,
        pool_fee: U24,
    ) -> Result<U256, Self::Error> {
        let (router, wrapped_native) = self.configuration()?;

        let amount_in = msg::value();
        if amount_in.is_zero() {
            return Err(Error::ZeroInput(SwapAdapterZeroInput {}));
        }

        Weth::deposit(wrapped_native, amount_in)?;
        self.safe_erc20.force_approve(wrapped_native, router, amount_in)?;

        let this = contract::address();
        let balance_before = SafeErc20::balance_of(token_out, this)?;

        SwapRouter::exact_input_single(
            router,
            ExactInputSingleParams {
                tokenIn: wrapped_native,
                tokenOut: token_out,
                fee: pool_fee,
                recipient: this,
                deadline: U256::from(block::timestamp()),
                amountIn: amount_in,
                amountOutMinimum: min_amount_out,
                sqrtPriceLimitX96: U160::ZERO,
            },
        )?;

        let balance_after = SafeErc20::balance_of(token_out, this)?;
        let amount_out = balance_after.saturating_sub(balance_before);
        if amount_out < min_amount_out {
            return Err(Error::InsufficientOutput(
                SwapAdapterInsufficientOutput {
                    received: amount_out,
                    minimum: min_amount_out,
                },
            ));
        }

        let caller = msg::sender();
        self.safe_erc20.safe_transfer(token_out, caller, amount_out)?;

        evm::log(SwapExecuted { caller, token_out, amount_in, amount_out });

        Ok(amount_out)
    }

    fn swap_router(&self) -> Address {
        self.router.get()
    }

    #[selector(name = "WETH")]
    fn weth(&self) -> Address {
        self.wrapped_native.get()
    }
}

#[public]
impl IOwnable for SwapAdapter {
    type Error = ownable::Error;

    fn owner(&self) -> Address {
        self.ownable.owner()
    }

    fn transfer_ownership(
        &mut self,
        new_owner: Address,
    ) -> Result<(), Self::Error> {
        self.ownable.transfer_ownership(new_owner)
    }

    fn renounce_ownership(&mut self) -> Result<(), Self::Error> {
        self.ownable.renounce_ownership()
    }
}

#[public]
impl IUUPSUpgradeable for SwapAdapter {
    #[selector(name = "UPGRADE_INTERFACE_VERSION")]
    fn upgrade_interface_version(&self) -> String {
        UPGRADE_INTERFACE_VERSION.into()
    }

    #[payable]
    fn upgrade_to_and_call(
        &mut self,
        new_implementation: Address,
        data: Bytes,
    ) -> Result<(), Vec<u8>> {
        self.uups.only_proxy()?;
        self._authorize_upgrade()?;
        UUPSUpgradeable::_upgrade_to_and_call_uups(
            self,
            new_implementation,
            &data,
        )?;
        Ok(())
    }
}

#[public]
impl IErc1822Proxiable for SwapAdapter {
    #[selector(name = "proxiableUUID")]
    fn proxiable_uuid(&self) -> Result<B256, Vec<u8>> {
        Ok(self.uups.proxiable_uuid()?)
    }
}

impl SwapAdapter {
    /// Checks that [`msg::sender`] may upgrade the adapter.
    ///
    /// # Errors
    ///
    /// * [`ownable::Error::UnauthorizedAccount`] - If the caller is not the
    ///   owner.
    fn _authorize_upgrade(&self) -> Result<(), ownable::Error> {
        self.ownable.only_owner()
    }

    /// Returns the router and the wrapped native token.
    ///
    /// # Errors
    ///
    /// * [`Error::NotInitialized`] - If either is unset.
    fn configuration(&self) -> Result<(Address, Address), Error> {
        let router = self.router.get();
        let wrapped_native = self.wrapped_native.get();
        if router.is_zero() || wrapped_native.is_zero() {
            return Err(Error::NotInitialized(SwapAdapterNotInitialized {}));
        }
        Ok((router, wrapped_native))
    }
}
