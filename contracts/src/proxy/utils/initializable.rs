//! One-shot initialization guard for contracts deployed behind a proxy.
//!
//! A proxy never runs the constructor of its implementation, so the
//! implementation exposes an `initialize` function instead. [`Initializable`]
//! makes sure that function succeeds exactly once for the lifetime of the
//! proxy's storage.
//!
//! The flag is checked and raised at the very start of the initializer,
//! before any other state is written.
use alloc::{vec, vec::Vec};

pub use sol::*;
use stylus_sdk::{call::MethodError, evm, prelude::*, storage::StorageBool};

#[cfg_attr(coverage_nightly, coverage(off))]
mod sol {
    use alloy_sol_macro::sol;

    sol! {
        /// Emitted when the contract has been initialized.
        ///
        /// * `version` - `1` for a regular initialization, `type(uint64).max`
        ///   when initializers were disabled.
        #[derive(Debug)]
        #[allow(missing_docs)]
        event Initialized(uint64 version);
    }

    sol! {
        /// The contract was already initialized.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error AlreadyInitialized();
    }
}

/// An [`Initializable`] error.
#[derive(SolidityError, Debug)]
pub enum Error {
    /// The contract was already initialized.
    AlreadyInitialized(AlreadyInitialized),
}

#[cfg_attr(coverage_nightly, coverage(off))]
impl MethodError for Error {
    fn encode(self) -> Vec<u8> {
        self.into()
    }
}

/// Version reported by [`Initialized`] after a regular initialization.
pub const INITIAL_VERSION: u64 = 1;

/// State of an [`Initializable`] contract.
#[storage]
pub struct Initializable {
    /// Whether the contract has been initialized.
    pub(crate) initialized: StorageBool,
}

impl Initializable {
    /// Marks the contract as initialized.
    ///
    /// Must be the first statement of the embedding contract's initializer.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    ///
    /// # Errors
    ///
    /// * [`Error::AlreadyInitialized`] - If the contract was already
    ///   initialized, or initializers were disabled.
    ///
    /// # Events
    ///
    /// * [`Initialized`].
    pub fn initialize(&mut self) -> Result<(), Error> {
        if self.initialized.get() {
            return Err(Error::AlreadyInitialized(AlreadyInitialized {}));
        }

        self.initialized.set(true);
        evm::log(Initialized { version: INITIAL_VERSION });

        Ok(())
    }

    /// Locks the contract so it can never be initialized.
    ///
    /// Called from the constructor of an implementation contract, so nobody
    /// can initialize (and take over) the bare implementation.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    ///
    /// # Events
    ///
    /// * [`Initialized`] - Only if the contract was not locked yet.
    pub fn _disable_initializers(&mut self) {
        if self.initialized.get() {
            return;
        }

        self.initialized.set(true);
        evm::log(Initialized { version: u64::MAX });
    }

    /// Whether the contract has been initialized or locked.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized.get()
    }
}
