//! Helper for reading and writing primitive types at fixed storage slots.
//!
//! Upgradeable contracts keep proxy bookkeeping (the ERC-1967
//! implementation address, the UUPS logic flag) at hashed slots so it never
//! collides with the sequential layout of the implementation's own fields.
use alloy_primitives::{Address, B256, U256};
use stylus_sdk::prelude::*;

/// Accessor for values living at an explicit storage slot.
///
/// Values are right-aligned inside the 32-byte word, the same way Solidity
/// packs a single value, so an implementation slot written by a Solidity
/// proxy reads back identically here.
///
/// ```ignore
/// let implementation =
///     StorageSlot::get_address(self, IMPLEMENTATION_SLOT_KEY);
/// ```
pub struct StorageSlot;

impl StorageSlot {
    /// Returns the raw word stored at `slot`.
    ///
    /// # Arguments
    ///
    /// * `context` - Any storage type, used to reach the host VM.
    /// * `slot` - The slot to read from.
    #[must_use]
    pub fn get_word(context: &impl HostAccess, slot: U256) -> B256 {
        context.vm().storage_load_bytes32(slot)
    }

    /// Writes `value` to `slot`.
    ///
    /// The write goes through the host's storage cache, which is flushed
    /// when the call returns, the same way typed storage fields behave.
    ///
    /// # Arguments
    ///
    /// * `context` - Any storage type, used to reach the host VM.
    /// * `slot` - The slot to write to.
    /// * `value` - The new word.
    pub fn set_word(context: &mut impl HostAccess, slot: U256, value: B256) {
        // SAFETY: `&mut` access to the storage rules out outstanding typed
        // references into the cache.
        unsafe { context.vm().storage_cache_bytes32(slot, value) };
    }

    /// Returns the address stored at `slot`.
    #[must_use]
    pub fn get_address(context: &impl HostAccess, slot: U256) -> Address {
        Address::from_word(Self::get_word(context, slot))
    }

    /// Stores `address` at `slot`.
    pub fn set_address(
        context: &mut impl HostAccess,
        slot: U256,
        address: Address,
    ) {
        Self::set_word(context, slot, address.into_word());
    }

    /// Returns the boolean stored at `slot`.
    #[must_use]
    pub fn get_bool(context: &impl HostAccess, slot: U256) -> bool {
        Self::get_word(context, slot)[31] != 0
    }

    /// Stores `value` at `slot`.
    pub fn set_bool(context: &mut impl HostAccess, slot: U256, value: bool) {
        let mut word = B256::ZERO;
        word[31] = u8::from(value);
        Self::set_word(context, slot, word);
    }
}
