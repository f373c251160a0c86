//! Common utilities shared by the swap adapter and its proxy plumbing.
pub mod address;
pub mod reentrant_call_handler;
pub mod storage_slot;

pub use reentrant_call_handler::ReentrantCallHandler;
pub use storage_slot::StorageSlot;
