//! Access control for upgrade authorization.
pub mod ownable;

pub use ownable::{Error as OwnableError, IOwnable, Ownable};
