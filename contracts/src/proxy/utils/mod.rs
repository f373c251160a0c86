//! Helpers for contracts that run behind a proxy.
pub mod erc1822;
pub mod initializable;
pub mod uups_upgradeable;

pub use initializable::Initializable;
pub use uups_upgradeable::{IUUPSUpgradeable, UUPSUpgradeable};
