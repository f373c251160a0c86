//! Solidity interface of ERC-20 tokens, used to build calldata for
//! [`stylus_sdk::call::RawCall`].

#![allow(missing_docs)]
#![cfg_attr(coverage_nightly, coverage(off))]

use alloy_sol_types::sol;

sol! {
    /// Interface of the ERC-20 token as defined in EIP-20.
    interface Erc20Abi {
        function totalSupply() external view returns (uint256);
        function balanceOf(address account) external view returns (uint256);
        function transfer(address to, uint256 value) external returns (bool);
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 value) external returns (bool);
        function transferFrom(address from, address to, uint256 value) external returns (bool);
    }
}
