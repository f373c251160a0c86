//! Solidity interface of the swap adapter, used to build calldata for the
//! adapter when it sits behind a proxy.

#![allow(missing_docs)]
#![cfg_attr(coverage_nightly, coverage(off))]

use alloy_sol_types::sol;

sol! {
    /// Interface of the swap adapter (ABI version).
    interface SwapAdapterAbi {
        function initialize(address router, address wrappedNative) external;
        function swapNativeToToken(address tokenOut, uint256 minAmountOut, uint24 poolFee) external payable returns (uint256);
        function swapRouter() external view returns (address);
        function WETH() external view returns (address);

        function owner() external view returns (address);
        function transferOwnership(address newOwner) external;
        function renounceOwnership() external;

        function upgradeToAndCall(address newImplementation, bytes calldata data) external payable;
        function proxiableUUID() external view returns (bytes32);
        function UPGRADE_INTERFACE_VERSION() external view returns (string memory);
    }
}
