//! ABI descriptions of the contract surfaces the backend calls.
//!
//! Fixed, versioned inputs: the crate encodes against these descriptions
//! and never derives ABIs at runtime.

use alloy::sol;

sol! {
    /// The ERC-20 surface used by the wallet backend.
    interface IErc20 {
        function decimals() external view returns (uint8);
        function balanceOf(address holder) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);
        function transfer(address to, uint256 amount) external returns (bool);
        function approve(address spender, uint256 amount) external returns (bool);
    }

    /// A per-user proxy wallet with a single generic execution entry point,
    /// authorized by a signature over the inner call.
    interface ISimpleAccount {
        function execute(address dest, uint256 value, bytes func, bytes signature) external;
    }

    /// Deploys smart accounts bound to a signer / recovery-signer pair and
    /// resolves the address <-> signer-pair mappings.
    interface ISimpleAccountFactory {
        function createAccount(address signer, address recoverySigner) external returns (address);
        function getAddress(address signer, address recoverySigner, uint256 counter) external view returns (address predicted);
        function getUserByContract(address account) external view returns (address signer);
        function getUserBySigner(address signer) external view returns (address user, address recoverySigner, address account);
    }
}
