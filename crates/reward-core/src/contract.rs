//! Binding for the on-chain reward contract.
//!
//! The JSON form of the same interface ships in `abi/RewardOrder.json` for
//! tooling that consumes ABIs directly.

alloy::sol! {
	/// Reward contract owned by the platform wallet.
	///
	/// Deployed with `constructor(address _fado)`, where `_fado` is the reward
	/// token.
	#[derive(Debug, PartialEq, Eq)]
	interface IRewardOrder {
		event OwnershipTransferred(address indexed previousOwner, address indexed newOwner);
		event RewardPlaceOrder(string orderId, string userId, uint256 rewardPerOrder);

		function emergencyWithdrawal(uint256 amount) external;
		function fado() external view returns (address);
		function getTotalRewardOfUser(string _userId) external view returns (uint256);
		function rewardPlaceOrder(address recipient, string _orderId, string _userId, uint256 _rewardOrder) external;
		function totalRewardOfUser(string) external view returns (uint256);
		function transferOwnership(address newOwner) external;
	}
}

/// JSON ABI of the reward contract.
pub const REWARD_ORDER_ABI: &str = include_str!("../abi/RewardOrder.json");
