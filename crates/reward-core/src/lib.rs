//! Reward submission for the on-chain reward contract.
//!
//! [`RewardSubmitter`] turns a user id, an order id and a token amount into a
//! signed `rewardPlaceOrder` transaction from the contract owner and
//! broadcasts it. [`RewardSubmitterBuilder`] wires one up from a
//! [`reward_config::Config`].

pub mod builder;
pub mod contract;
pub mod error;
pub mod submitter;
pub mod transaction;

pub use builder::{account_factories, BuilderError, RewardSubmitterBuilder};
pub use contract::{IRewardOrder, REWARD_ORDER_ABI};
pub use error::SubmitError;
pub use submitter::{RewardSubmitter, SubmitterSettings};
pub use transaction::{build_transaction, encode_reward_call, signing_payload};
