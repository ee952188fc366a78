//! Per-owner nonce allocation.
//!
//! Each owner address gets one async slot. Holding the slot's guard is what
//! makes a query, sign and broadcast sequence atomic with respect to other
//! submissions from the same owner in this process. The slot remembers the
//! next nonce after a successful broadcast, so a node that still reports a
//! stale pending count cannot hand the same nonce out twice.

use dashmap::DashMap;
use reward_types::Address;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Shared registry of nonce slots keyed by owner address.
#[derive(Debug, Default)]
pub struct NonceManager {
	slots: DashMap<Address, Arc<Mutex<Option<u64>>>>,
}

impl NonceManager {
	pub fn new() -> Self {
		Self::default()
	}

	/// Waits for exclusive access to the owner's slot.
	pub async fn lock(&self, owner: Address) -> NonceGuard {
		let slot = self
			.slots
			.entry(owner)
			.or_insert_with(|| Arc::new(Mutex::new(None)))
			.value()
			.clone();

		NonceGuard {
			next: slot.lock_owned().await,
		}
	}

	/// Next nonce remembered for `owner`, if any.
	pub async fn cached(&self, owner: Address) -> Option<u64> {
		let slot = self.slots.get(&owner).map(|entry| entry.value().clone())?;
		let next = *slot.lock().await;
		next
	}
}

/// Exclusive hold on one owner's nonce slot.
///
/// Dropping the guard without calling [`commit`](Self::commit) or
/// [`invalidate`](Self::invalidate) leaves the slot unchanged.
#[derive(Debug)]
pub struct NonceGuard {
	next: OwnedMutexGuard<Option<u64>>,
}

impl NonceGuard {
	/// Combines the node's pending count with the remembered next nonce.
	pub fn reconcile(&self, chain_count: u64) -> u64 {
		match *self.next {
			Some(next) => next.max(chain_count),
			None => chain_count,
		}
	}

	/// Records that `used` was broadcast and releases the slot.
	pub fn commit(mut self, used: u64) {
		*self.next = Some(used.saturating_add(1));
	}

	/// Forgets the remembered nonce so the next holder trusts the node again.
	pub fn invalidate(mut self) {
		*self.next = None;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::time::Duration;

	#[tokio::test]
	async fn test_fresh_slot_uses_chain_count() {
		let manager = NonceManager::new();
		let guard = manager.lock(Address::repeat_byte(1)).await;
		assert_eq!(guard.reconcile(7), 7);
	}

	#[tokio::test]
	async fn test_commit_advances_past_stale_count() {
		let manager = NonceManager::new();
		let owner = Address::repeat_byte(1);

		let guard = manager.lock(owner).await;
		let nonce = guard.reconcile(4);
		guard.commit(nonce);

		// node still reports 4
		let guard = manager.lock(owner).await;
		assert_eq!(guard.reconcile(4), 5);
		// node ahead of the cache wins
		assert_eq!(guard.reconcile(9), 9);
	}

	#[tokio::test]
	async fn test_invalidate_resyncs_with_chain() {
		let manager = NonceManager::new();
		let owner = Address::repeat_byte(2);

		manager.lock(owner).await.commit(10);
		assert_eq!(manager.cached(owner).await, Some(11));

		manager.lock(owner).await.invalidate();
		assert_eq!(manager.cached(owner).await, None);
		assert_eq!(manager.lock(owner).await.reconcile(3), 3);
	}

	#[tokio::test]
	async fn test_dropped_guard_keeps_slot() {
		let manager = NonceManager::new();
		let owner = Address::repeat_byte(3);

		manager.lock(owner).await.commit(0);
		drop(manager.lock(owner).await);
		assert_eq!(manager.cached(owner).await, Some(1));
	}

	#[tokio::test]
	async fn test_owners_are_independent() {
		let manager = NonceManager::new();
		let _held = manager.lock(Address::repeat_byte(1)).await;

		// would deadlock if slots were shared
		let other = tokio::time::timeout(
			Duration::from_secs(1),
			manager.lock(Address::repeat_byte(2)),
		)
		.await;
		assert!(other.is_ok());
	}

	#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
	async fn test_concurrent_allocation_is_distinct() {
		let manager = Arc::new(NonceManager::new());
		let owner = Address::repeat_byte(9);

		let mut handles = Vec::new();
		for _ in 0..16 {
			let manager = manager.clone();
			handles.push(tokio::spawn(async move {
				let guard = manager.lock(owner).await;
				// node never catches up
				let nonce = guard.reconcile(100);
				tokio::task::yield_now().await;
				guard.commit(nonce);
				nonce
			}));
		}

		let mut nonces = Vec::new();
		for handle in handles {
			nonces.push(handle.await.unwrap());
		}
		nonces.sort_unstable();

		assert_eq!(nonces, (100..116).collect::<Vec<u64>>());
	}
}
