use {
    super::Repository,
    crate::{
        bid::entities,
        kernel::entities::AuctionId,
    },
    std::collections::HashMap,
    tokio::sync::RwLockWriteGuard,
};

impl Repository {
    /// Exclusive access to the pending-highest map.
    ///
    /// Admission holds this guard across its read-validate-record-enqueue
    /// step, so deciding a bid and making it visible are one critical
    /// section: two admissions racing on the same auction serialize here,
    /// and the loser observes the winner's entry instead of a stale read.
    pub async fn lock_pending_highest(
        &self,
    ) -> RwLockWriteGuard<'_, HashMap<AuctionId, entities::Bid>> {
        self.in_memory_store.pending_highest.write().await
    }
}
