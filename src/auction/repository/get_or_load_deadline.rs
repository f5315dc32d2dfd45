use {
    super::Repository,
    crate::{
        api::RestError,
        auction::entities,
        kernel::entities::AuctionId,
    },
};

impl Repository {
    /// Returns the cached `(status, expires_at)` view for an auction,
    /// reading the store on a cache miss. The store read happens outside the
    /// map lock; concurrent misses for the same key may read the store more
    /// than once and insert the same value.
    ///
    /// `None` means the auction does not exist in the store.
    #[tracing::instrument(skip_all, fields(auction_id = %auction_id))]
    pub async fn get_or_load_deadline(
        &self,
        auction_id: AuctionId,
    ) -> Result<Option<entities::AuctionDeadline>, RestError> {
        if let Some(deadline) = self.in_memory_store.deadlines.read().await.get(&auction_id) {
            return Ok(Some(*deadline));
        }

        let Some(auction) = self.db.get_auction(auction_id).await? else {
            return Ok(None);
        };

        let deadline = auction.deadline();
        self.in_memory_store
            .deadlines
            .write()
            .await
            .insert(auction_id, deadline);
        Ok(Some(deadline))
    }
}
