use {
    super::Service,
    crate::{
        api::RestError,
        kernel::entities::AuctionId,
    },
    time::OffsetDateTime,
};

impl Service {
    /// Deadline check used by the bid-write path right before persistence.
    /// Admission works on a point-in-time snapshot; the deadline may elapse
    /// while the bid sits in the batch buffer, so the writer re-checks
    /// against the deadline cache and refuses late bids.
    ///
    /// An auction id the store no longer knows resolves to closed.
    #[tracing::instrument(skip_all, fields(auction_id = %auction_id))]
    pub async fn is_auction_open(&self, auction_id: AuctionId) -> Result<bool, RestError> {
        match self.repo.get_or_load_deadline(auction_id).await? {
            Some(deadline) => Ok(deadline.is_open(OffsetDateTime::now_utc())),
            None => {
                tracing::warn!(auction_id = %auction_id, "Deadline check for unknown auction");
                Ok(false)
            }
        }
    }
}
