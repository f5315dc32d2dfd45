use {
    super::Repository,
    crate::{
        api::RestError,
        bid::entities,
        kernel::entities::AuctionId,
    },
};

impl Repository {
    /// Max-amount persisted bid for an auction, `None` when no bid has been
    /// flushed yet.
    #[tracing::instrument(skip_all, fields(auction_id = %auction_id))]
    pub async fn get_winning_bid(
        &self,
        auction_id: AuctionId,
    ) -> Result<Option<entities::Bid>, RestError> {
        self.db.get_winning_bid(auction_id).await
    }
}
