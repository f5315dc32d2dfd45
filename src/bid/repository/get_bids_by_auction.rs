use {
    super::Repository,
    crate::{
        api::RestError,
        bid::entities,
        kernel::entities::AuctionId,
    },
};

impl Repository {
    #[tracing::instrument(skip_all, fields(auction_id = %auction_id))]
    pub async fn get_bids_by_auction(
        &self,
        auction_id: AuctionId,
    ) -> Result<Vec<entities::Bid>, RestError> {
        self.db.get_bids_by_auction(auction_id).await
    }
}
