use {
    super::Service,
    crate::{
        api::RestError,
        bid::entities,
        kernel::entities::AuctionId,
    },
};

pub struct GetWinningBidInput {
    pub auction_id: AuctionId,
}

impl Service {
    /// The winner of an auction as far as the store knows: the persisted bid
    /// with the greatest amount. Bids still sitting in the batch buffer do
    /// not count until they are flushed.
    #[tracing::instrument(skip_all, fields(auction_id = %input.auction_id))]
    pub async fn get_winning_bid(
        &self,
        input: GetWinningBidInput,
    ) -> Result<Option<entities::Bid>, RestError> {
        self.repo.get_winning_bid(input.auction_id).await
    }
}
