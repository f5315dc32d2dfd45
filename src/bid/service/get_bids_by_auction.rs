use {
    super::Service,
    crate::{
        api::RestError,
        bid::entities,
        kernel::entities::AuctionId,
    },
};

pub struct GetBidsByAuctionInput {
    pub auction_id: AuctionId,
}

impl Service {
    #[tracing::instrument(skip_all, fields(auction_id = %input.auction_id))]
    pub async fn get_bids_by_auction(
        &self,
        input: GetBidsByAuctionInput,
    ) -> Result<Vec<entities::Bid>, RestError> {
        self.repo.get_bids_by_auction(input.auction_id).await
    }
}
