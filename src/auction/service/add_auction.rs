use {
    super::Service,
    crate::{
        api::RestError,
        auction::entities,
    },
};

pub struct AddAuctionInput {
    pub create: entities::AuctionCreate,
}

impl Service {
    #[tracing::instrument(skip_all, fields(auction_id))]
    pub async fn add_auction(&self, input: AddAuctionInput) -> Result<entities::Auction, RestError> {
        let auction = entities::Auction::new(input.create, self.config.auction_interval)?;
        tracing::Span::current().record("auction_id", auction.id.to_string());
        self.repo.add_auction(&auction).await?;
        Ok(auction)
    }
}
