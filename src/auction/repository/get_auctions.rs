use {
    super::Repository,
    crate::{
        api::RestError,
        auction::entities,
    },
};

impl Repository {
    #[tracing::instrument(skip_all)]
    pub async fn get_auctions(
        &self,
        filter: &entities::AuctionFilter,
    ) -> Result<Vec<entities::Auction>, RestError> {
        self.db.get_auctions(filter).await
    }
}
