use {
    super::Repository,
    crate::{
        bid::entities,
        kernel::entities::AuctionId,
    },
};

impl Repository {
    pub async fn get_pending_highest_bid(&self, auction_id: AuctionId) -> Option<entities::Bid> {
        self.in_memory_store
            .pending_highest
            .read()
            .await
            .get(&auction_id)
            .cloned()
    }
}
