use super::Repository;

impl Repository {
    /// Drops every pending-highest entry. Offered for operational cleanup
    /// once a flush has made the store authoritative; no runtime path calls
    /// it on its own.
    pub async fn clear_pending_bids(&self) {
        self.in_memory_store.pending_highest.write().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use {
        super::super::{
            MockDatabase,
            Repository,
        },
        crate::bid::entities,
        std::sync::Arc,
        uuid::Uuid,
    };

    #[tokio::test]
    async fn clearing_empties_the_map() {
        let repo = Repository::new(Arc::new(MockDatabase::new()));
        let auction_id = Uuid::new_v4();
        let bid = entities::Bid::new(entities::BidCreate {
            user_id:    Uuid::new_v4(),
            auction_id,
            amount:     12.0,
        })
        .unwrap();

        repo.lock_pending_highest().await.insert(auction_id, bid);
        assert!(repo.get_pending_highest_bid(auction_id).await.is_some());

        repo.clear_pending_bids().await;
        assert!(repo.get_pending_highest_bid(auction_id).await.is_none());
    }
}
