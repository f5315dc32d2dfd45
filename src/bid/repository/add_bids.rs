use {
    super::Repository,
    crate::bid::entities,
};

impl Repository {
    /// Persists one admitted batch. Per-auction order is preserved because
    /// the single flush worker writes batches in intake order.
    #[tracing::instrument(skip_all, fields(count = bids.len()))]
    pub async fn add_bids(&self, bids: &[entities::Bid]) -> anyhow::Result<()> {
        self.db.add_bids(bids).await
    }
}
