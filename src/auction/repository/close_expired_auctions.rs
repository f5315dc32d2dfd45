use {
    super::Repository,
    time::OffsetDateTime,
};

impl Repository {
    /// Flips every active auction whose deadline has passed (inclusive) to
    /// completed. Returns how many documents were modified.
    #[tracing::instrument(skip_all)]
    pub async fn close_expired_auctions(&self, now: OffsetDateTime) -> anyhow::Result<u64> {
        self.db.close_expired_auctions(now).await
    }
}
