use {
    super::Service,
    crate::server::{
        EXIT_CHECK_INTERVAL,
        SHOULD_EXIT,
    },
    anyhow::Result,
    std::sync::atomic::Ordering,
};

impl Service {
    /// Background closer: ticks on the configured interval and completes
    /// every auction whose deadline has passed. Tick boundaries are not
    /// aligned to deadlines, so an auction can sit active in the store for
    /// up to one interval past its deadline.
    pub async fn run_auction_closer_loop(&self) -> Result<()> {
        tracing::info!(
            interval = ?self.config.close_check_interval,
            "Starting auction closer..."
        );
        let mut sweep_interval = tokio::time::interval(self.config.close_check_interval);
        let mut exit_check_interval = tokio::time::interval(EXIT_CHECK_INTERVAL);

        while !SHOULD_EXIT.load(Ordering::Acquire) {
            tokio::select! {
                _ = sweep_interval.tick() => {
                    self.conclude_expired_auctions().await;
                }
                _ = exit_check_interval.tick() => {}
            }
        }
        tracing::info!("Shutting down auction closer...");
        Ok(())
    }
}
