use {
    super::Service,
    crate::server::{
        EXIT_CHECK_INTERVAL,
        SHOULD_EXIT,
    },
    anyhow::{
        anyhow,
        Result,
    },
    std::sync::atomic::Ordering,
};

impl Service {
    /// Single consumer of the bid intake channel.
    ///
    /// Received bids accumulate in the batch buffer; the buffer is flushed
    /// when it reaches `max_batch_size` (which also rearms the timer) and
    /// when the timer fires. When the intake closes or shutdown is
    /// requested, the remainder is drained and flushed before the task
    /// exits.
    pub async fn run_bid_flush_loop(&self) -> Result<()> {
        tracing::info!(
            max_batch_size = self.config.max_batch_size,
            interval = ?self.config.batch_insert_interval,
            "Starting bid writer..."
        );
        let mut receiver = self
            .bid_receiver
            .lock()
            .await
            .take()
            .ok_or_else(|| anyhow!("Bid intake receiver is already taken"))?;

        let mut flush_interval = tokio::time::interval(self.config.batch_insert_interval);
        // The first tick of an interval completes immediately; consume it so
        // the timer measures a full period from startup.
        flush_interval.tick().await;
        let mut exit_check_interval = tokio::time::interval(EXIT_CHECK_INTERVAL);

        while !SHOULD_EXIT.load(Ordering::Acquire) {
            tokio::select! {
                received = receiver.recv() => match received {
                    Some(bid) => {
                        let size_triggered = {
                            let mut batch = self.batch.lock().await;
                            batch.push(bid);
                            batch.len() >= self.config.max_batch_size
                        };
                        if size_triggered {
                            self.flush_batch().await;
                            flush_interval.reset();
                        }
                    }
                    None => {
                        self.flush_batch().await;
                        tracing::info!("Bid intake closed, shutting down bid writer...");
                        return Ok(());
                    }
                },
                _ = flush_interval.tick() => {
                    self.flush_batch().await;
                }
                _ = exit_check_interval.tick() => {}
            }
        }

        while let Ok(bid) = receiver.try_recv() {
            self.batch.lock().await.push(bid);
        }
        self.flush_batch().await;
        tracing::info!("Shutting down bid writer...");
        Ok(())
    }

    /// Persists the buffered batch. Every bid is checked against the auction
    /// deadline one last time: admission worked on a snapshot, and the
    /// deadline may have elapsed while the bid sat in the buffer. Late bids
    /// are dropped without a user-visible signal (the acceptance has already
    /// been acknowledged), as are bids whose deadline cannot be verified.
    /// Store failures are logged and swallowed.
    async fn flush_batch(&self) {
        let batch = std::mem::take(&mut *self.batch.lock().await);
        if batch.is_empty() {
            return;
        }

        let mut writable = Vec::with_capacity(batch.len());
        for bid in batch {
            match self.auction_service.is_auction_open(bid.auction_id).await {
                Ok(true) => writable.push(bid),
                Ok(false) => {
                    tracing::warn!(
                        bid_id = %bid.id,
                        auction_id = %bid.auction_id,
                        amount = bid.amount,
                        "Dropping bid for a closed auction"
                    );
                }
                Err(err) => {
                    tracing::error!(
                        error = ?err,
                        bid_id = %bid.id,
                        auction_id = %bid.auction_id,
                        "Deadline check failed, dropping bid"
                    );
                }
            }
        }
        if writable.is_empty() {
            return;
        }

        if let Err(err) = self.repo.add_bids(&writable).await {
            tracing::error!(
                error = ?err,
                count = writable.len(),
                "Failed to persist bid batch"
            );
        }
    }
}
