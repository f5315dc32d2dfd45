use {
    super::Service,
    time::OffsetDateTime,
};

impl Service {
    /// One closer sweep. Store failures are logged and swallowed so the next
    /// tick still runs; the write-path deadline check keeps late bids out in
    /// the meantime.
    #[tracing::instrument(skip_all)]
    pub async fn conclude_expired_auctions(&self) {
        match self
            .repo
            .close_expired_auctions(OffsetDateTime::now_utc())
            .await
        {
            Ok(0) => {}
            Ok(modified) => {
                tracing::info!(modified, "Closed expired auctions");
            }
            Err(err) => {
                tracing::error!(error = ?err, "Failed to close expired auctions");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        super::Service,
        crate::auction::{
            repository::MockDatabase,
            service::Config,
        },
        anyhow::anyhow,
        std::{
            sync::Arc,
            time::Duration,
        },
    };

    fn service(db: MockDatabase) -> Service {
        Service::new(
            Arc::new(db),
            Config {
                auction_interval:     Duration::from_secs(3600),
                close_check_interval: Duration::from_secs(10),
            },
        )
    }

    #[tokio::test]
    async fn sweep_delegates_to_the_store() {
        let mut db = MockDatabase::new();
        db.expect_close_expired_auctions()
            .times(1)
            .returning(|_| Ok(3));
        service(db).conclude_expired_auctions().await;
    }

    #[tokio::test]
    async fn store_errors_are_swallowed() {
        let mut db = MockDatabase::new();
        db.expect_close_expired_auctions()
            .times(1)
            .returning(|_| Err(anyhow!("store unavailable")));
        // Must not panic or propagate.
        service(db).conclude_expired_auctions().await;
    }
}
