use {
    super::Service,
    crate::{
        api::RestError,
        auction::{
            entities::AuctionStatus,
            service::get_auction_by_id::GetAuctionByIdInput,
        },
        bid::entities,
        user::service::get_user_by_id::GetUserByIdInput,
    },
};

pub struct SubmitBidInput {
    pub bid_create: entities::BidCreate,
}

impl Service {
    /// Admits a bid and hands it to the flush worker.
    ///
    /// The admission checks run against the *effective* highest bid, the
    /// greater of the persisted winner and the pending-highest entry, so
    /// accepted-but-unflushed bids count. Any failure aborts with no side
    /// effect. Reading the pending entry, validating against it, recording
    /// the bid and enqueueing it all happen under the pending-highest write
    /// lock: admissions racing on the same auction serialize there, a
    /// beaten bid can never reach the channel after the bid that beat it,
    /// and per-auction channel order matches admission order. A full
    /// channel blocks the caller, lock held, until the worker catches up.
    #[tracing::instrument(skip_all, fields(
        auction_id = %input.bid_create.auction_id,
        user_id = %input.bid_create.user_id,
        amount = input.bid_create.amount,
    ))]
    pub async fn submit_bid(&self, input: SubmitBidInput) -> Result<entities::Bid, RestError> {
        let bid = entities::Bid::new(input.bid_create)?;

        let auction = self
            .auction_service
            .get_auction_by_id(GetAuctionByIdInput {
                auction_id: bid.auction_id,
            })
            .await?;
        if auction.status == AuctionStatus::Completed {
            return Err(RestError::BadRequest(
                "Auction is no longer active".to_string(),
            ));
        }

        self.user_service
            .get_user_by_id(GetUserByIdInput {
                user_id: bid.user_id,
            })
            .await?;

        let persisted_highest = self.repo.get_winning_bid(bid.auction_id).await?;

        let sender = self
            .bid_sender
            .read()
            .await
            .clone()
            .ok_or(RestError::Internal)?;

        // One critical section from here to the send: the pending entry is
        // read, validated against, overwritten and the bid enqueued under
        // the same exclusive lock, so a racing admission for this auction
        // observes the accepted bid instead of a stale snapshot.
        let mut pending_bids = self.repo.lock_pending_highest().await;
        let pending_highest = pending_bids.get(&bid.auction_id).cloned();

        // Pending shadows persisted only when strictly greater.
        let effective_highest = match (persisted_highest, pending_highest) {
            (Some(persisted), Some(pending)) => Some(if pending.amount > persisted.amount {
                pending
            } else {
                persisted
            }),
            (Some(persisted), None) => Some(persisted),
            (None, Some(pending)) => Some(pending),
            (None, None) => None,
        };

        if let Some(highest) = effective_highest {
            if highest.user_id == bid.user_id && !self.config.allow_self_outbid {
                return Err(RestError::BadRequest(
                    "You are already the highest bidder".to_string(),
                ));
            }
            if bid.amount <= highest.amount {
                return Err(RestError::BadRequest(
                    "Bid must be higher than current highest bid".to_string(),
                ));
            }
        }

        // The cache update must complete before the send: a concurrent
        // admission for this auction has to observe the accepted bid.
        pending_bids.insert(bid.auction_id, bid.clone());

        // Still under the lock, so sends hit the channel in the same order
        // as the cache updates.
        sender.send(bid.clone()).await.map_err(|_| {
            tracing::error!(bid_id = %bid.id, "Bid intake channel closed");
            RestError::Internal
        })?;
        drop(pending_bids);

        Ok(bid)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::{
            Service,
            SubmitBidInput,
        },
        crate::{
            auction,
            bid::{
                entities,
                repository::MockDatabase,
                service::Config,
            },
            user,
        },
        std::{
            sync::Arc,
            time::Duration,
        },
        uuid::Uuid,
    };

    fn auction_entity() -> auction::entities::Auction {
        auction::entities::Auction::new(
            auction::entities::AuctionCreate {
                product_name: "Turntable".to_string(),
                category:     "audio".to_string(),
                description:  "A belt drive turntable in good shape".to_string(),
                condition:    auction::entities::ProductCondition::Used,
            },
            Duration::from_secs(3600),
        )
        .unwrap()
    }

    fn service_over(
        auction: Option<auction::entities::Auction>,
        persisted_highest: Option<entities::Bid>,
        user_exists: bool,
        allow_self_outbid: bool,
        max_batch_size: usize,
    ) -> Service {
        let mut auction_db = auction::repository::MockDatabase::new();
        auction_db
            .expect_get_auction()
            .returning(move |_| Ok(auction.clone()));
        let auction_service = auction::service::Service::new(
            Arc::new(auction_db),
            auction::service::Config {
                auction_interval:     Duration::from_secs(3600),
                close_check_interval: Duration::from_secs(10),
            },
        );

        let mut user_db = user::repository::MockDatabase::new();
        user_db.expect_get_user().returning(move |user_id| {
            Ok(user_exists.then(|| user::entities::User {
                id:   user_id,
                name: "bidder".to_string(),
            }))
        });
        let user_service = user::service::Service::new(Arc::new(user_db));

        let mut bid_db = MockDatabase::new();
        bid_db
            .expect_get_winning_bid()
            .returning(move |_| Ok(persisted_highest.clone()));

        Service::new(
            Arc::new(bid_db),
            Config {
                max_batch_size,
                batch_insert_interval: Duration::from_secs(600),
                allow_self_outbid,
            },
            auction_service,
            user_service,
        )
    }

    fn input(user_id: Uuid, auction_id: Uuid, amount: f64) -> SubmitBidInput {
        SubmitBidInput {
            bid_create: entities::BidCreate {
                user_id,
                auction_id,
                amount,
            },
        }
    }

    #[tokio::test]
    async fn first_bid_is_accepted_and_becomes_pending_highest() {
        let auction = auction_entity();
        let auction_id = auction.id;
        let service = service_over(Some(auction), None, true, false, 5);
        let bidder = Uuid::new_v4();

        let accepted = service
            .submit_bid(input(bidder, auction_id, 10.0))
            .await
            .unwrap();
        assert_eq!(accepted.amount, 10.0);

        let pending = service
            .repo
            .get_pending_highest_bid(auction_id)
            .await
            .unwrap();
        assert_eq!(pending.id, accepted.id);

        let mut receiver = service.bid_receiver.lock().await.take().unwrap();
        assert_eq!(receiver.recv().await.unwrap().id, accepted.id);
    }

    #[tokio::test]
    async fn highest_bidder_cannot_outbid_themselves_by_default() {
        let auction = auction_entity();
        let auction_id = auction.id;
        let service = service_over(Some(auction), None, true, false, 5);
        let bidder = Uuid::new_v4();

        service
            .submit_bid(input(bidder, auction_id, 10.0))
            .await
            .unwrap();
        let rejected = service
            .submit_bid(input(bidder, auction_id, 20.0))
            .await
            .unwrap_err();
        assert!(matches!(
            rejected,
            crate::api::RestError::BadRequest(message)
                if message == "You are already the highest bidder"
        ));

        // The pending entry is untouched by the rejection.
        assert_eq!(
            service
                .repo
                .get_pending_highest_bid(auction_id)
                .await
                .unwrap()
                .amount,
            10.0
        );
    }

    #[tokio::test]
    async fn highest_bidder_can_raise_when_self_outbid_is_allowed() {
        let auction = auction_entity();
        let auction_id = auction.id;
        let service = service_over(Some(auction), None, true, true, 5);
        let bidder = Uuid::new_v4();

        service
            .submit_bid(input(bidder, auction_id, 10.0))
            .await
            .unwrap();
        service
            .submit_bid(input(bidder, auction_id, 20.0))
            .await
            .unwrap();
        assert_eq!(
            service
                .repo
                .get_pending_highest_bid(auction_id)
                .await
                .unwrap()
                .amount,
            20.0
        );
    }

    #[tokio::test]
    async fn equal_amounts_are_rejected() {
        let auction = auction_entity();
        let auction_id = auction.id;
        let service = service_over(Some(auction), None, true, false, 5);

        service
            .submit_bid(input(Uuid::new_v4(), auction_id, 10.0))
            .await
            .unwrap();
        let rejected = service
            .submit_bid(input(Uuid::new_v4(), auction_id, 10.0))
            .await
            .unwrap_err();
        assert!(matches!(
            rejected,
            crate::api::RestError::BadRequest(message)
                if message == "Bid must be higher than current highest bid"
        ));
    }

    #[tokio::test]
    async fn higher_bid_from_another_user_takes_over() {
        let auction = auction_entity();
        let auction_id = auction.id;
        let service = service_over(Some(auction), None, true, false, 5);
        let second_bidder = Uuid::new_v4();

        service
            .submit_bid(input(Uuid::new_v4(), auction_id, 10.0))
            .await
            .unwrap();
        let accepted = service
            .submit_bid(input(second_bidder, auction_id, 15.0))
            .await
            .unwrap();

        let pending = service
            .repo
            .get_pending_highest_bid(auction_id)
            .await
            .unwrap();
        assert_eq!(pending.id, accepted.id);
        assert_eq!(pending.user_id, second_bidder);
        assert_eq!(pending.amount, 15.0);
    }

    #[tokio::test]
    async fn persisted_highest_counts_against_new_bids() {
        let auction = auction_entity();
        let auction_id = auction.id;
        let persisted = entities::Bid::new(entities::BidCreate {
            user_id:    Uuid::new_v4(),
            auction_id,
            amount:     30.0,
        })
        .unwrap();
        let service = service_over(Some(auction), Some(persisted), true, false, 5);

        let rejected = service
            .submit_bid(input(Uuid::new_v4(), auction_id, 25.0))
            .await
            .unwrap_err();
        assert!(matches!(
            rejected,
            crate::api::RestError::BadRequest(message)
                if message == "Bid must be higher than current highest bid"
        ));
    }

    #[tokio::test]
    async fn unknown_auction_is_not_found() {
        let service = service_over(None, None, true, false, 5);
        let rejected = service
            .submit_bid(input(Uuid::new_v4(), Uuid::new_v4(), 10.0))
            .await
            .unwrap_err();
        assert!(matches!(
            rejected,
            crate::api::RestError::NotFound(message) if message == "Auction not found"
        ));
    }

    #[tokio::test]
    async fn completed_auction_rejects_bids() {
        let mut auction = auction_entity();
        auction.status = auction::entities::AuctionStatus::Completed;
        let auction_id = auction.id;
        let service = service_over(Some(auction), None, true, false, 5);

        let rejected = service
            .submit_bid(input(Uuid::new_v4(), auction_id, 10.0))
            .await
            .unwrap_err();
        assert!(matches!(
            rejected,
            crate::api::RestError::BadRequest(message)
                if message == "Auction is no longer active"
        ));
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let auction = auction_entity();
        let auction_id = auction.id;
        let service = service_over(Some(auction), None, false, false, 5);

        let rejected = service
            .submit_bid(input(Uuid::new_v4(), auction_id, 10.0))
            .await
            .unwrap_err();
        assert!(matches!(
            rejected,
            crate::api::RestError::NotFound(message) if message == "User not found"
        ));
    }

    #[tokio::test]
    async fn accepted_amounts_enter_the_channel_strictly_increasing() {
        let auction = auction_entity();
        let auction_id = auction.id;
        let service = service_over(Some(auction), None, true, false, 5);

        for amount in [1.0, 2.0, 3.0] {
            service
                .submit_bid(input(Uuid::new_v4(), auction_id, amount))
                .await
                .unwrap();
        }
        // A replay of an already-beaten amount never reaches the channel.
        assert!(service
            .submit_bid(input(Uuid::new_v4(), auction_id, 2.5))
            .await
            .is_err());

        let mut receiver = service.bid_receiver.lock().await.take().unwrap();
        let mut last = 0.0;
        for _ in 0..3 {
            let bid = receiver.recv().await.unwrap();
            assert!(bid.amount > last);
            last = bid.amount;
        }
        assert!(receiver.try_recv().is_err());
    }

    #[tokio::test]
    async fn a_full_intake_channel_blocks_the_caller() {
        let auction = auction_entity();
        let auction_id = auction.id;
        // Capacity two, no worker draining the channel.
        let service = service_over(Some(auction), None, true, false, 2);

        service
            .submit_bid(input(Uuid::new_v4(), auction_id, 1.0))
            .await
            .unwrap();
        service
            .submit_bid(input(Uuid::new_v4(), auction_id, 2.0))
            .await
            .unwrap();

        let blocked = tokio::time::timeout(
            Duration::from_millis(100),
            service.submit_bid(input(Uuid::new_v4(), auction_id, 3.0)),
        )
        .await;
        assert!(blocked.is_err(), "third submission should block on the full channel");
    }

    #[tokio::test]
    async fn concurrent_admissions_for_the_same_auction_serialize() {
        let auction = auction_entity();
        let auction_id = auction.id;
        let service = service_over(Some(auction), None, true, false, 5);

        // Two admissions race on an empty auction. Whatever the
        // interleaving, the 10.0 bid wins: either it is admitted first and
        // 5.0 is rejected against it, or 5.0 lands first and 10.0 beats it.
        let (larger, smaller) = tokio::join!(
            service.submit_bid(input(Uuid::new_v4(), auction_id, 10.0)),
            service.submit_bid(input(Uuid::new_v4(), auction_id, 5.0)),
        );
        larger.unwrap();

        let pending = service
            .repo
            .get_pending_highest_bid(auction_id)
            .await
            .unwrap();
        assert_eq!(pending.amount, 10.0);

        // A beaten 5.0 must never trail the 10.0 that beat it onto the
        // channel.
        let mut receiver = service.bid_receiver.lock().await.take().unwrap();
        let mut amounts = Vec::new();
        while let Ok(bid) = receiver.try_recv() {
            amounts.push(bid.amount);
        }
        match smaller {
            Ok(_) => assert_eq!(amounts, vec![5.0, 10.0]),
            Err(_) => assert_eq!(amounts, vec![10.0]),
        }
    }
}
