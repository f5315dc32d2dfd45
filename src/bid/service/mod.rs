use {
    super::{
        entities,
        repository::{
            self,
            Repository,
        },
    },
    crate::{
        auction,
        user,
    },
    std::{
        sync::Arc,
        time::Duration,
    },
    tokio::sync::{
        mpsc,
        Mutex,
        RwLock,
    },
};

pub mod get_bids_by_auction;
pub mod get_winning_bid;
pub mod submit_bid;
pub mod workers;

#[derive(Clone, Debug)]
pub struct Config {
    /// Size trigger for the flush worker and the intake channel capacity.
    pub max_batch_size:        usize,
    /// Time trigger for the flush worker.
    pub batch_insert_interval: Duration,
    /// When set, the current highest bidder may raise their own bid.
    pub allow_self_outbid:     bool,
}

pub struct ServiceInner {
    config:          Config,
    repo:            Repository,
    auction_service: auction::service::Service,
    user_service:    user::service::Service,
    bid_sender:      RwLock<Option<mpsc::Sender<entities::Bid>>>,
    bid_receiver:    Mutex<Option<mpsc::Receiver<entities::Bid>>>,
    batch:           Mutex<Vec<entities::Bid>>,
}

#[derive(Clone)]
pub struct Service(Arc<ServiceInner>);

impl std::ops::Deref for Service {
    type Target = ServiceInner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Service {
    pub fn new(
        db: Arc<dyn repository::Database>,
        config: Config,
        auction_service: auction::service::Service,
        user_service: user::service::Service,
    ) -> Self {
        let (bid_sender, bid_receiver) = mpsc::channel(config.max_batch_size.max(1));
        Self(Arc::new(ServiceInner {
            repo: Repository::new(db),
            config,
            auction_service,
            user_service,
            bid_sender: RwLock::new(Some(bid_sender)),
            bid_receiver: Mutex::new(Some(bid_receiver)),
            batch: Mutex::new(Vec::new()),
        }))
    }

    /// Closes the bid intake channel. Called exactly once at shutdown, after
    /// all producers have stopped; the flush worker then drains the channel,
    /// persists the remainder and exits.
    pub async fn close_intake(&self) {
        self.bid_sender.write().await.take();
    }
}
