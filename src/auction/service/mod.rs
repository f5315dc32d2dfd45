use {
    super::repository::{
        self,
        Repository,
    },
    std::{
        sync::Arc,
        time::Duration,
    },
};

pub mod add_auction;
pub mod conclude_expired_auctions;
pub mod get_auction_by_id;
pub mod get_auctions;
pub mod is_auction_open;
pub mod workers;

#[derive(Clone, Debug)]
pub struct Config {
    /// Duration added to the creation instant to obtain the deadline.
    pub auction_interval:     Duration,
    /// Period of the closer sweep.
    pub close_check_interval: Duration,
}

pub struct ServiceInner {
    config: Config,
    repo:   Repository,
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
    pub fn new(db: Arc<dyn repository::Database>, config: Config) -> Self {
        Self(Arc::new(ServiceInner {
            repo: Repository::new(db),
            config,
        }))
    }
}
