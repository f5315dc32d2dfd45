use {
    super::entities,
    crate::kernel::entities::AuctionId,
    std::{
        collections::HashMap,
        sync::Arc,
    },
    tokio::sync::RwLock,
};

mod add_auction;
mod close_expired_auctions;
mod get_auction;
mod get_auctions;
mod get_or_load_deadline;
mod models;

pub use models::*;

/// Process-local deadline memoization, keyed by auction id. Entries are
/// written once on first sighting and never evicted.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    pub deadlines: RwLock<HashMap<AuctionId, entities::AuctionDeadline>>,
}

pub struct Repository {
    pub in_memory_store: InMemoryStore,
    pub db:              Arc<dyn Database>,
}

impl Repository {
    pub fn new(db: Arc<dyn Database>) -> Self {
        Self {
            in_memory_store: InMemoryStore::default(),
            db,
        }
    }
}
