use {
    super::entities,
    crate::kernel::entities::AuctionId,
    std::{
        collections::HashMap,
        sync::Arc,
    },
    tokio::sync::RwLock,
};

mod add_bids;
mod clear_pending_bids;
mod get_bids_by_auction;
mod get_pending_highest_bid;
mod get_winning_bid;
mod lock_pending_highest;
mod models;

pub use models::*;

/// Highest bid admitted in this process per auction, whether or not it has
/// been flushed yet. Between flushes this map is the authority on "highest
/// bid so far"; the store takes over once the batch lands.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    pub pending_highest: RwLock<HashMap<AuctionId, entities::Bid>>,
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
