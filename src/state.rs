use crate::{
    auction,
    bid,
    user,
};

/// Everything the API handlers need, wired once at startup.
pub struct ServerState {
    pub auction_service: auction::service::Service,
    pub bid_service:     bid::service::Service,
    pub user_service:    user::service::Service,
}
