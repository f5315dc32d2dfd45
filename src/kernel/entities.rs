use uuid::Uuid;

pub type AuctionId = Uuid;
pub type BidId = Uuid;
pub type UserId = Uuid;
