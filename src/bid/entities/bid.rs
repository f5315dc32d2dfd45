use {
    crate::{
        api::RestError,
        kernel::entities::{
            AuctionId,
            BidId,
            UserId,
        },
    },
    time::OffsetDateTime,
    uuid::Uuid,
};

#[derive(Clone, Debug, PartialEq)]
pub struct Bid {
    pub id:         BidId,
    pub user_id:    UserId,
    pub auction_id: AuctionId,
    pub amount:     f64,
    pub timestamp:  OffsetDateTime,
}

#[derive(Clone, Debug)]
pub struct BidCreate {
    pub user_id:    UserId,
    pub auction_id: AuctionId,
    pub amount:     f64,
}

impl Bid {
    pub fn new(create: BidCreate) -> Result<Self, RestError> {
        if !create.amount.is_finite() || create.amount <= 0.0 {
            return Err(RestError::BadRequest(
                "Amount is not a valid value".to_string(),
            ));
        }
        Ok(Self {
            id:         Uuid::new_v4(),
            user_id:    create.user_id,
            auction_id: create.auction_id,
            amount:     create.amount,
            timestamp:  OffsetDateTime::now_utc(),
        })
    }
}
