use {
    crate::{
        api::RestError,
        kernel::entities::AuctionId,
    },
    std::time::Duration,
    time::OffsetDateTime,
    uuid::Uuid,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuctionStatus {
    Active,
    Completed,
}

impl From<AuctionStatus> for i32 {
    fn from(status: AuctionStatus) -> Self {
        match status {
            AuctionStatus::Active => 0,
            AuctionStatus::Completed => 1,
        }
    }
}

impl TryFrom<i32> for AuctionStatus {
    type Error = RestError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(AuctionStatus::Active),
            1 => Ok(AuctionStatus::Completed),
            _ => Err(RestError::BadRequest("invalid auction status".to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProductCondition {
    New,
    Used,
    Refurbished,
}

impl From<ProductCondition> for i32 {
    fn from(condition: ProductCondition) -> Self {
        match condition {
            ProductCondition::New => 1,
            ProductCondition::Used => 2,
            ProductCondition::Refurbished => 3,
        }
    }
}

impl TryFrom<i32> for ProductCondition {
    type Error = RestError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ProductCondition::New),
            2 => Ok(ProductCondition::Used),
            3 => Ok(ProductCondition::Refurbished),
            _ => Err(RestError::BadRequest("invalid auction object".to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Auction {
    pub id:           AuctionId,
    pub product_name: String,
    pub category:     String,
    pub description:  String,
    pub condition:    ProductCondition,
    pub status:       AuctionStatus,
    pub created_at:   OffsetDateTime,
    pub expires_at:   OffsetDateTime,
}

#[derive(Clone, Debug)]
pub struct AuctionCreate {
    pub product_name: String,
    pub category:     String,
    pub description:  String,
    pub condition:    ProductCondition,
}

/// Conjunctive filter for auction listings. Empty fields match everything.
#[derive(Clone, Debug, Default)]
pub struct AuctionFilter {
    pub status:       Option<AuctionStatus>,
    pub category:     Option<String>,
    pub product_name: Option<String>,
}

/// Deadline view of an auction, the value cached per auction id by the
/// bid-write path. Status is captured at first sighting and never refreshed;
/// the expiry check is what keeps late writes out.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AuctionDeadline {
    pub status:     AuctionStatus,
    pub expires_at: OffsetDateTime,
}

impl AuctionDeadline {
    /// A bid may still be written: the auction was active when first seen and
    /// its deadline has not passed. Expiry is strict, at `now == expires_at`
    /// the auction is still live.
    pub fn is_open(&self, now: OffsetDateTime) -> bool {
        self.status == AuctionStatus::Active && now <= self.expires_at
    }
}

impl Auction {
    pub fn new(create: AuctionCreate, interval: Duration) -> Result<Self, RestError> {
        let now = OffsetDateTime::now_utc();
        let auction = Self {
            id: Uuid::new_v4(),
            product_name: create.product_name,
            category: create.category,
            description: create.description,
            condition: create.condition,
            status: AuctionStatus::Active,
            created_at: now,
            expires_at: now + interval,
        };
        auction.validate()?;
        Ok(auction)
    }

    fn validate(&self) -> Result<(), RestError> {
        if self.product_name.len() <= 1 || self.category.len() <= 2 || self.description.len() <= 10
        {
            return Err(RestError::BadRequest("invalid auction object".to_string()));
        }
        Ok(())
    }

    pub fn is_expired(&self) -> bool {
        OffsetDateTime::now_utc() > self.expires_at
    }

    pub fn deadline(&self) -> AuctionDeadline {
        AuctionDeadline {
            status:     self.status,
            expires_at: self.expires_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        super::{
            Auction,
            AuctionCreate,
            AuctionDeadline,
            AuctionStatus,
            ProductCondition,
        },
        std::time::Duration,
        time::OffsetDateTime,
    };

    fn create() -> AuctionCreate {
        AuctionCreate {
            product_name: "Mechanical keyboard".to_string(),
            category:     "electronics".to_string(),
            description:  "A well kept mechanical keyboard".to_string(),
            condition:    ProductCondition::Used,
        }
    }

    #[test]
    fn new_auction_is_active_and_expires_after_the_interval() {
        let auction = Auction::new(create(), Duration::from_secs(300)).unwrap();
        assert_eq!(auction.status, AuctionStatus::Active);
        assert_eq!(auction.expires_at - auction.created_at, time::Duration::seconds(300));
        assert!(!auction.is_expired());
    }

    #[test]
    fn validation_rejects_short_fields() {
        let mut short_name = create();
        short_name.product_name = "x".to_string();
        assert!(Auction::new(short_name, Duration::from_secs(60)).is_err());

        let mut short_category = create();
        short_category.category = "tv".to_string();
        assert!(Auction::new(short_category, Duration::from_secs(60)).is_err());

        let mut short_description = create();
        short_description.description = "too short".to_string();
        assert!(Auction::new(short_description, Duration::from_secs(60)).is_err());
    }

    #[test]
    fn expiry_is_strictly_after_the_deadline() {
        let mut auction = Auction::new(create(), Duration::from_secs(60)).unwrap();
        auction.expires_at = OffsetDateTime::now_utc() - time::Duration::seconds(1);
        assert!(auction.is_expired());

        // Far enough in the future that the clock cannot catch up mid-test.
        auction.expires_at = OffsetDateTime::now_utc() + time::Duration::seconds(60);
        assert!(!auction.is_expired());
    }

    #[test]
    fn deadline_is_open_until_the_instant_of_expiry() {
        let expires_at = OffsetDateTime::now_utc();
        let deadline = AuctionDeadline {
            status: AuctionStatus::Active,
            expires_at,
        };
        assert!(deadline.is_open(expires_at));
        assert!(!deadline.is_open(expires_at + time::Duration::seconds(1)));

        let completed = AuctionDeadline {
            status: AuctionStatus::Completed,
            expires_at: expires_at + time::Duration::hours(1),
        };
        assert!(!completed.is_open(expires_at));
    }

    #[test]
    fn condition_round_trips_through_its_wire_code() {
        for condition in [
            ProductCondition::New,
            ProductCondition::Used,
            ProductCondition::Refurbished,
        ] {
            assert_eq!(ProductCondition::try_from(i32::from(condition)).unwrap(), condition);
        }
        assert!(ProductCondition::try_from(0).is_err());
        assert!(ProductCondition::try_from(4).is_err());
    }
}
