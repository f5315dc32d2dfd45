#[cfg(test)]
use mockall::automock;
use {
    crate::{
        api::RestError,
        bid::entities,
        kernel::{
            db::DB,
            entities::AuctionId,
        },
    },
    anyhow::anyhow,
    async_trait::async_trait,
    futures::TryStreamExt,
    mongodb::{
        bson::doc,
        IndexModel,
    },
    serde::{
        Deserialize,
        Serialize,
    },
    time::OffsetDateTime,
    tracing::instrument,
    uuid::Uuid,
};

pub const BIDS_COLLECTION: &str = "bids";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BidDocument {
    #[serde(rename = "_id")]
    pub id:         String,
    pub user_id:    String,
    pub auction_id: String,
    pub amount:     f64,
    pub timestamp:  i64,
}

impl From<&entities::Bid> for BidDocument {
    fn from(bid: &entities::Bid) -> Self {
        Self {
            id:         bid.id.to_string(),
            user_id:    bid.user_id.to_string(),
            auction_id: bid.auction_id.to_string(),
            amount:     bid.amount,
            timestamp:  bid.timestamp.unix_timestamp(),
        }
    }
}

impl BidDocument {
    pub fn into_entity(self) -> anyhow::Result<entities::Bid> {
        Ok(entities::Bid {
            id:         Uuid::parse_str(&self.id)
                .map_err(|err| anyhow!("invalid bid id {}: {}", self.id, err))?,
            user_id:    Uuid::parse_str(&self.user_id)
                .map_err(|err| anyhow!("invalid user id {}: {}", self.user_id, err))?,
            auction_id: Uuid::parse_str(&self.auction_id)
                .map_err(|err| anyhow!("invalid auction id {}: {}", self.auction_id, err))?,
            amount:     self.amount,
            timestamp:  OffsetDateTime::from_unix_timestamp(self.timestamp)?,
        })
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Database: Send + Sync + 'static {
    async fn add_bids(&self, bids: &[entities::Bid]) -> anyhow::Result<()>;
    async fn get_bids_by_auction(
        &self,
        auction_id: AuctionId,
    ) -> Result<Vec<entities::Bid>, RestError>;
    async fn get_winning_bid(
        &self,
        auction_id: AuctionId,
    ) -> Result<Option<entities::Bid>, RestError>;
}

#[async_trait]
impl Database for DB {
    #[instrument(skip_all, fields(count = bids.len()))]
    async fn add_bids(&self, bids: &[entities::Bid]) -> anyhow::Result<()> {
        if bids.is_empty() {
            return Ok(());
        }
        self.collection::<BidDocument>(BIDS_COLLECTION)
            .insert_many(bids.iter().map(BidDocument::from).collect::<Vec<_>>())
            .await?;
        Ok(())
    }

    #[instrument(skip_all, fields(auction_id = %auction_id))]
    async fn get_bids_by_auction(
        &self,
        auction_id: AuctionId,
    ) -> Result<Vec<entities::Bid>, RestError> {
        let documents: Vec<BidDocument> = self
            .collection::<BidDocument>(BIDS_COLLECTION)
            .find(doc! { "auction_id": auction_id.to_string() })
            .sort(doc! { "timestamp": 1 })
            .await
            .map_err(|err| {
                tracing::error!(error = ?err, "Failed to query bids");
                RestError::Internal
            })?
            .try_collect()
            .await
            .map_err(|err| {
                tracing::error!(error = ?err, "Failed to read bid cursor");
                RestError::Internal
            })?;
        documents
            .into_iter()
            .map(|document| {
                document.into_entity().map_err(|err| {
                    tracing::error!(error = ?err, "Failed to convert bid document");
                    RestError::Internal
                })
            })
            .collect()
    }

    #[instrument(skip_all, fields(auction_id = %auction_id))]
    async fn get_winning_bid(
        &self,
        auction_id: AuctionId,
    ) -> Result<Option<entities::Bid>, RestError> {
        let document = self
            .collection::<BidDocument>(BIDS_COLLECTION)
            .find_one(doc! { "auction_id": auction_id.to_string() })
            .sort(doc! { "amount": -1, "timestamp": 1 })
            .await
            .map_err(|err| {
                tracing::error!(error = ?err, "Failed to fetch winning bid");
                RestError::Internal
            })?;
        document
            .map(|document| {
                document.into_entity().map_err(|err| {
                    tracing::error!(error = ?err, "Failed to convert bid document");
                    RestError::Internal
                })
            })
            .transpose()
    }
}

/// Backs the winner lookup: amount descending within an auction, timestamp
/// breaking ties deterministically.
pub async fn ensure_indexes(db: &DB) -> anyhow::Result<()> {
    db.collection::<BidDocument>(BIDS_COLLECTION)
        .create_index(
            IndexModel::builder()
                .keys(doc! { "auction_id": 1, "amount": -1 })
                .build(),
        )
        .await?;
    Ok(())
}
