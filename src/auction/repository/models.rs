#[cfg(test)]
use mockall::automock;
use {
    crate::{
        api::RestError,
        auction::entities,
        kernel::{
            db::DB,
            entities::AuctionId,
        },
    },
    anyhow::anyhow,
    async_trait::async_trait,
    futures::TryStreamExt,
    mongodb::{
        bson::{
            doc,
            Document,
        },
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

pub const AUCTIONS_COLLECTION: &str = "auctions";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuctionDocument {
    #[serde(rename = "_id")]
    pub id:           String,
    pub product_name: String,
    pub category:     String,
    pub description:  String,
    pub condition:    i32,
    pub status:       i32,
    pub created_at:   i64,
    pub expires_at:   i64,
}

impl From<&entities::Auction> for AuctionDocument {
    fn from(auction: &entities::Auction) -> Self {
        Self {
            id:           auction.id.to_string(),
            product_name: auction.product_name.clone(),
            category:     auction.category.clone(),
            description:  auction.description.clone(),
            condition:    auction.condition.into(),
            status:       auction.status.into(),
            created_at:   auction.created_at.unix_timestamp(),
            expires_at:   auction.expires_at.unix_timestamp(),
        }
    }
}

impl AuctionDocument {
    pub fn into_entity(self) -> anyhow::Result<entities::Auction> {
        Ok(entities::Auction {
            id:           Uuid::parse_str(&self.id)
                .map_err(|err| anyhow!("invalid auction id {}: {}", self.id, err))?,
            product_name: self.product_name,
            category:     self.category,
            description:  self.description,
            condition:    entities::ProductCondition::try_from(self.condition)
                .map_err(|_| anyhow!("invalid condition code {}", self.condition))?,
            status:       entities::AuctionStatus::try_from(self.status)
                .map_err(|_| anyhow!("invalid status code {}", self.status))?,
            created_at:   OffsetDateTime::from_unix_timestamp(self.created_at)?,
            expires_at:   OffsetDateTime::from_unix_timestamp(self.expires_at)?,
        })
    }
}

fn filter_document(filter: &entities::AuctionFilter) -> Document {
    let mut document = Document::new();
    if let Some(status) = filter.status {
        document.insert("status", i32::from(status));
    }
    if let Some(category) = &filter.category {
        document.insert("category", category.clone());
    }
    if let Some(product_name) = &filter.product_name {
        document.insert("product_name", product_name.clone());
    }
    document
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Database: Send + Sync + 'static {
    async fn add_auction(&self, auction: &entities::Auction) -> Result<(), RestError>;
    async fn get_auction(
        &self,
        auction_id: AuctionId,
    ) -> Result<Option<entities::Auction>, RestError>;
    async fn get_auctions(
        &self,
        filter: &entities::AuctionFilter,
    ) -> Result<Vec<entities::Auction>, RestError>;
    async fn close_expired_auctions(&self, now: OffsetDateTime) -> anyhow::Result<u64>;
}

#[async_trait]
impl Database for DB {
    #[instrument(skip_all, fields(auction_id = %auction.id))]
    async fn add_auction(&self, auction: &entities::Auction) -> Result<(), RestError> {
        self.collection::<AuctionDocument>(AUCTIONS_COLLECTION)
            .insert_one(AuctionDocument::from(auction))
            .await
            .map_err(|err| {
                tracing::error!(error = ?err, "Failed to insert auction");
                RestError::Internal
            })?;
        Ok(())
    }

    #[instrument(skip_all, fields(auction_id = %auction_id))]
    async fn get_auction(
        &self,
        auction_id: AuctionId,
    ) -> Result<Option<entities::Auction>, RestError> {
        let document = self
            .collection::<AuctionDocument>(AUCTIONS_COLLECTION)
            .find_one(doc! { "_id": auction_id.to_string() })
            .await
            .map_err(|err| {
                tracing::error!(error = ?err, "Failed to fetch auction");
                RestError::Internal
            })?;
        document
            .map(|document| {
                document.into_entity().map_err(|err| {
                    tracing::error!(error = ?err, "Failed to convert auction document");
                    RestError::Internal
                })
            })
            .transpose()
    }

    #[instrument(skip_all)]
    async fn get_auctions(
        &self,
        filter: &entities::AuctionFilter,
    ) -> Result<Vec<entities::Auction>, RestError> {
        let documents: Vec<AuctionDocument> = self
            .collection::<AuctionDocument>(AUCTIONS_COLLECTION)
            .find(filter_document(filter))
            .await
            .map_err(|err| {
                tracing::error!(error = ?err, "Failed to query auctions");
                RestError::Internal
            })?
            .try_collect()
            .await
            .map_err(|err| {
                tracing::error!(error = ?err, "Failed to read auction cursor");
                RestError::Internal
            })?;
        documents
            .into_iter()
            .map(|document| {
                document.into_entity().map_err(|err| {
                    tracing::error!(error = ?err, "Failed to convert auction document");
                    RestError::Internal
                })
            })
            .collect()
    }

    #[instrument(skip_all)]
    async fn close_expired_auctions(&self, now: OffsetDateTime) -> anyhow::Result<u64> {
        let result = self
            .collection::<AuctionDocument>(AUCTIONS_COLLECTION)
            .update_many(
                doc! {
                    "status": i32::from(entities::AuctionStatus::Active),
                    "expires_at": { "$lte": now.unix_timestamp() },
                },
                doc! { "$set": { "status": i32::from(entities::AuctionStatus::Completed) } },
            )
            .await?;
        Ok(result.modified_count)
    }
}

/// Backs the closer sweep: equality lookups on status plus a range scan on
/// the deadline.
pub async fn ensure_indexes(db: &DB) -> anyhow::Result<()> {
    db.collection::<AuctionDocument>(AUCTIONS_COLLECTION)
        .create_index(
            IndexModel::builder()
                .keys(doc! { "status": 1, "expires_at": 1 })
                .build(),
        )
        .await?;
    Ok(())
}
