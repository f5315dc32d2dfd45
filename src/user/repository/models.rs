#[cfg(test)]
use mockall::automock;
use {
    crate::{
        api::RestError,
        kernel::{
            db::DB,
            entities::UserId,
        },
        user::entities,
    },
    anyhow::anyhow,
    async_trait::async_trait,
    mongodb::bson::doc,
    serde::{
        Deserialize,
        Serialize,
    },
    tracing::instrument,
    uuid::Uuid,
};

pub const USERS_COLLECTION: &str = "users";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserDocument {
    #[serde(rename = "_id")]
    pub id:   String,
    pub name: String,
}

impl UserDocument {
    pub fn into_entity(self) -> anyhow::Result<entities::User> {
        Ok(entities::User {
            id:   Uuid::parse_str(&self.id)
                .map_err(|err| anyhow!("invalid user id {}: {}", self.id, err))?,
            name: self.name,
        })
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Database: Send + Sync + 'static {
    async fn get_user(&self, user_id: UserId) -> Result<Option<entities::User>, RestError>;
}

#[async_trait]
impl Database for DB {
    #[instrument(skip_all, fields(user_id = %user_id))]
    async fn get_user(&self, user_id: UserId) -> Result<Option<entities::User>, RestError> {
        let document = self
            .collection::<UserDocument>(USERS_COLLECTION)
            .find_one(doc! { "_id": user_id.to_string() })
            .await
            .map_err(|err| {
                tracing::error!(error = ?err, "Failed to fetch user");
                RestError::Internal
            })?;
        document
            .map(|document| {
                document.into_entity().map_err(|err| {
                    tracing::error!(error = ?err, "Failed to convert user document");
                    RestError::Internal
                })
            })
            .transpose()
    }
}
