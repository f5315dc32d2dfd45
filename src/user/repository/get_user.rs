use {
    super::Repository,
    crate::{
        api::RestError,
        kernel::entities::UserId,
        user::entities,
    },
};

impl Repository {
    #[tracing::instrument(skip_all, fields(user_id = %user_id))]
    pub async fn get_user(&self, user_id: UserId) -> Result<Option<entities::User>, RestError> {
        self.db.get_user(user_id).await
    }
}
