use {
    super::Service,
    crate::{
        api::RestError,
        kernel::entities::UserId,
        user::entities,
    },
};

pub struct GetUserByIdInput {
    pub user_id: UserId,
}

impl Service {
    #[tracing::instrument(skip_all, fields(user_id = %input.user_id))]
    pub async fn get_user_by_id(&self, input: GetUserByIdInput) -> Result<entities::User, RestError> {
        self.repo
            .get_user(input.user_id)
            .await?
            .ok_or_else(|| RestError::NotFound("User not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use {
        super::{
            GetUserByIdInput,
            Service,
        },
        crate::{
            api::RestError,
            user::{
                entities,
                repository::MockDatabase,
            },
        },
        std::sync::Arc,
        uuid::Uuid,
    };

    #[tokio::test]
    async fn known_users_are_returned() {
        let mut db = MockDatabase::new();
        db.expect_get_user().returning(|user_id| {
            Ok(Some(entities::User {
                id:   user_id,
                name: "bidder".to_string(),
            }))
        });

        let user_id = Uuid::new_v4();
        let user = Service::new(Arc::new(db))
            .get_user_by_id(GetUserByIdInput { user_id })
            .await
            .unwrap();
        assert_eq!(user.id, user_id);
    }

    #[tokio::test]
    async fn missing_users_map_to_not_found() {
        let mut db = MockDatabase::new();
        db.expect_get_user().returning(|_| Ok(None));

        let result = Service::new(Arc::new(db))
            .get_user_by_id(GetUserByIdInput {
                user_id: Uuid::new_v4(),
            })
            .await;
        assert!(matches!(
            result,
            Err(RestError::NotFound(message)) if message == "User not found"
        ));
    }
}
