use {
    crate::{
        api::{
            ErrorBodyResponse,
            RestError,
        },
        kernel::entities::UserId,
        state::ServerState,
        user::{
            entities,
            service::get_user_by_id::GetUserByIdInput,
        },
    },
    axum::{
        extract::{
            Path,
            State,
        },
        Json,
    },
    serde::{
        Deserialize,
        Serialize,
    },
    std::sync::Arc,
    utoipa::ToSchema,
    uuid::Uuid,
};

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct UserResponse {
    #[schema(example = "0e2a9a6e-9a3b-4c86-8a0c-271bfe4be825", value_type = String)]
    pub id:   Uuid,
    pub name: String,
}

impl From<entities::User> for UserResponse {
    fn from(user: entities::User) -> Self {
        Self {
            id:   user.id,
            name: user.name,
        }
    }
}

/// Fetch a user by id.
#[utoipa::path(get, path = "/user/{user_id}",
    params(("user_id" = String, Path, description = "The id of the user")),
    responses(
        (status = 200, description = "The user", body = UserResponse),
        (status = 404, response = ErrorBodyResponse),
    ),
)]
pub async fn get_user_by_id(
    State(state): State<Arc<ServerState>>,
    Path(user_id): Path<UserId>,
) -> Result<Json<UserResponse>, RestError> {
    let user = state
        .user_service
        .get_user_by_id(GetUserByIdInput { user_id })
        .await?;
    Ok(Json(user.into()))
}
