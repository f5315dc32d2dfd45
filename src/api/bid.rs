use {
    crate::{
        api::{
            ErrorBodyResponse,
            RestError,
        },
        bid::{
            entities,
            service::{
                get_bids_by_auction::GetBidsByAuctionInput,
                submit_bid::SubmitBidInput,
            },
        },
        kernel::entities::AuctionId,
        state::ServerState,
    },
    axum::{
        extract::{
            Path,
            State,
        },
        http::StatusCode,
        Json,
    },
    serde::{
        Deserialize,
        Serialize,
    },
    std::sync::Arc,
    time::OffsetDateTime,
    utoipa::ToSchema,
    uuid::Uuid,
};

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct SubmitBidBody {
    /// The id of the bidding user.
    #[schema(example = "0e2a9a6e-9a3b-4c86-8a0c-271bfe4be825")]
    pub user_id:    String,
    /// The id of the auction to bid on.
    #[schema(example = "f47ac10b-58cc-4372-a567-0e02b2c3d479")]
    pub auction_id: String,
    /// Offered amount, must beat the current highest bid.
    #[schema(example = 42.5)]
    pub amount:     f64,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct BidResponse {
    /// The unique id created to identify the bid.
    #[schema(example = "b9f18c2d-3f40-4b6a-9e27-16b8c2f7d8a1", value_type = String)]
    pub id:         Uuid,
    #[schema(value_type = String)]
    pub user_id:    Uuid,
    #[schema(value_type = String)]
    pub auction_id: Uuid,
    pub amount:     f64,
    #[schema(value_type = String)]
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp:  OffsetDateTime,
}

impl From<entities::Bid> for BidResponse {
    fn from(bid: entities::Bid) -> Self {
        Self {
            id:         bid.id,
            user_id:    bid.user_id,
            auction_id: bid.auction_id,
            amount:     bid.amount,
            timestamp:  bid.timestamp,
        }
    }
}

/// Place a bid on an auction.
///
/// The bid is validated against the effective highest bid (persisted or
/// still pending) and, once accepted, queued for batched persistence.
#[utoipa::path(post, path = "/bid", request_body = SubmitBidBody, responses(
    (status = 201, description = "Bid was accepted", body = BidResponse),
    (status = 400, response = ErrorBodyResponse),
    (status = 404, description = "Auction or user was not found", body = ErrorBodyResponse),
),)]
pub async fn submit_bid(
    State(state): State<Arc<ServerState>>,
    Json(body): Json<SubmitBidBody>,
) -> Result<(StatusCode, Json<BidResponse>), RestError> {
    let user_id = Uuid::parse_str(&body.user_id)
        .map_err(|_| RestError::BadRequest("Invalid user id".to_string()))?;
    let auction_id = Uuid::parse_str(&body.auction_id)
        .map_err(|_| RestError::BadRequest("Invalid auction id".to_string()))?;

    let bid = state
        .bid_service
        .submit_bid(SubmitBidInput {
            bid_create: entities::BidCreate {
                user_id,
                auction_id,
                amount: body.amount,
            },
        })
        .await?;
    Ok((StatusCode::CREATED, Json(bid.into())))
}

/// List every bid placed on an auction.
#[utoipa::path(get, path = "/bid/{auction_id}",
    params(("auction_id" = String, Path, description = "The id of the auction")),
    responses(
        (status = 200, description = "All persisted bids for the auction", body = Vec<BidResponse>),
    ),
)]
pub async fn get_bids_by_auction(
    State(state): State<Arc<ServerState>>,
    Path(auction_id): Path<AuctionId>,
) -> Result<Json<Vec<BidResponse>>, RestError> {
    let bids = state
        .bid_service
        .get_bids_by_auction(GetBidsByAuctionInput { auction_id })
        .await?;
    Ok(Json(bids.into_iter().map(Into::into).collect()))
}
