use {
    crate::{
        api::{
            bid::BidResponse,
            ErrorBodyResponse,
            RestError,
        },
        auction::{
            entities,
            service::{
                add_auction::AddAuctionInput,
                get_auction_by_id::GetAuctionByIdInput,
                get_auctions::GetAuctionsInput,
            },
        },
        bid::service::get_winning_bid::GetWinningBidInput,
        kernel::entities::AuctionId,
        state::ServerState,
    },
    axum::{
        extract::{
            Path,
            Query,
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
    utoipa::{
        IntoParams,
        ToSchema,
    },
    uuid::Uuid,
};

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct CreateAuctionBody {
    /// Name of the product on sale.
    #[schema(example = "iPhone 15")]
    pub product_name: String,
    #[schema(example = "electronics")]
    pub category:     String,
    #[schema(example = "Brand new iPhone 15 Pro Max 256GB")]
    pub description:  String,
    /// Product condition: 1 = new, 2 = used, 3 = refurbished.
    #[schema(example = 1)]
    pub condition:    i32,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct AuctionResponse {
    /// The unique id of the auction.
    #[schema(example = "f47ac10b-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub id:           Uuid,
    pub product_name: String,
    pub category:     String,
    pub description:  String,
    /// Product condition: 1 = new, 2 = used, 3 = refurbished.
    pub condition:    i32,
    /// Auction status: 0 = active, 1 = completed.
    pub status:       i32,
    #[schema(value_type = String)]
    #[serde(with = "time::serde::rfc3339")]
    pub created_at:   OffsetDateTime,
    #[schema(value_type = String)]
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at:   OffsetDateTime,
}

impl From<entities::Auction> for AuctionResponse {
    fn from(auction: entities::Auction) -> Self {
        Self {
            id:           auction.id,
            product_name: auction.product_name,
            category:     auction.category,
            description:  auction.description,
            condition:    auction.condition.into(),
            status:       auction.status.into(),
            created_at:   auction.created_at,
            expires_at:   auction.expires_at,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct AuctionWinnerResponse {
    pub auction:     AuctionResponse,
    /// Highest persisted bid, `null` while the auction has no bids.
    pub winning_bid: Option<BidResponse>,
}

/// Create a new auction.
///
/// The deadline is stamped at creation time from the configured auction
/// interval; once it passes, no further bids are accepted.
#[utoipa::path(post, path = "/auction", request_body = CreateAuctionBody, responses(
    (status = 201, description = "Auction was created successfully", body = AuctionResponse),
    (status = 400, response = ErrorBodyResponse),
),)]
pub async fn create_auction(
    State(state): State<Arc<ServerState>>,
    Json(body): Json<CreateAuctionBody>,
) -> Result<(StatusCode, Json<AuctionResponse>), RestError> {
    let condition = entities::ProductCondition::try_from(body.condition)?;
    let auction = state
        .auction_service
        .add_auction(AddAuctionInput {
            create: entities::AuctionCreate {
                product_name: body.product_name,
                category: body.category,
                description: body.description,
                condition,
            },
        })
        .await?;
    Ok((StatusCode::CREATED, Json(auction.into())))
}

#[derive(Deserialize, IntoParams, Clone, Debug)]
#[into_params(parameter_in = Query)]
pub struct GetAuctionsParams {
    /// Auction status to filter by: 0 = active, 1 = completed.
    pub status:       Option<i32>,
    /// Category to filter by (exact match).
    pub category:     Option<String>,
    /// Product name to filter by (exact match).
    #[serde(rename = "productName")]
    pub product_name: Option<String>,
}

/// List auctions, optionally filtered by status, category and product name.
#[utoipa::path(get, path = "/auction", params(GetAuctionsParams), responses(
    (status = 200, description = "Matching auctions", body = Vec<AuctionResponse>),
    (status = 400, response = ErrorBodyResponse),
),)]
pub async fn get_auctions(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<GetAuctionsParams>,
) -> Result<Json<Vec<AuctionResponse>>, RestError> {
    let status = params
        .status
        .map(entities::AuctionStatus::try_from)
        .transpose()?;
    let auctions = state
        .auction_service
        .get_auctions(GetAuctionsInput {
            filter: entities::AuctionFilter {
                status,
                category: params.category,
                product_name: params.product_name,
            },
        })
        .await?;
    Ok(Json(auctions.into_iter().map(Into::into).collect()))
}

/// Fetch a single auction by id.
#[utoipa::path(get, path = "/auction/{auction_id}",
    params(("auction_id" = String, Path, description = "The id of the auction")),
    responses(
        (status = 200, description = "The auction", body = AuctionResponse),
        (status = 404, response = ErrorBodyResponse),
    ),
)]
pub async fn get_auction_by_id(
    State(state): State<Arc<ServerState>>,
    Path(auction_id): Path<AuctionId>,
) -> Result<Json<AuctionResponse>, RestError> {
    let auction = state
        .auction_service
        .get_auction_by_id(GetAuctionByIdInput { auction_id })
        .await?;
    Ok(Json(auction.into()))
}

/// Fetch an auction together with its winning bid.
///
/// The winning bid is the persisted bid with the greatest amount and is
/// `null` while no bid has been flushed for the auction.
#[utoipa::path(get, path = "/auction/winner/{auction_id}",
    params(("auction_id" = String, Path, description = "The id of the auction")),
    responses(
        (status = 200, description = "The auction and its winning bid", body = AuctionWinnerResponse),
        (status = 404, response = ErrorBodyResponse),
    ),
)]
pub async fn get_auction_winner(
    State(state): State<Arc<ServerState>>,
    Path(auction_id): Path<AuctionId>,
) -> Result<Json<AuctionWinnerResponse>, RestError> {
    let auction = state
        .auction_service
        .get_auction_by_id(GetAuctionByIdInput { auction_id })
        .await?;
    let winning_bid = state
        .bid_service
        .get_winning_bid(GetWinningBidInput { auction_id })
        .await?;
    Ok(Json(AuctionWinnerResponse {
        auction:     auction.into(),
        winning_bid: winning_bid.map(Into::into),
    }))
}
