use {
    crate::{
        config::RunOptions,
        server::{
            EXIT_CHECK_INTERVAL,
            SHOULD_EXIT,
        },
        state::ServerState,
    },
    anyhow::Result,
    axum::{
        http::StatusCode,
        response::{
            IntoResponse,
            Response,
        },
        routing::{
            get,
            post,
        },
        Json,
        Router,
    },
    clap::crate_version,
    serde::{
        Deserialize,
        Serialize,
    },
    std::sync::{
        atomic::Ordering,
        Arc,
    },
    tower_http::cors::CorsLayer,
    utoipa::{
        OpenApi,
        ToResponse,
        ToSchema,
    },
};

pub mod auction;
pub mod bid;
pub mod user;

#[derive(ToResponse, ToSchema, Clone, Debug)]
#[response(description = "An error occurred processing the request")]
pub enum RestError {
    /// The request contained invalid parameters or broke an auction rule.
    BadRequest(String),
    /// The requested resource does not exist.
    NotFound(String),
    /// The store failed while processing the request.
    Internal,
}

#[derive(ToResponse, ToSchema, Serialize, Deserialize, Clone, Debug)]
#[response(description = "The body of an error response")]
pub struct ErrorBodyResponse {
    pub error: String,
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            RestError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            RestError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            RestError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unknown error occurred processing the request".to_string(),
            ),
        };
        (status, Json(ErrorBodyResponse { error })).into_response()
    }
}

async fn root() -> String {
    format!("Auction House Server API {}", crate_version!())
}

pub async fn start_api(run_options: RunOptions, state: Arc<ServerState>) -> Result<()> {
    #[derive(OpenApi)]
    #[openapi(
    paths(
    auction::create_auction,
    auction::get_auctions,
    auction::get_auction_by_id,
    auction::get_auction_winner,
    bid::submit_bid,
    bid::get_bids_by_auction,
    user::get_user_by_id,
    ),
    components(
        schemas(
            auction::CreateAuctionBody,
            auction::AuctionResponse,
            auction::AuctionWinnerResponse,
            bid::SubmitBidBody,
            bid::BidResponse,
            user::UserResponse,
        ),
        responses(ErrorBodyResponse)
    ),
    tags(
    (name = "Auction House", description = "Online auction back end")
    )
    )]
    struct ApiDoc;

    let app: Router<()> = Router::new()
        .route("/", get(root))
        .route("/docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .route(
            "/auction",
            post(auction::create_auction).get(auction::get_auctions),
        )
        .route("/auction/winner/:auction_id", get(auction::get_auction_winner))
        .route("/auction/:auction_id", get(auction::get_auction_by_id))
        .route("/bid", post(bid::submit_bid))
        .route("/bid/:auction_id", get(bid::get_bids_by_auction))
        .route("/user/:user_id", get(user::get_user_by_id))
        .layer(CorsLayer::permissive())
        .with_state(state);

    tracing::info!(listen_addr = %run_options.server.listen_addr, "Starting API server...");
    let listener = tokio::net::TcpListener::bind(&run_options.server.listen_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            while !SHOULD_EXIT.load(Ordering::Acquire) {
                tokio::time::sleep(EXIT_CHECK_INTERVAL).await;
            }
            tracing::info!("Shutting down API server...");
        })
        .await?;
    Ok(())
}
