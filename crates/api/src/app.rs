use std::sync::Arc;
use std::time::Duration;

use async_graphql::{ObjectType, Schema, SubscriptionType};
use async_graphql_axum::{GraphQLProtocol, GraphQLWebSocket};
use axum::{
    extract::{Request, State, WebSocketUpgrade},
    http::{
        header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE},
        Method, StatusCode,
    },
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::GovernorLayer;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::auth::Claims;
use crate::error::AppError;
use crate::middleware::jwt::jwt_middleware;
use crate::routes::auth;
use crate::state::AppState;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_GRAPHQL_BODY_BYTES: usize = 2 * 1024 * 1024;
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:3001";

/// Login attempts per client address: a burst of 10, refilled one every 6 s.
const LOGIN_REFILL_SECONDS: u64 = 6;
const LOGIN_BURST: u32 = 10;

/// Routes: `/health`, rate-limited `/auth/login`, and `/graphql` (POST for
/// queries and mutations, GET upgrades to the subscription websocket).
pub fn build_router<Q, M, S>(state: AppState, schema: Schema<Q, M, S>) -> anyhow::Result<Router>
where
    Q: ObjectType + Send + Sync + 'static,
    M: ObjectType + Send + Sync + 'static,
    S: SubscriptionType + Send + Sync + 'static,
{
    let login_limit = GovernorConfigBuilder::default()
        .per_second(LOGIN_REFILL_SECONDS)
        .burst_size(LOGIN_BURST)
        .finish()
        .ok_or_else(|| anyhow::anyhow!("invalid login rate limit configuration"))?;

    let login = Router::new()
        .route("/auth/login", post(auth::login))
        .layer(GovernorLayer::new(Arc::new(login_limit)));

    let graphql = {
        let http_schema = schema.clone();
        post(move |state, req| graphql_handler(state, req, http_schema)).get(
            move |state, protocol, upgrade| graphql_ws_handler(state, protocol, upgrade, schema),
        )
    };

    let router = Router::new()
        .route("/health", get(health))
        .merge(login)
        .route("/graphql", graphql)
        .with_state(state.clone())
        .layer(middleware::from_fn_with_state(state, jwt_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            REQUEST_TIMEOUT,
        ))
        .layer(cors_layer());

    Ok(router)
}

/// CORS for the admin and RSVP frontends listed in `ALLOWED_ORIGINS`.
fn cors_layer() -> CorsLayer {
    let allowed =
        std::env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string());
    let origins: Vec<HeaderValue> = allowed
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
}

/// Runs one GraphQL request with `AppState` and, for admins, their `Claims`
/// (placed in the request extensions by `jwt_middleware`).
async fn graphql_handler<Q, M, S>(
    State(state): State<AppState>,
    req: Request,
    schema: Schema<Q, M, S>,
) -> Result<Response, AppError>
where
    Q: ObjectType + Send + Sync + 'static,
    M: ObjectType + Send + Sync + 'static,
    S: SubscriptionType + Send + Sync + 'static,
{
    let claims = req.extensions().get::<Claims>().cloned();

    let body = axum::body::to_bytes(req.into_body(), MAX_GRAPHQL_BODY_BYTES)
        .await
        .map_err(|e| AppError::BadRequest(format!("Unreadable request body: {e}")))?;
    let request: async_graphql::Request = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Invalid GraphQL request: {e}")))?;

    let mut request = request.data(state);
    if let Some(claims) = claims {
        request = request.data(claims);
    }

    Ok(Json(schema.execute(request).await).into_response())
}

/// `connection_init` payloads carry the token as
/// `{ "headers": { "Authorization": "Bearer <token>" } }`.
fn bearer_from_init(payload: &Value) -> Option<&str> {
    payload
        .get("headers")?
        .get("Authorization")?
        .as_str()?
        .strip_prefix("Bearer ")
}

/// Subscription websocket. A token in `connection_init` must verify; without
/// one the connection is anonymous and `seatingChanges` refuses it.
async fn graphql_ws_handler<Q, M, S>(
    State(state): State<AppState>,
    protocol: GraphQLProtocol,
    upgrade: WebSocketUpgrade,
    schema: Schema<Q, M, S>,
) -> Response
where
    Q: ObjectType + Send + Sync + 'static,
    M: ObjectType + Send + Sync + 'static,
    S: SubscriptionType + Send + Sync + 'static,
{
    let jwt = state.jwt_service().clone();

    upgrade
        .protocols(["graphql-transport-ws", "graphql-ws"])
        .on_upgrade(move |stream| {
            GraphQLWebSocket::new(stream, schema, protocol)
                .on_connection_init(move |payload: Value| async move {
                    let mut data = async_graphql::Data::default();
                    if let Some(token) = bearer_from_init(&payload) {
                        let claims = jwt.verify_token(token).map_err(|_| {
                            async_graphql::Error::new("Invalid or expired token")
                        })?;
                        data.insert(claims);
                    }
                    Ok::<_, async_graphql::Error>(data)
                })
                .serve()
        })
}

async fn health(State(state): State<AppState>) -> Result<&'static str, AppError> {
    let _one: i32 = sqlx::query_scalar("SELECT 1").fetch_one(&state.db).await?;
    Ok("ok")
}
