// Copyright (C) 2026 Staffdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::macros::date;
use tracing::{error, info};

use staffdesk_api::{
    ApiError, CreateUserRequest, ListUsersQuery, LoggingNotifier, UpdateUserRequest,
    UserAggregateResponse, UserService, UserSummary, WfhQuery, WfhService,
};
use staffdesk_domain::{AuthContext, UserRecord, WfhRecord};
use staffdesk_persistence::{
    DesignationAreaStore, EmploymentStatusStore, MemoryStore, SkillAssignmentStore, UserStore,
    WfhStore,
};

/// Staffdesk Server - HTTP server for the Staffdesk HR backend
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Seed a demo HR user and sample records on startup
    #[arg(long, default_value_t = false)]
    seed: bool,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// User aggregate operations.
    users: Arc<UserService>,
    /// Work-from-home queries.
    wfh: Arc<WfhService>,
}

/// Actor identification carried by every request.
///
/// Token validation is a fronting proxy's concern; this server trusts the
/// identity fields it is handed.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
struct ActorParams {
    /// The calling user's id.
    actor_id: i64,
    /// Whether the caller holds the HR role.
    #[serde(default)]
    actor_is_hr: bool,
    /// Whether the caller holds the People Operations role.
    #[serde(default)]
    actor_is_people_ops: bool,
}

impl ActorParams {
    const fn to_auth(self) -> AuthContext {
        AuthContext {
            id: self.actor_id,
            is_hr: self.actor_is_hr,
            is_people_ops: self.actor_is_people_ops,
        }
    }
}

/// API request for creating a user.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateUserApiRequest {
    /// Actor identification.
    #[serde(flatten)]
    actor: ActorParams,
    /// The user aggregate to create.
    #[serde(flatten)]
    user: CreateUserRequest,
}

/// API request for updating a user.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct UpdateUserApiRequest {
    /// Actor identification.
    #[serde(flatten)]
    actor: ActorParams,
    /// The changes to apply.
    #[serde(flatten)]
    changes: UpdateUserRequest,
}

/// API request for reassigning a leave issuer.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct LeaveIssuerApiRequest {
    /// Actor identification.
    #[serde(flatten)]
    actor: ActorParams,
    /// The new leave issuer's user id.
    issuer_id: i64,
}

/// API response carrying a count.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CountResponse {
    /// The number of matching records.
    count: u64,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::DuplicateKey { .. } => StatusCode::CONFLICT,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Handler for GET `/users`.
async fn handle_list_users(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<Vec<UserSummary>>, HttpError> {
    let users: Vec<UserSummary> = state.users.fetch(&query).await?;
    Ok(Json(users))
}

/// Handler for GET `/users/count`.
async fn handle_count_users(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<CountResponse>, HttpError> {
    let count: u64 = state.users.count(&query).await?;
    Ok(Json(CountResponse { count }))
}

/// Handler for GET `/users/{id}`.
async fn handle_get_user(
    AxumState(state): AxumState<AppState>,
    Path(id): Path<i64>,
    Query(actor): Query<ActorParams>,
) -> Result<Json<UserAggregateResponse>, HttpError> {
    let response: UserAggregateResponse = state.users.fetch_by_id(&actor.to_auth(), id).await?;
    Ok(Json(response))
}

/// Handler for POST `/users`.
async fn handle_create_user(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<CreateUserApiRequest>,
) -> Result<(StatusCode, Json<UserAggregateResponse>), HttpError> {
    info!(
        actor_id = req.actor.actor_id,
        emp_id = %req.user.emp_id,
        "Handling create_user request"
    );
    let response: UserAggregateResponse = state
        .users
        .create(&req.actor.to_auth(), &req.user)
        .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for PUT `/users/{id}`.
async fn handle_update_user(
    AxumState(state): AxumState<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateUserApiRequest>,
) -> Result<Json<UserAggregateResponse>, HttpError> {
    info!(
        actor_id = req.actor.actor_id,
        user_id = id,
        "Handling update_user request"
    );
    let response: UserAggregateResponse = state
        .users
        .update(&req.actor.to_auth(), id, &req.changes)
        .await?;
    Ok(Json(response))
}

/// Handler for PUT `/users/{id}/leave_issuer`.
async fn handle_update_leave_issuer(
    AxumState(state): AxumState<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<LeaveIssuerApiRequest>,
) -> Result<Json<UserAggregateResponse>, HttpError> {
    info!(
        actor_id = req.actor.actor_id,
        user_id = id,
        issuer_id = req.issuer_id,
        "Handling update_leave_issuer request"
    );
    let response: UserAggregateResponse = state
        .users
        .update_leave_issuer(&req.actor.to_auth(), id, req.issuer_id)
        .await?;
    Ok(Json(response))
}

/// Handler for GET `/wfh`.
async fn handle_list_wfh(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<WfhQuery>,
) -> Result<Json<Vec<WfhRecord>>, HttpError> {
    let records: Vec<WfhRecord> = state.wfh.fetch(&query).await?;
    Ok(Json(records))
}

/// Handler for GET `/wfh/count`.
async fn handle_count_wfh(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<WfhQuery>,
) -> Result<Json<CountResponse>, HttpError> {
    let count: u64 = state.wfh.count(&query).await?;
    Ok(Json(CountResponse { count }))
}

/// Builds the application router with all endpoints.
fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/users", get(handle_list_users))
        .route("/users", post(handle_create_user))
        .route("/users/count", get(handle_count_users))
        .route("/users/{id}", get(handle_get_user))
        .route("/users/{id}", put(handle_update_user))
        .route("/users/{id}/leave_issuer", put(handle_update_leave_issuer))
        .route("/wfh", get(handle_list_wfh))
        .route("/wfh/count", get(handle_count_wfh))
        .with_state(state)
}

fn build_state(store: &Arc<MemoryStore>) -> AppState {
    let users: UserService = UserService::new(
        Arc::clone(store) as Arc<dyn UserStore>,
        Arc::clone(store) as Arc<dyn SkillAssignmentStore>,
        Arc::clone(store) as Arc<dyn DesignationAreaStore>,
        Arc::clone(store) as Arc<dyn EmploymentStatusStore>,
        Arc::new(LoggingNotifier),
    );
    let wfh: WfhService = WfhService::new(Arc::clone(store) as Arc<dyn WfhStore>);
    AppState {
        users: Arc::new(users),
        wfh: Arc::new(wfh),
    }
}

/// Seeds a demo HR user and sample records so the API is usable right away.
async fn seed_demo_data(store: &MemoryStore) {
    let hr_id: i64 = store
        .seed_user(UserRecord {
            id: None,
            emp_id: String::from("HR-1"),
            username: String::from("hr@staffdesk.local"),
            first_name: String::from("Harriet"),
            last_name: String::from("Reyes"),
            email: String::from("hr@staffdesk.local"),
            birthday: None,
            avatar_url: None,
            cv_url: None,
            supervisor_id: None,
            is_hr: true,
            is_people_ops: false,
            is_account_manager: false,
            is_supervisor: true,
        })
        .await;
    let employee_id: i64 = store
        .seed_user(UserRecord {
            id: None,
            emp_id: String::from("E-100"),
            username: String::from("demo@staffdesk.local"),
            first_name: String::from("Demo"),
            last_name: String::from("Employee"),
            email: String::from("demo@staffdesk.local"),
            birthday: None,
            avatar_url: None,
            cv_url: None,
            supervisor_id: Some(hr_id),
            is_hr: false,
            is_people_ops: false,
            is_account_manager: false,
            is_supervisor: false,
        })
        .await;
    store
        .seed_wfh(WfhRecord {
            id: employee_id + 1,
            user_id: employee_id,
            date: date!(2026 - 01 - 05),
            reason: Some(String::from("Furniture delivery")),
        })
        .await;
    info!(hr_id, employee_id, "Seeded demo data");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Staffdesk Server");

    let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());
    if args.seed {
        seed_demo_data(&store).await;
    }

    let app: Router = build_router(build_state(&store));

    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use tower::ServiceExt;

    fn test_router() -> (Arc<MemoryStore>, Router) {
        let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());
        let app: Router = build_router(build_state(&store));
        (store, app)
    }

    fn create_user_body(actor_is_hr: bool, emp_id: &str, username: &str) -> Body {
        let body = serde_json::json!({
            "actor_id": 1,
            "actor_is_hr": actor_is_hr,
            "emp_id": emp_id,
            "username": username,
            "first_name": "Jane",
            "last_name": "Doe",
            "email": username,
            "skills": [{"id": 5}],
        });
        Body::from(body.to_string())
    }

    fn post_users(body: Body) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/users")
            .header("content-type", "application/json")
            .body(body)
            .expect("request")
    }

    #[tokio::test]
    async fn test_create_user_as_hr_succeeds() {
        let (_store, app) = test_router();

        let response = app
            .oneshot(post_users(create_user_body(true, "E-1", "jane@example.com")))
            .await
            .expect("response");

        assert_eq!(response.status(), HttpStatusCode::CREATED);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let value: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(value["user"]["emp_id"], "E-1");
        assert_eq!(value["skills"], serde_json::json!([5]));
    }

    #[tokio::test]
    async fn test_create_user_without_hr_role_is_forbidden() {
        let (store, app) = test_router();

        let response = app
            .oneshot(post_users(create_user_body(
                false,
                "E-1",
                "jane@example.com",
            )))
            .await
            .expect("response");

        assert_eq!(response.status(), HttpStatusCode::FORBIDDEN);
        assert_eq!(store.mutation_count(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_create_is_a_conflict() {
        let (_store, app) = test_router();

        let first = app
            .clone()
            .oneshot(post_users(create_user_body(true, "E-1", "jane@example.com")))
            .await
            .expect("response");
        assert_eq!(first.status(), HttpStatusCode::CREATED);

        let second = app
            .oneshot(post_users(create_user_body(true, "E-1", "other@example.com")))
            .await
            .expect("response");
        assert_eq!(second.status(), HttpStatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_get_unknown_user_is_not_found() {
        let (_store, app) = test_router();

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/users/99?actor_id=1&actor_is_hr=true")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_self_service_role_change_is_forbidden() {
        let (store, app) = test_router();
        let user = UserRecord {
            id: None,
            emp_id: String::from("E-1"),
            username: String::from("jane@example.com"),
            first_name: String::from("Jane"),
            last_name: String::from("Doe"),
            email: String::from("jane@example.com"),
            birthday: None,
            avatar_url: None,
            cv_url: None,
            supervisor_id: None,
            is_hr: false,
            is_people_ops: false,
            is_account_manager: false,
            is_supervisor: false,
        };
        let id: i64 = store.seed_user(user).await;

        let body = serde_json::json!({
            "actor_id": id,
            "is_hr": true,
        });
        let response = app
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri(format!("/users/{id}"))
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), HttpStatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_list_users_returns_summaries() {
        let (store, app) = test_router();
        seed_demo_data(&store).await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/users?q=demo")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), HttpStatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let value: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(value.as_array().map(Vec::len), Some(1));
        assert_eq!(value[0]["username"], "demo@staffdesk.local");
    }

    #[tokio::test]
    async fn test_wfh_count_reflects_seeded_records() {
        let (store, app) = test_router();
        seed_demo_data(&store).await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/wfh/count")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), HttpStatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let value: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(value["count"], 1);
    }
}
