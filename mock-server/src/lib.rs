//! In-memory stand-in for the expense and auth services.
//!
//! Serves the four endpoints the frontend client consumes with the same
//! status codes and JSON bodies the real services answer with. State lives in
//! one `RwLock` and is lost when the process exits.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{info, warn};
use uuid::Uuid;

/// Service-level error codes carried next to the HTTP status.
pub const USERNAME_EXISTS: u32 = 4001;
pub const INVALID_CREDENTIALS: u32 = 4006;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub detail: String,
    pub error_code: u32,
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub user_name: String,
    pub password: String,
    pub mail: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(alias = "user_name")]
    pub account: String,
    pub password: String,
}

#[derive(Clone, Debug)]
struct User {
    password: String,
    mail: String,
}

#[derive(Default)]
pub struct Store {
    users: HashMap<String, User>,
    transactions: Vec<Value>,
    next_id: u64,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route(
            "/expense/transaction",
            get(list_transactions).post(create_transaction),
        )
        .route("/api/login", post(login))
        .route("/api/register", post(register).put(register))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn error(status: StatusCode, detail: &str, error_code: u32) -> Response {
    let body = ErrorBody {
        detail: detail.to_string(),
        error_code,
    };
    (status, Json(body)).into_response()
}

async fn list_transactions(State(db): State<Db>) -> Json<Vec<Value>> {
    let store = db.read().await;
    Json(store.transactions.clone())
}

async fn create_transaction(
    State(db): State<Db>,
    Json(input): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let Value::Object(mut record) = input else {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    };
    let mut store = db.write().await;
    store.next_id += 1;
    let id = store.next_id;
    record.insert("id".to_string(), json!(id));
    store.transactions.push(Value::Object(record));
    info!(id, "transaction created");
    Ok(Json(json!({
        "message": "Transaction created successfully",
        "id": id,
    })))
}

async fn register(State(db): State<Db>, Json(input): Json<RegisterRequest>) -> Response {
    let mut store = db.write().await;
    let taken = store.users.contains_key(&input.user_name)
        || store.users.values().any(|user| user.mail == input.mail);
    if taken {
        warn!(user_name = %input.user_name, "registration rejected, name or mail taken");
        return error(
            StatusCode::BAD_REQUEST,
            "Failed to create user cause of user exist",
            USERNAME_EXISTS,
        );
    }
    store.users.insert(
        input.user_name.clone(),
        User {
            password: input.password,
            mail: input.mail,
        },
    );
    info!(user_name = %input.user_name, "user registered");
    Json(json!({
        "message": "User successfully registered",
        "user_name": input.user_name,
    }))
    .into_response()
}

async fn login(State(db): State<Db>, Json(input): Json<LoginRequest>) -> Response {
    let store = db.read().await;
    let valid = store
        .users
        .get(&input.account)
        .is_some_and(|user| user.password == input.password);
    if !valid {
        warn!(account = %input.account, "login rejected");
        return error(
            StatusCode::UNAUTHORIZED,
            "Invalid username or password",
            INVALID_CREDENTIALS,
        );
    }
    let cookie = format!(
        "access_token={}; HttpOnly; Max-Age=3600; SameSite=Strict; Secure",
        Uuid::new_v4()
    );
    info!(account = %input.account, "login succeeded");
    (
        [(header::SET_COOKIE, cookie)],
        Json(json!({"message": "Login success"})),
    )
        .into_response()
}
