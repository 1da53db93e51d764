//! In-memory HTTP server for exercising `http-helper` over real sockets.
//!
//! Besides a small `items` CRUD resource it exposes diagnostic routes:
//! - `/headers` echoes the request headers as a JSON object,
//! - `/status/{code}?body=...` answers with any status and body,
//! - `/whoami` requires an `Authorization` header,
//! - `/empty`, `/text` and `/slow/{millis}` cover empty, non-JSON and slow
//!   responses.

use std::{collections::BTreeMap, collections::HashMap, sync::Arc, time::Duration};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub quantity: u32,
}

#[derive(Deserialize)]
pub struct NewItem {
    pub name: String,
    #[serde(default)]
    pub quantity: u32,
}

#[derive(Deserialize)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub quantity: Option<u32>,
}

pub type Db = Arc<RwLock<HashMap<Uuid, Item>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route("/items/{id}", get(get_item).put(update_item).delete(delete_item))
        .route("/headers", any(echo_headers))
        .route("/status/{code}", any(respond_with_status))
        .route("/whoami", get(whoami))
        .route("/empty", get(empty))
        .route("/text", get(plain_text))
        .route("/slow/{millis}", get(slow))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_items(State(db): State<Db>) -> Json<Vec<Item>> {
    let items = db.read().await;
    Json(items.values().cloned().collect())
}

async fn create_item(State(db): State<Db>, Json(input): Json<NewItem>) -> (StatusCode, Json<Item>) {
    let item = Item {
        id: Uuid::new_v4(),
        name: input.name,
        quantity: input.quantity,
    };
    db.write().await.insert(item.id, item.clone());
    tracing::debug!(id = %item.id, "created item");
    (StatusCode::CREATED, Json(item))
}

async fn get_item(State(db): State<Db>, Path(id): Path<Uuid>) -> Result<Json<Item>, StatusCode> {
    let items = db.read().await;
    items.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_item(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(patch): Json<ItemPatch>,
) -> Result<Json<Item>, StatusCode> {
    let mut items = db.write().await;
    let item = items.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(name) = patch.name {
        item.name = name;
    }
    if let Some(quantity) = patch.quantity {
        item.quantity = quantity;
    }
    Ok(Json(item.clone()))
}

async fn delete_item(State(db): State<Db>, Path(id): Path<Uuid>) -> Result<StatusCode, StatusCode> {
    let mut items = db.write().await;
    items.remove(&id).map(|_| StatusCode::NO_CONTENT).ok_or(StatusCode::NOT_FOUND)
}

/// Header names are lower-cased; repeated headers are joined with `", "`.
async fn echo_headers(headers: HeaderMap) -> Json<BTreeMap<String, String>> {
    let mut echoed: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in &headers {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        echoed
            .entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }
    Json(echoed)
}

async fn respond_with_status(
    Path(code): Path<u16>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, String) {
    match StatusCode::from_u16(code) {
        Ok(status) => (status, params.get("body").cloned().unwrap_or_default()),
        Err(_) => (StatusCode::BAD_REQUEST, format!("invalid status code {code}")),
    }
}

async fn whoami(headers: HeaderMap) -> Result<Json<serde_json::Value>, (StatusCode, &'static str)> {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or((StatusCode::UNAUTHORIZED, "missing credentials"))?;
    Ok(Json(serde_json::json!({ "authorization": authorization })))
}

async fn empty() -> StatusCode {
    StatusCode::OK
}

async fn plain_text() -> &'static str {
    "not json"
}

async fn slow(Path(millis): Path<u64>) -> Json<serde_json::Value> {
    tokio::time::sleep(Duration::from_millis(millis)).await;
    Json(serde_json::json!({ "slept_ms": millis }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_serializes_to_json() {
        let item = Item {
            id: Uuid::nil(),
            name: "Bolt".to_string(),
            quantity: 3,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["name"], "Bolt");
        assert_eq!(json["quantity"], 3);
    }

    #[test]
    fn new_item_defaults_quantity_to_zero() {
        let input: NewItem = serde_json::from_str(r#"{"name":"Washer"}"#).unwrap();
        assert_eq!(input.name, "Washer");
        assert_eq!(input.quantity, 0);
    }

    #[test]
    fn new_item_rejects_missing_name() {
        let result: Result<NewItem, _> = serde_json::from_str(r#"{"quantity":1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn item_patch_all_fields_optional() {
        let patch: ItemPatch = serde_json::from_str(r#"{}"#).unwrap();
        assert!(patch.name.is_none());
        assert!(patch.quantity.is_none());
    }
}
