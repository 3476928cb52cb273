//! HTTP handlers for the item API.
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | GET | `/` | [`home`] |
//! | GET | `/items` | [`list_items`] |
//! | POST | `/items` | [`create_item`] |
//! | GET | `/items/{id}` | [`get_item`] |
//! | PUT | `/items/{id}` | [`update_item`] |
//! | DELETE | `/items/{id}` | [`delete_item`] |
//!
//! Errors are answered with `{"Error": "<message>"}`: `404` for an unknown id,
//! `400` for a body that fails validation.

use std::sync::Arc;

use serde_json::json;

use crate::error::ApiError;
use crate::handler::with_state;
use crate::health;
use crate::item::{Item, ItemPatch, NewItem};
use crate::request::Request;
use crate::response::{IntoResponse, Json, Response};
use crate::router::Router;
use crate::status::Status;
use crate::store::ItemStore;

/// Builds the full application router over `store`.
pub fn routes(store: Arc<ItemStore>) -> Router {
    Router::new()
        .get("/", home)
        .get("/items", with_state(Arc::clone(&store), list_items))
        .post("/items", with_state(Arc::clone(&store), create_item))
        .get("/items/{id}", with_state(Arc::clone(&store), get_item))
        .put("/items/{id}", with_state(Arc::clone(&store), update_item))
        .delete("/items/{id}", with_state(store, delete_item))
        .get("/healthz", health::liveness)
        .get("/readyz", health::readiness)
}

pub async fn home(_req: Request) -> &'static str {
    "Welcome to the Sample TODO List App"
}

pub async fn list_items(store: Arc<ItemStore>, _req: Request) -> Json<Vec<Item>> {
    Json(store.list())
}

pub async fn get_item(store: Arc<ItemStore>, req: Request) -> Result<Json<Item>, ApiError> {
    let id = item_id(&req)?;
    store.get(id).map(Json).ok_or(ApiError::NotFound)
}

pub async fn create_item(store: Arc<ItemStore>, req: Request) -> Result<Response, ApiError> {
    let new = NewItem::from_json(req.body())?;
    let item = store.create(new);
    let location = format!("/items/{}", item.id);

    let mut res = Json(item).into_response();
    res.status = Status::Created.into();
    res.headers.push(("location".to_owned(), location));
    Ok(res)
}

pub async fn update_item(store: Arc<ItemStore>, req: Request) -> Result<Json<Item>, ApiError> {
    let id = item_id(&req)?;
    let patch = ItemPatch::from_json(req.body())?;
    store.update(id, patch).map(Json).ok_or(ApiError::NotFound)
}

/// Acknowledged whether or not anything matched.
pub async fn delete_item(store: Arc<ItemStore>, req: Request) -> Result<Response, ApiError> {
    let id = item_id(&req)?;
    store.delete(id);
    Ok(Response::json(json!({ "result": "Item deleted" }).to_string().into_bytes()))
}

/// Parses the `{id}` path segment. Only plain decimal digits name an item;
/// signs, whitespace and values past `u64::MAX` do not.
fn item_id(req: &Request) -> Result<u64, ApiError> {
    req.param("id")
        .filter(|raw| !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|raw| raw.parse().ok())
        .ok_or(ApiError::NotFound)
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use serde_json::Value;

    use super::*;
    use crate::method::Method;

    fn app() -> (Arc<ItemStore>, Router) {
        let store = Arc::new(ItemStore::seeded());
        (Arc::clone(&store), routes(store))
    }

    async fn send(router: &Router, method: Method, path: &str, body: &str) -> (u16, Value) {
        let req = Request::new(method, path, Vec::new(), Bytes::from(body.to_owned()));
        let res = router.handle(req).await;
        let json = serde_json::from_slice(res.body()).unwrap_or(Value::Null);
        (res.status_code(), json)
    }

    #[tokio::test]
    async fn home_is_plain_text() {
        let (_, router) = app();
        let req = Request::new(Method::Get, "/", Vec::new(), Bytes::new());
        let res = router.handle(req).await;
        assert_eq!(res.status_code(), 200);
        assert_eq!(res.body(), b"Welcome to the Sample TODO List App");
    }

    #[tokio::test]
    async fn list_returns_seeds() {
        let (_, router) = app();
        let (status, body) = send(&router, Method::Get, "/items", "").await;
        assert_eq!(status, 200);
        assert_eq!(body.as_array().map(Vec::len), Some(2));
        assert_eq!(body[0]["name"], "Item 1");
    }

    #[tokio::test]
    async fn create_then_delete_then_get() {
        let (store, router) = app();

        let req = Request::new(
            Method::Post,
            "/items",
            Vec::new(),
            Bytes::from_static(br#"{"name":"Item 3","description":"x"}"#),
        );
        let res = router.handle(req).await;
        assert_eq!(res.status_code(), 201);
        assert_eq!(res.header("location"), Some("/items/3"));
        let body: Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body, json!({ "id": 3, "name": "Item 3", "description": "x" }));
        assert_eq!(store.len(), 3);

        let (status, body) = send(&router, Method::Delete, "/items/3", "").await;
        assert_eq!(status, 200);
        assert_eq!(body, json!({ "result": "Item deleted" }));

        let (status, body) = send(&router, Method::Get, "/items/3", "").await;
        assert_eq!(status, 404);
        assert_eq!(body, json!({ "Error": "Item not found." }));
    }

    #[tokio::test]
    async fn create_without_name_is_rejected() {
        let (store, router) = app();
        let (status, body) = send(&router, Method::Post, "/items", r#"{"description":"x"}"#).await;
        assert_eq!(status, 400);
        assert!(body["Error"].as_str().unwrap().starts_with("Invalid input"));
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn create_with_malformed_body_is_rejected() {
        let (store, router) = app();
        let (status, _) = send(&router, Method::Post, "/items", "name=x").await;
        assert_eq!(status, 400);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn update_name_only() {
        let (_, router) = app();
        let (status, body) = send(&router, Method::Put, "/items/2", r#"{"name":"two"}"#).await;
        assert_eq!(status, 200);
        assert_eq!(body, json!({ "id": 2, "name": "two", "description": "This is item 2" }));
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let (_, router) = app();
        let (status, body) = send(&router, Method::Put, "/items/9", r#"{"name":"x"}"#).await;
        assert_eq!(status, 404);
        assert_eq!(body["Error"], "Item not found.");
    }

    #[tokio::test]
    async fn update_with_bad_body_is_invalid_even_for_missing_id() {
        let (_, router) = app();
        let (status, _) = send(&router, Method::Put, "/items/9", "nope").await;
        assert_eq!(status, 400);
    }

    #[tokio::test]
    async fn delete_missing_is_still_acknowledged() {
        let (store, router) = app();
        let (status, body) = send(&router, Method::Delete, "/items/77", "").await;
        assert_eq!(status, 200);
        assert_eq!(body["result"], "Item deleted");
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn non_numeric_id_is_not_found() {
        let (_, router) = app();
        for path in ["/items/abc", "/items/-1", "/items/+1", "/items/1.0", "/items/99999999999999999999999"] {
            let (status, body) = send(&router, Method::Get, path, "").await;
            assert_eq!(status, 404, "{path}");
            assert_eq!(body["Error"], "Item not found.");
        }
    }

    #[tokio::test]
    async fn health_checks_are_mounted() {
        let (_, router) = app();
        for path in ["/healthz", "/readyz"] {
            let req = Request::new(Method::Get, path, Vec::new(), Bytes::new());
            assert_eq!(router.handle(req).await.status_code(), 200);
        }
    }
}
