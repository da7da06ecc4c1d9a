use reqwest::{header, Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::models::{
    AnalyticsSummary, InventoryItem, InventoryPatch, NewShipment, Shipment, ShipmentPatch,
};

pub const DEFAULT_API_URL: &str = "http://localhost:3001";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API request failed: {text}")]
    Status { status: StatusCode, text: String },

    #[error("Invalid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Typed access to the logistics service. Holds only a base URL and a
/// connection pool, so constructing it never touches the network.
#[derive(Debug, Clone)]
pub struct ApiService {
    base_url: String,
    client: Client,
}

impl ApiService {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        ApiService {
            base_url,
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn list_shipments(&self) -> Result<Vec<Shipment>, ApiError> {
        self.fetch(Method::GET, "/shipments", &[], None::<&()>).await
    }

    pub async fn get_shipment(&self, id: &str) -> Result<Shipment, ApiError> {
        self.fetch(Method::GET, &format!("/shipments/{}", id), &[], None::<&()>)
            .await
    }

    pub async fn create_shipment(&self, shipment: &NewShipment) -> Result<Shipment, ApiError> {
        self.fetch(Method::POST, "/shipments", &[], Some(shipment)).await
    }

    pub async fn update_shipment(
        &self,
        id: &str,
        patch: &ShipmentPatch,
    ) -> Result<Shipment, ApiError> {
        self.fetch(Method::PATCH, &format!("/shipments/{}", id), &[], Some(patch))
            .await
    }

    pub async fn delete_shipment(&self, id: &str) -> Result<(), ApiError> {
        self.send(Method::DELETE, &format!("/shipments/{}", id), &[], None::<&()>)
            .await?;
        Ok(())
    }

    pub async fn list_inventory(&self) -> Result<Vec<InventoryItem>, ApiError> {
        self.fetch(Method::GET, "/inventory", &[], None::<&()>).await
    }

    pub async fn get_inventory_item(&self, id: &str) -> Result<InventoryItem, ApiError> {
        self.fetch(Method::GET, &format!("/inventory/{}", id), &[], None::<&()>)
            .await
    }

    pub async fn update_inventory_item(
        &self,
        id: &str,
        patch: &InventoryPatch,
    ) -> Result<InventoryItem, ApiError> {
        self.fetch(Method::PATCH, &format!("/inventory/{}", id), &[], Some(patch))
            .await
    }

    pub async fn get_analytics(&self) -> Result<AnalyticsSummary, ApiError> {
        self.fetch(Method::GET, "/analytics", &[], None::<&()>).await
    }

    pub async fn search_shipments(&self, query: &str) -> Result<Vec<Shipment>, ApiError> {
        self.fetch(Method::GET, "/shipments", &[("q", query)], None::<&()>)
            .await
    }

    pub async fn get_shipments_by_status(&self, status: &str) -> Result<Vec<Shipment>, ApiError> {
        self.fetch(Method::GET, "/shipments", &[("status", status)], None::<&()>)
            .await
    }

    async fn fetch<T, B>(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let bytes = self.send(method, endpoint, query, body).await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::warn!(endpoint, error = %e, "unexpected response shape");
            ApiError::Decode(e)
        })
    }

    async fn send<B>(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<Vec<u8>, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!(%method, %url, "api request");

        let mut request = self.client.request(method, &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        request = match body {
            Some(body) => request.json(body),
            None => request.header(header::CONTENT_TYPE, "application/json"),
        };

        let response = request.send().await.map_err(|e| {
            tracing::warn!(%url, error = %e, "api transport failure");
            ApiError::Transport(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.as_str().to_string());
            tracing::warn!(%url, status = status.as_u16(), "api request rejected");
            return Err(ApiError::Status { status, text });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ShipmentStatus, StockStatus};
    use crate::testing::{inventory_json, serve, shipment_json};
    use axum::extract::{Path, Query};
    use axum::http::StatusCode as AxumStatus;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;

    fn shipments_router() -> Router {
        Router::new()
            .route(
                "/shipments",
                get(|Query(params): Query<HashMap<String, String>>| async move {
                    let status = params
                        .get("status")
                        .cloned()
                        .unwrap_or_else(|| "Delivered".to_string());
                    let id = params.get("q").cloned().unwrap_or_else(|| "s1".to_string());
                    Json(json!([shipment_json(&id, "2024-02-10", &status)]))
                })
                .post(|Json(body): Json<Value>| async move {
                    let mut created = body;
                    created["id"] = json!("new-1");
                    (AxumStatus::CREATED, Json(created))
                }),
            )
            .route(
                "/shipments/:id",
                get(|Path(id): Path<String>| async move {
                    Json(shipment_json(&id, "2024-02-10", "In Transit"))
                })
                .patch(|Path(id): Path<String>, Json(body): Json<Value>| async move {
                    let mut shipment = shipment_json(&id, "2024-02-10", "In Transit");
                    if let Some(status) = body.get("status") {
                        shipment["status"] = status.clone();
                    }
                    Json(shipment)
                })
                .delete(|| async { AxumStatus::NO_CONTENT }),
            )
            .route(
                "/inventory",
                get(|| async { Json(json!([inventory_json("inv-1", "Good")])) }),
            )
            .route(
                "/inventory/:id",
                get(|Path(id): Path<String>| async move { Json(inventory_json(&id, "Good")) }).patch(
                    |Path(id): Path<String>, Json(body): Json<Value>| async move {
                        let mut item = inventory_json(&id, "Good");
                        for (key, value) in body.as_object().cloned().unwrap_or_default() {
                            item[key.as_str()] = value;
                        }
                        Json(item)
                    },
                ),
            )
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let api = ApiService::new("http://example.test/api/");
        assert_eq!(api.base_url(), "http://example.test/api");
    }

    #[tokio::test]
    async fn shipments_round_trip_over_http() {
        let api = serve(shipments_router()).await;

        let all = api.list_shipments().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, "s1");

        let one = api.get_shipment("abc").await.unwrap();
        assert_eq!(one.id, "abc");
        assert_eq!(one.status, ShipmentStatus::InTransit);

        let updated = api
            .update_shipment(
                "abc",
                &ShipmentPatch {
                    status: Some(ShipmentStatus::Delivered),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.status, ShipmentStatus::Delivered);

        api.delete_shipment("abc").await.unwrap();
    }

    #[tokio::test]
    async fn create_shipment_posts_body_without_id() {
        let api = serve(shipments_router()).await;
        let new = NewShipment {
            tracking_number: "TRK-NEW".to_string(),
            origin: "Oslo".to_string(),
            destination: "Bergen".to_string(),
            status: ShipmentStatus::InTransit,
            shipped_date: "2024-05-01".to_string(),
            estimated_delivery: "2024-05-03".to_string(),
            actual_delivery: None,
            weight: 1.5,
            dimensions: "5x5x5".to_string(),
            carrier: "Posten".to_string(),
            priority: "Express".to_string(),
            customer: "Initech".to_string(),
            items: vec![],
        };

        let created = api.create_shipment(&new).await.unwrap();
        assert_eq!(created.id, "new-1");
        assert_eq!(created.tracking_number, "TRK-NEW");
    }

    #[tokio::test]
    async fn query_parameters_are_encoded() {
        let api = serve(shipments_router()).await;

        let found = api.search_shipments("a&b c").await.unwrap();
        assert_eq!(found[0].id, "a&b c");

        let delayed = api.get_shipments_by_status("Out for Delivery").await.unwrap();
        assert_eq!(delayed[0].status, ShipmentStatus::OutForDelivery);
    }

    #[tokio::test]
    async fn inventory_endpoints() {
        let api = serve(shipments_router()).await;

        let items = api.list_inventory().await.unwrap();
        assert_eq!(items[0].sku, "PJ-100");

        let item = api.get_inventory_item("inv-9").await.unwrap();
        assert_eq!(item.id, "inv-9");

        let patched = api
            .update_inventory_item(
                "inv-9",
                &InventoryPatch {
                    stock: Some(0),
                    status: Some(StockStatus::Out),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(patched.stock, 0);
        assert_eq!(patched.status, StockStatus::Out);
    }

    #[tokio::test]
    async fn server_error_carries_status_text() {
        let router = Router::new().route(
            "/analytics",
            get(|| async { (AxumStatus::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let api = serve(router).await;

        let err = api.get_analytics().await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status, .. } if status.as_u16() == 500));
        assert_eq!(err.to_string(), "API request failed: Internal Server Error");
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let router = Router::new().route("/inventory", get(|| async { "{\"not\": \"a list\"}" }));
        let api = serve(router).await;

        let err = api.list_inventory().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn request_bodies_are_sent_as_json() {
        let router = Router::new().route(
            "/echo",
            axum::routing::post(|headers: axum::http::HeaderMap, body: String| async move {
                let content_type = headers
                    .get(axum::http::header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                Json(json!({"contentType": content_type, "body": body}))
            }),
        );
        let api = serve(router).await;

        let echoed: Value = api
            .fetch(Method::POST, "/echo", &[], Some(&json!({"stock": 3})))
            .await
            .unwrap();
        assert_eq!(echoed["contentType"], "application/json");
        assert_eq!(echoed["body"], "{\"stock\":3}");
    }

    #[tokio::test]
    async fn unserializable_body_is_not_reported_as_bad_response() {
        let router = Router::new().route("/echo", axum::routing::post(|| async { "{}" }));
        let api = serve(router).await;

        // JSON object keys must be strings.
        let mut body: HashMap<(u8, u8), u8> = HashMap::new();
        body.insert((1, 2), 3);

        let err = api
            .fetch::<Value, _>(Method::POST, "/echo", &[], Some(&body))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[tokio::test]
    async fn unreachable_service_is_a_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = ApiService::new(format!("http://{}", addr));
        let err = api.list_shipments().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
        assert!(err.to_string().starts_with("API request failed"));
    }
}
