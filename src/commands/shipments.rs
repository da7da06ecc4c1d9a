use crate::models::{Shipment, ShipmentRow, ShipmentStatus};
use crate::services::state::AppState;

pub async fn search_shipments(query: &str, state: &AppState) -> Result<Vec<ShipmentRow>, String> {
    let query = query.trim();
    let shipments = if query.is_empty() {
        state.api.list_shipments().await
    } else {
        state.api.search_shipments(query).await
    }
    .map_err(|e| e.to_string())?;

    Ok(shipments.iter().map(to_row).collect())
}

pub async fn shipments_by_status(
    status: &ShipmentStatus,
    state: &AppState,
) -> Result<Vec<ShipmentRow>, String> {
    let shipments = state
        .api
        .get_shipments_by_status(status.as_str())
        .await
        .map_err(|e| e.to_string())?;
    Ok(shipments.iter().map(to_row).collect())
}

fn to_row(shipment: &Shipment) -> ShipmentRow {
    ShipmentRow {
        tracking_number: shipment.tracking_number.clone(),
        route: format!("{} → {}", shipment.origin, shipment.destination),
        status: shipment.status.to_string(),
        carrier: shipment.carrier.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{serve_state, shipment_json};
    use axum::extract::Query;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;

    fn router() -> Router {
        Router::new()
            .route(
                "/shipments",
                get(|Query(params): Query<HashMap<String, String>>| async move {
                    let mut rows = vec![
                        shipment_json("1", "2024-01-01", "Delivered"),
                        shipment_json("2", "2024-01-02", "Delayed"),
                    ];
                    if let Some(q) = params.get("q") {
                        rows.retain(|s| s["trackingNumber"].as_str().unwrap().contains(q.as_str()));
                    }
                    if let Some(status) = params.get("status") {
                        rows.retain(|s| s["status"] == json!(status));
                    }
                    Json(Value::Array(rows))
                }),
            )
    }

    #[tokio::test]
    async fn blank_query_lists_everything() {
        let state = serve_state(router()).await;
        let rows = search_shipments("  ", &state).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].route, "Rotterdam → Lyon");
    }

    #[tokio::test]
    async fn query_narrows_results() {
        let state = serve_state(router()).await;
        let rows = search_shipments("TRK-2", &state).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, "Delayed");
    }

    #[tokio::test]
    async fn filter_by_status() {
        let state = serve_state(router()).await;
        let rows = shipments_by_status(&ShipmentStatus::Delivered, &state)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].tracking_number, "TRK-1");
    }
}
