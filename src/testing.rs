use axum::Router;
use serde_json::{json, Value};

use crate::models::Settings;
use crate::services::api::ApiService;
use crate::services::state::AppState;

pub async fn serve(router: Router) -> ApiService {
    ApiService::new(settings_for(router).await.api_url)
}

pub async fn serve_state(router: Router) -> AppState {
    AppState::new(settings_for(router).await)
}

async fn settings_for(router: Router) -> Settings {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Settings {
        api_url: format!("http://{}/", addr),
    }
}

pub fn shipment_json(id: &str, date: &str, status: &str) -> Value {
    json!({
        "id": id,
        "trackingNumber": format!("TRK-{}", id),
        "origin": "Rotterdam",
        "destination": "Lyon",
        "status": status,
        "shippedDate": date,
        "estimatedDelivery": date,
        "actualDelivery": null,
        "weight": 4.0,
        "dimensions": "20x20x20",
        "carrier": "UPS",
        "priority": "Standard",
        "customer": "Globex",
        "items": []
    })
}

pub fn inventory_json(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "name": "Pallet Jack",
        "sku": "PJ-100",
        "category": "Hardware",
        "stock": 12,
        "minStock": 5,
        "maxStock": 40,
        "unitPrice": 249.0,
        "supplier": "Acme",
        "lastRestocked": "2024-01-20",
        "status": status
    })
}

/// Analytics in the older aggregate-only shape.
pub fn legacy_analytics_json() -> Value {
    json!({
        "shipments": {"total": 1234, "inTransit": 456, "delivered": 700, "delayed": 60, "returned": 18},
        "revenue": {"total": 45231, "thisMonth": 2000, "lastMonth": 1000, "growth": 20},
        "performance": {"onTimeDelivery": 90, "averageTransitTime": 2.5, "customerSatisfaction": 4.7}
    })
}
