use crate::models::{
    DeliveryPerformancePoint, InventoryLevel, InventorySlice, RecentShipment, RevenuePoint,
    ShipmentTrendPoint, StatCard,
};
use crate::services::charts;
use crate::services::state::AppState;

pub async fn get_stat_cards(state: &AppState) -> Result<Vec<StatCard>, String> {
    let analytics = state.api.get_analytics().await.map_err(|e| e.to_string())?;
    Ok(charts::stat_cards(&analytics))
}

pub async fn get_shipment_trends(state: &AppState) -> Result<Vec<ShipmentTrendPoint>, String> {
    let shipments = state.api.list_shipments().await.map_err(|e| e.to_string())?;
    Ok(charts::shipment_trends(&shipments))
}

pub async fn get_revenue_series(state: &AppState) -> Result<Vec<RevenuePoint>, String> {
    let analytics = state.api.get_analytics().await.map_err(|e| e.to_string())?;
    Ok(charts::revenue_series(&analytics))
}

pub async fn get_delivery_performance(
    state: &AppState,
) -> Result<Vec<DeliveryPerformancePoint>, String> {
    let analytics = state.api.get_analytics().await.map_err(|e| e.to_string())?;
    Ok(charts::delivery_performance(&analytics))
}

pub async fn get_inventory_status(state: &AppState) -> Result<Vec<InventorySlice>, String> {
    let items = state.api.list_inventory().await.map_err(|e| e.to_string())?;
    Ok(charts::inventory_status_slices(&items))
}

pub async fn get_inventory_categories(state: &AppState) -> Result<Vec<InventorySlice>, String> {
    let items = state.api.list_inventory().await.map_err(|e| e.to_string())?;
    Ok(charts::inventory_category_slices(&items))
}

pub async fn get_recent_shipments(state: &AppState) -> Result<Vec<RecentShipment>, String> {
    let shipments = state.api.list_shipments().await.map_err(|e| e.to_string())?;
    Ok(charts::recent_shipments(&shipments, charts::RECENT_SHIPMENTS))
}

pub async fn get_inventory_levels(state: &AppState) -> Result<Vec<InventoryLevel>, String> {
    let items = state.api.list_inventory().await.map_err(|e| e.to_string())?;
    Ok(charts::inventory_levels(&items))
}
