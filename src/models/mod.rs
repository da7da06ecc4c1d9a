use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ShipmentStatus {
    InTransit,
    Delivered,
    Delayed,
    OutForDelivery,
    Returned,
    /// Anything the service sends that we don't know about, kept verbatim.
    Other(String),
}

impl ShipmentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ShipmentStatus::InTransit => "In Transit",
            ShipmentStatus::Delivered => "Delivered",
            ShipmentStatus::Delayed => "Delayed",
            ShipmentStatus::OutForDelivery => "Out for Delivery",
            ShipmentStatus::Returned => "Returned",
            ShipmentStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for ShipmentStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "In Transit" => ShipmentStatus::InTransit,
            "Delivered" => ShipmentStatus::Delivered,
            "Delayed" => ShipmentStatus::Delayed,
            "Out for Delivery" => ShipmentStatus::OutForDelivery,
            "Returned" => ShipmentStatus::Returned,
            _ => ShipmentStatus::Other(value),
        }
    }
}

impl From<ShipmentStatus> for String {
    fn from(status: ShipmentStatus) -> Self {
        match status {
            ShipmentStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentItem {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    pub id: String,
    pub tracking_number: String,
    pub origin: String,
    pub destination: String,
    pub status: ShipmentStatus,
    pub shipped_date: String,
    pub estimated_delivery: String,
    pub actual_delivery: Option<String>,
    pub weight: f64,
    #[serde(default)]
    pub dimensions: String,
    pub carrier: String,
    pub priority: String,
    pub customer: String,
    #[serde(default)]
    pub items: Vec<ShipmentItem>,
}

/// Body of `POST /shipments`: a shipment before the service assigns it an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewShipment {
    pub tracking_number: String,
    pub origin: String,
    pub destination: String,
    pub status: ShipmentStatus,
    pub shipped_date: String,
    pub estimated_delivery: String,
    pub actual_delivery: Option<String>,
    pub weight: f64,
    pub dimensions: String,
    pub carrier: String,
    pub priority: String,
    pub customer: String,
    pub items: Vec<ShipmentItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ShipmentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipped_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_delivery: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_delivery: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<ShipmentItem>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StockStatus {
    Good,
    Low,
    Out,
    Other(String),
}

impl StockStatus {
    pub fn as_str(&self) -> &str {
        match self {
            StockStatus::Good => "Good",
            StockStatus::Low => "Low",
            StockStatus::Out => "Out",
            StockStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for StockStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Good" => StockStatus::Good,
            "Low" => StockStatus::Low,
            "Out" => StockStatus::Out,
            _ => StockStatus::Other(value),
        }
    }
}

impl From<StockStatus> for String {
    fn from(status: StockStatus) -> Self {
        match status {
            StockStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub sku: String,
    pub category: String,
    pub stock: u32,
    pub min_stock: u32,
    pub max_stock: u32,
    pub unit_price: f64,
    pub supplier: String,
    pub last_restocked: String,
    pub status: StockStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_stock: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_stock: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_restocked: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StockStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentCounts {
    pub total: u64,
    pub in_transit: u64,
    pub delivered: u64,
    pub delayed: u64,
    pub returned: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueSummary {
    pub total: f64,
    pub this_month: f64,
    pub last_month: f64,
    pub growth: f64,
    /// Only sent by newer versions of the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_data: Option<Vec<RevenuePoint>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyPerformance {
    pub week: String,
    pub on_time: f64,
    pub delayed: f64,
    pub avg_time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSummary {
    pub on_time_delivery: f64,
    pub average_transit_time: f64,
    pub customer_satisfaction: f64,
    /// Only sent by newer versions of the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_data: Option<Vec<WeeklyPerformance>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub shipments: ShipmentCounts,
    pub revenue: RevenueSummary,
    pub performance: PerformanceSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentTrendPoint {
    pub month: String,
    pub shipments: u32,
    pub delivered: u32,
    pub in_transit: u32,
    pub delayed: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenuePoint {
    /// Period label, e.g. "Jan" or "Last Month".
    pub month: String,
    pub revenue: f64,
    pub expenses: f64,
    pub profit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryPerformancePoint {
    pub week: String,
    pub on_time: f64,
    pub delayed: f64,
    pub avg_delivery_time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventorySlice {
    pub name: String,
    pub value: u32,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatCard {
    pub title: String,
    pub value: String,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentRow {
    pub tracking_number: String,
    pub route: String,
    pub status: String,
    pub carrier: String,
}

/// One line of the "Recent Shipments" panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentShipment {
    pub id: String,
    pub destination: String,
    pub status: String,
    pub eta: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeTone {
    Green,
    Yellow,
    Red,
}

/// One line of the "Inventory Overview" panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryLevel {
    pub item: String,
    pub stock: u32,
    pub threshold: u32,
    pub status: String,
    pub tone: BadgeTone,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub api_url: String,
}
