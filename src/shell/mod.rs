mod render;

use std::future::Future;

use crate::commands::dashboard;
use crate::models::{
    DeliveryPerformancePoint, InventoryLevel, InventorySlice, RecentShipment, RevenuePoint,
    ShipmentTrendPoint, StatCard,
};
use crate::services::state::AppState;

pub use render::ChartView;

#[derive(Debug, Clone, PartialEq)]
pub enum ChartState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

/// One card on the dashboard. Starts out loading and settles exactly once.
#[derive(Debug)]
pub struct ChartContainer<T> {
    title: &'static str,
    description: &'static str,
    state: ChartState<T>,
}

impl<T> ChartContainer<T> {
    pub fn new(title: &'static str, description: &'static str) -> Self {
        ChartContainer {
            title,
            description,
            state: ChartState::Loading,
        }
    }

    pub fn title(&self) -> &str {
        self.title
    }

    pub fn state(&self) -> &ChartState<T> {
        &self.state
    }

    /// Applies a fetch outcome. Returns false, leaving the state untouched,
    /// if the container has already settled.
    pub fn resolve(&mut self, outcome: Result<T, String>) -> bool {
        if !matches!(self.state, ChartState::Loading) {
            tracing::debug!(chart = self.title, "discarding late result");
            return false;
        }
        self.state = match outcome {
            Ok(data) => ChartState::Ready(data),
            Err(message) => {
                tracing::warn!(chart = self.title, error = %message, "chart failed to load");
                ChartState::Failed(message)
            }
        };
        true
    }

    pub async fn mount<F>(&mut self, load: F)
    where
        F: Future<Output = Result<T, String>>,
    {
        let outcome = load.await;
        self.resolve(outcome);
    }
}

impl<T: ChartView> ChartContainer<T> {
    pub fn render(&self) -> String {
        let body = match &self.state {
            ChartState::Loading => "Loading...".to_string(),
            ChartState::Failed(message) => message.clone(),
            ChartState::Ready(data) => data.render(),
        };
        format!("== {} ==\n{}\n\n{}\n", self.title, self.description, body)
    }
}

pub struct Dashboard {
    pub stats: ChartContainer<Vec<StatCard>>,
    pub recent: ChartContainer<Vec<RecentShipment>>,
    pub levels: ChartContainer<Vec<InventoryLevel>>,
    pub shipments: ChartContainer<Vec<ShipmentTrendPoint>>,
    pub revenue: ChartContainer<Vec<RevenuePoint>>,
    pub performance: ChartContainer<Vec<DeliveryPerformancePoint>>,
    pub inventory: ChartContainer<Vec<InventorySlice>>,
}

impl Dashboard {
    pub fn new() -> Self {
        Dashboard {
            stats: ChartContainer::new("Overview", "Shipment and revenue totals"),
            recent: ChartContainer::new(
                "Recent Shipments",
                "Latest shipments and their current status",
            ),
            levels: ChartContainer::new(
                "Inventory Overview",
                "Current inventory levels and alerts",
            ),
            shipments: ChartContainer::new(
                "Shipment Trends",
                "Monthly shipment volume and delivery rates",
            ),
            revenue: ChartContainer::new("Revenue Overview", "Monthly revenue, expenses, and profit"),
            performance: ChartContainer::new(
                "Delivery Performance",
                "On-time delivery rates and average delivery times",
            ),
            inventory: ChartContainer::new(
                "Inventory Status",
                "Current inventory levels across all products",
            ),
        }
    }

    /// Mounts every container at once. Each issues its own request and
    /// settles on its own; one failing leaves the others untouched.
    pub async fn mount(&mut self, state: &AppState) {
        tokio::join!(
            self.stats.mount(dashboard::get_stat_cards(state)),
            self.recent.mount(dashboard::get_recent_shipments(state)),
            self.levels.mount(dashboard::get_inventory_levels(state)),
            self.shipments.mount(dashboard::get_shipment_trends(state)),
            self.revenue.mount(dashboard::get_revenue_series(state)),
            self.performance.mount(dashboard::get_delivery_performance(state)),
            self.inventory.mount(dashboard::get_inventory_status(state)),
        );
    }

    pub fn render(&self) -> String {
        [
            self.stats.render(),
            self.recent.render(),
            self.levels.render(),
            self.shipments.render(),
            self.revenue.render(),
            self.performance.render(),
            self.inventory.render(),
        ]
        .join("\n")
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}
