use std::collections::HashMap;

use crate::models::{
    AnalyticsSummary, BadgeTone, DeliveryPerformancePoint, InventoryItem, InventoryLevel,
    InventorySlice, RecentShipment, RevenuePoint, Shipment, ShipmentStatus, ShipmentTrendPoint,
    StatCard, StockStatus,
};
use crate::utils::{
    format_currency, format_percent_change, format_thousands, month_abbrev, month_rank,
    parse_date, round_half_up, WEEKDAYS,
};

pub const UNKNOWN_MONTH: &str = "Unknown";
pub const RECENT_SHIPMENTS: usize = 5;

const EXPENSE_RATIO: f64 = 0.7;
const FALLBACK_COLOR: &str = "#8884d8";

const CATEGORY_COLORS: [(&str, &str); 10] = [
    ("Electronics", "#3b82f6"),
    ("Hardware", "#8b5cf6"),
    ("Automotive", "#f59e0b"),
    ("Energy", "#10b981"),
    ("Services", "#06b6d4"),
    ("Scientific", "#ec4899"),
    ("Industrial", "#f97316"),
    ("Healthcare", "#ef4444"),
    ("Manufacturing", "#84cc16"),
    ("Retail", "#6366f1"),
];

/// Monthly shipment volume, one point per month seen, in calendar order.
/// Shipments whose date can't be read are counted under [`UNKNOWN_MONTH`].
pub fn shipment_trends(shipments: &[Shipment]) -> Vec<ShipmentTrendPoint> {
    let mut points: Vec<ShipmentTrendPoint> = Vec::new();

    for shipment in shipments {
        let month = month_abbrev(&shipment.shipped_date).unwrap_or_else(|| {
            tracing::debug!(id = %shipment.id, date = %shipment.shipped_date, "unreadable shipped date");
            UNKNOWN_MONTH
        });

        let index = match points.iter().position(|p| p.month == month) {
            Some(index) => index,
            None => {
                points.push(ShipmentTrendPoint {
                    month: month.to_string(),
                    shipments: 0,
                    delivered: 0,
                    in_transit: 0,
                    delayed: 0,
                });
                points.len() - 1
            }
        };

        let entry = &mut points[index];
        entry.shipments += 1;
        match shipment.status {
            ShipmentStatus::Delivered => entry.delivered += 1,
            ShipmentStatus::InTransit => entry.in_transit += 1,
            ShipmentStatus::Delayed => entry.delayed += 1,
            _ => {}
        }
    }

    points.sort_by_key(|p| month_rank(&p.month));
    points
}

pub fn revenue_series(analytics: &AnalyticsSummary) -> Vec<RevenuePoint> {
    match &analytics.revenue.monthly_data {
        Some(monthly) if !monthly.is_empty() => monthly.clone(),
        _ => vec![
            estimated_revenue_point("Last Month", analytics.revenue.last_month),
            estimated_revenue_point("This Month", analytics.revenue.this_month),
        ],
    }
}

fn estimated_revenue_point(label: &str, revenue: f64) -> RevenuePoint {
    let expenses = round_half_up(revenue * EXPENSE_RATIO);
    RevenuePoint {
        month: label.to_string(),
        revenue,
        expenses,
        profit: revenue - expenses,
    }
}

/// Weekly delivery performance. Older services only report the aggregate,
/// in which case every weekday carries the same values.
pub fn delivery_performance(analytics: &AnalyticsSummary) -> Vec<DeliveryPerformancePoint> {
    let performance = &analytics.performance;
    if let Some(weekly) = &performance.weekly_data {
        return weekly
            .iter()
            .map(|week| DeliveryPerformancePoint {
                week: week.week.clone(),
                on_time: week.on_time,
                delayed: week.delayed,
                avg_delivery_time: week.avg_time,
            })
            .collect();
    }

    let on_time = performance.on_time_delivery;
    WEEKDAYS
        .iter()
        .map(|day| DeliveryPerformancePoint {
            week: day.to_string(),
            on_time,
            delayed: 100.0 - on_time,
            avg_delivery_time: performance.average_transit_time,
        })
        .collect()
}

pub fn inventory_status_slices(items: &[InventoryItem]) -> Vec<InventorySlice> {
    tally(items.iter().map(|item| item.status.as_str()))
        .into_iter()
        .map(|(status, value)| {
            let (name, color) = match StockStatus::from(status.to_string()) {
                StockStatus::Good => ("In Stock".to_string(), "#10b981"),
                StockStatus::Low => ("Low Stock".to_string(), "#f59e0b"),
                StockStatus::Out => ("Out of Stock".to_string(), "#ef4444"),
                StockStatus::Other(raw) => (raw, FALLBACK_COLOR),
            };
            InventorySlice {
                name,
                value,
                color: color.to_string(),
            }
        })
        .collect()
}

/// Item count per category. Not mounted on the default dashboard.
pub fn inventory_category_slices(items: &[InventoryItem]) -> Vec<InventorySlice> {
    tally(items.iter().map(|item| item.category.as_str()))
        .into_iter()
        .map(|(category, value)| {
            let color = CATEGORY_COLORS
                .iter()
                .find(|(name, _)| *name == category)
                .map(|(_, color)| *color)
                .unwrap_or(FALLBACK_COLOR);
            InventorySlice {
                name: category.to_string(),
                value,
                color: color.to_string(),
            }
        })
        .collect()
}

/// Counts occurrences, keeping keys in the order they were first seen.
fn tally<'a>(keys: impl Iterator<Item = &'a str>) -> Vec<(&'a str, u32)> {
    let mut order: Vec<(&str, u32)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for key in keys {
        match index.get(key) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(key, order.len());
                order.push((key, 1));
            }
        }
    }
    order
}

/// Newest shipments first, by shipped date. Undated shipments go last,
/// keeping the order the service returned them in.
pub fn recent_shipments(shipments: &[Shipment], limit: usize) -> Vec<RecentShipment> {
    let mut dated: Vec<_> = shipments
        .iter()
        .map(|s| (parse_date(&s.shipped_date), s))
        .collect();
    dated.sort_by(|(a, _), (b, _)| b.cmp(a));

    dated
        .into_iter()
        .take(limit)
        .map(|(_, s)| RecentShipment {
            id: s.id.clone(),
            destination: s.destination.clone(),
            status: s.status.to_string(),
            eta: s.estimated_delivery.clone(),
        })
        .collect()
}

pub fn inventory_levels(items: &[InventoryItem]) -> Vec<InventoryLevel> {
    items
        .iter()
        .map(|item| InventoryLevel {
            item: item.name.clone(),
            stock: item.stock,
            threshold: item.min_stock,
            status: item.status.as_str().to_string(),
            tone: match item.status {
                StockStatus::Good => BadgeTone::Green,
                StockStatus::Low => BadgeTone::Yellow,
                _ => BadgeTone::Red,
            },
        })
        .collect()
}

pub fn stat_cards(analytics: &AnalyticsSummary) -> Vec<StatCard> {
    let counts = &analytics.shipments;
    let share = |part: u64| {
        if counts.total == 0 {
            "0% of total".to_string()
        } else {
            let pct = round_half_up(part as f64 * 100.0 / counts.total as f64);
            format!("{}% of total", pct)
        }
    };

    vec![
        StatCard {
            title: "Total Shipments".to_string(),
            value: format_thousands(counts.total),
            detail: format!("{} returned", format_thousands(counts.returned)),
        },
        StatCard {
            title: "In Transit".to_string(),
            value: format_thousands(counts.in_transit),
            detail: share(counts.in_transit),
        },
        StatCard {
            title: "Delivered".to_string(),
            value: format_thousands(counts.delivered),
            detail: share(counts.delivered),
        },
        StatCard {
            title: "Revenue".to_string(),
            value: format_currency(analytics.revenue.total),
            detail: format!(
                "{} from last month",
                format_percent_change(analytics.revenue.growth)
            ),
        },
    ]
}
