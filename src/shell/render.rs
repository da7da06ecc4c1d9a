use crate::models::{
    BadgeTone, DeliveryPerformancePoint, InventoryLevel, InventorySlice, RecentShipment,
    RevenuePoint, ShipmentRow, ShipmentTrendPoint, StatCard,
};

/// Plain-text rendering of a derived series.
pub trait ChartView {
    fn render(&self) -> String;
}

const NO_DATA: &str = "No data";

fn table(header: &[&str], rows: Vec<Vec<String>>) -> String {
    if rows.is_empty() {
        return NO_DATA.to_string();
    }

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let line = |cells: Vec<String>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![line(header.iter().map(|h| h.to_string()).collect())];
    out.extend(rows.into_iter().map(line));
    out.join("\n")
}

fn number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value)
    } else {
        format!("{:.2}", value)
    }
}

impl ChartView for Vec<StatCard> {
    fn render(&self) -> String {
        table(
            &["Metric", "Value", ""],
            self.iter()
                .map(|c| vec![c.title.clone(), c.value.clone(), c.detail.clone()])
                .collect(),
        )
    }
}

impl ChartView for Vec<ShipmentTrendPoint> {
    fn render(&self) -> String {
        table(
            &["Month", "Total Shipments", "Delivered", "In Transit", "Delayed"],
            self.iter()
                .map(|p| {
                    vec![
                        p.month.clone(),
                        p.shipments.to_string(),
                        p.delivered.to_string(),
                        p.in_transit.to_string(),
                        p.delayed.to_string(),
                    ]
                })
                .collect(),
        )
    }
}

impl ChartView for Vec<RevenuePoint> {
    fn render(&self) -> String {
        table(
            &["Period", "Revenue", "Expenses", "Profit"],
            self.iter()
                .map(|p| {
                    vec![
                        p.month.clone(),
                        number(p.revenue),
                        number(p.expenses),
                        number(p.profit),
                    ]
                })
                .collect(),
        )
    }
}

impl ChartView for Vec<DeliveryPerformancePoint> {
    fn render(&self) -> String {
        table(
            &["Week", "On Time (%)", "Delayed (%)", "Avg Days"],
            self.iter()
                .map(|p| {
                    vec![
                        p.week.clone(),
                        number(p.on_time),
                        number(p.delayed),
                        number(p.avg_delivery_time),
                    ]
                })
                .collect(),
        )
    }
}

impl ChartView for Vec<InventorySlice> {
    fn render(&self) -> String {
        let total: u32 = self.iter().map(|s| s.value).sum();
        table(
            &["Status", "Items", "Share", "Color"],
            self.iter()
                .map(|s| {
                    let share = if total == 0 {
                        0.0
                    } else {
                        s.value as f64 * 100.0 / total as f64
                    };
                    vec![
                        s.name.clone(),
                        s.value.to_string(),
                        format!("{:.0}%", share),
                        s.color.clone(),
                    ]
                })
                .collect(),
        )
    }
}

impl ChartView for Vec<ShipmentRow> {
    fn render(&self) -> String {
        table(
            &["Tracking", "Route", "Status", "Carrier"],
            self.iter()
                .map(|r| {
                    vec![
                        r.tracking_number.clone(),
                        r.route.clone(),
                        r.status.clone(),
                        r.carrier.clone(),
                    ]
                })
                .collect(),
        )
    }
}

impl ChartView for Vec<RecentShipment> {
    fn render(&self) -> String {
        table(
            &["Shipment", "Destination", "Status", "ETA"],
            self.iter()
                .map(|s| {
                    vec![
                        s.id.clone(),
                        s.destination.clone(),
                        s.status.clone(),
                        s.eta.clone(),
                    ]
                })
                .collect(),
        )
    }
}

fn badge(status: &str, tone: BadgeTone) -> String {
    match tone {
        BadgeTone::Green => format!("[{}]", status),
        BadgeTone::Yellow => format!("[{}] !", status),
        BadgeTone::Red => format!("[{}] !!", status),
    }
}

impl ChartView for Vec<InventoryLevel> {
    fn render(&self) -> String {
        table(
            &["Item", "Stock", "Status"],
            self.iter()
                .map(|l| {
                    vec![
                        l.item.clone(),
                        format!("{} units", l.stock),
                        badge(&l.status, l.tone),
                    ]
                })
                .collect(),
        )
    }
}
