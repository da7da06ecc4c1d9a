pub mod dashboard;
pub mod shipments;
