pub mod api;
pub mod charts;
pub mod state;
