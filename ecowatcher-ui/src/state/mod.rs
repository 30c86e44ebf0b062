//! State Management
//!
//! Signals shared by the dashboard components.

pub mod global;

pub use global::{provide_dashboard_state, DashboardState};
