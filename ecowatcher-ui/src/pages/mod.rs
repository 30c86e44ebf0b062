//! Pages
//!
//! Top-level page components, one per server-rendered path.

pub mod dashboard;
pub mod register;

pub use dashboard::DashboardPage;
pub use register::RegisterPage;
