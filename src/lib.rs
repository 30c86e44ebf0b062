//! # EcoWatcher
//!
//! Presentation layer for the EcoWatcher eco-score monitor: polls the backend
//! for the latest reading, classifies and trends it, keeps a history chart
//! current and drives the small UI controllers around the dashboard.
//!
//! ## Modules
//!
//! - [`model`]: readings, severity bands and trend indicator
//! - [`client`]: the [`EcoApi`](client::EcoApi) backend interface and its HTTP client
//! - [`dashboard`]: latest-score poller, chart renderer and the refresh loop
//! - [`ui`]: modal, tabs, registration form and score table controllers
//! - `config` / `logging`: TOML configuration and tracing setup (native only)
//!
//! The core compiles without the `native` feature so the Leptos frontend can
//! reuse it from WASM.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ecowatcher::client::{HttpEcoClient, HttpEcoClientConfig};
//! use ecowatcher::dashboard::{Dashboard, DashboardConfig, TerminalView, TextChart};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HttpEcoClient::new(HttpEcoClientConfig::default())?;
//!     let dashboard: Dashboard<_, TextChart> = Dashboard::new(client, DashboardConfig::default());
//!
//!     let surface = TextChart::default();
//!     let mut view = TerminalView::new(std::io::stdout());
//!     let report = dashboard.tick(&mut view, Some(&surface)).await;
//!
//!     println!("ok: {}", report.is_ok());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod dashboard;
pub mod model;
pub mod ui;

#[cfg(feature = "native")]
pub mod config;
#[cfg(feature = "native")]
pub mod logging;

// Re-export top-level types for convenience
pub use model::{BandRow, HistoryWindow, Latest, Reading, Severity, Trend, TrendKind};

pub use client::{ClientError, EcoApi};

pub use dashboard::{
    ChartRenderer, ChartSurface, Dashboard, DashboardConfig, PollReport, PollStatus, Poller,
    RenderOutcome, ScoreView, TickReport, ViewEffect,
};

pub use ui::{
    ModalController, ModalOutcome, RegistrationForm, TabGroup, TabSwitcher, TableBody,
};

#[cfg(feature = "native")]
pub use client::{HttpEcoClient, HttpEcoClientConfig};

#[cfg(feature = "native")]
pub use config::{Config, ConfigError, LoggingConfig};
