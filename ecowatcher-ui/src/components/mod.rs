//! UI Components
//!
//! Leptos components for the dashboard and the sign-up page.

pub mod chart;
pub mod loading;
pub mod modal;
pub mod register_form;
pub mod score_card;
pub mod tabs;

pub use chart::{CanvasChart, EcoChart};
pub use loading::ChartSkeleton;
pub use modal::ScoreTableModal;
pub use register_form::RegisterForm;
pub use score_card::{CardView, ScoreCard};
pub use tabs::{GlooScheduler, SignalPanelView, TabButtons, Tabs};
