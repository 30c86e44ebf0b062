//! Domain Model
//!
//! Readings delivered by the backend and the values derived from them.

pub mod reading;
pub mod severity;
pub mod trend;

pub use reading::{
    HistoryResponse, HistoryWindow, Latest, LatestResponse, Reading, NO_DATA_STATUS,
    TIMESTAMP_FORMAT,
};
pub use severity::{BandRow, Severity, CRITICAL_BELOW, GOOD_BELOW, MODERATE_BELOW};
pub use trend::{Trend, TrendKind, TREND_THRESHOLD};
