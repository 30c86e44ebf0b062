//! Loading Component
//!
//! Placeholders shown while the first reading is on its way.

use leptos::*;

/// Inline loading spinner
#[component]
pub fn InlineLoading() -> impl IntoView {
    view! {
        <span class="inline-block loading-spinner" />
    }
}

/// Skeleton loader for the chart
#[component]
pub fn ChartSkeleton() -> impl IntoView {
    view! {
        <div class="chart-skeleton animate-pulse">
            <InlineLoading />
            <span>"Cargando histórico..."</span>
        </div>
    }
}
