//! Dashboard Page
//!
//! Score card, history chart and band table, refreshed on load and every
//! poll interval.

use gloo_timers::callback::Interval;
use leptos::*;
use std::rc::Rc;

use ecowatcher::dashboard::{Dashboard, DashboardConfig, PollStatus, RenderOutcome};

use crate::api::GlooEcoClient;
use crate::components::{
    CanvasChart, CardView, ChartSkeleton, EcoChart, GlooScheduler, ScoreCard, ScoreTableModal,
    SignalPanelView, TabButtons, Tabs,
};
use crate::state::global::DashboardState;

const PANEL_ACTUAL: &str = "panel-actual";
const PANEL_HISTORICO: &str = "panel-historico";
const PANEL_RANGOS: &str = "panel-rangos";

const TAB_BUTTONS: &[(&str, &str)] = &[
    (PANEL_ACTUAL, "Actual"),
    (PANEL_HISTORICO, "Histórico"),
    (PANEL_RANGOS, "Rangos"),
];

type EcoDashboard = Dashboard<GlooEcoClient, CanvasChart>;

/// One refresh cycle: card first, then the chart
async fn refresh(dashboard: &EcoDashboard, surface: &CanvasChart, mut view: CardView, state: DashboardState) {
    let canvas = surface.is_mounted().then_some(surface);
    let report = dashboard.tick(&mut view, canvas).await;

    if let PollStatus::Failed(e) = &report.poll {
        web_sys::console::error_1(&format!("Error cargando último ecoscore: {}", e).into());
    }
    if let RenderOutcome::Failed(e) = &report.render {
        web_sys::console::error_1(&format!("Error dibujando gráfico: {}", e).into());
    }

    state.mark_refreshed();
}

/// Dashboard page component
#[component]
pub fn DashboardPage() -> impl IntoView {
    let state = use_context::<DashboardState>().expect("DashboardState not found");

    let canvas_ref = create_node_ref::<html::Canvas>();
    let audio_ref = create_node_ref::<html::Audio>();

    let config = DashboardConfig::default();
    let interval_ms = config.poll_interval.as_millis() as u32;
    let dashboard = Rc::new(EcoDashboard::new(GlooEcoClient::from_storage(), config));
    let surface = CanvasChart::new(canvas_ref);
    let card = CardView::new(state, audio_ref);

    let run = move || {
        let dashboard = Rc::clone(&dashboard);
        let surface = surface.clone();
        spawn_local(async move {
            refresh(&dashboard, &surface, card, state).await;
        });
    };

    // Initial load once mounted, then on the poll interval
    let initial = run.clone();
    create_effect(move |_| initial());

    let interval = Interval::new(interval_ms, run);
    on_cleanup(move || drop(interval));

    let panels = SignalPanelView::new(
        &[PANEL_ACTUAL, PANEL_HISTORICO, PANEL_RANGOS],
        PANEL_ACTUAL,
    );
    let tabs = Tabs::new(Some(PANEL_ACTUAL.to_string()), panels, GlooScheduler);

    view! {
        <div class="dashboard">
            <header class="dashboard-header">
                <h1>"EcoWatcher"</h1>
                <ScoreTableModal />
            </header>

            <TabButtons tabs=tabs panels=panels buttons=TAB_BUTTONS />

            <section
                id=PANEL_ACTUAL
                class=move || panels.panel(PANEL_ACTUAL).class()
                style=move || panels.panel(PANEL_ACTUAL).style()
            >
                <ScoreCard audio_ref=audio_ref />
            </section>

            <section
                id=PANEL_HISTORICO
                class=move || panels.panel(PANEL_HISTORICO).class()
                style=move || panels.panel(PANEL_HISTORICO).style()
            >
                <h2>"Histórico"</h2>
                <Show when=move || state.last_refresh.get().is_none()>
                    <ChartSkeleton />
                </Show>
                <EcoChart canvas_ref=canvas_ref />
            </section>

            <section
                id=PANEL_RANGOS
                class=move || panels.panel(PANEL_RANGOS).class()
                style=move || panels.panel(PANEL_RANGOS).style()
            >
                <h2>"Rangos de EcoScore"</h2>
                <ul class="bands">
                    {ecowatcher::model::Severity::ALL
                        .into_iter()
                        .map(|s| view! {
                            <li class=format!("table-label {}", s.css_class())>
                                {format!("{} ({}): {}", s.label(), s.range_label(), s.advice())}
                            </li>
                        })
                        .collect_view()}
                </ul>
            </section>
        </div>
    }
}
