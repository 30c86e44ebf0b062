//! Score Table Modal
//!
//! Reference table of score bands in a `<dialog>`.

use leptos::*;
use web_sys::HtmlDialogElement;

use ecowatcher::model::Severity;
use ecowatcher::ui::{populate, Dialog, DialogError, ModalController, ModalOutcome, TableBody, TableCell};

/// A `<dialog>` element
pub struct DomDialog(pub HtmlDialogElement);

impl Dialog for DomDialog {
    fn show_modal(&self) -> Result<(), DialogError> {
        self.0
            .show_modal()
            .map_err(|e| DialogError(format!("{:?}", e)))
    }

    fn close(&self) -> Result<(), DialogError> {
        self.0.close();
        Ok(())
    }
}

/// Table body backed by a signal, rendered as `#tabla-body`
#[derive(Clone, Copy)]
pub struct SignalTableBody(pub RwSignal<Vec<Vec<TableCell>>>);

impl TableBody for SignalTableBody {
    fn clear(&mut self) {
        self.0.update(|rows| rows.clear());
    }

    fn append_row(&mut self, cells: &[TableCell]) {
        self.0.update(|rows| rows.push(cells.to_vec()));
    }
}

fn log_outcome(action: &str, outcome: ModalOutcome) {
    if let ModalOutcome::Failed(e) = outcome {
        web_sys::console::warn_1(&format!("No se pudo {} la tabla: {}", action, e).into());
    }
}

/// Button, dialog and table of score bands
#[component]
pub fn ScoreTableModal() -> impl IntoView {
    let dialog_ref = create_node_ref::<html::Dialog>();
    let rows = create_rw_signal(Vec::new());

    let mut body = SignalTableBody(rows);
    populate(&mut body, &Severity::reference_rows());

    let controller =
        move || ModalController::new(dialog_ref.get_untracked().map(|d| DomDialog((*d).clone())));

    view! {
        <button id="btn-tabla" class="btn-tabla" on:click=move |_| log_outcome("abrir", controller().open())>
            "Ver tabla de rangos"
        </button>

        <dialog id="modal-tabla" class="modal-tabla" node_ref=dialog_ref>
            <h3>"Rangos de EcoScore"</h3>
            <table>
                <thead>
                    <tr>
                        <th>"Rango"</th>
                        <th>"Estado"</th>
                    </tr>
                </thead>
                <tbody id="tabla-body">
                    {move || {
                        rows.get()
                            .into_iter()
                            .map(|cells| view! { <tr>{cells.into_iter().map(cell_view).collect_view()}</tr> })
                            .collect_view()
                    }}
                </tbody>
            </table>
            <button id="cerrar-tabla" on:click=move |_| log_outcome("cerrar", controller().close())>
                "Cerrar"
            </button>
        </dialog>
    }
}

fn cell_view(cell: TableCell) -> View {
    let class = cell.cell_class.unwrap_or_default();
    match cell.span_class {
        Some(span_class) => view! {
            <td class=class>
                <span class=span_class>{cell.text}</span>
            </td>
        }
        .into_view(),
        None => view! { <td class=class>{cell.text}</td> }.into_view(),
    }
}
