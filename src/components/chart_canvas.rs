//! Canvas hosting one Chart.js chart.
//!
//! Each config change destroys the previous chart before drawing the new
//! one, so a canvas never holds more than one live instance.

use leptos::html::Canvas;
use leptos::prelude::*;
use serde_json::Value;
use tracing::warn;

use crate::charts::ChartHandle;

#[component]
pub fn ChartCanvas(
    /// Chart.js config; `None` leaves the canvas blank.
    config: Signal<Option<Value>>,
    /// Canvas element id, also used as its accessible label.
    id: &'static str,
) -> impl IntoView {
    let canvas_ref = NodeRef::<Canvas>::new();
    let chart = StoredValue::new_local(None::<ChartHandle>);

    Effect::new(move |_| {
        let config = config.get();
        let Some(canvas) = canvas_ref.get() else {
            return;
        };

        chart.update_value(|slot| {
            if let Some(previous) = slot.take() {
                previous.destroy();
            }
            let Some(config) = config else {
                return;
            };
            match ChartHandle::create(&canvas, &config) {
                Ok(handle) => *slot = Some(handle),
                Err(e) => warn!(chart = id, error = ?e, "failed to draw chart"),
            }
        });
    });

    on_cleanup(move || {
        chart.update_value(|slot| {
            if let Some(previous) = slot.take() {
                previous.destroy();
            }
        });
    });

    view! {
        <canvas id=id node_ref=canvas_ref aria-label=id></canvas>
    }
}
