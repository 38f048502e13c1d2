use std::cell::RefCell;
use std::rc::Rc;

use leptos::mount::mount_to;
use leptos::prelude::*;
use leptos::wasm_bindgen::JsCast;

mod angle_slider;

use angle_slider::{AngleSlider, AngleSliderConfig};

use crate::document::MemoryDocument;
use crate::gimbal::{AxisOrder, EulerAngles, Gimbal, GimbalConfig};
use crate::placement::Vector;

/// Document shared between the panel and whoever else reads it.
pub type SharedDocument = Rc<RefCell<MemoryDocument>>;
pub type SharedGimbal = Rc<RefCell<Gimbal>>;

// ---------------------------------------------------------------------------
// GimbalPanel
// ---------------------------------------------------------------------------

/// Three angle sliders and an order selector. Any change stores the new
/// values on the gimbal and recomputes its placements in `document`.
#[component]
pub fn GimbalPanel(document: SharedDocument, gimbal: SharedGimbal) -> impl IntoView {
    let (initial, initial_order) = {
        let g = gimbal.borrow();
        (g.config().angles(), g.config().order())
    };
    let x = RwSignal::new(initial.x);
    let y = RwSignal::new(initial.y);
    let z = RwSignal::new(initial.z);
    let order = RwSignal::new(initial_order);
    let writes = RwSignal::new(0usize);

    // Runs once on mount and again whenever a slider or the order changes.
    Effect::new(move || {
        let angles = EulerAngles::new(x.get(), y.get(), z.get());
        let order = order.get();
        let mut gimbal = gimbal.borrow_mut();
        if let Err(e) = gimbal.set_angles(angles) {
            log::error!("rejected angles {:?}: {}", angles, e);
            return;
        }
        gimbal.set_order(order);
        match gimbal.recompute(&mut *document.borrow_mut()) {
            Ok(report) => {
                log::debug!("recompute wrote {} placements", report.writes());
                writes.update(|w| *w += report.writes());
            }
            Err(e) => log::error!("recompute failed: {}", e),
        }
    });

    let on_order_change = move |ev: leptos::web_sys::Event| {
        let value = ev
            .target()
            .map(|t| t.unchecked_into::<web_sys::HtmlSelectElement>().value())
            .unwrap_or_default();
        if let Some(o) = AxisOrder::from_label(&value) {
            order.set(o);
        }
    };

    let slider_config = AngleSliderConfig::default();

    view! {
        <div class="control-section">
            <h2>"Angles"</h2>
            <AngleSlider label="X" color="red" config=slider_config value=x />
            <AngleSlider label="Y" color="green" config=slider_config value=y />
            <AngleSlider label="Z" color="blue" config=slider_config value=z />
            <div class="convention-row">
                "Order: "
                <select
                    prop:value=move || order.get().label()
                    on:change=on_order_change
                >
                    {AxisOrder::ALL
                        .into_iter()
                        .map(|o| view! { <option value=o.label()>{o.label()}</option> })
                        .collect_view()}
                </select>
            </div>
            <p class="write-count">{move || format!("Placement writes: {}", writes.get())}</p>
        </div>
    }
}

// ---------------------------------------------------------------------------
// Mount
// ---------------------------------------------------------------------------

pub fn main() {
    console_error_panic_hook::set_once();

    let mut document = MemoryDocument::new("Gimbal");
    let gimbal = match Gimbal::create(&mut document, "Gimbal", GimbalConfig::default(), Vector::ZERO) {
        Ok(gimbal) => gimbal,
        Err(e) => {
            log::error!("failed to create gimbal: {}", e);
            return;
        }
    };
    log::info!("document {} holds {} objects", document.name(), document.len());
    let document: SharedDocument = Rc::new(RefCell::new(document));
    let gimbal: SharedGimbal = Rc::new(RefCell::new(gimbal));

    let Some(root) = leptos::tachys::dom::document().get_element_by_id("leptos-app") else {
        log::error!("missing #leptos-app element");
        return;
    };
    let root = root.unchecked_into::<leptos::web_sys::HtmlElement>();

    mount_to(root, move || {
        view! {
            <h1>"Gimbal Visualizer"</h1>
            <GimbalPanel document=document.clone() gimbal=gimbal.clone() />
        }
    })
    .forget();
}
