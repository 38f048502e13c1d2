//! Angle slider for one gimbal axis.
//!
//! A native range input with a live degree readout. The slider value is
//! kept in a signal owned by the panel.

use leptos::prelude::*;
use leptos::wasm_bindgen::JsCast;

/// Range limits and step for an angle slider, in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AngleSliderConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for AngleSliderConfig {
    fn default() -> Self {
        Self {
            min: -360.0,
            max: 360.0,
            step: 1.0,
        }
    }
}

/// Format an angle for the readout next to the slider.
pub fn format_degrees(v: f64) -> String {
    if v == 0.0 {
        return "0°".to_string();
    }
    if v.fract() == 0.0 {
        format!("{:.0}°", v)
    } else {
        format!("{:.1}°", v)
    }
}

fn input_event_value(ev: &leptos::web_sys::Event) -> Option<f64> {
    ev.target()
        .map(|t| t.unchecked_into::<web_sys::HtmlInputElement>().value())
        .and_then(|s| s.parse::<f64>().ok())
}

#[component]
pub fn AngleSlider(
    /// Axis label ("X", "Y", "Z").
    label: &'static str,
    /// Track color, matching the ring.
    color: &'static str,
    config: AngleSliderConfig,
    /// Angle in degrees.
    value: RwSignal<f64>,
) -> impl IntoView {
    let AngleSliderConfig { min, max, step } = config;

    let on_input = move |ev: leptos::web_sys::Event| {
        if let Some(v) = input_event_value(&ev) {
            value.set(v.clamp(min, max));
        }
    };

    view! {
        <div class="angle-slider" style="display: flex; flex-direction: row; align-items: center; gap: 1em;">
            <label class="slider-label" style=format!("color: {};", color)>{label}</label>
            <input
                type="range"
                min=min.to_string()
                max=max.to_string()
                step=step.to_string()
                style=format!("flex: 1; accent-color: {};", color)
                prop:value=move || value.get().to_string()
                on:input=on_input
            />
            <span class="slider-value" style="width: 6ch; font-family: monospace;">
                {move || format_degrees(value.get())}
            </span>
        </div>
    }
}
