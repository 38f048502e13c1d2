//! Gimbal visualizer for Euler / Tait-Bryan angles.
//!
//! Three nested rings, one per axis, show how elementary rotations compose.
//! [`gimbal::compute_placements`] is the pure engine; [`gimbal::Gimbal`]
//! applies it to the ring objects of a [`document::Document`] and can drive
//! a linked object with the composed rotation. [`app`] is a browser panel
//! with one slider per angle.

pub mod app;
pub mod document;
pub mod error;
pub mod gimbal;
pub mod placement;
pub mod rotation;

#[cfg(test)]
mod test_utils;

pub use error::{GimbalError, Result};

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    let _ = console_log::init_with_level(log::Level::Debug);
    app::main();
}
