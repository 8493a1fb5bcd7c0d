//! Platform bindings
//!
//! The simulation core is platform-free; this module adapts it to hosts.
//! - `web`: wasm-bindgen wrapper with LocalStorage progression (wasm32 only)

#[cfg(target_arch = "wasm32")]
pub mod web;
