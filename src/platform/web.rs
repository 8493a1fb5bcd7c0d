//! Browser binding
//!
//! JS owns the animation frame and the DOM; it forwards pointer, stick and
//! resize events here and renders from [`WebMatch::snapshot_json`].

use wasm_bindgen::prelude::*;

use crate::events::EventLog;
use crate::persistence::LocalStorageStore;
use crate::session::{SessionContext, SimulationLoop};
use crate::sim::InputMode;
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Logger already installed by an earlier instance
        return;
    }
    log::info!("CavBot FC core loaded");
}

/// One match session driven from JS
#[wasm_bindgen]
pub struct WebMatch {
    inner: SimulationLoop,
    events: EventLog,
}

#[wasm_bindgen]
impl WebMatch {
    /// `analog` selects stick input instead of pointer input. `tuning_json`
    /// may override any feel constant.
    #[wasm_bindgen(constructor)]
    pub fn new(analog: bool, seed: Option<f64>, tuning_json: Option<String>) -> WebMatch {
        let seed = seed.unwrap_or_else(|| js_sys::Math::random() * u32::MAX as f64) as u64;
        let tuning = match tuning_json.as_deref().map(Tuning::from_json) {
            Some(Ok(t)) => t,
            Some(Err(e)) => {
                log::warn!("Ignoring tuning override: {}", e);
                Tuning::default()
            }
            None => Tuning::default(),
        };
        let mode = if analog { InputMode::Analog } else { InputMode::Pointer };
        let events = EventLog::new();
        let context = SessionContext::new(LocalStorageStore::new(), events.clone());
        WebMatch {
            inner: SimulationLoop::new(context, mode, tuning, seed),
            events,
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.inner.resize(width, height);
    }

    pub fn pointer(&mut self, x: f32, y: f32) {
        self.inner.set_player_target(x, y);
    }

    pub fn analog(&mut self, dx: f32, dy: f32) {
        self.inner.set_analog_vector(dx, dy);
    }

    /// Returns false once the match is over
    pub fn frame(&mut self, frame_ms: f32) -> bool {
        self.inner.frame(frame_ms)
    }

    pub fn restart(&mut self) {
        self.inner.restart();
    }

    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.inner.snapshot()).unwrap_or_else(|e| {
            log::warn!("Snapshot serialization failed: {}", e);
            "null".to_string()
        })
    }

    /// Events since the last call, as a JSON array
    pub fn drain_events_json(&mut self) -> String {
        serde_json::to_string(&self.events.take()).unwrap_or_else(|e| {
            log::warn!("Event serialization failed: {}", e);
            "[]".to_string()
        })
    }

    pub fn progression_json(&self) -> String {
        match self.inner.progression() {
            Some(p) => serde_json::to_string(p).unwrap_or_else(|_| "null".to_string()),
            None => "null".to_string(),
        }
    }
}
