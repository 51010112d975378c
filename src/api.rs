//! wasm-bindgen surface
//!
//! Thin wrappers: every method forwards to `AppState` and turns errors into
//! JS strings.

use wasm_bindgen::prelude::*;

use crate::constraint::ConstraintSet;
use crate::state::{AppState, RecordHandle};

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Install the panic hook and console logger.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

/// Host-owned handle to the mapper state and the constraints built so far.
#[wasm_bindgen]
#[derive(Default)]
pub struct App {
    state: AppState,
    constraints: ConstraintSet,
}

#[wasm_bindgen]
impl App {
    #[wasm_bindgen(constructor)]
    pub fn new() -> App {
        App::default()
    }

    /// Load a scene document, discarding every authoring record
    pub fn load_scene(&mut self, json: &str) -> Result<(), JsValue> {
        self.constraints = ConstraintSet::new();
        self.state.load_scene(json).map_err(to_js_error)
    }

    pub fn export_scene(&self) -> Result<String, JsValue> {
        self.state
            .scene()
            .map_err(to_js_error)?
            .to_json_string()
            .map_err(to_js_error)
    }

    pub fn add_record(
        &mut self,
        root_name: &str,
        source_root: Option<String>,
    ) -> Result<RecordHandle, JsValue> {
        self.state
            .add_record(root_name, source_root.as_deref())
            .map_err(to_js_error)
    }

    pub fn set_source_root(&mut self, handle: RecordHandle, slot_name: &str) -> Result<(), JsValue> {
        self.state
            .set_source_root(handle, slot_name)
            .map_err(to_js_error)
    }

    /// Run automatic mapping; returns the number of mapped bones
    pub fn auto_map(&mut self, handle: RecordHandle) -> Result<usize, JsValue> {
        self.state.auto_map(handle).map_err(to_js_error)
    }

    pub fn clear_mappings(&mut self, handle: RecordHandle) -> Result<(), JsValue> {
        self.state.clear_mappings(handle).map_err(to_js_error)
    }

    /// Mapping list as an array of `{ prosthetic_bone, avatar_slot, rotation_offset }`
    pub fn mappings(&self, handle: RecordHandle) -> Result<JsValue, JsValue> {
        let mappings = self.state.mappings(handle).map_err(to_js_error)?;
        serde_wasm_bindgen::to_value(&mappings).map_err(to_js_error)
    }

    /// Apply every authored record; returns the applied summaries
    pub fn run_build(&mut self) -> Result<JsValue, JsValue> {
        let applied = self
            .state
            .run_build(&mut self.constraints)
            .map_err(to_js_error)?;
        serde_wasm_bindgen::to_value(&applied).map_err(to_js_error)
    }

    /// Every constraint built so far, ordered by target bone
    pub fn constraints(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.constraints.specs()).map_err(to_js_error)
    }

    pub fn constraints_json(&self) -> Result<String, JsValue> {
        self.constraints.to_json_string().map_err(to_js_error)
    }
}
