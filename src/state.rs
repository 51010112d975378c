//! Centralized application state with context passing
//!
//! `AppState` owns the loaded scene and every authoring record. Records are
//! addressed by `RecordHandle`s so the wasm bindings stay thin wrappers that
//! forward to these methods.

use crate::authoring::{AppliedRecord, AuthoringRecord, AuthoringState};
use crate::bone::BoneSlot;
use crate::constraint::ConstraintApplier;
use crate::error::{StateError, StateResult};
use crate::resolver::BoneMapping;
use crate::scene::Scene;

pub type RecordHandle = u32;

#[derive(Debug, Default)]
pub struct AppState {
    scene: Option<Scene>,
    records: Vec<AuthoringState>,
}

fn parse_slot(name: &str) -> StateResult<BoneSlot> {
    BoneSlot::from_name(name).ok_or_else(|| StateError::UnknownSlot(name.to_string()))
}

/// Authored record behind `handle`
fn authored_mut(
    records: &mut [AuthoringState],
    handle: RecordHandle,
) -> StateResult<&mut AuthoringRecord> {
    records
        .get_mut(handle as usize)
        .ok_or(StateError::UnknownRecord(handle))?
        .record_mut()
        .ok_or(StateError::AlreadyApplied(handle))
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the scene. Existing records point into the old scene and are dropped.
    pub fn load_scene(&mut self, json: &str) -> StateResult<()> {
        let scene = Scene::from_json(json)?;
        log::info!(
            "Loaded scene with {} bones, {} bound slots",
            scene.tree.len(),
            scene.rig.bound().count()
        );
        self.scene = Some(scene);
        self.records.clear();
        Ok(())
    }

    pub fn scene(&self) -> StateResult<&Scene> {
        self.scene.as_ref().ok_or(StateError::NoScene)
    }

    /// Create an authoring record for the named prosthetic root.
    ///
    /// `source_root` defaults to Chest.
    pub fn add_record(
        &mut self,
        root_name: &str,
        source_root: Option<&str>,
    ) -> StateResult<RecordHandle> {
        let scene = self.scene()?;
        let root = scene
            .find_by_name(root_name)
            .ok_or_else(|| StateError::UnknownBone(root_name.to_string()))?;
        let source_root = match source_root {
            Some(name) => parse_slot(name)?,
            None => BoneSlot::DEFAULT_SOURCE_ROOT,
        };

        let handle = self.records.len() as RecordHandle;
        self.records.push(AuthoringState::Authored(
            AuthoringRecord::new(root).with_source_root(source_root),
        ));
        Ok(handle)
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn record(&self, handle: RecordHandle) -> StateResult<&AuthoringState> {
        self.records
            .get(handle as usize)
            .ok_or(StateError::UnknownRecord(handle))
    }

    pub fn set_source_root(&mut self, handle: RecordHandle, slot_name: &str) -> StateResult<()> {
        let slot = parse_slot(slot_name)?;
        authored_mut(&mut self.records, handle)?.source_root = slot;
        Ok(())
    }

    /// Resolve the record's mappings against the current scene.
    pub fn auto_map(&mut self, handle: RecordHandle) -> StateResult<usize> {
        let scene = self.scene.as_ref().ok_or(StateError::NoScene)?;
        let record = authored_mut(&mut self.records, handle)?;
        Ok(record.auto_map(&scene.tree, &scene.rig)?)
    }

    pub fn clear_mappings(&mut self, handle: RecordHandle) -> StateResult<()> {
        authored_mut(&mut self.records, handle)?.clear_mappings();
        Ok(())
    }

    /// Current mapping list; applied records have none left.
    pub fn mappings(&self, handle: RecordHandle) -> StateResult<&[BoneMapping]> {
        Ok(self
            .record(handle)?
            .record()
            .map(|record| record.mappings.as_slice())
            .unwrap_or(&[]))
    }

    /// Build step: apply every authored record in handle order.
    ///
    /// Rejected records stay authored and are reported through the log.
    /// Returns the records applied by this call.
    pub fn run_build<A: ConstraintApplier>(
        &mut self,
        applier: &mut A,
    ) -> StateResult<Vec<AppliedRecord>> {
        let scene = self.scene.as_ref().ok_or(StateError::NoScene)?;
        let mut applied = Vec::new();

        for (handle, slot) in self.records.iter_mut().enumerate() {
            if slot.is_applied() {
                continue;
            }
            let state = std::mem::take(slot);
            let (state, error) = state.apply(&scene.tree, &scene.rig, applier);
            if let Some(error) = error {
                log::error!("Record {}: {}", handle, error);
            }
            if let AuthoringState::Applied(record) = &state {
                applied.push(record.clone());
            }
            *slot = state;
        }

        log::info!(
            "Build applied {} of {} records",
            applied.len(),
            self.records.len()
        );
        Ok(applied)
    }
}
