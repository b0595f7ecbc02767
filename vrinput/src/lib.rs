use std::{fmt, sync::Arc};

use parking_lot::Mutex;

use vrinput_core::*;

pub use catalog::{ActionSetId, Catalog, CatalogError, InputSources};
pub use manifest::ActionManifest;
pub use scheduler::{ActiveSetScheduler, UpdateOutcome};
pub use vrinput_types::{
    action_set::{ActionSetUsage, Slot},
    boundary::InputBoundary,
    input_source::InputSource,
    record::{ActiveRecord, RECORD_SIZE},
    ActionSetHandle, FrameIndex, InputError, InputSourceHandle,
};

/**
 * Shared entry point for hosts that touch activation state from more than one place
 *
 * Cheap to clone, every clone drives the same scheduler behind one lock
 */
pub struct VrInput<B> {
    scheduler: Arc<Mutex<ActiveSetScheduler<B>>>,
    catalog: Arc<Catalog>,
}

impl<B> Clone for VrInput<B> {
    fn clone(&self) -> Self {
        Self {
            scheduler: self.scheduler.clone(),
            catalog: self.catalog.clone(),
        }
    }
}

impl<B: InputBoundary> VrInput<B> {
    pub fn new(catalog: Catalog, boundary: B) -> Self {
        let catalog = Arc::new(catalog);
        Self {
            scheduler: Arc::new(Mutex::new(ActiveSetScheduler::new(
                catalog.clone(),
                boundary,
            ))),
            catalog,
        }
    }

    /// Parses `json` and resolves every declared action set and both hands
    pub fn from_manifest_json<S, F>(
        json: &str,
        resolve_source: S,
        resolve_action_set: F,
        boundary: B,
    ) -> Result<Self, CatalogError>
    where
        S: FnMut(&str) -> Result<InputSourceHandle, InputError>,
        F: FnMut(&str) -> Result<ActionSetHandle, InputError>,
    {
        let manifest = ActionManifest::from_json(json)?;
        let sources = InputSources::new(resolve_source)?;
        let catalog = Catalog::from_manifest(&manifest, sources, resolve_action_set)?;
        log::debug!("vrinput: loaded {} action sets", catalog.len());
        Ok(Self::new(catalog, boundary))
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn action_set(&self, name: &str) -> Option<VrActionSet<B>> {
        self.catalog.find(name).map(|id| VrActionSet {
            id,
            input: self.clone(),
        })
    }

    pub fn action_sets(&self) -> impl Iterator<Item = VrActionSet<B>> + '_ {
        self.catalog.ids().map(|id| VrActionSet {
            id,
            input: self.clone(),
        })
    }

    pub fn disable_all(&self) {
        self.scheduler.lock().disable_all();
    }

    pub fn mark_changed(&self) {
        self.scheduler.lock().mark_changed();
    }

    /// Call once per host frame
    pub fn update(&self, frame: FrameIndex, force: bool) -> UpdateOutcome {
        self.scheduler.lock().update(frame, force)
    }

    pub fn debug_text(&self) -> String {
        self.scheduler.lock().debug_text().to_owned()
    }

    pub fn submission_buffer(&self) -> Vec<ActiveRecord> {
        self.scheduler.lock().submission_buffer().to_vec()
    }

    /// Runs `f` with the scheduler locked, for batching several edits under one lock
    pub fn with_scheduler<R>(&self, f: impl FnOnce(&mut ActiveSetScheduler<B>) -> R) -> R {
        f(&mut self.scheduler.lock())
    }
}

/// One action set of a [VrInput]
pub struct VrActionSet<B> {
    id: ActionSetId,
    input: VrInput<B>,
}

impl<B> Clone for VrActionSet<B> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            input: self.input.clone(),
        }
    }
}

impl<B> fmt::Debug for VrActionSet<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VrActionSet")
            .field("path", &self.full_path())
            .field("handle", &self.handle())
            .finish()
    }
}

impl<B> VrActionSet<B> {
    pub fn id(&self) -> ActionSetId {
        self.id
    }

    pub fn handle(&self) -> ActionSetHandle {
        self.input.catalog.action_set(self.id).handle
    }

    pub fn full_path(&self) -> &str {
        &self.input.catalog.action_set(self.id).full_path
    }

    pub fn short_name(&self) -> &str {
        &self.input.catalog.action_set(self.id).short_name
    }

    pub fn usage(&self) -> ActionSetUsage {
        self.input.catalog.action_set(self.id).usage
    }
}

impl<B: InputBoundary> VrActionSet<B> {
    pub fn activate(&self, source: InputSource, priority: i32, disable_others: bool) {
        self.input.scheduler.lock().activate(
            self.id,
            source,
            priority,
            Slot::Primary,
            disable_others,
        );
    }

    pub fn activate_secondary(&self, source: InputSource, priority: i32, disable_others: bool) {
        self.input.scheduler.lock().activate(
            self.id,
            source,
            priority,
            Slot::Secondary,
            disable_others,
        );
    }

    pub fn deactivate(&self, source: InputSource) {
        self.input.scheduler.lock().deactivate(self.id, source);
    }

    pub fn is_active(&self, source: InputSource) -> bool {
        self.input.scheduler.lock().is_active(self.id, source)
    }

    pub fn priority(&self, source: InputSource) -> Option<i32> {
        self.input
            .scheduler
            .lock()
            .priority(self.id, source, Slot::Primary)
    }

    pub fn last_changed(&self, source: InputSource) -> Option<FrameIndex> {
        self.input.scheduler.lock().last_changed(self.id, source)
    }
}

/**
 * Adapts a raw native call, `(records, record_size) -> error code`, into an [InputBoundary]
 *
 * A zero code is success, anything else is mapped through [InputError::from_raw]
 */
pub struct FnBoundary<F>(pub F);

impl<F> fmt::Debug for FnBoundary<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnBoundary")
    }
}

impl<F> InputBoundary for FnBoundary<F>
where
    F: FnMut(&[ActiveRecord], u32) -> i32,
{
    fn update_action_state(
        &mut self,
        records: &[ActiveRecord],
        record_size: u32,
    ) -> Result<(), InputError> {
        match InputError::from_raw((self.0)(records, record_size)) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
