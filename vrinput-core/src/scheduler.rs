use std::sync::Arc;

use itertools::Itertools;
use log::{debug, error, trace};
use strum::EnumCount;
use vrinput_types::{
    action_set::Slot,
    boundary::InputBoundary,
    input_source::InputSource,
    record::{ActiveRecord, RECORD_SIZE},
    FrameIndex, InputError,
};

use crate::{
    catalog::{ActionSetId, Catalog},
    internal::{
        binding_table::{ActiveBinding, BindingTable},
        buffer_pool::BufferPool,
    },
};

/// What a call to [ActiveSetScheduler::update] ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Already updated this frame
    SkippedSameFrame,
    /// No action set is active, the boundary was not called
    NothingActive,
    Submitted { count: usize },
    /// The boundary rejected the submission. State is kept and resubmitted on a later update
    Failed(InputError),
}

/**
 * Tracks which action sets are active for which input source and hands the sorted active set
 * array to the native runtime at most once per frame
 *
 * Activation changes only edit the binding table and mark it changed, the submission buffer is
 * rebuilt lazily on the next [ActiveSetScheduler::update]. Buffers are pooled by length so a
 * stable number of active sets never allocates.
 *
 * Not synchronized. Share it behind a single lock if more than one thread touches it.
 */
#[derive(Debug)]
pub struct ActiveSetScheduler<B> {
    catalog: Arc<Catalog>,
    boundary: B,

    bindings: BindingTable,
    last_changed: Vec<Option<FrameIndex>>,
    changed: bool,

    last_update_frame: Option<FrameIndex>,

    working: Vec<ActiveBinding>,
    submission: Box<[ActiveRecord]>,
    pool: BufferPool,

    debug_text: String,
}

impl<B: InputBoundary> ActiveSetScheduler<B> {
    pub fn new(catalog: Arc<Catalog>, boundary: B) -> Self {
        let set_count = catalog.len();
        Self {
            bindings: BindingTable::new(set_count),
            last_changed: vec![None; set_count * InputSource::COUNT],
            changed: false,
            last_update_frame: None,
            working: Vec::new(),
            submission: Vec::new().into_boxed_slice(),
            pool: BufferPool::new(),
            debug_text: String::new(),
            catalog,
            boundary,
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn boundary(&self) -> &B {
        &self.boundary
    }

    pub fn boundary_mut(&mut self) -> &mut B {
        &mut self.boundary
    }

    pub fn into_boundary(self) -> B {
        self.boundary
    }

    fn check(&self, action_set: ActionSetId) {
        assert!(
            self.catalog.contains(action_set),
            "vrinput: action set {action_set:?} is not part of this catalog ({} sets)",
            self.catalog.len()
        );
    }

    fn stamp(&mut self, action_set: ActionSetId, source: InputSource) {
        let idx = action_set.index() * InputSource::COUNT + source.index();
        self.last_changed[idx] = Some(self.last_update_frame.unwrap_or_default());
    }

    /**
     * Activates `action_set` for `source` in `slot` with `priority`, replacing whatever that
     * slot held before
     *
     * With `disable_others` every binding of every set is dropped first, this one included.
     * Nothing reaches the native runtime until the next update
     */
    pub fn activate(
        &mut self,
        action_set: ActionSetId,
        source: InputSource,
        priority: i32,
        slot: Slot,
        disable_others: bool,
    ) {
        self.check(action_set);

        if disable_others {
            self.disable_all();
        }

        let previous = self.bindings.insert(action_set, source, slot, priority);
        if previous.is_none() {
            self.stamp(action_set, source);
        }
        self.changed = true;

        debug!(
            "vrinput: activated {} for {} ({slot:?}) at priority {priority}",
            self.catalog.action_set(action_set).short_name,
            source.name(),
        );
    }

    /// Drops both slots of `action_set` for exactly `source`. Does nothing if neither was active
    pub fn deactivate(&mut self, action_set: ActionSetId, source: InputSource) {
        self.check(action_set);

        let mut removed = false;
        for slot in Slot::ALL {
            removed |= self.bindings.remove(action_set, source, slot).is_some();
        }

        if removed {
            self.stamp(action_set, source);
            self.changed = true;
            debug!(
                "vrinput: deactivated {} for {}",
                self.catalog.action_set(action_set).short_name,
                source.name(),
            );
        }
    }

    pub fn disable_all(&mut self) {
        if self.bindings.is_empty() {
            return;
        }

        let mut removed = Vec::with_capacity(self.bindings.len());
        self.bindings.clear(|binding| removed.push(binding));
        for binding in removed {
            trace!(
                "vrinput: dropping {} for {} ({:?})",
                self.catalog.action_set(binding.action_set).short_name,
                binding.source.name(),
                binding.slot
            );
            self.stamp(binding.action_set, binding.source);
        }
        self.changed = true;
        debug!("vrinput: disabled all action sets");
    }

    /// Forces the next update to rebuild the submission buffer
    pub fn mark_changed(&mut self) {
        self.changed = true;
    }

    pub fn is_active(&self, action_set: ActionSetId, source: InputSource) -> bool {
        self.check(action_set);
        Slot::ALL
            .iter()
            .any(|slot| self.bindings.get(action_set, source, *slot).is_some())
    }

    pub fn priority(
        &self,
        action_set: ActionSetId,
        source: InputSource,
        slot: Slot,
    ) -> Option<i32> {
        self.check(action_set);
        self.bindings
            .get(action_set, source, slot)
            .map(|binding| binding.priority)
    }

    /// Frame of the last update before `action_set` was turned on or off for `source`
    pub fn last_changed(
        &self,
        action_set: ActionSetId,
        source: InputSource,
    ) -> Option<FrameIndex> {
        self.check(action_set);
        self.last_changed[action_set.index() * InputSource::COUNT + source.index()]
    }

    pub fn active_count(&self) -> usize {
        self.bindings.len()
    }

    /// The array last built for the native runtime. Stale until the next update if changed
    pub fn submission_buffer(&self) -> &[ActiveRecord] {
        &self.submission
    }

    /// One line per submitted record: priority, source and set name, tab separated
    pub fn debug_text(&self) -> &str {
        &self.debug_text
    }

    /**
     * Submits the active sets to the native runtime
     *
     * Without `force` this is a no-op if `frame` was already updated. The buffer is rebuilt
     * first if anything changed since the last rebuild. Native errors are logged and returned
     * as [UpdateOutcome::Failed], they never undo activation state
     */
    pub fn update(&mut self, frame: FrameIndex, force: bool) -> UpdateOutcome {
        if !force && self.last_update_frame == Some(frame) {
            trace!("vrinput: already updated frame {frame}");
            return UpdateOutcome::SkippedSameFrame;
        }
        self.last_update_frame = Some(frame);

        if self.changed {
            self.rebuild();
        }

        if self.submission.is_empty() {
            trace!("vrinput: no active action sets on frame {frame}");
            return UpdateOutcome::NothingActive;
        }

        match self
            .boundary
            .update_action_state(&self.submission, RECORD_SIZE)
        {
            Ok(()) => {
                trace!(
                    "vrinput: submitted {} active sets on frame {frame}",
                    self.submission.len()
                );
                UpdateOutcome::Submitted {
                    count: self.submission.len(),
                }
            }
            Err(err) => {
                error!(
                    "vrinput: update_action_state failed with {err} (code {})",
                    err.raw()
                );
                UpdateOutcome::Failed(err)
            }
        }
    }

    fn rebuild(&mut self) {
        self.working.clear();
        for binding in self.bindings.iter() {
            // Ties keep table order, later entries override earlier ones on the native side
            let position = self
                .working
                .iter()
                .position(|other| other.priority > binding.priority)
                .unwrap_or(self.working.len());
            self.working.insert(position, *binding);
        }

        if self.working.len() != self.submission.len() {
            let next = self.pool.take(self.working.len());
            let previous = std::mem::replace(&mut self.submission, next);
            self.pool.release(previous);
        }

        let sources = self.catalog.sources();
        for (record, binding) in self.submission.iter_mut().zip(&self.working) {
            *record = ActiveRecord::new(
                self.catalog.action_set(binding.action_set).handle,
                binding.priority,
                sources.handle(binding.source),
            );
        }

        self.debug_text = self
            .working
            .iter()
            .map(|binding| {
                format!(
                    "{}\t{}\t{}",
                    binding.priority,
                    binding.source.name(),
                    self.catalog.action_set(binding.action_set).short_name
                )
            })
            .join("\n");

        self.changed = false;
        debug!(
            "vrinput: rebuilt active set array with {} entries",
            self.working.len()
        );
    }
}
