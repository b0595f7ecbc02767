use std::fmt::Debug;

use crate::{record::ActiveRecord, InputError};

/**
 * The native call that applies action set activation
 *
 * `records` is sorted ascending by priority, the runtime applies entries in order so later
 * ones win for overlapping action names. `record_size` is always [crate::record::RECORD_SIZE]
 */
pub trait InputBoundary: Debug {
    fn update_action_state(
        &mut self,
        records: &[ActiveRecord],
        record_size: u32,
    ) -> Result<(), InputError>;
}

impl<B: InputBoundary + ?Sized> InputBoundary for &mut B {
    fn update_action_state(
        &mut self,
        records: &[ActiveRecord],
        record_size: u32,
    ) -> Result<(), InputError> {
        (**self).update_action_state(records, record_size)
    }
}

impl<B: InputBoundary + ?Sized> InputBoundary for Box<B> {
    fn update_action_state(
        &mut self,
        records: &[ActiveRecord],
        record_size: u32,
    ) -> Result<(), InputError> {
        (**self).update_action_state(records, record_size)
    }
}
