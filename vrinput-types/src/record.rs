use crate::{ActionSetHandle, InputSourceHandle};

/**
 * One entry of the array handed to the native runtime
 *
 * Layout matches the runtime's active action set struct exactly, the runtime reads the
 * buffer using [RECORD_SIZE] as the stride
 */
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActiveRecord {
    pub action_set: u64,
    pub restricted_to_device: u64,
    pub secondary_action_set: u64,
    pub padding: u32,
    pub priority: i32,
}

pub const RECORD_SIZE: u32 = std::mem::size_of::<ActiveRecord>() as u32;

impl ActiveRecord {
    pub fn new(action_set: ActionSetHandle, priority: i32, source: InputSourceHandle) -> Self {
        Self {
            action_set: action_set.0,
            restricted_to_device: source.0,
            secondary_action_set: ActionSetHandle::INVALID.0,
            padding: 0,
            priority,
        }
    }

    pub fn action_set(&self) -> ActionSetHandle {
        ActionSetHandle(self.action_set)
    }

    pub fn restricted_to_device(&self) -> InputSourceHandle {
        InputSourceHandle(self.restricted_to_device)
    }
}

#[test]
fn native_layout() {
    assert_eq!(RECORD_SIZE, 32);
    assert_eq!(std::mem::align_of::<ActiveRecord>(), 8);

    let record = ActiveRecord::new(ActionSetHandle(10), -4, InputSourceHandle(2));
    assert_eq!(record.action_set(), ActionSetHandle(10));
    assert_eq!(record.restricted_to_device(), InputSourceHandle(2));
    assert_eq!(record.secondary_action_set, 0);
    assert_eq!(record.priority, -4);
}
