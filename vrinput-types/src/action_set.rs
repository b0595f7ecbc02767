use strum_macros::{EnumString, IntoStaticStr};

/// What the bindings UI is allowed to do with a set. Carried for display only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumString, IntoStaticStr)]
#[strum(ascii_case_insensitive)]
pub enum ActionSetUsage {
    #[default]
    #[strum(serialize = "leftright")]
    LeftRight,
    #[strum(serialize = "single")]
    Single,
    #[strum(serialize = "hidden")]
    Hidden,
}

/**
 * Each action set has two independent activation channels
 *
 * A set can be active in its primary slot for one source while its secondary slot is used
 * by something else, deactivating one does not touch the other
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Slot {
    #[default]
    Primary,
    Secondary,
}

impl Slot {
    pub const ALL: [Slot; 2] = [Slot::Primary, Slot::Secondary];

    pub fn index(self) -> usize {
        match self {
            Slot::Primary => 0,
            Slot::Secondary => 1,
        }
    }
}
