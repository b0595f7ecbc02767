use strum_macros::{EnumCount, EnumIter, IntoStaticStr};

/// A restriction target for action set activation
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumCount, IntoStaticStr,
)]
pub enum InputSource {
    Any,
    LeftHand,
    RightHand,
}

impl InputSource {
    pub fn index(self) -> usize {
        self as usize
    }

    /// Path the native runtime resolves into a source handle
    pub fn path(self) -> &'static str {
        match self {
            InputSource::Any => "/unrestricted",
            InputSource::LeftHand => "/user/hand/left",
            InputSource::RightHand => "/user/hand/right",
        }
    }

    pub fn name(self) -> &'static str {
        self.into()
    }
}
