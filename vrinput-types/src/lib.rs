use thiserror::Error;

pub mod action_set;
pub mod boundary;
pub mod input_source;
pub mod record;

/// Index of the host frame an update is issued from
pub type FrameIndex = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ActionSetHandle(pub u64);

impl ActionSetHandle {
    pub const INVALID: ActionSetHandle = ActionSetHandle(0);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InputSourceHandle(pub u64);

impl InputSourceHandle {
    /// The unrestricted source. The native side treats a zero restriction as "any device"
    pub const ANY: InputSourceHandle = InputSourceHandle(0);
}

/**
 * Error codes reported by the native input runtime
 *
 * A raw code of zero means success and has no variant here
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum InputError {
    #[error("Name Not Found")]
    NameNotFound,
    #[error("Wrong Type")]
    WrongType,
    #[error("Invalid Handle")]
    InvalidHandle,
    #[error("Invalid Param")]
    InvalidParam,
    #[error("No Steam")]
    NoSteam,
    #[error("Max Capacity Reached")]
    MaxCapacityReached,
    #[error("IPC Error")]
    IpcError,
    #[error("No Active Action Set")]
    NoActiveActionSet,
    #[error("Invalid Device")]
    InvalidDevice,
    #[error("Invalid Skeleton")]
    InvalidSkeleton,
    #[error("Invalid Bone Count")]
    InvalidBoneCount,
    #[error("Invalid Compressed Data")]
    InvalidCompressedData,
    #[error("No Data")]
    NoData,
    #[error("Buffer Too Small")]
    BufferTooSmall,
    #[error("Mismatched Action Manifest")]
    MismatchedActionManifest,
    #[error("Missing Skeleton Data")]
    MissingSkeletonData,
    #[error("Invalid Bone Index")]
    InvalidBoneIndex,
    #[error("Invalid Priority")]
    InvalidPriority,
    #[error("Permission Denied")]
    PermissionDenied,
    #[error("Invalid Render Model")]
    InvalidRenderModel,
    #[error("Unknown Error Code `{0}`")]
    Other(i32),
}

impl InputError {
    pub fn from_raw(code: i32) -> Option<Self> {
        Some(match code {
            0 => return None,
            1 => Self::NameNotFound,
            2 => Self::WrongType,
            3 => Self::InvalidHandle,
            4 => Self::InvalidParam,
            5 => Self::NoSteam,
            6 => Self::MaxCapacityReached,
            7 => Self::IpcError,
            8 => Self::NoActiveActionSet,
            9 => Self::InvalidDevice,
            10 => Self::InvalidSkeleton,
            11 => Self::InvalidBoneCount,
            12 => Self::InvalidCompressedData,
            13 => Self::NoData,
            14 => Self::BufferTooSmall,
            15 => Self::MismatchedActionManifest,
            16 => Self::MissingSkeletonData,
            17 => Self::InvalidBoneIndex,
            18 => Self::InvalidPriority,
            19 => Self::PermissionDenied,
            20 => Self::InvalidRenderModel,
            other => Self::Other(other),
        })
    }

    pub fn raw(self) -> i32 {
        match self {
            Self::NameNotFound => 1,
            Self::WrongType => 2,
            Self::InvalidHandle => 3,
            Self::InvalidParam => 4,
            Self::NoSteam => 5,
            Self::MaxCapacityReached => 6,
            Self::IpcError => 7,
            Self::NoActiveActionSet => 8,
            Self::InvalidDevice => 9,
            Self::InvalidSkeleton => 10,
            Self::InvalidBoneCount => 11,
            Self::InvalidCompressedData => 12,
            Self::NoData => 13,
            Self::BufferTooSmall => 14,
            Self::MismatchedActionManifest => 15,
            Self::MissingSkeletonData => 16,
            Self::InvalidBoneIndex => 17,
            Self::InvalidPriority => 18,
            Self::PermissionDenied => 19,
            Self::InvalidRenderModel => 20,
            Self::Other(code) => code,
        }
    }
}

#[test]
fn error_codes() {
    assert_eq!(InputError::from_raw(0), None);
    assert_eq!(InputError::from_raw(8), Some(InputError::NoActiveActionSet));
    assert_eq!(InputError::from_raw(-3), Some(InputError::Other(-3)));
    assert_eq!(InputError::from_raw(20).map(InputError::raw), Some(20));
    assert_eq!(InputError::Other(99).raw(), 99);
}
