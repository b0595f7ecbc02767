pub mod catalog;
pub mod manifest;
pub mod scheduler;

pub(crate) mod internal;

pub use vrinput_types as types;
