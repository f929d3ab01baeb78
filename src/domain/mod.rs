//! Domain logic - the version value object, independent of any file format

pub mod normalize;
pub mod part;
pub mod version;

pub use part::{Part, Slot};
pub use version::Version;
