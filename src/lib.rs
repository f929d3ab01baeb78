pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod pyproject;
pub mod ui;

pub use domain::{Part, Version};
pub use error::{Result, VersionBumperError};
