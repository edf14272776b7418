pub mod boundary;
pub mod changelog;
pub mod cli;
pub mod config;
pub mod conventional;
pub mod error;
pub mod git;
pub mod manifest;
pub mod remote;
pub mod ui;
pub mod version;

pub use error::{ReleaseError, Result};
