//! Git operations for Tributary
//!
//! This module opens local clones and reads the remote they point at.

mod lookup;
mod repo;

pub use lookup::{GitRemoteLookup, RemoteLookup};
pub use repo::GitRepo;
