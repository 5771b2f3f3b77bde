//! Host platform helpers: data directories and the invoking user's identity.

pub mod identity;
pub mod paths;

pub use identity::Identity;
