//! Identity of the invoking user, mapped into direct-mount containers.

use std::fmt;

/// Numeric user and group of the invoking process.
///
/// Handed to the container runtime so files the compiler writes back into the
/// host tree are owned by the caller rather than the image's default user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
  pub uid: u32,
  pub gid: u32,
}

impl Identity {
  pub fn new(uid: u32, gid: u32) -> Self {
    Self { uid, gid }
  }

  /// Identity of the current process.
  ///
  /// Returns `None` on platforms without POSIX user ids.
  #[cfg(unix)]
  pub fn current() -> Option<Self> {
    Some(Self {
      uid: rustix::process::getuid().as_raw(),
      gid: rustix::process::getgid().as_raw(),
    })
  }

  #[cfg(not(unix))]
  pub fn current() -> Option<Self> {
    None
  }
}

impl fmt::Display for Identity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}", self.uid, self.gid)
  }
}
