//! diracweb-lib: compile a web application bundle inside a container.
//!
//! The build step gathers static resources contributed by installed plugins,
//! lays them out as bind mounts, and runs the compiler image through whichever
//! container runtime is available:
//! - `plugins`: discovery of plugin contributions through an extension-point registry
//! - `mount`: the logical mount plan shared by all backends
//! - `backend`: runtime selection
//! - `container`: backend-specific command synthesis
//! - `runner`: execution of the synthesized command
//! - `compile`: the pipeline tying them together

pub mod backend;
pub mod compile;
pub mod consts;
pub mod container;
pub mod data_files;
pub mod mount;
pub mod package;
pub mod platform;
pub mod plugins;
pub mod runner;
