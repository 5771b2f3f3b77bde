//! Plugin resource discovery.
//!
//! Installed plugins advertise themselves under an extension point. Those that
//! declare a static web-resource directory become [`PluginContribution`]s and
//! later get mounted into the compiler container.

mod discover;
mod registry;
mod types;

pub use discover::{Discovery, discover};
pub use registry::{DirectoryRegistry, EntryPoint, EntryPointRegistry};
pub use types::{DiscoverError, MetadataError, PluginContribution, PluginMetadata, RegistryError, WebResources};
