// Adapters - External system implementations

pub mod json_catalog;
pub mod json_storage;
pub mod memory_storage;
pub mod sim_widget;
pub mod toml_config;

// Re-export adapters
pub use json_catalog::JsonCatalogAdapter;
pub use json_storage::JsonFileStorage;
pub use memory_storage::MemoryStorage;
pub use sim_widget::{RuntimeGate, SimulatedRuntime, SimulatedWidget};
pub use toml_config::TomlConfigAdapter;
