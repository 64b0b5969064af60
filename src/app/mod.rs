// Application layer - Use case interactors and the player controller

pub mod catalog_interactor;
pub mod clip_controller;
pub mod container;

// Re-export interactors
pub use catalog_interactor::CatalogInteractor;
pub use clip_controller::{ClipController, ControllerPhase};
pub use container::{AppContainer, DefaultAppContainer};
