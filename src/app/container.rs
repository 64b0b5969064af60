use std::sync::Arc;

use crate::adapters::{JsonCatalogAdapter, JsonFileStorage, SimulatedRuntime};
use crate::app::{catalog_interactor::CatalogInteractor, clip_controller::ClipController};
use crate::config::PlayerSettings;
use crate::engine::RuntimeLoader;
use crate::error::ClipTrimResult;
use crate::ports::{CatalogPort, StoragePort, WidgetEvents, WidgetRuntime};

pub trait AppContainer: Send + Sync {
    fn settings(&self) -> &PlayerSettings;
    fn catalog_interactor(&self) -> Arc<CatalogInteractor>;
    fn storage(&self) -> Arc<dyn StoragePort>;
    /// Mount a new player; every player shares the process-wide runtime loader
    fn clip_controller(&self) -> (Arc<ClipController>, WidgetEvents);
}

pub struct DefaultAppContainer {
    settings: PlayerSettings,
    catalog_interactor: Arc<CatalogInteractor>,
    storage: Arc<dyn StoragePort>,
    loader: Arc<RuntimeLoader>,
}

impl DefaultAppContainer {
    /// Wire the file-backed adapters and the simulated widget runtime
    pub fn new(settings: PlayerSettings) -> ClipTrimResult<Self> {
        let catalog_port = Arc::new(JsonCatalogAdapter::new(settings.catalog_path.clone()));
        let storage = Arc::new(JsonFileStorage::open(settings.trim_store_path.clone())?);
        let runtime = Arc::new(
            SimulatedRuntime::new(settings.simulated_duration).with_speed(settings.playback_speed),
        );

        Ok(Self::with_ports(
            settings,
            catalog_port as Arc<dyn CatalogPort>,
            storage as Arc<dyn StoragePort>,
            runtime as Arc<dyn WidgetRuntime>,
        ))
    }

    /// Wire explicit ports
    pub fn with_ports(
        settings: PlayerSettings,
        catalog_port: Arc<dyn CatalogPort>,
        storage: Arc<dyn StoragePort>,
        runtime: Arc<dyn WidgetRuntime>,
    ) -> Self {
        Self {
            settings,
            catalog_interactor: Arc::new(CatalogInteractor::new(catalog_port)),
            storage,
            loader: Arc::new(RuntimeLoader::new(runtime)),
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn settings(&self) -> &PlayerSettings {
        &self.settings
    }

    fn catalog_interactor(&self) -> Arc<CatalogInteractor> {
        Arc::clone(&self.catalog_interactor)
    }

    fn storage(&self) -> Arc<dyn StoragePort> {
        Arc::clone(&self.storage)
    }

    fn clip_controller(&self) -> (Arc<ClipController>, WidgetEvents) {
        ClipController::new(
            Arc::clone(&self.loader),
            Arc::clone(&self.storage),
            &self.settings.mount_point,
            self.settings.frame_interval(),
        )
    }
}
