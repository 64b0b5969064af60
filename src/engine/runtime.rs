//! Memoized widget runtime injection

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::domain::errors::DomainError;
use crate::ports::{PlaybackWidget, WidgetOptions, WidgetRuntime};

/// Injects the widget runtime at most once and hands out its readiness
///
/// One loader is shared by every player in the process, so repeated clip
/// selections never inject the script or register readiness twice.
pub struct RuntimeLoader {
    runtime: Arc<dyn WidgetRuntime>,
    ready: OnceCell<()>,
}

impl RuntimeLoader {
    pub fn new(runtime: Arc<dyn WidgetRuntime>) -> Self {
        Self {
            runtime,
            ready: OnceCell::new(),
        }
    }

    /// Resolve once the runtime is ready
    ///
    /// Concurrent callers share a single injection. The future stays pending
    /// for as long as the runtime withholds its readiness signal.
    pub async fn ready(&self) -> Result<(), DomainError> {
        if self.ready.initialized() {
            return Ok(());
        }
        self.ready
            .get_or_try_init(|| async {
                info!("Injecting widget runtime");
                self.runtime.inject().await?;
                info!("Widget runtime ready");
                Ok::<(), DomainError>(())
            })
            .await?;
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.ready.initialized()
    }

    /// Construct a widget through the ready runtime
    pub fn create_widget(
        &self,
        options: WidgetOptions,
    ) -> Result<Arc<dyn PlaybackWidget>, DomainError> {
        if !self.is_ready() {
            return Err(DomainError::RuntimeUnavailable(
                "widget requested before runtime readiness".to_string(),
            ));
        }
        debug!(mount_point = %options.mount_point, clip = %options.clip, "Creating widget");
        self.runtime.create_widget(options)
    }
}
