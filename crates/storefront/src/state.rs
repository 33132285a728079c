use prometheus_client::registry::Registry;
use shared::{
    config::ConnectionPool,
    di::DependenciesInject,
    utils::{SystemMetrics, run_metrics_collector},
};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub registry: Arc<Mutex<Registry>>,
    pub system_metrics: Arc<SystemMetrics>,
}

impl AppState {
    pub async fn new(pool: ConnectionPool) -> Self {
        let registry = Arc::new(Mutex::new(Registry::default()));
        let di_container = DependenciesInject::new(pool, registry.clone()).await;

        let state = Self::with_container(di_container, registry).await;
        tokio::spawn(run_metrics_collector(state.system_metrics.clone()));
        state
    }

    /// Builds the state around an existing container without starting the
    /// background metrics collector.
    pub async fn with_container(
        di_container: DependenciesInject,
        registry: Arc<Mutex<Registry>>,
    ) -> Self {
        let system_metrics = Arc::new(SystemMetrics::new());
        registry.lock().await.register_metrics(&system_metrics);

        Self {
            di_container,
            registry,
            system_metrics,
        }
    }
}

trait MetricsRegister {
    fn register_metrics(&mut self, metrics: &SystemMetrics);
}

impl MetricsRegister for Registry {
    fn register_metrics(&mut self, metrics: &SystemMetrics) {
        metrics.register(self);
    }
}
