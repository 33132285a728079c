use crate::{
    config::ConnectionPool,
    repository::{OrderRepository, ProductRepository, UserRepository},
    service::{OrderService, OrderServiceDeps, ProductService, UserService},
};
use prometheus_client::registry::Registry;
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct DependenciesInject {
    pub user_service: UserService,
    pub product_service: ProductService,
    pub order_service: OrderService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("user_service", &"<UserService>")
            .field("product_service", &"<ProductService>")
            .field("order_service", &"<OrderService>")
            .finish()
    }
}

impl DependenciesInject {
    pub async fn new(pool: ConnectionPool, registry: Arc<Mutex<Registry>>) -> Self {
        Self::from_repositories(
            UserRepository::new(pool.clone()),
            ProductRepository::new(pool.clone()),
            OrderRepository::new(pool),
            registry,
        )
        .await
    }

    /// Wires the services on top of any repository backend.
    pub async fn from_repositories(
        user_repository: UserRepository,
        product_repository: ProductRepository,
        order_repository: OrderRepository,
        registry: Arc<Mutex<Registry>>,
    ) -> Self {
        let user_service = UserService::new(
            user_repository.query.clone(),
            user_repository.command,
            registry.clone(),
        )
        .await;

        let product_service = ProductService::new(
            product_repository.query.clone(),
            product_repository.command,
            registry.clone(),
        )
        .await;

        let order_deps = OrderServiceDeps {
            query: order_repository.query,
            command: order_repository.command,
            user_query: user_repository.query,
            product_query: product_repository.query,
            registry,
        };

        let order_service = OrderService::new(order_deps).await;

        Self {
            user_service,
            product_service,
            order_service,
        }
    }
}
