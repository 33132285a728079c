mod command;
mod query;

use self::command::ProductCommandService;
use self::query::ProductQueryService;
use crate::{
    abstract_trait::{
        DynProductCommandRepository, DynProductCommandService, DynProductQueryRepository,
        DynProductQueryService,
    },
    utils::{Metrics, OperationTracer},
};
use prometheus_client::registry::Registry;
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct ProductService {
    pub query: DynProductQueryService,
    pub command: DynProductCommandService,
}

impl fmt::Debug for ProductService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProductService")
            .field("query", &"Arc<dyn ProductQueryServiceTrait>")
            .field("command", &"Arc<dyn ProductCommandServiceTrait>")
            .finish()
    }
}

impl ProductService {
    pub async fn new(
        query: DynProductQueryRepository,
        command: DynProductCommandRepository,
        registry: Arc<Mutex<Registry>>,
    ) -> Self {
        let metrics = Metrics::new();
        metrics.register(
            &mut *registry.lock().await,
            "product_service",
            "ProductService",
        );

        let tracer = OperationTracer::new("product-service", Arc::new(Mutex::new(metrics)));

        let query_service = Arc::new(ProductQueryService::new(query.clone(), tracer.clone()))
            as DynProductQueryService;
        let command_service = Arc::new(ProductCommandService::new(query, command, tracer))
            as DynProductCommandService;

        Self {
            query: query_service,
            command: command_service,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        domain::requests::{CreateProductRequest, UpdateProductRequest},
        testing::InMemoryStore,
    };
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn product_crud_flow() {
        let di = InMemoryStore::new().dependencies().await;
        let products = &di.product_service;

        let created = products
            .command
            .create_product(&CreateProductRequest {
                product_name: "Kettle".into(),
                price: dec!(24.99),
            })
            .await
            .unwrap();
        let id = created.data.id;

        let fetched = products.query.find_by_id(id).await.unwrap();
        assert_eq!(fetched.data, created.data);

        let updated = products
            .command
            .update_product(
                id,
                &UpdateProductRequest {
                    product_name: "Steel Kettle".into(),
                    price: dec!(29.50),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.data.product_name, "Steel Kettle");
        assert_eq!(updated.data.price, dec!(29.50));

        let deleted = products.command.delete_product(id).await.unwrap();
        assert_eq!(deleted.message, format!("Successfully deleted product {id}"));
        assert!(products.query.find_all().await.unwrap().data.is_empty());
    }

    #[tokio::test]
    async fn missing_product_messages() {
        let di = InMemoryStore::new().dependencies().await;
        let products = &di.product_service;

        let err = products.query.find_by_id(7).await.unwrap_err();
        assert_eq!(err.to_string(), "Product does not exist");

        let req = UpdateProductRequest {
            product_name: "Ghost".into(),
            price: dec!(1.00),
        };
        let err = products.command.update_product(7, &req).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid product id");

        let err = products.command.delete_product(7).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid product id");
    }
}
