mod command;
mod query;

use self::command::OrderCommandService;
use self::query::OrderQueryService;
use crate::{
    abstract_trait::{
        DynOrderCommandRepository, DynOrderCommandService, DynOrderQueryRepository,
        DynOrderQueryService, DynProductQueryRepository, DynUserQueryRepository,
    },
    utils::{Metrics, OperationTracer},
};
use prometheus_client::registry::Registry;
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct OrderService {
    pub query: DynOrderQueryService,
    pub command: DynOrderCommandService,
}

impl fmt::Debug for OrderService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderService")
            .field("query", &"Arc<dyn OrderQueryServiceTrait>")
            .field("command", &"Arc<dyn OrderCommandServiceTrait>")
            .finish()
    }
}

/// Order operations validate references against users and products,
/// so the order service also holds their query repositories.
pub struct OrderServiceDeps {
    pub query: DynOrderQueryRepository,
    pub command: DynOrderCommandRepository,
    pub user_query: DynUserQueryRepository,
    pub product_query: DynProductQueryRepository,
    pub registry: Arc<Mutex<Registry>>,
}

impl OrderService {
    pub async fn new(deps: OrderServiceDeps) -> Self {
        let OrderServiceDeps {
            query,
            command,
            user_query,
            product_query,
            registry,
        } = deps;

        let metrics = Metrics::new();
        metrics.register(&mut *registry.lock().await, "order_service", "OrderService");

        let tracer = OperationTracer::new("order-service", Arc::new(Mutex::new(metrics)));

        let query_service = Arc::new(OrderQueryService::new(
            query.clone(),
            user_query.clone(),
            tracer.clone(),
        )) as DynOrderQueryService;

        let command_service = Arc::new(OrderCommandService::new(
            query,
            command,
            user_query,
            product_query,
            tracer,
        )) as DynOrderCommandService;

        Self {
            query: query_service,
            command: command_service,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        di::DependenciesInject,
        domain::requests::{
            CreateOrderRequest, CreateProductRequest, CreateUserRequest, RemoveProductsRequest,
        },
        testing::InMemoryStore,
    };
    use chrono::{NaiveDate, NaiveDateTime};
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn order_date() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|d| d.and_hms_opt(14, 30, 0))
            .unwrap()
    }

    /// One user, one order and `products` products, none linked yet.
    async fn seeded(products: usize) -> (Arc<InMemoryStore>, DependenciesInject, i32, Vec<i32>) {
        let store = InMemoryStore::new();
        let di = store.dependencies().await;

        let user = di
            .user_service
            .command
            .create_user(&CreateUserRequest {
                name: "Carol".into(),
                address: "9 Elm St".into(),
                email: "carol@example.com".into(),
            })
            .await
            .unwrap();

        let order = di
            .order_service
            .command
            .create_order(&CreateOrderRequest {
                order_date: order_date(),
                user_id: user.data.id,
            })
            .await
            .unwrap();

        let mut ids = Vec::new();
        for i in 0..products {
            let p = di
                .product_service
                .command
                .create_product(&CreateProductRequest {
                    product_name: format!("Item {i}"),
                    price: dec!(5.00),
                })
                .await
                .unwrap();
            ids.push(p.data.id);
        }

        (store, di, order.data.id, ids)
    }

    #[tokio::test]
    async fn order_for_unknown_user_is_rejected() {
        let di = InMemoryStore::new().dependencies().await;

        let err = di
            .order_service
            .command
            .create_order(&CreateOrderRequest {
                order_date: order_date(),
                user_id: 99,
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid user id");
    }

    #[tokio::test]
    async fn adding_same_product_twice_fails() {
        let (_, di, oid, pids) = seeded(1).await;
        let orders = &di.order_service;

        let added = orders.command.add_product(oid, pids[0]).await.unwrap();
        assert_eq!(added.message, format!("Product {} added to order {oid}", pids[0]));

        let err = orders.command.add_product(oid, pids[0]).await.unwrap_err();
        assert_eq!(err.to_string(), "Product already exists in the order");

        let listed = orders.query.find_products(oid).await.unwrap();
        assert_eq!(listed.data.len(), 1);
    }

    #[tokio::test]
    async fn add_product_checks_references() {
        let (_, di, oid, pids) = seeded(1).await;
        let orders = &di.order_service;

        let err = orders.command.add_product(oid + 1, pids[0]).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid order id");

        let err = orders.command.add_product(oid, 999).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid product id");
    }

    #[tokio::test]
    async fn remove_product_removes_exactly_one_link() {
        let (store, di, oid, pids) = seeded(2).await;
        let orders = &di.order_service;
        for pid in &pids {
            orders.command.add_product(oid, *pid).await.unwrap();
        }

        let removed = orders.command.remove_product(oid, pids[0]).await.unwrap();
        assert_eq!(
            removed.message,
            format!("Product {} removed from order {oid}", pids[0])
        );
        assert_eq!(store.link_count(), 1);

        let err = orders
            .command
            .remove_product(oid, pids[0])
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Product not found in the order");
        assert_eq!(store.link_count(), 1);
    }

    #[tokio::test]
    async fn bulk_remove_reports_only_removed_ids_in_request_order() {
        let (_, di, oid, pids) = seeded(3).await;
        let orders = &di.order_service;
        for pid in &pids[..2] {
            orders.command.add_product(oid, *pid).await.unwrap();
        }

        let req = RemoveProductsRequest {
            product_ids: vec![pids[0], pids[1], pids[2], 999, pids[0]],
        };
        let res = orders.command.remove_products(oid, &req).await.unwrap();

        assert_eq!(res.message, format!("Products removed from order {oid}"));
        assert_eq!(res.data.removed_product_ids, vec![pids[0], pids[1]]);
        assert!(orders.query.find_products(oid).await.unwrap().data.is_empty());
    }

    #[tokio::test]
    async fn bulk_remove_validates_order_before_list() {
        let (_, di, oid, _) = seeded(0).await;
        let orders = &di.order_service;

        let err = orders
            .command
            .remove_products(oid + 1, &RemoveProductsRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid order id");

        let err = orders
            .command
            .remove_products(oid, &RemoveProductsRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "No product IDs provided");
    }

    #[tokio::test]
    async fn orders_and_products_listing() {
        let (_, di, oid, pids) = seeded(2).await;
        let orders = &di.order_service;
        orders.command.add_product(oid, pids[1]).await.unwrap();
        orders.command.add_product(oid, pids[0]).await.unwrap();

        let products = orders.query.find_products(oid).await.unwrap();
        let listed: Vec<i32> = products.data.iter().map(|p| p.id).collect();
        assert_eq!(listed, pids);

        let by_user = orders.query.find_by_user(1).await.unwrap();
        assert_eq!(by_user.data.len(), 1);
        assert_eq!(by_user.data[0].id, oid);

        let err = orders.query.find_by_user(50).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid user id");

        let err = orders.query.find_products(oid + 1).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid order id");
    }

    #[tokio::test]
    async fn deleting_product_unlinks_it() {
        let (store, di, oid, pids) = seeded(1).await;
        di.order_service
            .command
            .add_product(oid, pids[0])
            .await
            .unwrap();

        di.product_service
            .command
            .delete_product(pids[0])
            .await
            .unwrap();
        assert_eq!(store.link_count(), 0);
    }
}
