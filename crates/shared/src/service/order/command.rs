use crate::{
    abstract_trait::{
        DynOrderCommandRepository, DynOrderQueryRepository, DynProductQueryRepository,
        DynUserQueryRepository, OrderCommandServiceTrait,
    },
    domain::{
        requests::{CreateOrderRequest, RemoveProductsRequest},
        responses::{ApiResponse, OrderResponse, RemovedProductsResponse},
    },
    errors::{RepositoryError, ServiceError},
    utils::{Method, OperationTracer},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use std::collections::HashSet;
use tracing::{info, warn};

const INVALID_USER: &str = "Invalid user id";
const INVALID_ORDER: &str = "Invalid order id";
const INVALID_PRODUCT: &str = "Invalid product id";
const ALREADY_IN_ORDER: &str = "Product already exists in the order";
const NOT_IN_ORDER: &str = "Product not found in the order";
const NO_PRODUCT_IDS: &str = "No product IDs provided";

pub struct OrderCommandService {
    query: DynOrderQueryRepository,
    command: DynOrderCommandRepository,
    user_query: DynUserQueryRepository,
    product_query: DynProductQueryRepository,
    tracer: OperationTracer,
}

impl OrderCommandService {
    pub fn new(
        query: DynOrderQueryRepository,
        command: DynOrderCommandRepository,
        user_query: DynUserQueryRepository,
        product_query: DynProductQueryRepository,
        tracer: OperationTracer,
    ) -> Self {
        Self {
            query,
            command,
            user_query,
            product_query,
            tracer,
        }
    }

    async fn ensure_order(&self, order_id: i32) -> Result<(), ServiceError> {
        match self.query.find_by_id(order_id).await? {
            Some(_) => Ok(()),
            None => Err(ServiceError::InvalidReference(INVALID_ORDER.to_string())),
        }
    }

    async fn ensure_product(&self, product_id: i32) -> Result<(), ServiceError> {
        match self.product_query.find_by_id(product_id).await? {
            Some(_) => Ok(()),
            None => Err(ServiceError::InvalidReference(INVALID_PRODUCT.to_string())),
        }
    }

    async fn create(&self, req: &CreateOrderRequest) -> Result<OrderResponse, ServiceError> {
        if self.user_query.find_by_id(req.user_id).await?.is_none() {
            return Err(ServiceError::InvalidReference(INVALID_USER.to_string()));
        }

        match self.command.create_order(req).await {
            Ok(order) => Ok(OrderResponse::from(order)),
            // user removed between the lookup and the insert
            Err(RepositoryError::ForeignKey(_)) => {
                Err(ServiceError::InvalidReference(INVALID_USER.to_string()))
            }
            Err(err) => Err(ServiceError::Repo(err)),
        }
    }

    async fn link(&self, order_id: i32, product_id: i32) -> Result<(), ServiceError> {
        self.ensure_order(order_id).await?;
        self.ensure_product(product_id).await?;

        if self.query.has_product(order_id, product_id).await? {
            return Err(ServiceError::Conflict(ALREADY_IN_ORDER.to_string()));
        }

        match self.command.add_product(order_id, product_id).await {
            Ok(()) => Ok(()),
            Err(RepositoryError::AlreadyExists(_)) => {
                Err(ServiceError::Conflict(ALREADY_IN_ORDER.to_string()))
            }
            Err(RepositoryError::ForeignKey(_)) => {
                Err(ServiceError::InvalidReference(INVALID_PRODUCT.to_string()))
            }
            Err(err) => Err(ServiceError::Repo(err)),
        }
    }

    async fn unlink(&self, order_id: i32, product_id: i32) -> Result<(), ServiceError> {
        self.ensure_order(order_id).await?;
        self.ensure_product(product_id).await?;

        if self.command.remove_product(order_id, product_id).await? {
            Ok(())
        } else {
            Err(ServiceError::Conflict(NOT_IN_ORDER.to_string()))
        }
    }

    async fn unlink_many(
        &self,
        order_id: i32,
        req: &RemoveProductsRequest,
    ) -> Result<RemovedProductsResponse, ServiceError> {
        self.ensure_order(order_id).await?;

        if req.product_ids.is_empty() {
            return Err(ServiceError::InvalidReference(NO_PRODUCT_IDS.to_string()));
        }

        let mut seen = HashSet::new();
        let requested: Vec<i32> = req
            .product_ids
            .iter()
            .copied()
            .filter(|id| seen.insert(*id))
            .collect();

        let removed: HashSet<i32> = self
            .command
            .remove_products(order_id, &requested)
            .await?
            .into_iter()
            .collect();

        let skipped = requested.len().saturating_sub(removed.len());
        if skipped > 0 {
            warn!("⚠️ {skipped} product id(s) were not linked to order {order_id}");
        }

        Ok(RemovedProductsResponse {
            removed_product_ids: requested
                .into_iter()
                .filter(|id| removed.contains(id))
                .collect(),
        })
    }
}

#[async_trait]
impl OrderCommandServiceTrait for OrderCommandService {
    async fn create_order(
        &self,
        req: &CreateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        info!("🏗️ Creating order for user {}", req.user_id);

        let ctx = self.tracer.start(
            "create_order",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("operation", "create"),
                KeyValue::new("user.id", req.user_id.to_string()),
            ],
        );

        let result = self
            .create(req)
            .await
            .map(|order| ApiResponse::success("Order created successfully", order));

        self.tracer
            .finish(&ctx, Method::Post, &result, "Order created")
            .await;
        result
    }

    async fn add_product(
        &self,
        order_id: i32,
        product_id: i32,
    ) -> Result<ApiResponse<()>, ServiceError> {
        info!("➕ Adding product {product_id} to order {order_id}");

        let ctx = self.tracer.start(
            "add_product_to_order",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("operation", "add_product"),
                KeyValue::new("order.id", order_id.to_string()),
                KeyValue::new("product.id", product_id.to_string()),
            ],
        );

        let result = self.link(order_id, product_id).await.map(|()| {
            ApiResponse::success(format!("Product {product_id} added to order {order_id}"), ())
        });

        self.tracer
            .finish(&ctx, Method::Put, &result, "Product added to order")
            .await;
        result
    }

    async fn remove_product(
        &self,
        order_id: i32,
        product_id: i32,
    ) -> Result<ApiResponse<()>, ServiceError> {
        info!("➖ Removing product {product_id} from order {order_id}");

        let ctx = self.tracer.start(
            "remove_product_from_order",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("operation", "remove_product"),
                KeyValue::new("order.id", order_id.to_string()),
                KeyValue::new("product.id", product_id.to_string()),
            ],
        );

        let result = self.unlink(order_id, product_id).await.map(|()| {
            ApiResponse::success(
                format!("Product {product_id} removed from order {order_id}"),
                (),
            )
        });

        self.tracer
            .finish(&ctx, Method::Delete, &result, "Product removed from order")
            .await;
        result
    }

    async fn remove_products(
        &self,
        order_id: i32,
        req: &RemoveProductsRequest,
    ) -> Result<ApiResponse<RemovedProductsResponse>, ServiceError> {
        info!(
            "➖ Removing {} product(s) from order {order_id}",
            req.product_ids.len()
        );

        let ctx = self.tracer.start(
            "remove_products_from_order",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("operation", "remove_products"),
                KeyValue::new("order.id", order_id.to_string()),
                KeyValue::new("product.count", req.product_ids.len() as i64),
            ],
        );

        let result = self.unlink_many(order_id, req).await.map(|removed| {
            ApiResponse::success(format!("Products removed from order {order_id}"), removed)
        });

        self.tracer
            .finish(&ctx, Method::Delete, &result, "Products removed from order")
            .await;
        result
    }
}
