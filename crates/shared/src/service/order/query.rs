use crate::{
    abstract_trait::{DynOrderQueryRepository, DynUserQueryRepository, OrderQueryServiceTrait},
    domain::responses::{ApiResponse, OrderResponse, ProductResponse},
    errors::ServiceError,
    utils::{Method, OperationTracer},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;

pub struct OrderQueryService {
    query: DynOrderQueryRepository,
    user_query: DynUserQueryRepository,
    tracer: OperationTracer,
}

impl OrderQueryService {
    pub fn new(
        query: DynOrderQueryRepository,
        user_query: DynUserQueryRepository,
        tracer: OperationTracer,
    ) -> Self {
        Self {
            query,
            user_query,
            tracer,
        }
    }

    async fn orders_of(&self, user_id: i32) -> Result<Vec<OrderResponse>, ServiceError> {
        if self.user_query.find_by_id(user_id).await?.is_none() {
            return Err(ServiceError::InvalidReference("Invalid user id".to_string()));
        }

        let orders = self.query.find_by_user(user_id).await?;
        Ok(orders.into_iter().map(OrderResponse::from).collect())
    }

    async fn products_of(&self, order_id: i32) -> Result<Vec<ProductResponse>, ServiceError> {
        if self.query.find_by_id(order_id).await?.is_none() {
            return Err(ServiceError::InvalidReference("Invalid order id".to_string()));
        }

        let products = self.query.find_products(order_id).await?;
        Ok(products.into_iter().map(ProductResponse::from).collect())
    }
}

#[async_trait]
impl OrderQueryServiceTrait for OrderQueryService {
    async fn find_by_user(
        &self,
        user_id: i32,
    ) -> Result<ApiResponse<Vec<OrderResponse>>, ServiceError> {
        let ctx = self.tracer.start(
            "find_orders_by_user",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("operation", "find_by_user"),
                KeyValue::new("user.id", user_id.to_string()),
            ],
        );

        let result = self
            .orders_of(user_id)
            .await
            .map(|orders| ApiResponse::success("Orders retrieved successfully", orders));

        self.tracer
            .finish(&ctx, Method::Get, &result, "Orders fetched")
            .await;
        result
    }

    async fn find_products(
        &self,
        order_id: i32,
    ) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError> {
        let ctx = self.tracer.start(
            "find_order_products",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("operation", "find_products"),
                KeyValue::new("order.id", order_id.to_string()),
            ],
        );

        let result = self
            .products_of(order_id)
            .await
            .map(|products| ApiResponse::success("Order products retrieved successfully", products));

        self.tracer
            .finish(&ctx, Method::Get, &result, "Order products fetched")
            .await;
        result
    }
}
