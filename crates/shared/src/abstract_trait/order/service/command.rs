use crate::{
    domain::{
        requests::{CreateOrderRequest, RemoveProductsRequest},
        responses::{ApiResponse, OrderResponse, RemovedProductsResponse},
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynOrderCommandService = Arc<dyn OrderCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait OrderCommandServiceTrait {
    async fn create_order(
        &self,
        req: &CreateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
    async fn add_product(
        &self,
        order_id: i32,
        product_id: i32,
    ) -> Result<ApiResponse<()>, ServiceError>;
    async fn remove_product(
        &self,
        order_id: i32,
        product_id: i32,
    ) -> Result<ApiResponse<()>, ServiceError>;
    async fn remove_products(
        &self,
        order_id: i32,
        req: &RemoveProductsRequest,
    ) -> Result<ApiResponse<RemovedProductsResponse>, ServiceError>;
}
