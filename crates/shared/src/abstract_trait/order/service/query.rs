use crate::{
    domain::responses::{ApiResponse, OrderResponse, ProductResponse},
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynOrderQueryService = Arc<dyn OrderQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait OrderQueryServiceTrait {
    async fn find_by_user(
        &self,
        user_id: i32,
    ) -> Result<ApiResponse<Vec<OrderResponse>>, ServiceError>;
    async fn find_products(
        &self,
        order_id: i32,
    ) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError>;
}
