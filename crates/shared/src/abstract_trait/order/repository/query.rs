use crate::{
    errors::RepositoryError,
    model::{Order as OrderModel, Product as ProductModel},
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynOrderQueryRepository = Arc<dyn OrderQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait OrderQueryRepositoryTrait {
    async fn find_by_id(&self, id: i32) -> Result<Option<OrderModel>, RepositoryError>;
    async fn find_by_user(&self, user_id: i32) -> Result<Vec<OrderModel>, RepositoryError>;
    async fn find_products(&self, order_id: i32) -> Result<Vec<ProductModel>, RepositoryError>;
    async fn has_product(&self, order_id: i32, product_id: i32) -> Result<bool, RepositoryError>;
}
