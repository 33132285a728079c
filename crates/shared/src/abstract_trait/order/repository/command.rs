use crate::{
    domain::requests::CreateOrderRequest, errors::RepositoryError, model::Order as OrderModel,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynOrderCommandRepository = Arc<dyn OrderCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait OrderCommandRepositoryTrait {
    async fn create_order(&self, req: &CreateOrderRequest) -> Result<OrderModel, RepositoryError>;
    async fn add_product(&self, order_id: i32, product_id: i32) -> Result<(), RepositoryError>;
    /// Returns whether an association was actually removed.
    async fn remove_product(
        &self,
        order_id: i32,
        product_id: i32,
    ) -> Result<bool, RepositoryError>;
    /// Returns the ids whose association was removed, in no particular order.
    async fn remove_products(
        &self,
        order_id: i32,
        product_ids: &[i32],
    ) -> Result<Vec<i32>, RepositoryError>;
}
