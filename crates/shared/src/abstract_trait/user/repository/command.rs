use crate::{
    domain::requests::{CreateUserRequest, UpdateUserRequest},
    errors::RepositoryError,
    model::User as UserModel,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynUserCommandRepository = Arc<dyn UserCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait UserCommandRepositoryTrait {
    async fn create_user(&self, req: &CreateUserRequest) -> Result<UserModel, RepositoryError>;
    async fn update_user(
        &self,
        id: i32,
        req: &UpdateUserRequest,
    ) -> Result<UserModel, RepositoryError>;
    /// Removes the user together with their orders.
    async fn delete_user(&self, id: i32) -> Result<(), RepositoryError>;
}
