use crate::{
    abstract_trait::{DynUserCommandRepository, DynUserQueryRepository, UserCommandServiceTrait},
    domain::{
        requests::{CreateUserRequest, UpdateUserRequest},
        responses::{ApiResponse, UserResponse},
    },
    errors::{RepositoryError, ServiceError},
    utils::{Method, OperationTracer},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use tracing::{error, info};

const DUPLICATE_EMAIL: &str = "A user with this email already exists";
const INVALID_USER: &str = "Invalid user id";

pub struct UserCommandService {
    query: DynUserQueryRepository,
    command: DynUserCommandRepository,
    tracer: OperationTracer,
}

impl UserCommandService {
    pub fn new(
        query: DynUserQueryRepository,
        command: DynUserCommandRepository,
        tracer: OperationTracer,
    ) -> Self {
        Self {
            query,
            command,
            tracer,
        }
    }

    async fn ensure_email_free(&self, email: &str) -> Result<(), ServiceError> {
        if self.query.find_by_email(email).await?.is_some() {
            error!("❌ Email already registered: {email}");
            return Err(ServiceError::Conflict(DUPLICATE_EMAIL.to_string()));
        }
        Ok(())
    }

    async fn create(&self, req: &CreateUserRequest) -> Result<UserResponse, ServiceError> {
        self.ensure_email_free(&req.email).await?;

        let user = self
            .command
            .create_user(req)
            .await
            .map_err(duplicate_email_as_conflict)?;

        Ok(UserResponse::from(user))
    }

    async fn update(&self, id: i32, req: &UpdateUserRequest) -> Result<UserResponse, ServiceError> {
        let current = self
            .query
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::InvalidReference(INVALID_USER.to_string()))?;

        if current.email != req.email {
            self.ensure_email_free(&req.email).await?;
        }

        let user = self
            .command
            .update_user(id, req)
            .await
            .map_err(duplicate_email_as_conflict)?;

        Ok(UserResponse::from(user))
    }

    async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if self.query.find_by_id(id).await?.is_none() {
            return Err(ServiceError::InvalidReference(INVALID_USER.to_string()));
        }

        match self.command.delete_user(id).await {
            Ok(()) => Ok(()),
            Err(RepositoryError::NotFound) => {
                Err(ServiceError::InvalidReference(INVALID_USER.to_string()))
            }
            Err(err) => Err(ServiceError::Repo(err)),
        }
    }
}

/// The unique index on `users.email` closes the race between the lookup and the write.
fn duplicate_email_as_conflict(err: RepositoryError) -> ServiceError {
    match err {
        RepositoryError::AlreadyExists(_) => ServiceError::Conflict(DUPLICATE_EMAIL.to_string()),
        RepositoryError::NotFound => ServiceError::InvalidReference(INVALID_USER.to_string()),
        other => ServiceError::Repo(other),
    }
}

#[async_trait]
impl UserCommandServiceTrait for UserCommandService {
    async fn create_user(
        &self,
        req: &CreateUserRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        info!("🏗️ Creating new user: {}", req.email);

        let ctx = self.tracer.start(
            "create_user",
            vec![
                KeyValue::new("component", "user"),
                KeyValue::new("operation", "create"),
                KeyValue::new("user.email", req.email.clone()),
            ],
        );

        let result = self
            .create(req)
            .await
            .map(|user| ApiResponse::success("User created successfully", user));

        self.tracer
            .finish(&ctx, Method::Post, &result, "User created")
            .await;
        result
    }

    async fn update_user(
        &self,
        id: i32,
        req: &UpdateUserRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        info!("✏️ Updating user with ID: {id}");

        let ctx = self.tracer.start(
            "update_user",
            vec![
                KeyValue::new("component", "user"),
                KeyValue::new("operation", "update"),
                KeyValue::new("user.id", id.to_string()),
            ],
        );

        let result = self
            .update(id, req)
            .await
            .map(|user| ApiResponse::success("User updated successfully", user));

        self.tracer
            .finish(&ctx, Method::Put, &result, "User updated")
            .await;
        result
    }

    async fn delete_user(&self, id: i32) -> Result<ApiResponse<()>, ServiceError> {
        info!("💀 Deleting user with ID: {id}");

        let ctx = self.tracer.start(
            "delete_user",
            vec![
                KeyValue::new("component", "user"),
                KeyValue::new("operation", "delete"),
                KeyValue::new("user.id", id.to_string()),
            ],
        );

        let result = self
            .delete(id)
            .await
            .map(|()| ApiResponse::success(format!("Successfully deleted user {id}"), ()));

        self.tracer
            .finish(&ctx, Method::Delete, &result, "User deleted")
            .await;
        result
    }
}
