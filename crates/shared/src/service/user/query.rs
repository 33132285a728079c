use crate::{
    abstract_trait::{DynUserQueryRepository, UserQueryServiceTrait},
    domain::responses::{ApiResponse, UserResponse},
    errors::ServiceError,
    utils::{Method, OperationTracer},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use tracing::info;

pub struct UserQueryService {
    query: DynUserQueryRepository,
    tracer: OperationTracer,
}

impl UserQueryService {
    pub fn new(query: DynUserQueryRepository, tracer: OperationTracer) -> Self {
        Self { query, tracer }
    }
}

#[async_trait]
impl UserQueryServiceTrait for UserQueryService {
    async fn find_all(&self) -> Result<ApiResponse<Vec<UserResponse>>, ServiceError> {
        let ctx = self.tracer.start(
            "find_all_users",
            vec![
                KeyValue::new("component", "user"),
                KeyValue::new("operation", "find_all"),
            ],
        );

        let result = self
            .query
            .find_all()
            .await
            .map(|users| {
                let data: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
                info!("✅ Fetched {} users", data.len());
                ApiResponse::success("Users retrieved successfully", data)
            })
            .map_err(ServiceError::from);

        self.tracer
            .finish(&ctx, Method::Get, &result, "Users fetched")
            .await;
        result
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<UserResponse>, ServiceError> {
        let ctx = self.tracer.start(
            "find_user_by_id",
            vec![
                KeyValue::new("component", "user"),
                KeyValue::new("operation", "find_by_id"),
                KeyValue::new("user.id", id.to_string()),
            ],
        );

        let result = match self.query.find_by_id(id).await {
            Ok(Some(user)) => Ok(ApiResponse::success(
                "User retrieved successfully",
                UserResponse::from(user),
            )),
            Ok(None) => Err(ServiceError::InvalidReference(
                "User does not exist".to_string(),
            )),
            Err(err) => Err(ServiceError::Repo(err)),
        };

        self.tracer
            .finish(&ctx, Method::Get, &result, "User fetched")
            .await;
        result
    }
}
