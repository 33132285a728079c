use crate::{
    abstract_trait::{DynProductQueryRepository, ProductQueryServiceTrait},
    domain::responses::{ApiResponse, ProductResponse},
    errors::ServiceError,
    utils::{Method, OperationTracer},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;

pub struct ProductQueryService {
    query: DynProductQueryRepository,
    tracer: OperationTracer,
}

impl ProductQueryService {
    pub fn new(query: DynProductQueryRepository, tracer: OperationTracer) -> Self {
        Self { query, tracer }
    }
}

#[async_trait]
impl ProductQueryServiceTrait for ProductQueryService {
    async fn find_all(&self) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError> {
        let ctx = self.tracer.start(
            "find_all_products",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "find_all"),
            ],
        );

        let result = self
            .query
            .find_all()
            .await
            .map(|products| {
                ApiResponse::success(
                    "Products retrieved successfully",
                    products.into_iter().map(ProductResponse::from).collect(),
                )
            })
            .map_err(ServiceError::from);

        self.tracer
            .finish(&ctx, Method::Get, &result, "Products fetched")
            .await;
        result
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let ctx = self.tracer.start(
            "find_product_by_id",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "find_by_id"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        let result = match self.query.find_by_id(id).await {
            Ok(Some(product)) => Ok(ApiResponse::success(
                "Product retrieved successfully",
                ProductResponse::from(product),
            )),
            Ok(None) => Err(ServiceError::InvalidReference(
                "Product does not exist".to_string(),
            )),
            Err(err) => Err(ServiceError::Repo(err)),
        };

        self.tracer
            .finish(&ctx, Method::Get, &result, "Product fetched")
            .await;
        result
    }
}
