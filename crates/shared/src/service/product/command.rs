use crate::{
    abstract_trait::{
        DynProductCommandRepository, DynProductQueryRepository, ProductCommandServiceTrait,
    },
    domain::{
        requests::{CreateProductRequest, UpdateProductRequest},
        responses::{ApiResponse, ProductResponse},
    },
    errors::{RepositoryError, ServiceError},
    utils::{Method, OperationTracer},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use tracing::info;

const INVALID_PRODUCT: &str = "Invalid product id";

pub struct ProductCommandService {
    query: DynProductQueryRepository,
    command: DynProductCommandRepository,
    tracer: OperationTracer,
}

impl ProductCommandService {
    pub fn new(
        query: DynProductQueryRepository,
        command: DynProductCommandRepository,
        tracer: OperationTracer,
    ) -> Self {
        Self {
            query,
            command,
            tracer,
        }
    }

    async fn update(
        &self,
        id: i32,
        req: &UpdateProductRequest,
    ) -> Result<ProductResponse, ServiceError> {
        if self.query.find_by_id(id).await?.is_none() {
            return Err(ServiceError::InvalidReference(INVALID_PRODUCT.to_string()));
        }

        match self.command.update_product(id, req).await {
            Ok(product) => Ok(ProductResponse::from(product)),
            Err(RepositoryError::NotFound) => {
                Err(ServiceError::InvalidReference(INVALID_PRODUCT.to_string()))
            }
            Err(err) => Err(ServiceError::Repo(err)),
        }
    }

    async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if self.query.find_by_id(id).await?.is_none() {
            return Err(ServiceError::InvalidReference(INVALID_PRODUCT.to_string()));
        }

        match self.command.delete_product(id).await {
            Ok(()) => Ok(()),
            Err(RepositoryError::NotFound) => {
                Err(ServiceError::InvalidReference(INVALID_PRODUCT.to_string()))
            }
            Err(err) => Err(ServiceError::Repo(err)),
        }
    }
}

#[async_trait]
impl ProductCommandServiceTrait for ProductCommandService {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🏗️ Creating new product: {}", req.product_name);

        let ctx = self.tracer.start(
            "create_product",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "create"),
                KeyValue::new("product.name", req.product_name.clone()),
                KeyValue::new("product.price", req.price.to_string()),
            ],
        );

        let result = self
            .command
            .create_product(req)
            .await
            .map(|product| {
                ApiResponse::success(
                    "Product created successfully",
                    ProductResponse::from(product),
                )
            })
            .map_err(ServiceError::from);

        self.tracer
            .finish(&ctx, Method::Post, &result, "Product created")
            .await;
        result
    }

    async fn update_product(
        &self,
        id: i32,
        req: &UpdateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("✏️ Updating product with ID: {id}");

        let ctx = self.tracer.start(
            "update_product",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "update"),
                KeyValue::new("product.id", id.to_string()),
                KeyValue::new("product.price", req.price.to_string()),
            ],
        );

        let result = self
            .update(id, req)
            .await
            .map(|product| ApiResponse::success("Product updated successfully", product));

        self.tracer
            .finish(&ctx, Method::Put, &result, "Product updated")
            .await;
        result
    }

    async fn delete_product(&self, id: i32) -> Result<ApiResponse<()>, ServiceError> {
        info!("💀 Deleting product with ID: {id}");

        let ctx = self.tracer.start(
            "delete_product",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "delete"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        let result = self
            .delete(id)
            .await
            .map(|()| ApiResponse::success(format!("Successfully deleted product {id}"), ()));

        self.tracer
            .finish(&ctx, Method::Delete, &result, "Product deleted")
            .await;
        result
    }
}
