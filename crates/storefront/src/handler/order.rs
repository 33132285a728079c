use crate::{middleware::validate::SimpleValidatedJson, state::AppState};
use axum::{
    Extension, Json,
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use shared::{
    domain::{
        requests::{CreateOrderRequest, RemoveProductsRequest},
        responses::{ApiResponse, OrderResponse, ProductResponse, RemovedProductsResponse},
    },
    errors::{ErrorResponse, HttpError},
    service::OrderService,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/orders",
    tag = "Order",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = ApiResponse<OrderResponse>),
        (status = 400, description = "Validation error or invalid user id", body = ErrorResponse)
    )
)]
pub async fn create_order(
    Extension(service): Extension<OrderService>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateOrderRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.command.create_order(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/orders/{order_id}/add_product/{product_id}",
    tag = "Order",
    params(
        ("order_id" = i32, Path, description = "Order ID"),
        ("product_id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product linked to the order"),
        (status = 400, description = "Invalid order or product id, or already linked", body = ErrorResponse)
    )
)]
pub async fn add_product(
    Extension(service): Extension<OrderService>,
    Path((order_id, product_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.command.add_product(order_id, product_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/orders/user/{user_id}",
    tag = "Order",
    params(("user_id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Orders placed by the user", body = ApiResponse<Vec<OrderResponse>>),
        (status = 400, description = "Invalid user id", body = ErrorResponse)
    )
)]
pub async fn get_user_orders(
    Extension(service): Extension<OrderService>,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.query.find_by_user(user_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/orders/{order_id}/products",
    tag = "Order",
    params(("order_id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Products in the order", body = ApiResponse<Vec<ProductResponse>>),
        (status = 400, description = "Invalid order id", body = ErrorResponse)
    )
)]
pub async fn get_order_products(
    Extension(service): Extension<OrderService>,
    Path(order_id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.query.find_products(order_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/orders/{order_id}/remove_product/{product_id}",
    tag = "Order",
    params(
        ("order_id" = i32, Path, description = "Order ID"),
        ("product_id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product unlinked from the order"),
        (status = 400, description = "Invalid order or product id, or not linked", body = ErrorResponse)
    )
)]
pub async fn remove_product(
    Extension(service): Extension<OrderService>,
    Path((order_id, product_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.command.remove_product(order_id, product_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/orders/{order_id}/remove_product",
    tag = "Order",
    params(("order_id" = i32, Path, description = "Order ID")),
    request_body = RemoveProductsRequest,
    responses(
        (status = 200, description = "Linked products removed", body = ApiResponse<RemovedProductsResponse>),
        (status = 400, description = "Invalid order id or empty id list", body = ErrorResponse)
    )
)]
pub async fn remove_products(
    Extension(service): Extension<OrderService>,
    Path(order_id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<RemoveProductsRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.command.remove_products(order_id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn order_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/orders", post(create_order))
        .route(
            "/orders/{order_id}/add_product/{product_id}",
            put(add_product),
        )
        .route("/orders/user/{user_id}", get(get_user_orders))
        .route("/orders/{order_id}/products", get(get_order_products))
        .route(
            "/orders/{order_id}/remove_product/{product_id}",
            delete(remove_product),
        )
        .route("/orders/{order_id}/remove_product", delete(remove_products))
        .layer(Extension(app_state.di_container.order_service.clone()))
}
