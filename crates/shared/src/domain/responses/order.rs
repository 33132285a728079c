use crate::model::Order;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct OrderResponse {
    pub id: i32,
    #[schema(value_type = String, example = "2024-05-01T14:30:00")]
    pub order_date: NaiveDateTime,
    pub user_id: i32,
}

impl From<Order> for OrderResponse {
    fn from(value: Order) -> Self {
        OrderResponse {
            id: value.id,
            order_date: value.order_date,
            user_id: value.user_id,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct RemovedProductsResponse {
    pub removed_product_ids: Vec<i32>,
}
