use crate::{
    abstract_trait::OrderCommandRepositoryTrait, config::ConnectionPool,
    domain::requests::CreateOrderRequest, errors::RepositoryError, model::Order as OrderModel,
};
use async_trait::async_trait;
use tracing::{error, info};

pub struct OrderCommandRepository {
    db: ConnectionPool,
}

impl OrderCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for OrderCommandRepository {
    async fn create_order(&self, req: &CreateOrderRequest) -> Result<OrderModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, OrderModel>(
            r#"
            INSERT INTO orders (order_date, user_id)
            VALUES ($1, $2)
            RETURNING id, order_date, user_id
            "#,
        )
        .bind(req.order_date)
        .bind(req.user_id)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to create order for user {}: {:?}",
                req.user_id, err
            );
            RepositoryError::from_constraint(err)
        })?;

        info!(
            "✅ Created order ID {} for user {}",
            result.id, result.user_id
        );
        Ok(result)
    }

    async fn add_product(&self, order_id: i32, product_id: i32) -> Result<(), RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query(
            r#"
            INSERT INTO order_product (order_id, product_id)
            VALUES ($1, $2)
            "#,
        )
        .bind(order_id)
        .bind(product_id)
        .execute(&mut *conn)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to add product {} to order {}: {:?}",
                product_id, order_id, err
            );
            RepositoryError::from_constraint(err)
        })?;

        info!("➕ Linked product {} to order {}", product_id, order_id);
        Ok(())
    }

    async fn remove_product(
        &self,
        order_id: i32,
        product_id: i32,
    ) -> Result<bool, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query(
            r#"
            DELETE FROM order_product
            WHERE order_id = $1 AND product_id = $2
            "#,
        )
        .bind(order_id)
        .bind(product_id)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            error!(
                "❌ Failed to remove product {} from order {}: {:?}",
                product_id, order_id, e
            );
            RepositoryError::from(e)
        })?;

        info!(
            "➖ Unlinked product {} from order {} ({} rows)",
            product_id,
            order_id,
            result.rows_affected()
        );
        Ok(result.rows_affected() > 0)
    }

    async fn remove_products(
        &self,
        order_id: i32,
        product_ids: &[i32],
    ) -> Result<Vec<i32>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let removed: Vec<i32> = sqlx::query_scalar(
            r#"
            DELETE FROM order_product
            WHERE order_id = $1 AND product_id = ANY($2)
            RETURNING product_id
            "#,
        )
        .bind(order_id)
        .bind(product_ids)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!(
                "❌ Failed to bulk-remove products from order {}: {:?}",
                order_id, e
            );
            RepositoryError::from(e)
        })?;

        info!(
            "➖ Unlinked {} products from order {}",
            removed.len(),
            order_id
        );
        Ok(removed)
    }
}
