//! Runs the sqlx repositories against a real Postgres.
//!
//! Enabled with `--features postgres-tests`; `#[sqlx::test]` creates a
//! scratch database per test from `DATABASE_URL` and applies the storefront
//! migrations to it.

use super::{OrderRepository, ProductRepository, UserRepository};
use crate::{
    config::ConnectionPool,
    domain::requests::{
        CreateOrderRequest, CreateProductRequest, CreateUserRequest, UpdateUserRequest,
    },
    errors::RepositoryError,
};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal_macros::dec;

fn order_date() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 1)
        .and_then(|d| d.and_hms_opt(14, 30, 0))
        .unwrap()
}

fn user(email: &str) -> CreateUserRequest {
    CreateUserRequest {
        name: "Frank".into(),
        address: "7 Birch Ln".into(),
        email: email.into(),
    }
}

async fn seed_order(pool: &ConnectionPool, products: usize) -> (i32, i32, Vec<i32>) {
    let users = UserRepository::new(pool.clone());
    let catalog = ProductRepository::new(pool.clone());
    let orders = OrderRepository::new(pool.clone());

    let owner = users
        .command
        .create_user(&user("frank@example.com"))
        .await
        .unwrap();
    let order = orders
        .command
        .create_order(&CreateOrderRequest {
            order_date: order_date(),
            user_id: owner.id,
        })
        .await
        .unwrap();

    let mut ids = Vec::new();
    for i in 0..products {
        let product = catalog
            .command
            .create_product(&CreateProductRequest {
                product_name: format!("Widget {i}"),
                price: dec!(12.50),
            })
            .await
            .unwrap();
        ids.push(product.id);
    }

    (owner.id, order.id, ids)
}

#[sqlx::test(migrations = "../storefront/migrations")]
async fn user_round_trip_and_unique_email(pool: ConnectionPool) {
    let users = UserRepository::new(pool);

    let created = users
        .command
        .create_user(&user("frank@example.com"))
        .await
        .unwrap();
    let fetched = users.query.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.email, "frank@example.com");
    assert!(users.query.find_by_email("frank@example.com").await.unwrap().is_some());

    let err = users
        .command
        .create_user(&user("frank@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::AlreadyExists(ref c) if c == "users_email_key"));
    assert_eq!(users.query.find_all().await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "../storefront/migrations")]
async fn update_and_delete_missing_user_report_not_found(pool: ConnectionPool) {
    let users = UserRepository::new(pool);
    let req = UpdateUserRequest {
        name: "Ghost".into(),
        address: "Nowhere".into(),
        email: "ghost@example.com".into(),
    };

    assert!(matches!(
        users.command.update_user(404, &req).await,
        Err(RepositoryError::NotFound)
    ));
    assert!(matches!(
        users.command.delete_user(404).await,
        Err(RepositoryError::NotFound)
    ));
}

#[sqlx::test(migrations = "../storefront/migrations")]
async fn product_price_keeps_two_decimals(pool: ConnectionPool) {
    let catalog = ProductRepository::new(pool);

    let created = catalog
        .command
        .create_product(&CreateProductRequest {
            product_name: "Desk".into(),
            price: dec!(249.90),
        })
        .await
        .unwrap();
    let fetched = catalog.query.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.price, dec!(249.90));
}

#[sqlx::test(migrations = "../storefront/migrations")]
async fn order_for_missing_user_violates_foreign_key(pool: ConnectionPool) {
    let orders = OrderRepository::new(pool);

    let err = orders
        .command
        .create_order(&CreateOrderRequest {
            order_date: order_date(),
            user_id: 404,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::ForeignKey(_)));
}

#[sqlx::test(migrations = "../storefront/migrations")]
async fn duplicate_link_hits_unique_constraint(pool: ConnectionPool) {
    let (_, oid, pids) = seed_order(&pool, 1).await;
    let orders = OrderRepository::new(pool);

    orders.command.add_product(oid, pids[0]).await.unwrap();
    assert!(orders.query.has_product(oid, pids[0]).await.unwrap());

    let err = orders.command.add_product(oid, pids[0]).await.unwrap_err();
    assert!(matches!(err, RepositoryError::AlreadyExists(ref c) if c == "uq_order_product"));
    assert_eq!(orders.query.find_products(oid).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "../storefront/migrations")]
async fn single_and_bulk_unlink(pool: ConnectionPool) {
    let (_, oid, pids) = seed_order(&pool, 3).await;
    let orders = OrderRepository::new(pool);
    for pid in &pids {
        orders.command.add_product(oid, *pid).await.unwrap();
    }

    assert!(orders.command.remove_product(oid, pids[2]).await.unwrap());
    assert!(!orders.command.remove_product(oid, pids[2]).await.unwrap());

    let mut removed = orders
        .command
        .remove_products(oid, &[pids[1], pids[2], 999, pids[0]])
        .await
        .unwrap();
    removed.sort_unstable();
    assert_eq!(removed, vec![pids[0], pids[1]]);
    assert!(orders.query.find_products(oid).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../storefront/migrations")]
async fn order_products_are_listed_by_product_id(pool: ConnectionPool) {
    let (uid, oid, pids) = seed_order(&pool, 2).await;
    let orders = OrderRepository::new(pool);
    orders.command.add_product(oid, pids[1]).await.unwrap();
    orders.command.add_product(oid, pids[0]).await.unwrap();

    let listed: Vec<i32> = orders
        .query
        .find_products(oid)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(listed, pids);

    let by_user = orders.query.find_by_user(uid).await.unwrap();
    assert_eq!(by_user.len(), 1);
    assert_eq!(by_user[0].order_date, order_date());
}

#[sqlx::test(migrations = "../storefront/migrations")]
async fn deletes_cascade_to_orders_and_links(pool: ConnectionPool) {
    let (uid, oid, pids) = seed_order(&pool, 2).await;
    let users = UserRepository::new(pool.clone());
    let catalog = ProductRepository::new(pool.clone());
    let orders = OrderRepository::new(pool);
    for pid in &pids {
        orders.command.add_product(oid, *pid).await.unwrap();
    }

    catalog.command.delete_product(pids[0]).await.unwrap();
    assert_eq!(orders.query.find_products(oid).await.unwrap().len(), 1);

    users.command.delete_user(uid).await.unwrap();
    assert!(orders.query.find_by_id(oid).await.unwrap().is_none());
    assert!(!orders.query.has_product(oid, pids[1]).await.unwrap());
}
