//! In-memory repository backend used by service and router tests.
//!
//! Mirrors the constraints of the Postgres schema: unique emails, one row per
//! order/product pair, and cascading deletes from users and products.

use crate::{
    abstract_trait::{
        OrderCommandRepositoryTrait, OrderQueryRepositoryTrait, ProductCommandRepositoryTrait,
        ProductQueryRepositoryTrait, UserCommandRepositoryTrait, UserQueryRepositoryTrait,
    },
    di::DependenciesInject,
    domain::requests::{
        CreateOrderRequest, CreateProductRequest, CreateUserRequest, UpdateProductRequest,
        UpdateUserRequest,
    },
    errors::RepositoryError,
    model::{Order, Product, User},
    repository::{OrderRepository, ProductRepository, UserRepository},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use std::{
    collections::{BTreeMap, BTreeSet},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

#[derive(Default)]
struct Tables {
    users: BTreeMap<i32, User>,
    products: BTreeMap<i32, Product>,
    orders: BTreeMap<i32, Order>,
    order_product: BTreeSet<(i32, i32)>,
    last_user_id: i32,
    last_product_id: i32,
    last_order_id: i32,
}

#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn user_repository(self: &Arc<Self>) -> UserRepository {
        UserRepository {
            query: self.clone(),
            command: self.clone(),
        }
    }

    pub fn product_repository(self: &Arc<Self>) -> ProductRepository {
        ProductRepository {
            query: self.clone(),
            command: self.clone(),
        }
    }

    pub fn order_repository(self: &Arc<Self>) -> OrderRepository {
        OrderRepository {
            query: self.clone(),
            command: self.clone(),
        }
    }

    /// Builds the full service container on top of this store.
    pub async fn dependencies(self: &Arc<Self>) -> DependenciesInject {
        self.dependencies_with(Arc::new(tokio::sync::Mutex::new(Registry::default())))
            .await
    }

    pub async fn dependencies_with(
        self: &Arc<Self>,
        registry: Arc<tokio::sync::Mutex<Registry>>,
    ) -> DependenciesInject {
        DependenciesInject::from_repositories(
            self.user_repository(),
            self.product_repository(),
            self.order_repository(),
            registry,
        )
        .await
    }

    pub fn link_count(&self) -> usize {
        self.tables().order_product.len()
    }

    pub fn order_count(&self) -> usize {
        self.tables().orders.len()
    }
}

#[async_trait]
impl UserQueryRepositoryTrait for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(self.tables().users.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepositoryError> {
        Ok(self.tables().users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .tables()
            .users
            .values()
            .find(|u| u.email == email)
            .cloned())
    }
}

#[async_trait]
impl UserCommandRepositoryTrait for InMemoryStore {
    async fn create_user(&self, req: &CreateUserRequest) -> Result<User, RepositoryError> {
        let mut tables = self.tables();
        if tables.users.values().any(|u| u.email == req.email) {
            return Err(RepositoryError::AlreadyExists("users_email_key".into()));
        }

        tables.last_user_id += 1;
        let user = User {
            id: tables.last_user_id,
            name: req.name.clone(),
            address: req.address.clone(),
            email: req.email.clone(),
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_user(&self, id: i32, req: &UpdateUserRequest) -> Result<User, RepositoryError> {
        let mut tables = self.tables();
        if tables
            .users
            .values()
            .any(|u| u.id != id && u.email == req.email)
        {
            return Err(RepositoryError::AlreadyExists("users_email_key".into()));
        }

        let user = tables.users.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        user.name = req.name.clone();
        user.address = req.address.clone();
        user.email = req.email.clone();
        Ok(user.clone())
    }

    async fn delete_user(&self, id: i32) -> Result<(), RepositoryError> {
        let mut tables = self.tables();
        tables.users.remove(&id).ok_or(RepositoryError::NotFound)?;

        let owned: BTreeSet<i32> = tables
            .orders
            .values()
            .filter(|o| o.user_id == id)
            .map(|o| o.id)
            .collect();
        tables.orders.retain(|oid, _| !owned.contains(oid));
        tables
            .order_product
            .retain(|(oid, _)| !owned.contains(oid));
        Ok(())
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        Ok(self.tables().products.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, RepositoryError> {
        Ok(self.tables().products.get(&id).cloned())
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for InMemoryStore {
    async fn create_product(&self, req: &CreateProductRequest) -> Result<Product, RepositoryError> {
        let mut tables = self.tables();
        tables.last_product_id += 1;
        let product = Product {
            id: tables.last_product_id,
            product_name: req.product_name.clone(),
            price: req.price,
        };
        tables.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn update_product(
        &self,
        id: i32,
        req: &UpdateProductRequest,
    ) -> Result<Product, RepositoryError> {
        let mut tables = self.tables();
        let product = tables
            .products
            .get_mut(&id)
            .ok_or(RepositoryError::NotFound)?;
        product.product_name = req.product_name.clone();
        product.price = req.price;
        Ok(product.clone())
    }

    async fn delete_product(&self, id: i32) -> Result<(), RepositoryError> {
        let mut tables = self.tables();
        tables.products.remove(&id).ok_or(RepositoryError::NotFound)?;
        tables.order_product.retain(|(_, pid)| *pid != id);
        Ok(())
    }
}

#[async_trait]
impl OrderQueryRepositoryTrait for InMemoryStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<Order>, RepositoryError> {
        Ok(self.tables().orders.get(&id).cloned())
    }

    async fn find_by_user(&self, user_id: i32) -> Result<Vec<Order>, RepositoryError> {
        Ok(self
            .tables()
            .orders
            .values()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_products(&self, order_id: i32) -> Result<Vec<Product>, RepositoryError> {
        let tables = self.tables();
        Ok(tables
            .order_product
            .iter()
            .filter(|(oid, _)| *oid == order_id)
            .filter_map(|(_, pid)| tables.products.get(pid).cloned())
            .collect())
    }

    async fn has_product(&self, order_id: i32, product_id: i32) -> Result<bool, RepositoryError> {
        Ok(self.tables().order_product.contains(&(order_id, product_id)))
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for InMemoryStore {
    async fn create_order(&self, req: &CreateOrderRequest) -> Result<Order, RepositoryError> {
        let mut tables = self.tables();
        if !tables.users.contains_key(&req.user_id) {
            return Err(RepositoryError::ForeignKey("orders_user_id_fkey".into()));
        }

        tables.last_order_id += 1;
        let order = Order {
            id: tables.last_order_id,
            order_date: req.order_date,
            user_id: req.user_id,
        };
        tables.orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn add_product(&self, order_id: i32, product_id: i32) -> Result<(), RepositoryError> {
        let mut tables = self.tables();
        if !tables.orders.contains_key(&order_id) || !tables.products.contains_key(&product_id) {
            return Err(RepositoryError::ForeignKey("order_product_fkey".into()));
        }
        if !tables.order_product.insert((order_id, product_id)) {
            return Err(RepositoryError::AlreadyExists("uq_order_product".into()));
        }
        Ok(())
    }

    async fn remove_product(&self, order_id: i32, product_id: i32) -> Result<bool, RepositoryError> {
        Ok(self.tables().order_product.remove(&(order_id, product_id)))
    }

    async fn remove_products(
        &self,
        order_id: i32,
        product_ids: &[i32],
    ) -> Result<Vec<i32>, RepositoryError> {
        let mut tables = self.tables();
        let mut removed = Vec::new();
        for &pid in product_ids {
            if tables.order_product.remove(&(order_id, pid)) {
                removed.push(pid);
            }
        }
        // RETURNING gives no ordering guarantee.
        removed.reverse();
        Ok(removed)
    }
}
