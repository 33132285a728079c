mod order;
mod product;
mod user;

pub use self::order::{CreateOrderRequest, RemoveProductsRequest};
pub use self::product::{CreateProductRequest, UpdateProductRequest};
pub use self::user::{CreateUserRequest, UpdateUserRequest};
