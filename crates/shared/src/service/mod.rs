mod order;
mod product;
mod user;

pub use self::order::{OrderService, OrderServiceDeps};
pub use self::product::ProductService;
pub use self::user::UserService;
