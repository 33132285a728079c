mod command;
mod query;

pub use self::command::{UserCommandRepositoryTrait, DynUserCommandRepository};
pub use self::query::{UserQueryRepositoryTrait, DynUserQueryRepository};
