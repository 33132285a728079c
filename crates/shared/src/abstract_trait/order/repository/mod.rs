mod command;
mod query;

pub use self::command::{OrderCommandRepositoryTrait, DynOrderCommandRepository};
pub use self::query::{OrderQueryRepositoryTrait, DynOrderQueryRepository};
