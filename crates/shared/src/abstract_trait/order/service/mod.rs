mod command;
mod query;

pub use self::command::{OrderCommandServiceTrait, DynOrderCommandService};
pub use self::query::{OrderQueryServiceTrait, DynOrderQueryService};
