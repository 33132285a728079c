mod command;
mod query;

pub use self::command::{UserCommandServiceTrait, DynUserCommandService};
pub use self::query::{UserQueryServiceTrait, DynUserQueryService};
