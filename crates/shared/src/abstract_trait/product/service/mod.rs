mod command;
mod query;

pub use self::command::{ProductCommandServiceTrait, DynProductCommandService};
pub use self::query::{ProductQueryServiceTrait, DynProductQueryService};
