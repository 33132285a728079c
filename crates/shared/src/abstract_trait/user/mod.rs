mod repository;
mod service;

pub use self::repository::{
    DynUserCommandRepository, DynUserQueryRepository, UserCommandRepositoryTrait,
    UserQueryRepositoryTrait,
};
pub use self::service::{
    DynUserCommandService, DynUserQueryService, UserCommandServiceTrait, UserQueryServiceTrait,
};
