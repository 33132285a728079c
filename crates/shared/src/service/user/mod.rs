mod command;
mod query;

use self::command::UserCommandService;
use self::query::UserQueryService;
use crate::{
    abstract_trait::{
        DynUserCommandRepository, DynUserCommandService, DynUserQueryRepository,
        DynUserQueryService,
    },
    utils::{Metrics, OperationTracer},
};
use prometheus_client::registry::Registry;
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct UserService {
    pub query: DynUserQueryService,
    pub command: DynUserCommandService,
}

impl fmt::Debug for UserService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserService")
            .field("query", &"Arc<dyn UserQueryServiceTrait>")
            .field("command", &"Arc<dyn UserCommandServiceTrait>")
            .finish()
    }
}

impl UserService {
    pub async fn new(
        query: DynUserQueryRepository,
        command: DynUserCommandRepository,
        registry: Arc<Mutex<Registry>>,
    ) -> Self {
        let metrics = Metrics::new();
        metrics.register(&mut *registry.lock().await, "user_service", "UserService");

        let tracer = OperationTracer::new("user-service", Arc::new(Mutex::new(metrics)));

        let query_service =
            Arc::new(UserQueryService::new(query.clone(), tracer.clone())) as DynUserQueryService;
        let command_service = Arc::new(UserCommandService::new(query, command, tracer))
            as DynUserCommandService;

        Self {
            query: query_service,
            command: command_service,
        }
    }
}
