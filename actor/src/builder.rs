use ordo_config::ActorConfig;
use ordo_types::{ActorError, Sentinel};
use tokio::runtime::Handle;

use crate::action::OrderedActionActor;
use crate::adapter::Work;
use crate::chain::OrderedActor;

/// Configures and starts an actor.
///
/// Without an explicit runtime the worker is spawned on the runtime the
/// builder is invoked from; building outside any runtime fails with
/// [`ActorError::NoRuntime`].
#[derive(Debug, Default)]
pub struct OrderedActorBuilder {
    config: ActorConfig,
    runtime: Option<Handle>,
}

impl OrderedActorBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: ActorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    pub fn fair_yield(mut self, enabled: bool) -> Self {
        self.config.fair_yield = enabled;
        self
    }

    /// Host the worker on `runtime` instead of the current one.
    pub fn runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    pub fn build<T, R>(self, work: Work<T, R>) -> Result<OrderedActor<T, R>, ActorError>
    where
        T: Send + 'static,
        R: Send + 'static,
    {
        let runtime = match self.runtime {
            Some(runtime) => runtime,
            None => Handle::try_current().map_err(|_| ActorError::NoRuntime)?,
        };
        tracing::debug!(
            name = %self.config.name,
            fair_yield = self.config.fair_yield,
            "Starting ordered actor"
        );
        Ok(OrderedActor::spawn(self.config, &runtime, work))
    }

    pub fn build_action<T>(
        self,
        work: Work<T, Sentinel>,
    ) -> Result<OrderedActionActor<T>, ActorError>
    where
        T: Send + 'static,
    {
        self.build(work).map(OrderedActionActor::from)
    }
}
