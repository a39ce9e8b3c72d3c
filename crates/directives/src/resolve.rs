use crate::error::FieldError;
use futures::future::BoxFuture;
use std::sync::Arc;

/// Per-request data available to field resolvers and named limiters.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub ip: String,
    pub user_id: Option<String>,
}

impl RequestContext {
    pub fn new(ip: impl Into<String>) -> Self {
        RequestContext {
            ip: ip.into(),
            user_id: None,
        }
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

pub type ResolverResult = Result<serde_json::Value, FieldError>;

/// A field resolver: async, shareable, invoked once per field resolution.
pub type Resolver =
    Arc<dyn Fn(Arc<RequestContext>) -> BoxFuture<'static, ResolverResult> + Send + Sync>;

/// Box an async closure into a [`Resolver`].
pub fn resolver<F, Fut>(f: F) -> Resolver
where
    F: Fn(Arc<RequestContext>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ResolverResult> + Send + 'static,
{
    Arc::new(move |ctx| Box::pin(f(ctx)))
}
