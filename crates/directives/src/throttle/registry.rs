use crate::resolve::RequestContext;
use std::{collections::HashMap, time::Duration};

/// One rate limit: a key (pre-hashing), a ceiling, and a window length.
#[derive(Debug, Clone, PartialEq)]
pub struct Limit {
    pub key: String,
    pub max_attempts: u32,
    pub decay: Duration,
}

impl Limit {
    pub fn new(key: impl Into<String>, max_attempts: u32, decay: Duration) -> Self {
        Limit {
            key: key.into(),
            max_attempts,
            decay,
        }
    }

    pub fn per_minute(key: impl Into<String>, max_attempts: u32) -> Self {
        Limit::new(key, max_attempts, Duration::from_secs(60))
    }
}

/// What a named limiter decided for a given request.
#[derive(Debug, Clone, PartialEq)]
pub enum LimiterResponse {
    /// No throttling for this caller.
    Unlimited,
    Limits(Vec<Limit>),
}

type LimiterFn = Box<dyn Fn(&RequestContext) -> LimiterResponse + Send + Sync>;

/// Named limiters, registered once at startup and resolved per request.
/// A named limiter can vary its limits by caller (e.g. higher ceilings
/// for authenticated users) or opt a caller out entirely.
#[derive(Default)]
pub struct LimiterRegistry {
    limiters: HashMap<String, LimiterFn>,
}

impl LimiterRegistry {
    pub fn new() -> Self {
        LimiterRegistry::default()
    }

    pub fn register<F>(mut self, name: impl Into<String>, limiter: F) -> Self
    where
        F: Fn(&RequestContext) -> LimiterResponse + Send + Sync + 'static,
    {
        self.limiters.insert(name.into(), Box::new(limiter));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.limiters.contains_key(name)
    }

    pub fn resolve(&self, name: &str, context: &RequestContext) -> Option<LimiterResponse> {
        self.limiters.get(name).map(|limiter| limiter(context))
    }
}

#[cfg(test)]
mod tests {
    use super::{Limit, LimiterRegistry, LimiterResponse};
    use crate::resolve::RequestContext;

    #[test]
    fn test_resolves_per_caller() {
        let registry = LimiterRegistry::new().register("api", |ctx: &RequestContext| {
            if ctx.user_id.is_some() {
                LimiterResponse::Unlimited
            } else {
                LimiterResponse::Limits(vec![Limit::per_minute(ctx.ip.clone(), 10)])
            }
        });

        let anonymous = RequestContext::new("10.0.0.1");
        let trusted = RequestContext::new("10.0.0.2").with_user("u1");

        assert!(matches!(
            registry.resolve("api", &anonymous),
            Some(LimiterResponse::Limits(_))
        ));
        assert_eq!(
            registry.resolve("api", &trusted),
            Some(LimiterResponse::Unlimited)
        );
        assert!(registry.resolve("missing", &anonymous).is_none());
    }
}
