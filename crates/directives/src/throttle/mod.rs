//! `@throttle` — rate limit access to a field, wrapping its resolver.

pub mod limiter;
pub mod registry;

pub use limiter::{InMemoryRateLimiter, RateLimiter};
pub use registry::{Limit, LimiterRegistry, LimiterResponse};

use crate::{
    error::{DirectiveError, FieldError},
    resolve::{Resolver, ResolverResult},
};
use futures::future::{BoxFuture, ready};
use sha2::{Digest, Sha256};
use std::{sync::Arc, time::Duration};
use tracing::warn;

/// Directive configuration as parsed from the schema.
#[derive(Debug, Clone)]
pub struct ThrottleDirective {
    /// Preconfigured named limiter; overrides the anonymous settings.
    name: Option<String>,
    max_attempts: u32,
    decay_minutes: f64,
    /// Distinguishes several field groups sharing one anonymous limit.
    prefix: Option<String>,
}

impl Default for ThrottleDirective {
    fn default() -> Self {
        ThrottleDirective {
            name: None,
            max_attempts: 60,
            decay_minutes: 1.0,
            prefix: None,
        }
    }
}

impl ThrottleDirective {
    pub fn new() -> Self {
        ThrottleDirective::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        ThrottleDirective {
            name: Some(name.into()),
            ..ThrottleDirective::default()
        }
    }

    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn decay_minutes(mut self, decay_minutes: f64) -> Self {
        self.decay_minutes = decay_minutes;
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Wrap `resolver` so every invocation checks the configured limits
    /// before delegating. A named limiter must already be registered;
    /// that is validated here, at schema-build time, not per request.
    pub fn wrap(
        &self,
        limiter: Arc<dyn RateLimiter>,
        registry: Arc<LimiterRegistry>,
        resolver: Resolver,
    ) -> Result<Resolver, DirectiveError> {
        if let Some(name) = &self.name
            && !registry.contains(name)
        {
            return Err(DirectiveError::UnknownLimiter(name.clone()));
        }

        let name = self.name.clone();
        let prefix = self.prefix.clone().unwrap_or_default();
        let max_attempts = self.max_attempts;
        let decay = Duration::from_secs_f64(self.decay_minutes * 60.0);

        Ok(Arc::new(move |ctx| {
            let limits = match &name {
                Some(name) => match registry.resolve(name, &ctx) {
                    Some(LimiterResponse::Unlimited) => return resolver(ctx),
                    Some(LimiterResponse::Limits(limits)) => limits
                        .into_iter()
                        .map(|limit| Limit {
                            key: throttle_key(&format!("{name}{}", limit.key)),
                            ..limit
                        })
                        .collect(),
                    // Registration was checked at wrap time; the registry
                    // is immutable after startup.
                    None => {
                        return reject(FieldError::Resolver(format!(
                            "named limiter \"{name}\" is not registered"
                        )));
                    }
                },
                None => vec![Limit {
                    key: throttle_key(&format!("{prefix}{}", ctx.ip)),
                    max_attempts,
                    decay,
                }],
            };

            for limit in &limits {
                if limiter.too_many_attempts(&limit.key, limit.max_attempts) {
                    warn!(key = %limit.key, max_attempts = limit.max_attempts, "rate limit exceeded");
                    return reject(FieldError::RateLimited);
                }
                limiter.hit(&limit.key, limit.decay);
            }

            resolver(ctx)
        }))
    }
}

fn reject(err: FieldError) -> BoxFuture<'static, ResolverResult> {
    Box::pin(ready(Err(err)))
}

/// Hash limit keys so client-derived parts (ip, user id) never reach the
/// limiter backend verbatim.
fn throttle_key(seed: &str) -> String {
    Sha256::digest(seed.as_bytes())
        .iter()
        .fold(String::new(), |acc, byte| acc + &format!("{byte:02x}"))
}
