use model::value::Value;
use query::target::QueryTarget;

/// `@eq` — add an equality constraint for the annotated argument.
///
/// The only binding directive that also works on search-backed targets,
/// since single-column equality is the one constraint those support.
#[derive(Debug, Clone)]
pub struct EqDirective {
    /// Name of the schema argument the directive is attached to.
    argument: String,
    /// Storage column override; defaults to the argument name.
    key: Option<String>,
}

impl EqDirective {
    pub fn new(argument: impl Into<String>) -> Self {
        EqDirective {
            argument: argument.into(),
            key: None,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn column(&self) -> &str {
        self.key.as_deref().unwrap_or(&self.argument)
    }

    pub fn handle<T: QueryTarget>(&self, target: T, value: Value) -> T {
        target.where_eq(self.column(), value)
    }
}
