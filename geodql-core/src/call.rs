//! Spatial function call node: argument collection and SQL emission.
//!
//! A [`FunctionCallNode`] is created when the host query parser meets a call
//! to a spatial function. It pulls its arguments from an [`ArgumentSource`]
//! under the function's generic arity window, and later renders
//! `name(arg, ...)` for a concrete platform through an [`ArgumentRenderer`].
//! Names missing from the registry are passed through unvalidated.
//!
//! # Example
//!
//! ```
//! use geodql_core::call::{ArgumentSource, FunctionCallNode};
//!
//! struct Args(Vec<&'static str>);
//!
//! impl ArgumentSource for Args {
//!     type Argument = &'static str;
//!     type Error = String;
//!
//!     fn match_argument(&mut self) -> Result<&'static str, String> {
//!         if self.0.is_empty() {
//!             return Err("expected argument".into());
//!         }
//!         Ok(self.0.remove(0))
//!     }
//!     fn match_separator(&mut self) -> Result<(), String> {
//!         Ok(())
//!     }
//!     fn has_more_arguments(&self) -> bool {
//!         !self.0.is_empty()
//!     }
//!     fn match_close(&mut self) -> Result<(), String> {
//!         Ok(())
//!     }
//! }
//!
//! let mut node = FunctionCallNode::new("ST_Within");
//! node.collect_arguments(&mut Args(vec!["a.geom", "b.geom"])).unwrap();
//!
//! let render = |arg: &&str, _: &str| Ok::<_, geodql_core::GeoDqlError>(arg.to_string());
//! assert_eq!(node.emit("mysql", &render).unwrap(), "ST_Within(a.geom, b.geom)");
//! assert!(node.emit("sqlite", &render).is_err());
//! ```

#[cfg(feature = "tracing")]
use tracing::{debug, trace};

use crate::error::GeoDqlError;
use crate::function_catalog::FunctionSpec;
use crate::registry::{FunctionRegistry, ResolvedFunction};

/// Tokenizer/parser of the enclosing query language, positioned just after
/// the call's opening parenthesis.
pub trait ArgumentSource {
    type Argument;
    type Error;

    fn match_argument(&mut self) -> Result<Self::Argument, Self::Error>;

    fn match_separator(&mut self) -> Result<(), Self::Error>;

    /// Whether the next token is anything other than the closing delimiter.
    fn has_more_arguments(&self) -> bool;

    fn match_close(&mut self) -> Result<(), Self::Error>;
}

/// Renders one collected argument as SQL for a platform.
pub trait ArgumentRenderer<A> {
    type Error: From<GeoDqlError>;

    fn render(&self, argument: &A, platform: &str) -> Result<String, Self::Error>;
}

impl<A, E, F> ArgumentRenderer<A> for F
where
    F: Fn(&A, &str) -> Result<String, E>,
    E: From<GeoDqlError>,
{
    type Error = E;

    fn render(&self, argument: &A, platform: &str) -> Result<String, E> {
        self(argument, platform)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCallNode<A> {
    name: String,
    resolved: Option<ResolvedFunction>,
    arguments: Vec<A>,
}

impl<A> FunctionCallNode<A> {
    /// Resolve `name` against the built-in catalog.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_registry(name, FunctionRegistry::global())
    }

    pub fn with_registry(name: impl Into<String>, registry: &FunctionRegistry) -> Self {
        let name = name.into();
        let resolved = registry.lookup(&name);

        #[cfg(feature = "tracing")]
        if resolved.is_none() {
            debug!(function = %name, "unknown spatial function; passing through unvalidated");
        }

        Self {
            name,
            resolved,
            arguments: Vec::new(),
        }
    }

    /// The name as written in the query, emitted verbatim.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn resolved(&self) -> Option<&ResolvedFunction> {
        self.resolved.as_ref()
    }

    /// Constraint record, the alias target's for aliases.
    pub fn constraint(&self) -> Option<&FunctionSpec> {
        self.resolved.as_ref().map(|r| &r.spec)
    }

    pub fn is_validated(&self) -> bool {
        self.resolved.is_some()
    }

    pub fn produces_geometry(&self) -> bool {
        self.constraint().is_some_and(|spec| spec.produces_geometry)
    }

    pub fn produces_numeric(&self) -> bool {
        self.constraint().is_some_and(|spec| spec.produces_numeric)
    }

    pub fn arguments(&self) -> &[A] {
        &self.arguments
    }

    pub fn into_arguments(self) -> Vec<A> {
        self.arguments
    }

    /// Pull arguments from `source` until the generic arity window is
    /// satisfied, then consume the closing delimiter.
    ///
    /// One argument is always read. More are read while fewer than
    /// `min_args` have been collected, or while the source reports pending
    /// arguments and `max_args` has not been reached. Errors from `source`
    /// are returned unchanged.
    pub fn collect_arguments<S>(&mut self, source: &mut S) -> Result<(), S::Error>
    where
        S: ArgumentSource<Argument = A>,
    {
        let window = self
            .constraint()
            .map(FunctionSpec::generic_arity)
            .unwrap_or_default();

        self.arguments.push(source.match_argument()?);
        loop {
            let count = self.arguments.len();
            let below_min = window.min.is_some_and(|min| count < min);
            let below_max = window.max.is_none_or(|max| count < max);
            if !(below_min || (below_max && source.has_more_arguments())) {
                break;
            }
            source.match_separator()?;
            self.arguments.push(source.match_argument()?);
        }
        source.match_close()
    }

    /// Check `platform` and the collected argument count against the
    /// function's per-platform window. Unknown functions always pass.
    pub fn validate_platform(&self, platform: &str) -> Result<(), GeoDqlError> {
        let Some(resolved) = &self.resolved else {
            return Ok(());
        };
        let Some(window) = resolved.spec.arity_for(platform) else {
            return Err(GeoDqlError::UnsupportedPlatform {
                platform: platform.to_string(),
                function: self.name.clone(),
            });
        };
        if !window.accepts(self.arguments.len()) {
            return Err(GeoDqlError::ArgumentCount {
                function: self.name.clone(),
                platform: platform.to_string(),
                window: window.to_string(),
                count: self.arguments.len(),
            });
        }
        Ok(())
    }

    /// Render `name(arg1, arg2, ...)` for `platform`.
    ///
    /// Validation happens before any argument is rendered, and nothing is
    /// returned unless every argument renders. Emission does not mutate the
    /// node and may be repeated for other platforms.
    pub fn emit<R>(&self, platform: &str, renderer: &R) -> Result<String, R::Error>
    where
        R: ArgumentRenderer<A>,
    {
        self.validate_platform(platform)?;

        let rendered = self
            .arguments
            .iter()
            .map(|argument| renderer.render(argument, platform))
            .collect::<Result<Vec<_>, _>>()?;
        let sql = format!("{}({})", self.name, rendered.join(", "));

        #[cfg(feature = "tracing")]
        trace!(function = %self.name, platform, sql = %sql, "emitted spatial function call");

        Ok(sql)
    }
}
