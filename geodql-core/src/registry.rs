//! Name-indexed view over the spatial function catalog.
//!
//! [`FunctionRegistry::build`] validates a catalog table once and resolves
//! every alias to its concrete record; lookups afterwards are a single
//! case-insensitive map access. The built-in catalog is exposed through
//! [`FunctionRegistry::global`] as read-only process-wide state.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

#[cfg(feature = "tracing")]
use tracing::debug;

use crate::error::{GeoDqlError, Result};
use crate::function_catalog::{CatalogEntry, FunctionSpec, SPATIAL_FUNCTIONS};

/// Effective argument window for one function on one platform.
///
/// An absent bound is unbounded on that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Arity {
    pub min: Option<usize>,
    pub max: Option<usize>,
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        self.min.is_none_or(|min| count >= min) && self.max.is_none_or(|max| count <= max)
    }

    fn is_consistent(&self) -> bool {
        match (self.min, self.max) {
            (Some(min), Some(max)) => min <= max,
            _ => true,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max) {
            (Some(min), Some(max)) if min == max => write!(f, "exactly {min}"),
            (Some(min), Some(max)) => write!(f, "{min} to {max}"),
            (Some(min), None) => write!(f, "at least {min}"),
            (None, Some(max)) => write!(f, "at most {max}"),
            (None, None) => f.write_str("any number of"),
        }
    }
}

impl FunctionSpec {
    /// Bounds that apply before the target platform is known.
    pub fn generic_arity(&self) -> Arity {
        Arity {
            min: self.min_args,
            max: self.max_args,
        }
    }

    /// Generic bounds overridden by the platform's own, or `None` when the
    /// platform is not supported.
    pub fn arity_for(&self, platform: &str) -> Option<Arity> {
        let support = self.platforms.iter().find(|p| p.platform == platform)?;
        Some(Arity {
            min: support.min_args.or(self.min_args),
            max: support.max_args.or(self.max_args),
        })
    }

    pub fn supports(&self, platform: &str) -> bool {
        self.platforms.iter().any(|p| p.platform == platform)
    }

    /// Supported platform names, duplicates removed, in catalog order.
    pub fn platform_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = Vec::with_capacity(self.platforms.len());
        for p in self.platforms {
            if !names.contains(&p.platform) {
                names.push(p.platform);
            }
        }
        names
    }
}

/// Result of a registry lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedFunction {
    /// Catalog name that matched the lookup.
    pub name: &'static str,
    /// Concrete function the name defers to, when `name` is an alias.
    pub alias_of: Option<&'static str>,
    /// Constraint record, taken from the alias target for aliases.
    pub spec: FunctionSpec,
}

impl ResolvedFunction {
    pub fn is_alias(&self) -> bool {
        self.alias_of.is_some()
    }
}

/// Immutable, case-insensitive index over a function catalog.
#[derive(Debug, Clone)]
pub struct FunctionRegistry {
    functions: HashMap<&'static str, ResolvedFunction>,
}

static GLOBAL: LazyLock<FunctionRegistry> = LazyLock::new(|| {
    FunctionRegistry::build(SPATIAL_FUNCTIONS)
        .unwrap_or_else(|e| panic!("built-in spatial function catalog is invalid: {e}"))
});

impl FunctionRegistry {
    /// Registry over [`SPATIAL_FUNCTIONS`], built on first access.
    pub fn global() -> &'static FunctionRegistry {
        &GLOBAL
    }

    /// Index and validate a catalog table.
    ///
    /// Rejects duplicate or non-lower-case names, functions without a
    /// platform, inverted bounds (generic or per-platform), conflicting
    /// duplicate platform entries, and aliases that do not point directly at
    /// a concrete function.
    pub fn build(entries: &[CatalogEntry]) -> Result<Self> {
        let mut specs: HashMap<&'static str, FunctionSpec> = HashMap::new();
        let mut aliases: Vec<(&'static str, &'static str)> = Vec::new();

        for entry in entries {
            let name = entry.name();
            if name.is_empty() || name != name.to_ascii_lowercase() {
                return Err(invalid(format!("function name {name:?} must be lower case")));
            }
            if specs.contains_key(name) || aliases.iter().any(|(a, _)| *a == name) {
                return Err(invalid(format!("duplicate function name {name:?}")));
            }
            match entry {
                CatalogEntry::Function(spec) => {
                    validate_spec(spec)?;
                    specs.insert(name, *spec);
                }
                CatalogEntry::Alias { target, .. } => aliases.push((name, *target)),
            }
        }

        let mut functions: HashMap<&'static str, ResolvedFunction> = specs
            .iter()
            .map(|(name, spec)| {
                (
                    *name,
                    ResolvedFunction {
                        name: *name,
                        alias_of: None,
                        spec: *spec,
                    },
                )
            })
            .collect();

        for &(name, target) in &aliases {
            let Some(spec) = specs.get(target) else {
                let reason = if aliases.iter().any(|(a, _)| *a == target) {
                    "another alias"
                } else {
                    "an unknown function"
                };
                return Err(invalid(format!(
                    "alias {name:?} points to {reason} {target:?}"
                )));
            };
            functions.insert(
                name,
                ResolvedFunction {
                    name,
                    alias_of: Some(target),
                    spec: *spec,
                },
            );
        }

        #[cfg(feature = "tracing")]
        debug!(
            functions = specs.len(),
            aliases = aliases.len(),
            "spatial function catalog built"
        );

        Ok(Self { functions })
    }

    /// Case-insensitive lookup. Unknown names yield `None`; callers pass
    /// them through unvalidated.
    pub fn lookup(&self, name: &str) -> Option<ResolvedFunction> {
        self.functions.get(name.to_ascii_lowercase().as_str()).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Every entry, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedFunction> {
        let mut all: Vec<&ResolvedFunction> = self.functions.values().collect();
        all.sort_by_key(|f| f.name);
        all.into_iter()
    }

    /// Entries usable on `platform`, sorted by name.
    pub fn functions_for<'a>(
        &'a self,
        platform: &'a str,
    ) -> impl Iterator<Item = &'a ResolvedFunction> + 'a {
        self.iter().filter(move |f| f.spec.supports(platform))
    }
}

fn invalid(reason: String) -> GeoDqlError {
    GeoDqlError::InvalidCatalog(reason)
}

fn validate_spec(spec: &FunctionSpec) -> Result<()> {
    if spec.platforms.is_empty() {
        return Err(invalid(format!(
            "function {:?} supports no platform",
            spec.name
        )));
    }
    if !spec.generic_arity().is_consistent() {
        return Err(invalid(format!(
            "function {:?} has min_args greater than max_args",
            spec.name
        )));
    }
    for (i, support) in spec.platforms.iter().enumerate() {
        if let Some(first) = spec.platforms[..i]
            .iter()
            .find(|p| p.platform == support.platform)
        {
            if first != support {
                return Err(invalid(format!(
                    "function {:?} lists platform {:?} twice with different bounds",
                    spec.name, support.platform
                )));
            }
            continue;
        }
        let effective = spec.arity_for(support.platform).unwrap_or_default();
        if !effective.is_consistent() {
            return Err(invalid(format!(
                "function {:?} has min_args greater than max_args on {:?}",
                spec.name, support.platform
            )));
        }
    }
    Ok(())
}
