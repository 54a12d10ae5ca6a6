//! Canonical spatial DQL function catalog.
//!
//! Every entry is either a concrete [`FunctionSpec`] or an alias naming
//! another concrete entry. The table is plain data; [`crate::registry`]
//! indexes and validates it.

/// Platform name reported by MySQL database drivers.
pub const PLATFORM_MYSQL: &str = "mysql";
/// Platform name reported by PostgreSQL (PostGIS) database drivers.
pub const PLATFORM_POSTGRESQL: &str = "postgresql";

/// Platform support for one function, with optional arity overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformArity {
    pub platform: &'static str,
    pub min_args: Option<usize>,
    pub max_args: Option<usize>,
}

impl PlatformArity {
    /// Supported on `platform` with the function's generic bounds.
    pub const fn on(platform: &'static str) -> Self {
        Self {
            platform,
            min_args: None,
            max_args: None,
        }
    }

    pub const fn min(self, n: usize) -> Self {
        Self {
            min_args: Some(n),
            ..self
        }
    }

    pub const fn max(self, n: usize) -> Self {
        Self {
            max_args: Some(n),
            ..self
        }
    }
}

/// Constraint record for one spatial function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionSpec {
    pub name: &'static str,
    pub platforms: &'static [PlatformArity],
    pub min_args: Option<usize>,
    pub max_args: Option<usize>,
    /// The SQL result is a geometry value rather than a scalar.
    pub produces_geometry: bool,
    /// The SQL result is numeric (measurements and predicates).
    pub produces_numeric: bool,
}

impl FunctionSpec {
    pub const fn new(name: &'static str, platforms: &'static [PlatformArity]) -> Self {
        Self {
            name,
            platforms,
            min_args: None,
            max_args: None,
            produces_geometry: false,
            produces_numeric: false,
        }
    }

    /// Generic bounds `min..=max`.
    pub const fn args(self, min: usize, max: usize) -> Self {
        Self {
            min_args: Some(min),
            max_args: Some(max),
            ..self
        }
    }

    pub const fn min(self, n: usize) -> Self {
        Self {
            min_args: Some(n),
            ..self
        }
    }

    pub const fn max(self, n: usize) -> Self {
        Self {
            max_args: Some(n),
            ..self
        }
    }

    pub const fn geometry(self) -> Self {
        Self {
            produces_geometry: true,
            ..self
        }
    }

    pub const fn numeric(self) -> Self {
        Self {
            produces_numeric: true,
            ..self
        }
    }
}

/// One row of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogEntry {
    Function(FunctionSpec),
    /// `name` carries no constraints of its own and defers to `target`.
    Alias {
        name: &'static str,
        target: &'static str,
    },
}

impl CatalogEntry {
    pub const fn name(&self) -> &'static str {
        match self {
            CatalogEntry::Function(spec) => spec.name,
            CatalogEntry::Alias { name, .. } => *name,
        }
    }
}

const MYSQL: &[PlatformArity] = &[PlatformArity::on(PLATFORM_MYSQL)];
const PGSQL: &[PlatformArity] = &[PlatformArity::on(PLATFORM_POSTGRESQL)];
const BOTH: &[PlatformArity] = &[
    PlatformArity::on(PLATFORM_MYSQL),
    PlatformArity::on(PLATFORM_POSTGRESQL),
];

const fn f(name: &'static str, platforms: &'static [PlatformArity]) -> FunctionSpec {
    FunctionSpec::new(name, platforms)
}

const fn alias(name: &'static str, target: &'static str) -> CatalogEntry {
    CatalogEntry::Alias { name, target }
}

use CatalogEntry::Function as F;

pub const SPATIAL_FUNCTIONS: &[CatalogEntry] = &[
    // MySQL constructors and MBR predicates
    F(f("geometry", PGSQL).args(1, 1)),
    F(f("point", MYSQL).args(2, 2)),
    F(f("linestring", MYSQL).args(2, 2)),
    F(f("mbrcontains", MYSQL).args(2, 2).numeric()),
    F(f("mbrdisjoint", MYSQL).numeric()),
    F(f("mbrequals", MYSQL).args(2, 2)),
    F(f("mbrintersects", MYSQL).args(2, 2)),
    F(f("mbroverlaps", MYSQL).args(2, 2)),
    F(f("mbrtouches", MYSQL).args(2, 2)),
    F(f("mbrwithin", MYSQL).args(2, 2)),
    // I/O
    F(f("st_asbinary", BOTH).args(1, 1).geometry()),
    F(f(
        "st_asgeojson",
        &[
            PlatformArity::on(PLATFORM_MYSQL).max(3),
            PlatformArity::on(PLATFORM_POSTGRESQL).max(4),
        ],
    )
    .min(1)
    .geometry()),
    F(f("st_astext", BOTH).args(1, 1).geometry()),
    F(f("st_geographyfromtext", PGSQL).args(1, 2)),
    F(f("st_geomfromewkt", PGSQL).args(1, 2)),
    F(f(
        "st_geomfromtext",
        &[
            PlatformArity::on(PLATFORM_MYSQL).max(1),
            PlatformArity::on(PLATFORM_POSTGRESQL).max(2),
        ],
    )
    .min(1)),
    F(f(
        "st_linestringfromwkb",
        &[
            PlatformArity::on(PLATFORM_MYSQL).max(3),
            PlatformArity::on(PLATFORM_POSTGRESQL).max(2),
        ],
    )
    .min(1)),
    F(f(
        "st_pointfromwkb",
        &[
            PlatformArity::on(PLATFORM_MYSQL).max(3),
            PlatformArity::on(PLATFORM_POSTGRESQL).max(2),
        ],
    )
    .min(1)),
    // Constructors
    F(f("st_collect", PGSQL).args(1, 2)),
    F(f("st_makebox2d", PGSQL).args(2, 2)),
    F(f(
        "st_makeenvelope",
        &[
            PlatformArity::on(PLATFORM_MYSQL).min(2).max(2),
            PlatformArity::on(PLATFORM_POSTGRESQL).min(4).max(5),
        ],
    )),
    F(f("st_makeline", PGSQL).args(2, 2)),
    F(f("st_makepoint", PGSQL).args(2, 4)),
    alias("st_point", "st_makepoint"),
    // Accessors
    F(f("st_dimension", BOTH).args(1, 1)),
    F(f("st_endpoint", BOTH).args(1, 1)),
    F(f("st_envelope", BOTH).args(1, 1)),
    F(f("st_exteriorring", BOTH).args(1, 1)),
    F(f("st_geometryn", BOTH).args(2, 2).geometry()),
    F(f("st_geometrytype", BOTH).args(1, 1)),
    F(f("st_interiorringn", BOTH).args(2, 2)),
    F(f("st_isclosed", BOTH).args(1, 1)),
    F(f("st_isempty", BOTH).args(1, 1)),
    F(f("st_issimple", BOTH).args(1, 1)),
    F(f("st_numinteriorrings", BOTH).args(1, 1)),
    F(f("st_numpoints", BOTH).args(1, 1)),
    F(f(
        "st_pointn",
        &[
            PlatformArity::on(PLATFORM_MYSQL).max(1),
            PlatformArity::on(PLATFORM_POSTGRESQL).max(2),
        ],
    )
    .min(1)),
    F(f("st_srid", BOTH).args(1, 1)),
    F(f("st_setsrid", PGSQL).args(2, 2)),
    F(f("st_startpoint", BOTH).args(1, 1)),
    F(f("st_summary", PGSQL).args(1, 1)),
    F(f("st_x", BOTH).args(1, 1)),
    F(f("st_y", BOTH).args(1, 1)),
    // Measurement
    F(f("st_area", BOTH).args(1, 1).numeric()),
    F(f("st_azimuth", PGSQL).args(2, 2)),
    F(f("st_closestpoint", PGSQL).args(2, 2)),
    F(f(
        "st_distance",
        &[
            PlatformArity::on(PLATFORM_MYSQL).max(2),
            PlatformArity::on(PLATFORM_POSTGRESQL).max(3),
        ],
    )
    .min(2)
    .numeric()),
    F(f("st_distancesphere", PGSQL).args(2, 2).numeric()),
    F(f("st_distance_sphere", MYSQL).args(2, 2).numeric()),
    F(f("st_extent", PGSQL).args(1, 1)),
    F(f("st_length", BOTH).args(1, 1).numeric()),
    F(f("st_perimeter", PGSQL).args(1, 1)),
    // Linear referencing
    F(f("st_linecrossingdirection", PGSQL).args(2, 2).numeric()),
    F(f("st_lineinterpolatepoint", PGSQL).args(2, 2)),
    F(f("st_linelocatepoint", PGSQL).args(2, 2)),
    F(f("st_linesubstring", PGSQL).args(3, 3).geometry()),
    // Operations
    F(f("st_boundary", PGSQL).args(1, 1).geometry()),
    F(f(
        "st_buffer",
        &[
            PlatformArity::on(PLATFORM_MYSQL).max(5),
            PlatformArity::on(PLATFORM_POSTGRESQL).max(3),
        ],
    )
    .min(2)
    .numeric()),
    F(f("st_centroid", BOTH).args(1, 1)),
    F(f("st_difference", BOTH).args(2, 2).geometry()),
    F(f("st_expand", PGSQL).args(2, 2)),
    F(f("st_intersection", BOTH).args(2, 2)),
    F(f("st_scale", PGSQL).args(3, 3)),
    F(f("st_simplify", PGSQL).args(2, 2)),
    F(f("st_snaptogrid", PGSQL).args(2, 6).geometry()),
    F(f("st_split", PGSQL).args(2, 2).geometry()),
    // Duplicate platform entry collapses to one in the registry.
    F(f(
        "st_transform",
        &[
            PlatformArity::on(PLATFORM_POSTGRESQL),
            PlatformArity::on(PLATFORM_POSTGRESQL),
        ],
    )
    .args(2, 2)),
    F(f("st_translate", PGSQL).args(3, 4).geometry()),
    F(f(
        "st_union",
        &[
            PlatformArity::on(PLATFORM_MYSQL).min(2),
            PlatformArity::on(PLATFORM_POSTGRESQL).min(1),
        ],
    )
    .max(2)
    .geometry()),
    // Predicates
    F(f("st_contains", BOTH).args(2, 2).numeric()),
    F(f("st_containsproperly", PGSQL).args(2, 2).numeric()),
    F(f("st_coveredby", PGSQL).args(2, 2).numeric()),
    F(f("st_covers", PGSQL).args(2, 2).numeric()),
    F(f("st_crosses", BOTH).args(2, 2).numeric()),
    F(f("st_disjoint", BOTH).args(2, 2).numeric()),
    F(f("st_dwithin", PGSQL).args(2, 3)),
    F(f("st_equals", BOTH).args(2, 2)),
    F(f("st_intersects", BOTH).args(2, 2)),
    F(f("st_overlaps", BOTH).args(2, 2)),
    F(f("st_touches", BOTH).args(2, 2)),
    F(f("st_within", BOTH).args(2, 2)),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str) -> &'static FunctionSpec {
        SPATIAL_FUNCTIONS
            .iter()
            .find_map(|entry| match entry {
                CatalogEntry::Function(spec) if spec.name == name => Some(spec),
                _ => None,
            })
            .expect("function present in catalog")
    }

    #[test]
    fn names_are_lower_case() {
        for entry in SPATIAL_FUNCTIONS {
            assert_eq!(entry.name(), entry.name().to_ascii_lowercase());
        }
    }

    #[test]
    fn builder_sets_bounds_and_tags() {
        let buffer = spec("st_buffer");
        assert_eq!(buffer.min_args, Some(2));
        assert_eq!(buffer.max_args, None);
        assert!(buffer.produces_numeric);
        assert!(!buffer.produces_geometry);
        assert_eq!(buffer.platforms[0].max_args, Some(5));

        let envelope = spec("st_makeenvelope");
        assert_eq!((envelope.min_args, envelope.max_args), (None, None));
        assert_eq!(envelope.platforms[1].min_args, Some(4));
    }

    #[test]
    fn st_point_is_an_alias() {
        let entry = SPATIAL_FUNCTIONS
            .iter()
            .find(|entry| entry.name() == "st_point")
            .unwrap();
        assert_eq!(
            *entry,
            CatalogEntry::Alias {
                name: "st_point",
                target: "st_makepoint"
            }
        );
    }

    #[test]
    fn catalog_size() {
        let aliases = SPATIAL_FUNCTIONS
            .iter()
            .filter(|entry| matches!(entry, CatalogEntry::Alias { .. }))
            .count();
        assert_eq!(SPATIAL_FUNCTIONS.len(), 81);
        assert_eq!(aliases, 1);
    }
}
