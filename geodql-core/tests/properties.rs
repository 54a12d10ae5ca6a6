//! Property tests over the built-in catalog and the coordinate parser.

use geodql_core::coordinate::{parse_latitude, parse_longitude};
use geodql_core::FunctionRegistry;
use proptest::prelude::*;

include!("support/mini_dql.rs");

fn bounded_functions() -> Vec<(&'static str, usize)> {
    FunctionRegistry::global()
        .iter()
        .filter_map(|f| f.spec.max_args.map(|max| (f.name, max)))
        .collect()
}

fn catalog_names() -> Vec<&'static str> {
    FunctionRegistry::global().iter().map(|f| f.name).collect()
}

proptest! {
    #[test]
    fn decimal_latitude_round_trips(d in -90.0f64..=90.0) {
        let parsed = parse_latitude(&d.to_string()).unwrap();
        prop_assert!((parsed - d).abs() < 1e-9, "{} -> {}", d, parsed);
    }

    #[test]
    fn decimal_longitude_round_trips(d in -180.0f64..=180.0) {
        let parsed = parse_longitude(&d.to_string()).unwrap();
        prop_assert!((parsed - d).abs() < 1e-9, "{} -> {}", d, parsed);
    }

    #[test]
    fn collection_never_exceeds_max(
        (name, max) in prop::sample::select(bounded_functions()),
        count in 1usize..10,
    ) {
        // Feed only the argument list; the call name is known up front.
        let args: Vec<String> = (0..count).map(|i| format!("a{i}")).collect();
        let src = format!("{})", args.join(", "));
        let mut node = FunctionCallNode::new(name);
        let _ = node.collect_arguments(&mut DqlParser::new(&src));
        prop_assert!(node.arguments().len() <= max);
    }

    #[test]
    fn lookup_ignores_case(
        name in prop::sample::select(catalog_names()),
        mask in prop::collection::vec(any::<bool>(), 32),
    ) {
        let mangled: String = name
            .chars()
            .zip(mask.iter().cycle())
            .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c })
            .collect();
        let registry = FunctionRegistry::global();
        prop_assert_eq!(registry.lookup(&mangled), registry.lookup(name));
    }
}
