//! Table-wide invariants over generated route lists.

use proptest::collection::hash_set;
use proptest::prelude::*;
use proptest::sample::Index;
use proptest::test_runner::Config as ProptestConfig;
use view_router::routing::{CaseSensitivity, EntryField, MatchPolicy, TrailingSlash};
use view_router::{Loader, RouteError, RouteTable};

const PATH_PATTERN: &str = "/[a-z]{1,6}(/[a-z0-9]{1,4})?";

fn lenient() -> MatchPolicy {
    MatchPolicy {
        trailing_slash: TrailingSlash::Ignore,
        case: CaseSensitivity::Insensitive,
    }
}

/// Distinct lowercase paths without trailing slashes.
fn route_paths(min: usize) -> impl Strategy<Value = Vec<String>> {
    hash_set(PATH_PATTERN, min..12).prop_map(|paths| paths.into_iter().collect())
}

fn name_of(index: usize) -> String {
    format!("route{}", index)
}

/// Routes named `route<i>` whose view is their index.
fn build(routes: &[(String, String)], policy: MatchPolicy) -> Result<RouteTable<usize>, RouteError> {
    routes
        .iter()
        .enumerate()
        .fold(RouteTable::builder().policy(policy), |builder, (i, (path, name))| {
            builder.route(path.clone(), name.clone(), Loader::immediate(i))
        })
        .build()
}

fn named(paths: &[String]) -> Vec<(String, String)> {
    paths.iter().enumerate().map(|(i, p)| (p.clone(), name_of(i))).collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64, .. ProptestConfig::default()
    })]

    #[test]
    fn declared_routes_resolve_by_path_and_name(paths in route_paths(1)) {
        let table = build(&named(&paths), MatchPolicy::EXACT).unwrap();
        prop_assert_eq!(table.len(), paths.len());

        for (i, path) in paths.iter().enumerate() {
            let entry = table.resolve_by_path(path).unwrap();
            prop_assert_eq!(entry.path(), path.as_str());
            prop_assert_eq!(entry.activate_now(), Some(i));
            prop_assert_eq!(table.resolve_by_name(&name_of(i)).unwrap().path(), path.as_str());
        }
    }

    #[test]
    fn undeclared_paths_are_not_found(paths in route_paths(1), requested in PATH_PATTERN) {
        prop_assume!(!paths.contains(&requested));
        let table = build(&named(&paths), MatchPolicy::EXACT).unwrap();

        let err = table.resolve_by_path(&requested).unwrap_err();
        prop_assert!(err.is_not_found());

        for path in &paths {
            prop_assert!(table.resolve_by_path(&format!("{}/", path)).unwrap_err().is_not_found(), "trailing-slash variant of {} should be not found", path);
            prop_assert!(table.resolve_by_path(&path.to_uppercase()).unwrap_err().is_not_found());
        }
    }

    #[test]
    fn repeated_path_is_rejected(paths in route_paths(1), pick in any::<Index>()) {
        let repeated = paths[pick.index(paths.len())].clone();
        let mut routes = named(&paths);
        routes.push((repeated.clone(), "extra".to_string()));

        let result = build(&routes, MatchPolicy::EXACT);
        prop_assert!(matches!(
            result,
            Err(RouteError::DuplicateEntry { field: EntryField::Path, ref value }) if value == &repeated
        ), "unexpected result: {:?}", result);
    }

    #[test]
    fn repeated_name_is_rejected(paths in route_paths(2), pick in any::<Index>()) {
        let mut routes = named(&paths);
        let last = routes.len() - 1;
        let reused = name_of(pick.index(last));
        routes[last].1 = reused.clone();

        let result = build(&routes, MatchPolicy::EXACT);
        prop_assert!(matches!(
            result,
            Err(RouteError::DuplicateEntry { field: EntryField::Name, ref value }) if value == &reused
        ), "unexpected result: {:?}", result);
    }

    #[test]
    fn lenient_policy_folds_case_and_trailing_slash(paths in route_paths(1)) {
        let table = build(&named(&paths), lenient()).unwrap();

        for (i, path) in paths.iter().enumerate() {
            let variant = format!("{}//", path.to_uppercase());
            prop_assert_eq!(table.resolve_by_path(&variant).unwrap().activate_now(), Some(i));
        }
    }

    #[test]
    fn lenient_policy_rejects_normalized_duplicates(paths in route_paths(1), pick in any::<Index>()) {
        let original = paths[pick.index(paths.len())].clone();
        let mut routes = named(&paths);
        routes.push((format!("{}/", original.to_uppercase()), "variant".to_string()));

        let result = build(&routes, lenient());
        prop_assert!(matches!(
            result,
            Err(RouteError::DuplicateEntry { field: EntryField::Path, ref value }) if value == &original
        ), "unexpected result: {:?}", result);
    }
}
