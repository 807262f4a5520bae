//! Shared utilities for integration tests.

use std::collections::HashMap;

use segment_router::Router;

/// Assert the full outcome of resolving `path`.
pub fn assert_match<T>(
    router: &Router<T>,
    path: &str,
    handler: Option<&T>,
    params: &[(&str, &str)],
    trailer: Option<&str>,
) where
    T: PartialEq + std::fmt::Debug,
{
    let result = router.resolve(path);
    let expected: HashMap<String, String> = params
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    assert_eq!(result.handler, handler, "handler for {}", path);
    assert_eq!(result.params, expected, "params for {}", path);
    assert_eq!(result.trailer.as_deref(), trailer, "trailer for {}", path);
}

/// Assert that `path` resolves to nothing at all.
#[allow(dead_code)]
pub fn assert_no_match<T>(router: &Router<T>, path: &str)
where
    T: PartialEq + std::fmt::Debug,
{
    assert_match(router, path, None, &[], None);
}
