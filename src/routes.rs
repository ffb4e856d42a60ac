//! Route table generation.
//!
//! One route per page, in page discovery order. Routes are never sorted or
//! deduplicated here; page collection already guarantees unique base names.

use crate::naming::{capitalize, pascal_ident, route_path};
use crate::types::RouteEntry;
use std::collections::HashSet;
use tracing::debug;

/// Derive the ordered route list from page base names.
///
/// Import identifiers are made unique with a numeric suffix when two base
/// names collapse to the same identifier (`about-us` and `about_us`).
pub fn build_routes(base_names: &[String]) -> Vec<RouteEntry> {
    let mut taken = HashSet::new();
    let routes: Vec<RouteEntry> = base_names
        .iter()
        .map(|base| {
            let stem = pascal_ident(base);
            let mut ident = stem.clone();
            let mut n = 2;
            while !taken.insert(ident.clone()) {
                ident = format!("{stem}{n}");
                n += 1;
            }
            RouteEntry {
                path: route_path(base),
                name: capitalize(base),
                page: base.clone(),
                ident,
            }
        })
        .collect();
    debug!(count = routes.len(), "built route table");
    routes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn routes_follow_page_order() {
        let routes = build_routes(&names(&["index", "about", "contact"]));
        let summary: Vec<(&str, &str)> = routes
            .iter()
            .map(|r| (r.path.as_str(), r.name.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![("/", "Index"), ("/about", "About"), ("/contact", "Contact")]
        );
    }

    #[test]
    fn input_order_is_not_sorted() {
        let routes = build_routes(&names(&["zeta", "alpha"]));
        assert_eq!(routes[0].page, "zeta");
        assert_eq!(routes[1].page, "alpha");
    }

    #[test]
    fn empty_input_gives_empty_table() {
        assert!(build_routes(&[]).is_empty());
    }

    #[test]
    fn identifiers_are_valid_and_unique() {
        let routes = build_routes(&names(&["about-us", "about_us", "404"]));
        let idents: Vec<&str> = routes.iter().map(|r| r.ident.as_str()).collect();
        assert_eq!(idents, vec!["AboutUs", "AboutUs2", "Page404"]);
        assert_eq!(routes[0].path, "/about-us");
        assert_eq!(routes[2].name, "404");
    }
}
