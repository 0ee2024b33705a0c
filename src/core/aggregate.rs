//! Per-page merge of permission codes over the dependency closure.

use std::collections::HashSet;

use crate::core::{
    CodeItem, CodeItemsByFile, DependencyGraph, FileId, FinalResult, PageCodeAuths, RoutesByFile,
};

/// Combine per-file codes, edges and routes into the final page map.
///
/// Pages appear in route iteration order. Each page lists its own codes
/// first, then those of every file reachable through its imports in
/// depth-first discovery order, de-duplicated by `code` (first wins).
/// Routes with all fields empty are skipped.
pub fn aggregate(
    code_items: &CodeItemsByFile,
    dependencies: &DependencyGraph,
    routes: &RoutesByFile,
) -> FinalResult {
    let mut result = FinalResult::new();

    for (page, route) in routes {
        if route.is_empty() {
            continue;
        }

        let mut merged: Vec<&CodeItem> = code_items.get(page).into_iter().flatten().collect();
        for dependency in dependency_closure(page, dependencies) {
            if let Some(items) = code_items.get(dependency) {
                merged.extend(items);
            }
        }

        result.insert(
            page.clone(),
            PageCodeAuths {
                route_item: route.clone(),
                code_items: unique_by_code(merged),
            },
        );
    }

    result
}

/// Files transitively imported by `page`, pre-order, each at most once.
///
/// The page itself is never part of its own closure, even through a cycle.
pub fn dependency_closure<'a>(page: &'a str, dependencies: &'a DependencyGraph) -> Vec<&'a FileId> {
    let mut visited: HashSet<&str> = HashSet::from([page]);
    let mut order = Vec::new();
    visit(page, dependencies, &mut visited, &mut order);
    order
}

fn visit<'a>(
    file: &str,
    dependencies: &'a DependencyGraph,
    visited: &mut HashSet<&'a str>,
    order: &mut Vec<&'a FileId>,
) {
    let Some(edges) = dependencies.get(file) else {
        return;
    };
    for dependency in edges {
        if visited.insert(dependency.as_str()) {
            order.push(dependency);
            visit(dependency, dependencies, visited, order);
        }
    }
}

fn unique_by_code(items: Vec<&CodeItem>) -> Vec<CodeItem> {
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(items.len());
    for item in items {
        if seen.insert(item.code.as_str()) {
            unique.push(item.clone());
        }
    }
    unique
}
