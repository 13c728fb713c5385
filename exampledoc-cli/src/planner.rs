//! Example Planner
//!
//! Selects the registered examples belonging to a namespace and orders them.
//!
//! Filtering options:
//! - Namespace prefix, matched on whole dot separated segments
//! - Regex pattern matching on the qualified name
//!
//! Ordering: examples are sorted by qualified name for deterministic runs.

use exampledoc_core::ExampleDef;
use regex::Regex;

/// Ordered selection of examples, each paired with its name relative to the namespace
pub struct ExamplePlan {
    /// Selected examples and their namespace remainders
    pub examples: Vec<(&'static ExampleDef, String)>,
}

/// Name of `qualified` relative to `namespace`, if it belongs to it.
///
/// The namespace must end on a segment boundary: `A.B` contains `A.B.C`
/// but not `A.BC`. An empty namespace contains every name.
pub fn namespace_remainder<'a>(qualified: &'a str, namespace: &str) -> Option<&'a str> {
    if namespace.is_empty() {
        return Some(qualified);
    }
    qualified
        .strip_prefix(namespace)?
        .strip_prefix('.')
        .filter(|rest| !rest.is_empty())
}

/// Build the plan of examples to discover.
///
/// Keeps the examples inside `namespace` whose qualified name matches
/// `filter`, sorted by qualified name.
pub fn build_plan(
    examples: impl IntoIterator<Item = &'static ExampleDef>,
    namespace: &str,
    filter: Option<&Regex>,
) -> ExamplePlan {
    let mut selected: Vec<_> = examples
        .into_iter()
        .filter_map(|def| {
            let name = def.qualified_name();

            if let Some(re) = filter {
                if !re.is_match(&name) {
                    return None;
                }
            }

            let remainder = namespace_remainder(&name, namespace)?.to_string();
            Some((def, name.into_owned(), remainder))
        })
        .collect();

    selected.sort_by(|a, b| a.1.cmp(&b.1));

    ExamplePlan {
        examples: selected
            .into_iter()
            .map(|(def, _, remainder)| (def, remainder))
            .collect(),
    }
}
