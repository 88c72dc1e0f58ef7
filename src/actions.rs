//! The user action-override hook consulted by an [EmissionSink](crate::generator::EmissionSink)
//! while emitting a function's closing return value.
//!
//! Grounded on the reference generator's `_func_actions`/`_strip_func_prefix`:
//! a generated function's name has its `parse_`/`_parse_` prefix stripped and
//! the remainder looked up against a user-supplied object; a hit overrides the
//! default parse-tree construction.

/// A user-supplied override for one or more generated functions.
///
/// `function_name` is the stripped name (no `parse_`/`_parse_` prefix) of the
/// function being emitted — e.g. `value`, `list_inner1`. A sink looks this
/// trait up once per function and falls back to default tree construction
/// when `action_for` returns `None`.
pub trait ParserActions {
    /// Returns a snippet to use as the function's return expression, plus the
    /// Rust type that snippet evaluates to, or `None` if this function has no
    /// user override.
    fn action_for(&self, function_name: &str) -> Option<(String, String)>;
}

/// Strips the `parse_` or `_parse_` prefix used by top-level and sub-function
/// names respectively, leaving the name an action lookup is keyed on.
pub fn strip_function_prefix(name: &str) -> &str {
    name.strip_prefix("_parse_")
        .or_else(|| name.strip_prefix("parse_"))
        .unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_top_level_prefix() {
        assert_eq!(strip_function_prefix("parse_value"), "value");
    }

    #[test]
    fn strips_sub_function_prefix() {
        assert_eq!(strip_function_prefix("_parse_list_inner1"), "list_inner1");
    }

    #[test]
    fn leaves_unprefixed_names_alone() {
        assert_eq!(strip_function_prefix("value"), "value");
    }
}
