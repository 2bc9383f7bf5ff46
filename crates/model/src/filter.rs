//! Client-side search over already-fetched collections

/// Items whose field contains `query`, ignoring case
///
/// An empty (or all-whitespace) query returns every item in order.
pub fn filter_by<T, F>(items: &[T], query: &str, field: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> &str,
{
    if query.trim().is_empty() {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|item| matches(field(item), query))
        .cloned()
        .collect()
}

/// Case-insensitive substring test used by [`filter_by`]
///
/// Whitespace only decides whether the query is empty; otherwise it is part
/// of the substring.
pub fn matches(value: &str, query: &str) -> bool {
    query.trim().is_empty() || value.to_lowercase().contains(&query.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names() -> Vec<String> {
        ["account", "Admin-CLI", "broker", "realm-management"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_filter_ignores_case() {
        let found = filter_by(&names(), "ADMIN", |s| s.as_str());
        assert_eq!(found, vec!["Admin-CLI".to_string()]);

        let found = filter_by(&names(), "a", |s| s.as_str());
        assert_eq!(found.len(), 3);
    }

    #[test]
    fn test_empty_query_returns_everything() {
        assert_eq!(filter_by(&names(), "", |s| s.as_str()), names());
        assert_eq!(filter_by(&names(), "   ", |s| s.as_str()), names());
    }

    #[test]
    fn test_surrounding_spaces_are_matched() {
        let values = vec!["xab".to_string(), "ab cd".to_string()];
        assert_eq!(filter_by(&values, "ab ", |s| s.as_str()), vec!["ab cd".to_string()]);
        assert!(!matches("xab", "ab "));
    }

    #[test]
    fn test_no_match() {
        assert!(filter_by(&names(), "zzz", |s| s.as_str()).is_empty());
        assert!(matches("Broker", "rok"));
        assert!(!matches("Broker", "x"));
    }
}
