/// Keeps the names whose lowercase form contains the lowercased query.
///
/// Enumeration order is preserved. An empty query keeps every name.
pub fn filter_matches(names: Vec<String>, query: &str) -> Vec<String> {
    let needle = query.to_lowercase();
    names
        .into_iter()
        .filter(|name| name.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let matches = filter_matches(names(&["a", "B", "c"]), "");
        assert_eq!(matches, names(&["a", "B", "c"]));
    }

    #[test]
    fn test_match_is_case_insensitive() {
        assert_eq!(filter_matches(names(&["a", "B", "c"]), "b"), names(&["B"]));
        assert_eq!(
            filter_matches(names(&["Report.PDF", "notes.txt"]), "pdf"),
            names(&["Report.PDF"])
        );
    }

    #[test]
    fn test_substring_anywhere_in_name() {
        let matches = filter_matches(names(&["holiday.jpg", "day1", "night"]), "DAY");
        assert_eq!(matches, names(&["holiday.jpg", "day1"]));
    }

    #[test]
    fn test_no_match_is_empty() {
        assert!(filter_matches(names(&["a", "b"]), "zzz").is_empty());
        assert!(filter_matches(Vec::new(), "").is_empty());
    }
}
