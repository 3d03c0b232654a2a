//! Fuzzy resource search.
//!
//! A query is split on whitespace; every term must appear in order (not
//! necessarily contiguously) in the resource's address, type and name,
//! ignoring case.

use crate::model::Resource;

/// Whether every character of `query` appears in `text` in order, ignoring
/// case. An empty query matches anything.
#[must_use]
pub fn fuzzy_match(text: &str, query: &str) -> bool {
    let mut haystack = text.chars().flat_map(char::to_lowercase);
    query
        .chars()
        .flat_map(char::to_lowercase)
        .all(|q| haystack.any(|t| t == q))
}

/// Whether every whitespace-separated term of `query` fuzzy-matches the
/// resource.
#[must_use]
pub fn matches_resource(resource: &Resource, query: &str) -> bool {
    let text = resource.search_text();
    query.split_whitespace().all(|term| fuzzy_match(&text, term))
}

/// Char positions in `text` that a greedy match of `term` consumes, for
/// highlighting. `None` when the term does not match.
#[must_use]
pub fn match_positions(text: &str, term: &str) -> Option<Vec<usize>> {
    let mut positions = Vec::new();
    let mut chars = text.chars().enumerate();
    for q in term.chars().flat_map(char::to_lowercase) {
        let (pos, _) = chars.by_ref().find(|(_, c)| c.to_lowercase().eq(std::iter::once(q)))?;
        positions.push(pos);
    }
    Some(positions)
}

/// Search query and the rows it resolved to.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    /// Text being typed in the search prompt
    pub input: String,
    /// Query applied to the list
    pub query: String,
    /// Positions in the filtered and sorted list that match
    pub matches: Vec<usize>,
    /// Index into `matches` of the match the cursor is on
    pub current: usize,
}

impl SearchState {
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.query.trim().is_empty()
    }

    /// Drop the query, the prompt text and all matches.
    pub fn clear(&mut self) {
        self.input.clear();
        self.query.clear();
        self.matches.clear();
        self.current = 0;
    }

    /// Re-resolve matches against a freshly computed list of resource indices.
    pub fn resolve(&mut self, list: &[usize], resources: &[Resource]) {
        self.matches.clear();
        self.current = 0;
        if !self.is_active() {
            return;
        }
        self.matches = list
            .iter()
            .enumerate()
            .filter(|(_, &idx)| matches_resource(&resources[idx], &self.query))
            .map(|(pos, _)| pos)
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Action;

    #[test]
    fn test_fuzzy_match_table() {
        let cases = [
            ("aws_lambda_function.example", "lambda", true),
            ("aws_lambda_function.example", "lmbda", true),
            ("aws_lambda_function.example", "lam", true),
            ("aws_instance.main", "inst", true),
            ("aws_instance.main", "ai", true),
            ("module.foo.aws_s3_bucket.bar", "s3", true),
            ("module.foo.aws_s3_bucket.bar", "s3b", true),
            ("aws_instance.main", "xyz", false),
            ("lambda", "lmbda", true),
            ("lambda", "lmbdx", false),
            ("", "a", false),
            ("abc", "", true),
        ];
        for (text, query, expected) in cases {
            assert_eq!(fuzzy_match(text, query), expected, "{text:?} / {query:?}");
        }
    }

    #[test]
    fn test_case_insensitive() {
        assert!(fuzzy_match("AWS_Instance.Main", "aim"));
        assert!(fuzzy_match("aws_instance.main", "AIM"));
    }

    #[test]
    fn test_multi_term() {
        let r = Resource::new("module.net.aws_subnet.private", Action::Create);
        assert!(matches_resource(&r, "net priv"));
        assert!(matches_resource(&r, "  "));
        assert!(!matches_resource(&r, "net public"));
    }

    #[test]
    fn test_match_positions() {
        assert_eq!(match_positions("aws_instance", "ai"), Some(vec![0, 4]));
        assert_eq!(match_positions("abc", "abd"), None);
    }

    #[test]
    fn test_resolve_positions_are_list_positions() {
        let resources = vec![
            Resource::new("aws_instance.a", Action::Create),
            Resource::new("aws_s3_bucket.b", Action::Create),
            Resource::new("aws_instance.c", Action::Create),
        ];
        let mut search = SearchState {
            query: "instance".to_string(),
            ..SearchState::default()
        };
        // list shows resources 2 and 0 in that order
        search.resolve(&[2, 1, 0], &resources);
        assert_eq!(search.matches, vec![0, 2]);

        search.clear();
        search.resolve(&[2, 1, 0], &resources);
        assert!(search.matches.is_empty());
    }
}
