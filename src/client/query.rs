//! Query-string helpers for Dashboard API requests.
//!
//! The Dashboard API encodes array filters as repeated `name[]=value` pairs.

/// Accumulates query parameters in request order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    /// An empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `name=value` when `value` is set.
    pub fn opt<T: ToString>(mut self, name: &str, value: Option<&T>) -> Self {
        if let Some(value) = value {
            self.pairs.push((name.to_string(), value.to_string()));
        }
        self
    }

    /// Add one `name[]=value` pair per element.
    pub fn array(mut self, name: &str, values: &[String]) -> Self {
        let key = format!("{}[]", name);
        self.pairs
            .extend(values.iter().map(|v| (key.clone(), v.clone())));
        self
    }

    /// Whether no parameter was added.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The collected pairs, ready for `reqwest::RequestBuilder::query`.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }
}

/// Types that render themselves as Dashboard query parameters.
pub trait ToQuery {
    /// Build the query for this value.
    fn to_query(&self) -> Query;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_pairs_skip_none() {
        let query = Query::new()
            .opt("perPage", Some(&10))
            .opt::<String>("startingAfter", None)
            .opt("t0", Some(&"2024-01-01".to_string()));

        assert_eq!(
            query.pairs(),
            &[
                ("perPage".to_string(), "10".to_string()),
                ("t0".to_string(), "2024-01-01".to_string()),
            ]
        );
    }

    #[test]
    fn test_array_pairs_use_brackets() {
        let query = Query::new().array("serials", &["Q2AA".to_string(), "Q2BB".to_string()]);
        assert_eq!(query.pairs()[0], ("serials[]".to_string(), "Q2AA".to_string()));
        assert_eq!(query.pairs()[1], ("serials[]".to_string(), "Q2BB".to_string()));
    }

    #[test]
    fn test_empty() {
        assert!(Query::new().array("ids", &[]).is_empty());
    }
}
