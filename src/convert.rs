//! Field translation between Dashboard models and provider state.
//!
//! Scalars pass through as `Option<T>` and serialize as `null` when absent.
//! Response strings are kept verbatim; request strings treat `""` as unset.
//! Collections either default to empty ([`list_or_empty`]) or stay `null`
//! ([`list_or_null`]), as each adapter declares.

/// Treat an empty request string as unset.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Borrowing variant of [`non_empty`] for path parameters.
pub fn non_empty_ref(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Convert a response collection element-wise; `None` becomes `[]`.
pub fn list_or_empty<T, U: From<T>>(values: Option<Vec<T>>) -> Vec<U> {
    values
        .map(|v| v.into_iter().map(U::from).collect())
        .unwrap_or_default()
}

/// Convert a response collection element-wise; `None` stays `null`.
pub fn list_or_null<T, U: From<T>>(values: Option<Vec<T>>) -> Option<Vec<U>> {
    values.map(|v| v.into_iter().map(U::from).collect())
}

/// Convert a nested response object; `None` stays `null`.
pub fn object<T, U: From<T>>(value: Option<T>) -> Option<U> {
    value.map(U::from)
}

/// Render a set-typed field: sorted, de-duplicated, `None` becomes `[]`.
pub fn to_set(values: Option<Vec<String>>) -> Vec<String> {
    let mut values = values.unwrap_or_default();
    values.sort();
    values.dedup();
    values
}

/// Request-side list: an empty list is sent as unset.
pub fn non_empty_list(values: Option<Vec<String>>) -> Option<Vec<String>> {
    values.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Wrapped(u8);

    impl From<u8> for Wrapped {
        fn from(v: u8) -> Self {
            Wrapped(v)
        }
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some("Q2YY".into())), Some("Q2YY".to_string()));
        assert_eq!(non_empty_ref(&Some(String::new())), None);
    }

    #[test]
    fn test_list_conventions() {
        let empty: Vec<Wrapped> = list_or_empty::<u8, Wrapped>(None);
        assert!(empty.is_empty());
        assert_eq!(list_or_null::<u8, Wrapped>(None), None);
        assert_eq!(
            list_or_empty::<u8, Wrapped>(Some(vec![2, 1])),
            vec![Wrapped(2), Wrapped(1)]
        );
    }

    #[test]
    fn test_to_set_sorts_and_dedups() {
        let set = to_set(Some(vec!["b".into(), "a".into(), "b".into()]));
        assert_eq!(set, vec!["a", "b"]);
        assert!(to_set(None).is_empty());
    }

    #[test]
    fn test_non_empty_list() {
        assert_eq!(non_empty_list(Some(vec![])), None);
        assert_eq!(non_empty_list(Some(vec!["x".into()])), Some(vec!["x".to_string()]));
    }
}
