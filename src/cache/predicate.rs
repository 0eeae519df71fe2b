//! Key Predicate Module
//!
//! Key equality is supplied by the caller instead of relying on `Eq`/`Hash`.

/// Boxed key-equality predicate: `(stored_key, query_key) -> bool`.
pub type KeyPredicate<K> = Box<dyn Fn(&K, &K) -> bool>;

/// Boxes a closure as a [`KeyPredicate`].
pub fn boxed<K, F>(predicate: F) -> KeyPredicate<K>
where
    F: Fn(&K, &K) -> bool + 'static,
{
    Box::new(predicate)
}

/// Native `==` comparison.
pub fn exact<K: PartialEq>(stored: &K, query: &K) -> bool {
    stored == query
}

/// ASCII case-insensitive comparison for string-like keys.
pub fn ascii_case_insensitive<K: AsRef<str>>(stored: &K, query: &K) -> bool {
    stored.as_ref().eq_ignore_ascii_case(query.as_ref())
}
