/// Errors reported by fallible map lookups.
///
/// Every other operation signals absence through its return value (`None`,
/// `false`, or an end cursor) instead.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The key passed to [`BSTreeMap::at`](crate::BSTreeMap::at) or
    /// [`BSTreeMap::at_mut`](crate::BSTreeMap::at_mut) is not in the map.
    #[error("key not found in map")]
    KeyNotFound,
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn displays_missing_key() {
        assert_eq!(Error::KeyNotFound.to_string(), "key not found in map");
    }

    #[test]
    fn is_a_core_error() {
        fn assert_error<E: core::error::Error>(_: &E) {}
        assert_error(&Error::KeyNotFound);
    }
}
