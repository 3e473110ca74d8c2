//! Small shared helpers.

/// Get the short name of a type from its full `std::any::type_name` path.
///
/// The final path segment is returned with any generic argument list removed:
/// `"stagecraft::scene::Scene"` becomes `"Scene"` and `"alloc::vec::Vec<u32>"`
/// becomes `"Vec"`.
pub(crate) fn short_type_name(full: &str) -> &str {
    let end = full.find('<').unwrap_or(full.len());
    let base = &full[..end];
    let start = base.rfind("::").map_or(0, |idx| idx + 2);
    &base[start..]
}

#[cfg(test)]
mod tests {
    use super::short_type_name;

    #[test]
    fn full_path_keeps_last_segment() {
        assert_eq!(short_type_name("stagecraft::scene::Scene"), "Scene");
    }

    #[test]
    fn bare_name_is_unchanged() {
        assert_eq!(short_type_name("Scene"), "Scene");
    }

    #[test]
    fn generic_arguments_are_stripped() {
        assert_eq!(
            short_type_name("alloc::vec::Vec<core::option::Option<u32>>"),
            "Vec"
        );
    }
}
