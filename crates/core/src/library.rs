//! Read-side projections over an [`IconLibrary`].

use std::collections::BTreeMap;

use crate::types::IconLibrary;

/// Uppercase the first character of `name`, leaving the rest untouched.
///
/// ```
/// use iconlib_core::library::capitalize;
///
/// assert_eq!(capitalize("business"), "Business");
/// assert_eq!(capitalize("éclair"), "Éclair");
/// assert_eq!(capitalize(""), "");
/// ```
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Build the public listing: live categories keyed by capitalized name,
/// mapped to their icon URLs.
///
/// Deleted categories are skipped. Two stored keys that differ only in the
/// case of their first letter collapse into one entry; the later key in
/// sort order wins.
pub fn visible_categories(library: &IconLibrary) -> BTreeMap<String, Vec<String>> {
    library
        .icons
        .iter()
        .filter(|(_, category)| !category.deleted)
        .map(|(name, category)| (capitalize(name), category.data.clone()))
        .collect()
}
