//! Content model: types, pages, storage, and scanning.

mod page;
mod scan;
mod store;
mod types;

pub use page::{Page, PageId, PageStatus};
pub use scan::scan_content;
pub use store::PageStore;
pub use types::{ContentType, TypeRegistry};

/// Slugify a string for use in URLs: transliterate to ASCII, lowercase,
/// collapse separators to dashes.
pub fn slugify(s: &str) -> String {
    let ascii = deunicode::deunicode(s);
    let mut slug = String::with_capacity(ascii.len());
    let mut prev_dash = false;
    for c in ascii.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
            prev_dash = false;
        } else if !prev_dash && !slug.is_empty() {
            slug.push('-');
            prev_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Summer Fest"), "summer-fest");
        assert_eq!(slugify("event"), "event");
    }

    #[test]
    fn test_slugify_unicode() {
        assert_eq!(slugify("Sómmer Fést"), "sommer-fest");
    }

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("a  --  b"), "a-b");
        assert_eq!(slugify("--a--"), "a");
    }
}
