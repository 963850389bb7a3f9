//! Router location with an editable query string.

use std::fmt;
use url::form_urlencoded;

/// A router location: path, ordered query parameters and fragment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    pub pathname: String,
    search: Vec<(String, String)>,
    pub hash: String,
}

impl Location {
    pub fn new(pathname: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            search: Vec::new(),
            hash: String::new(),
        }
    }

    /// Parses `path?query#hash`. Both the query and the hash are optional.
    pub fn parse(href: &str) -> Self {
        let (rest, hash) = match href.split_once('#') {
            Some((rest, hash)) => (rest, hash.to_string()),
            None => (href, String::new()),
        };
        let (pathname, query) = match rest.split_once('?') {
            Some((path, query)) => (path, query),
            None => (rest, ""),
        };
        let search = form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self {
            pathname: pathname.to_string(),
            search,
            hash,
        }
    }

    /// First value of query parameter `key`.
    pub fn search(&self, key: &str) -> Option<&str> {
        self.search
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn search_pairs(&self) -> &[(String, String)] {
        &self.search
    }

    /// Sets query parameter `key`. An existing entry keeps its position and
    /// duplicates of it are dropped; a new key is appended.
    pub fn set_search(&mut self, key: &str, value: impl ToString) -> &mut Self {
        let value = value.to_string();
        match self.search.iter().position(|(k, _)| k == key) {
            Some(idx) => {
                self.search[idx].1 = value;
                let mut seen = false;
                self.search.retain(|(k, _)| {
                    if k != key {
                        return true;
                    }
                    let keep = !seen;
                    seen = true;
                    keep
                });
            }
            None => self.search.push((key.to_string(), value)),
        }
        self
    }

    /// Renders the location back into an href.
    pub fn href(&self) -> String {
        let mut out = self.pathname.clone();
        if !self.search.is_empty() {
            let query = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(self.search.iter())
                .finish();
            out.push('?');
            out.push_str(&query);
        }
        if !self.hash.is_empty() {
            out.push('#');
            out.push_str(&self.hash);
        }
        out
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.href())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_render() {
        let loc = Location::parse("/repository/editor?id=1&mod=2#top");
        assert_eq!(loc.pathname, "/repository/editor");
        assert_eq!(loc.search("id"), Some("1"));
        assert_eq!(loc.search("mod"), Some("2"));
        assert_eq!(loc.hash, "top");
        assert_eq!(loc.href(), "/repository/editor?id=1&mod=2#top");
    }

    #[test]
    fn set_search_replaces_in_place() {
        let mut loc = Location::parse("/repository/editor?id=1&itf=3&mod=2");
        loc.set_search("itf", 42);
        assert_eq!(loc.href(), "/repository/editor?id=1&itf=42&mod=2");
    }

    #[test]
    fn set_search_appends_new_key() {
        let mut loc = Location::parse("/repository/editor?id=1");
        loc.set_search("itf", 5);
        assert_eq!(loc.href(), "/repository/editor?id=1&itf=5");
    }

    #[test]
    fn set_search_collapses_duplicates() {
        let mut loc = Location::parse("/e?itf=1&x=y&itf=2");
        loc.set_search("itf", 9);
        assert_eq!(loc.search_pairs().len(), 2);
        assert_eq!(loc.href(), "/e?itf=9&x=y");
    }

    #[test]
    fn values_are_form_encoded() {
        let mut loc = Location::new("/search");
        loc.set_search("q", "a b&c");
        assert_eq!(loc.href(), "/search?q=a+b%26c");
        assert_eq!(Location::parse(&loc.href()).search("q"), Some("a b&c"));
    }
}
