//! Listing response type definitions.
//!
//! Only the fields the downloader needs are modelled; everything else in the
//! listing document is ignored.

use serde::Deserialize;

/// A subreddit listing: `{"data":{"children":[{"data":{"url":...}}]}}`.
#[derive(Debug, Default, Deserialize)]
pub struct Listing {
    #[serde(default)]
    pub data: ListingData,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListingData {
    #[serde(default)]
    pub children: Vec<Child>,
}

/// Wrapper object around each post.
#[derive(Debug, Default, Deserialize)]
pub struct Child {
    #[serde(default)]
    pub data: Post,
}

/// A single post.
#[derive(Debug, Default, Deserialize)]
pub struct Post {
    /// Linked URL, HTML-entity encoded.
    #[serde(default)]
    pub url: String,
}

impl Listing {
    /// Raw (still entity-encoded) URLs of every post, in listing order.
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.data.children.iter().map(|c| c.data.url.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_listing() {
        let json = r#"{
            "kind": "Listing",
            "data": {
                "after": "t3_abc",
                "children": [
                    {"kind": "t3", "data": {"url": "https://i.redd.it/a.jpg", "title": "A", "num_comments": 3}},
                    {"kind": "t3", "data": {"title": "self post"}}
                ]
            }
        }"#;

        let listing: Listing = serde_json::from_str(json).unwrap();
        let urls: Vec<&str> = listing.urls().collect();
        assert_eq!(urls, vec!["https://i.redd.it/a.jpg", ""]);
    }

    #[test]
    fn test_parse_empty_object() {
        let listing: Listing = serde_json::from_str("{}").unwrap();
        assert_eq!(listing.urls().count(), 0);
    }
}
