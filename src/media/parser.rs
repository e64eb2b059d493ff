//! URL handling for listing items.

use url::Url;

/// Decode HTML entities in a URL as served by the listing endpoint.
///
/// Listing URLs arrive with `&` escaped as `&amp;` and so on.
pub fn decode_entities(raw: &str) -> String {
    html_escape::decode_html_entities(raw).into_owned()
}

/// Final path segment of a URL, used as the local filename.
///
/// Query strings and fragments are not part of the name. If the text does
/// not parse as a URL, everything after the last `/` is used instead.
pub fn filename_from_url(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(url) => url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or_default()
            .to_string(),
        Err(_) => raw.rsplit('/').next().unwrap_or_default().to_string(),
    }
}

/// Extension of a filename, including the leading dot.
///
/// Returns an empty string when the name has no dot.
pub fn extension(filename: &str) -> &str {
    filename.rfind('.').map(|i| &filename[i..]).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_entities() {
        assert_eq!(
            decode_entities("https://preview.redd.it/a.jpg?width=640&amp;s=abc"),
            "https://preview.redd.it/a.jpg?width=640&s=abc"
        );
        assert_eq!(decode_entities("https://i.redd.it/x.png"), "https://i.redd.it/x.png");
    }

    #[test]
    fn test_filename_from_url() {
        assert_eq!(filename_from_url("https://i.redd.it/abc123.jpg"), "abc123.jpg");
        assert_eq!(
            filename_from_url("https://preview.redd.it/a.jpg?width=640&s=abc"),
            "a.jpg"
        );
        assert_eq!(filename_from_url("https://www.reddit.com/r/pics/"), "");
        assert_eq!(filename_from_url("not a url/b.gif"), "b.gif");
    }

    #[test]
    fn test_extension() {
        assert_eq!(extension("abc.jpg"), ".jpg");
        assert_eq!(extension("archive.tar.gz"), ".gz");
        assert_eq!(extension("README"), "");
        assert_eq!(extension(""), "");
    }
}
