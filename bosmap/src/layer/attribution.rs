//! This module provides functionality for handling attributions.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref HREF_RE: Regex = Regex::new(r#"href="([^"]+)""#).expect("invalid const regex");
}

/// Represents an attribution, typically used for citing tile sources or providing credit.
///
/// The text may contain HTML markup, since most basemap providers specify their required
/// attribution as an HTML fragment with links to the data sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribution {
    text: String,
    url: Option<String>,
}

impl Attribution {
    /// Creates a new `Attribution` with the given text and optional URL.
    pub fn new(text: String, url: Option<String>) -> Self {
        Self { text, url }
    }

    /// Returns a reference to the text of the attribution.
    pub fn get_text(&self) -> &str {
        &self.text
    }

    /// Returns a reference to the URL associated with the attribution, if any.
    pub fn get_url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Returns the targets of all hyperlinks contained in the attribution text, in the order
    /// they appear.
    pub fn links(&self) -> Vec<&str> {
        HREF_RE
            .captures_iter(&self.text)
            .filter_map(|captures| captures.get(1))
            .map(|capture| capture.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_has_no_links() {
        let attribution = Attribution::new(
            "© OpenStreetMap contributors".to_string(),
            Some("https://www.openstreetmap.org/copyright".to_string()),
        );
        assert!(attribution.links().is_empty());
        assert_eq!(
            attribution.get_url(),
            Some("https://www.openstreetmap.org/copyright")
        );
    }

    #[test]
    fn links_extracted_in_order() {
        let attribution = Attribution::new(
            r#"Map data © <a href="http://openstreetmap.org">OpenStreetMap</a> contributors, <a href="http://creativecommons.org/licenses/by-sa/2.0/">CC-BY-SA</a>, Imagery © <a href="http://mapbox.com">Mapbox</a>"#
                .to_string(),
            None,
        );

        assert_eq!(
            attribution.links(),
            vec![
                "http://openstreetmap.org",
                "http://creativecommons.org/licenses/by-sa/2.0/",
                "http://mapbox.com"
            ]
        );
    }
}
