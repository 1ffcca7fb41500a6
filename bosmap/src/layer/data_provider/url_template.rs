use std::collections::HashMap;

use crate::error::BosmapError;
use crate::layer::data_provider::UrlSource;
use crate::tile_schema::TileIndex;

/// Tile URL template with `{id}`, `{z}`, `{x}`, `{y}` and `{accessToken}` placeholders.
///
/// This is the configuration format used by hosted basemap providers that serve tile sets per
/// customer account: the provider id selects the tile set, and the access token authorizes the
/// requests. The template is validated once at construction, so substitution for individual
/// tiles cannot fail afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileUrlTemplate {
    template: String,
    provider_id: String,
    access_token: String,
}

impl TileUrlTemplate {
    /// Creates a new template. Returns an error if the template string contains placeholders
    /// other than the supported ones or is malformed.
    pub fn new(
        template: impl Into<String>,
        provider_id: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Result<Self, BosmapError> {
        let template = Self {
            template: template.into(),
            provider_id: provider_id.into(),
            access_token: access_token.into(),
        };

        template.url(TileIndex::new(0, 0, 0))?;

        Ok(template)
    }

    /// Id of the tile set at the basemap provider.
    pub fn provider_id(&self) -> &str {
        &self.provider_id
    }

    /// URL of the tile with the given index.
    pub fn url(&self, index: TileIndex) -> Result<String, BosmapError> {
        let mut vars: HashMap<String, String> = HashMap::new();
        vars.insert("id".to_string(), self.provider_id.clone());
        vars.insert("accessToken".to_string(), self.access_token.clone());
        vars.insert("z".to_string(), index.z.to_string());
        vars.insert("x".to_string(), index.x.to_string());
        vars.insert("y".to_string(), index.y.to_string());

        Ok(strfmt::strfmt(&self.template, &vars)?)
    }

    /// Converts the template into a [`UrlSource`] closure, the form tile loaders consume.
    pub fn into_url_source(self) -> impl UrlSource<TileIndex> {
        move |index: &TileIndex| match self.url(*index) {
            Ok(url) => url,
            Err(error) => {
                log::error!("Failed to format tile url from template: {error}");
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::error::BosmapError;

    const MAPBOX_TEMPLATE: &str =
        "https://api.tiles.mapbox.com/v4/{id}/{z}/{x}/{y}.png?access_token={accessToken}";
    const TOKEN: &str =
        "pk.eyJ1Ijoic2hpbW9sdTUyMyIsImEiOiJjaWswbjk3cjkzYWR5dm9raTgxaXhrejNmIn0.Z9EirFx5JhpxrXCAI65AJQ";

    #[test]
    fn substitutes_all_placeholders() {
        let template = TileUrlTemplate::new(MAPBOX_TEMPLATE, "shimolu523.p1g0bd7h", TOKEN).unwrap();
        assert_eq!(
            template.url(TileIndex::new(0, 0, 13)).unwrap(),
            format!(
                "https://api.tiles.mapbox.com/v4/shimolu523.p1g0bd7h/13/0/0.png?access_token={TOKEN}"
            )
        );
    }

    #[test]
    fn template_without_credentials() {
        let template =
            TileUrlTemplate::new("https://tile.openstreetmap.org/{z}/{x}/{y}.png", "", "").unwrap();
        assert_eq!(
            template.url(TileIndex::new(5, 3, 4)).unwrap(),
            "https://tile.openstreetmap.org/4/5/3.png"
        );
    }

    #[test]
    fn unknown_placeholder_is_rejected() {
        let result = TileUrlTemplate::new("https://tiles.test/{unknown}/{z}", "id", "token");
        assert_matches!(result, Err(BosmapError::UrlTemplate(_)));
    }

    #[test]
    fn url_source_passthrough() {
        let template = TileUrlTemplate::new(MAPBOX_TEMPLATE, "some.id", "token").unwrap();
        let source = template.into_url_source();
        assert_eq!(
            source(&TileIndex::new(1, 2, 3)),
            "https://api.tiles.mapbox.com/v4/some.id/3/1/2.png?access_token=token"
        );
    }
}
