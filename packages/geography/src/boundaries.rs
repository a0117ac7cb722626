//! County boundary `GeoJSON` loading.
//!
//! The choropleth is drawn against a county `FeatureCollection` whose
//! feature `id` is the five-digit FIPS code. The collection is fetched once
//! per run (or read from a local copy) and indexed by FIPS.

use std::collections::BTreeMap;
use std::path::Path;

use bad_air_geography_models::fips;
use geojson::{Feature, GeoJson, feature::Id};

use crate::GeoError;
use crate::retry;

/// Default county boundary source (plotly's US counties `GeoJSON`).
pub const COUNTIES_GEOJSON_URL: &str =
    "https://raw.githubusercontent.com/plotly/datasets/master/geojson-counties-fips.json";

/// User-Agent sent with boundary downloads.
const USER_AGENT: &str = "bad-air-map/0.1";

/// County boundary features indexed by five-digit FIPS code.
#[derive(Debug, Clone, Default)]
pub struct BoundarySet {
    features: BTreeMap<String, Feature>,
}

impl BoundarySet {
    /// Parses a `GeoJSON` `FeatureCollection` and indexes its features by
    /// FIPS `id`.
    ///
    /// Features without a usable id are skipped with a warning. If two
    /// features share an id the first one wins.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError`] if the text is not valid `GeoJSON` or is not a
    /// `FeatureCollection`.
    pub fn from_geojson_str(text: &str) -> Result<Self, GeoError> {
        let GeoJson::FeatureCollection(collection) = text.parse::<GeoJson>()? else {
            return Err(GeoError::Conversion {
                message: "boundary GeoJSON is not a FeatureCollection".to_string(),
            });
        };

        let mut features = BTreeMap::new();
        let mut skipped = 0usize;

        for feature in collection.features {
            let Some(key) = feature.id.as_ref().and_then(feature_fips) else {
                skipped += 1;
                continue;
            };
            if features.contains_key(&key) {
                log::warn!("Duplicate boundary feature for FIPS {key}, keeping the first");
                continue;
            }
            features.insert(key, feature);
        }

        if skipped > 0 {
            log::warn!("Skipped {skipped} boundary features without a FIPS id");
        }
        log::info!("Indexed {} county boundary features", features.len());

        Ok(Self { features })
    }

    /// Returns the boundary feature for a five-digit FIPS code.
    #[must_use]
    pub fn get(&self, fips: &str) -> Option<&Feature> {
        self.features.get(fips)
    }

    /// Returns `true` if a boundary exists for `fips`.
    #[must_use]
    pub fn contains(&self, fips: &str) -> bool {
        self.features.contains_key(fips)
    }

    /// Number of indexed features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Returns `true` if no features were indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Normalizes a feature id to a five-digit FIPS code.
///
/// Accepts string ids (`"01001"`, or `"1001"` with a lost leading zero)
/// and numeric ids (`1001`).
fn feature_fips(id: &Id) -> Option<String> {
    let raw = match id {
        Id::String(s) => s.clone(),
        Id::Number(n) => n.as_u64()?.to_string(),
    };
    fips::zero_pad(&raw, fips::FIPS_WIDTH).ok()
}

/// Builds a `reqwest::Client` for boundary downloads.
///
/// # Errors
///
/// Returns [`GeoError`] if the client cannot be built.
fn build_client() -> Result<reqwest::Client, GeoError> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(Into::into)
}

/// Downloads and indexes the county boundary collection at `url`.
///
/// # Errors
///
/// Returns [`GeoError`] if the download fails after retries or the body
/// is not a `FeatureCollection`.
pub async fn fetch_boundaries(url: &str) -> Result<BoundarySet, GeoError> {
    log::info!("Downloading county boundaries from {url}");
    let client = build_client()?;
    let body = retry::send_text(|| client.get(url)).await?;
    log::debug!("Downloaded {} bytes of boundary GeoJSON", body.len());
    BoundarySet::from_geojson_str(&body)
}

/// Loads county boundaries from either an `http(s)://` URL or a local
/// file path.
///
/// # Errors
///
/// Returns [`GeoError`] if the resource cannot be read or parsed.
pub async fn load_boundaries(location: &str) -> Result<BoundarySet, GeoError> {
    if location.starts_with("http://") || location.starts_with("https://") {
        return fetch_boundaries(location).await;
    }

    let path = Path::new(location);
    log::info!("Reading county boundaries from {}", path.display());
    let body = tokio::fs::read_to_string(path).await?;
    BoundarySet::from_geojson_str(&body)
}
