//! County choropleth `GeoJSON`.
//!
//! One feature per resolved record whose FIPS has a boundary. The
//! geometry comes from the boundary set and the properties carry the
//! hover fields plus a precomputed `fill` color, so any `GeoJSON` viewer
//! can draw the map without knowing the bin table.

use std::path::{Path, PathBuf};

use bad_air_air_quality_models::ResolvedRecord;
use bad_air_geography::boundaries::BoundarySet;
use geojson::{Feature, FeatureCollection, JsonObject, JsonValue, feature::Id};

use crate::colors::BinColors;
use crate::{CHOROPLETH_GEOJSON, RenderError};

/// Builds the choropleth `FeatureCollection`.
///
/// Records without a FIPS code are left off the map. Records whose FIPS
/// has no boundary are logged and skipped.
#[must_use]
pub fn build_choropleth(
    records: &[ResolvedRecord],
    boundaries: &BoundarySet,
    colors: &BinColors,
) -> FeatureCollection {
    let mut features = Vec::with_capacity(records.len());
    let mut without_fips = 0usize;

    for record in records {
        let Some(fips) = record.fips.as_deref() else {
            without_fips += 1;
            continue;
        };
        let Some(boundary) = boundaries.get(fips) else {
            log::warn!(
                "No boundary for FIPS {fips} ({}), leaving it off the map",
                record.county_label
            );
            continue;
        };

        features.push(Feature {
            bbox: None,
            geometry: boundary.geometry.clone(),
            id: Some(Id::String(fips.to_string())),
            properties: Some(properties(fips, record, colors)),
            foreign_members: None,
        });
    }

    if without_fips > 0 {
        log::info!("Left {without_fips} unresolved rows off the map");
    }
    log::info!("Built {} choropleth features", features.len());

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

fn properties(fips: &str, record: &ResolvedRecord, colors: &BinColors) -> JsonObject {
    let mut props = JsonObject::new();
    props.insert("fips".to_string(), JsonValue::from(fips));
    props.insert(
        "State".to_string(),
        JsonValue::from(record.state_name.as_str()),
    );
    props.insert(
        "County".to_string(),
        JsonValue::from(record.county_name.as_str()),
    );
    props.insert(
        "county_label".to_string(),
        JsonValue::from(record.county_label.as_str()),
    );
    props.insert(
        "bad_air_days".to_string(),
        JsonValue::from(record.bad_air_days),
    );
    props.insert(
        "bad_air_bin".to_string(),
        JsonValue::from(record.bad_air_bin.as_ref()),
    );
    props.insert(
        "fill".to_string(),
        JsonValue::from(colors.color(record.bad_air_bin)),
    );
    props
}

/// Writes `choropleth.geojson` into `dir`.
///
/// # Errors
///
/// Returns [`RenderError`] if the file cannot be written.
pub fn write_choropleth(
    dir: &Path,
    records: &[ResolvedRecord],
    boundaries: &BoundarySet,
    colors: &BinColors,
) -> Result<PathBuf, RenderError> {
    let collection = build_choropleth(records, boundaries, colors);
    let path = crate::write_json_atomic(dir, CHOROPLETH_GEOJSON, &collection)?;
    log::info!("Wrote choropleth to {}", path.display());
    Ok(path)
}
