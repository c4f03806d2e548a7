//! Commune polygons read from a `GeoJSON` boundary file.
//!
//! Property values may be strings or numbers: administrative exports often
//! store INSEE codes as integers, which drops the leading zero. Codes are
//! normalized through [`CommuneCode::parse`] so they match the fire log.

use std::path::Path;

use fire_map_fire_models::CommuneCode;
use fire_map_geography_models::{BoundaryFields, Commune};
use geo::{BoundingRect, MultiPolygon, Rect};
use geojson::{Feature, GeoJson};

use crate::GeoError;

/// A commune together with its polygon geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct CommuneBoundary {
    /// Commune attributes.
    pub commune: Commune,
    /// Commune outline in WGS84 longitude/latitude.
    pub geometry: MultiPolygon<f64>,
}

impl CommuneBoundary {
    /// Bounding rectangle of the geometry, `None` for an empty geometry.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect<f64>> {
        self.geometry.bounding_rect()
    }
}

/// Reads and parses a `GeoJSON` boundary file.
///
/// # Errors
///
/// Returns [`GeoError`] if the file cannot be read or any feature is invalid
/// (see [`parse_boundaries`]).
pub fn load_boundaries(
    path: &Path,
    fields: &BoundaryFields,
) -> Result<Vec<CommuneBoundary>, GeoError> {
    log::info!("Loading commune boundaries from {}", path.display());
    let contents = std::fs::read_to_string(path)?;
    let boundaries = parse_boundaries(&contents, fields)?;
    log::info!(
        "Loaded {} commune boundaries from {}",
        boundaries.len(),
        path.display()
    );
    Ok(boundaries)
}

/// Parses a `GeoJSON` `FeatureCollection` into commune boundaries.
///
/// Features without a polygonal geometry are skipped with a warning. When
/// the department property is absent, the department is derived from the
/// commune code prefix.
///
/// # Errors
///
/// Returns [`GeoError`] if the document is not a `FeatureCollection` or a
/// feature has a missing or malformed commune code.
pub fn parse_boundaries(
    geojson_str: &str,
    fields: &BoundaryFields,
) -> Result<Vec<CommuneBoundary>, GeoError> {
    let GeoJson::FeatureCollection(collection) = geojson_str.parse::<GeoJson>()? else {
        return Err(GeoError::NotFeatureCollection);
    };

    let mut boundaries = Vec::with_capacity(collection.features.len());
    let mut skipped = 0usize;

    for (index, feature) in collection.features.into_iter().enumerate() {
        let raw_code = property_text(&feature, &fields.code).ok_or_else(|| GeoError::Feature {
            index,
            message: format!("missing property '{}'", fields.code),
        })?;

        let code = CommuneCode::parse(&raw_code).map_err(|e| GeoError::Feature {
            index,
            message: e.to_string(),
        })?;

        let name = property_text(&feature, &fields.name).unwrap_or_else(|| {
            log::warn!(
                "Feature {index} ({code}) has no '{}' property, using its code as name",
                fields.name
            );
            code.to_string()
        });

        let department_code = property_text(&feature, &fields.department).map_or_else(
            || code.department_code().to_string(),
            |d| normalize_departement(&d),
        );

        let Some(geometry) = feature.geometry.and_then(to_multipolygon) else {
            log::warn!("Feature {index} ({code} {name}) has no polygon geometry, skipping");
            skipped += 1;
            continue;
        };

        boundaries.push(CommuneBoundary {
            commune: Commune {
                code,
                name,
                department_code,
            },
            geometry,
        });
    }

    if skipped > 0 {
        log::warn!("Skipped {skipped} features without polygon geometry");
    }

    Ok(boundaries)
}

/// Reads a feature property as trimmed, non-empty text.
///
/// Integral numbers are rendered without a fractional part.
fn property_text(feature: &Feature, key: &str) -> Option<String> {
    let text = match feature.property(key)? {
        serde_json::Value::String(s) => s.trim().to_string(),
        serde_json::Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i.to_string(),
            (None, Some(f)) if f.fract().abs() < f64::EPSILON => format!("{f:.0}"),
            _ => n.to_string(),
        },
        _ => return None,
    };

    if text.is_empty() { None } else { Some(text) }
}

/// Restores the leading zero of single-digit department codes (`4` → `04`).
fn normalize_departement(raw: &str) -> String {
    let upper = raw.trim().to_ascii_uppercase();
    if upper.len() == 1 && upper.chars().all(|c| c.is_ascii_digit()) {
        format!("0{upper}")
    } else {
        upper
    }
}

/// Converts a `GeoJSON` geometry into a [`MultiPolygon`].
/// Handles both `Polygon` and `MultiPolygon` geometry types.
fn to_multipolygon(geometry: geojson::Geometry) -> Option<MultiPolygon<f64>> {
    match geo::Geometry::<f64>::try_from(geometry).ok()? {
        geo::Geometry::MultiPolygon(mp) => Some(mp),
        geo::Geometry::Polygon(p) => Some(MultiPolygon(vec![p])),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r#"{"type":"Polygon","coordinates":[[[6.0,44.0],[6.1,44.0],[6.1,44.1],[6.0,44.1],[6.0,44.0]]]}"#;

    fn collection(features: &[String]) -> String {
        format!(
            r#"{{"type":"FeatureCollection","features":[{}]}}"#,
            features.join(",")
        )
    }

    fn feature(properties: &str, geometry: &str) -> String {
        format!(r#"{{"type":"Feature","properties":{properties},"geometry":{geometry}}}"#)
    }

    #[test]
    fn parses_string_properties() {
        let doc = collection(&[feature(
            r#"{"code_insee":"04070","nom_officiel":"Digne-les-Bains","code_insee_du_departement":"04"}"#,
            SQUARE,
        )]);
        let boundaries = parse_boundaries(&doc, &BoundaryFields::default()).unwrap();
        assert_eq!(boundaries.len(), 1);
        let commune = &boundaries[0].commune;
        assert_eq!(commune.code.as_str(), "04070");
        assert_eq!(commune.name, "Digne-les-Bains");
        assert_eq!(commune.department_code, "04");
        assert_eq!(boundaries[0].geometry.0.len(), 1);
    }

    #[test]
    fn pads_numeric_codes_and_departments() {
        let doc = collection(&[feature(
            r#"{"code_insee":4070,"nom_officiel":"Digne-les-Bains","code_insee_du_departement":4}"#,
            SQUARE,
        )]);
        let boundaries = parse_boundaries(&doc, &BoundaryFields::default()).unwrap();
        assert_eq!(boundaries[0].commune.code.as_str(), "04070");
        assert_eq!(boundaries[0].commune.department_code, "04");
    }

    #[test]
    fn derives_department_from_code() {
        let doc = collection(&[feature(
            r#"{"code_insee":"05061","nom_officiel":"Gap"}"#,
            SQUARE,
        )]);
        let boundaries = parse_boundaries(&doc, &BoundaryFields::default()).unwrap();
        assert_eq!(boundaries[0].commune.department_code, "05");
    }

    #[test]
    fn honours_custom_field_names() {
        let fields = BoundaryFields {
            code: "INSEE_COM".to_string(),
            name: "NOM".to_string(),
            department: "INSEE_DEP".to_string(),
        };
        let doc = collection(&[feature(
            r#"{"INSEE_COM":"04112","NOM":"Manosque","INSEE_DEP":"04"}"#,
            SQUARE,
        )]);
        let boundaries = parse_boundaries(&doc, &fields).unwrap();
        assert_eq!(boundaries[0].commune.name, "Manosque");
    }

    #[test]
    fn skips_features_without_polygons() {
        let doc = collection(&[
            feature(r#"{"code_insee":"04070","nom_officiel":"A"}"#, "null"),
            feature(
                r#"{"code_insee":"04071","nom_officiel":"B"}"#,
                r#"{"type":"Point","coordinates":[6.0,44.0]}"#,
            ),
            feature(r#"{"code_insee":"04072","nom_officiel":"C"}"#, SQUARE),
        ]);
        let boundaries = parse_boundaries(&doc, &BoundaryFields::default()).unwrap();
        assert_eq!(boundaries.len(), 1);
        assert_eq!(boundaries[0].commune.name, "C");
    }

    #[test]
    fn rejects_missing_code() {
        let doc = collection(&[feature(r#"{"nom_officiel":"Nowhere"}"#, SQUARE)]);
        let err = parse_boundaries(&doc, &BoundaryFields::default()).unwrap_err();
        assert!(matches!(err, GeoError::Feature { index: 0, .. }));
    }

    #[test]
    fn rejects_non_collections() {
        let err = parse_boundaries(SQUARE, &BoundaryFields::default()).unwrap_err();
        assert!(matches!(err, GeoError::NotFeatureCollection));
    }

    #[test]
    fn computes_bounds() {
        let doc = collection(&[feature(r#"{"code_insee":"04070"}"#, SQUARE)]);
        let boundaries = parse_boundaries(&doc, &BoundaryFields::default()).unwrap();
        let rect = boundaries[0].bounds().unwrap();
        assert!((rect.min().x - 6.0).abs() < f64::EPSILON);
        assert!((rect.max().y - 44.1).abs() < 1e-9);
    }
}
