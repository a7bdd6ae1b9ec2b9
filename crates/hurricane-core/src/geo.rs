// File: crates/hurricane-core/src/geo.rs
// Summary: Static geographic reference layer (land outlines) parsed from GeoJSON.

use serde::Deserialize;

use crate::error::{Error, Result};

/// Coarse world land outline compiled into the library.
const BUNDLED_WORLD: &str = include_str!("../assets/world_coarse.geojson");

#[derive(Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Option<serde_json::Map<String, serde_json::Value>>,
    geometry: Option<Geometry>,
}

/// Positions are `[lon, lat]` or `[lon, lat, elevation]`; extra members are ignored.
type Position = Vec<f64>;

#[derive(Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
    #[serde(other)]
    Other,
}

/// One closed outline in lon/lat degrees.
#[derive(Clone, Debug, PartialEq)]
pub struct Ring {
    pub name: String,
    pub points: Vec<(f64, f64)>,
}

/// Polygons drawn beneath map points. Read-only.
#[derive(Clone, Debug, Default)]
pub struct ReferenceLayer {
    rings: Vec<Ring>,
}

impl ReferenceLayer {
    /// The world outline shipped with the crate.
    pub fn bundled() -> Result<Self> {
        Self::from_geojson(BUNDLED_WORLD)
    }

    /// Parse a GeoJSON `FeatureCollection`; only polygon geometries are kept.
    pub fn from_geojson(text: &str) -> Result<Self> {
        let fc: FeatureCollection = serde_json::from_str(text)
            .map_err(|e| Error::Render(format!("reference layer is not valid GeoJSON: {e}")))?;

        let mut rings = Vec::new();
        for feature in fc.features {
            let name = feature
                .properties
                .as_ref()
                .and_then(|p| p.get("name"))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string();
            let polygons = match feature.geometry {
                Some(Geometry::Polygon { coordinates }) => vec![coordinates],
                Some(Geometry::MultiPolygon { coordinates }) => coordinates,
                Some(Geometry::Other) | None => continue,
            };
            // Exterior rings only; holes are small enough to ignore at this resolution.
            for polygon in polygons {
                if let Some(exterior) = polygon.into_iter().next() {
                    let points: Vec<(f64, f64)> = exterior
                        .iter()
                        .filter(|p| p.len() >= 2)
                        .map(|p| (p[0], p[1]))
                        .collect();
                    if points.len() >= 3 {
                        rings.push(Ring { name: name.clone(), points });
                    }
                }
            }
        }
        Ok(Self { rings })
    }

    pub fn rings(&self) -> &[Ring] { &self.rings }
    pub fn len(&self) -> usize { self.rings.len() }
    pub fn is_empty(&self) -> bool { self.rings.is_empty() }
}
