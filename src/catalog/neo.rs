use std::path::Path;
use std::path::PathBuf;

use bevy::prelude::*;
use serde::Deserialize;

use crate::impact::DEFAULT_NEO_DENSITY_KG_M3;
use crate::impact::ImpactStatistics;
use crate::impact::MeteoriteParameters;
use crate::impact::estimate_impact_velocity;

/// Catalog coordinates are in orbit-plot units; the scene uses half of that.
pub const TRAJECTORY_SCALE: f32 = 0.5;
const DEFAULT_MARKER_SIZE: f32 = 1.0;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {}: {source}", .path.display())]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct NeoPosition {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<NeoPosition> for Vec3 {
    fn from(position: NeoPosition) -> Self { Self::new(position.x, position.y, position.z) }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CatalogMetadata {
    #[serde(default)]
    pub count:           usize,
    #[serde(default)]
    pub hazardous_count: usize,
    #[serde(default)]
    pub source:          String,
    #[serde(default)]
    pub last_updated:    String,
}

/// One near-Earth object. Fields the viewer does not use (trajectories, precomputed
/// statistics) are ignored on load.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NeoRecord {
    pub name:            String,
    #[serde(default)]
    pub id:              String,
    pub position:        NeoPosition,
    pub diameter_meters: f64,
    /// Semi-major axis
    pub orbit_radius_au: f64,
    #[serde(default)]
    pub is_hazardous:    bool,
    /// Marker sphere scale
    #[serde(default = "default_marker_size")]
    pub size:            f32,
}

const fn default_marker_size() -> f32 { DEFAULT_MARKER_SIZE }

impl NeoRecord {
    pub fn world_position(&self) -> Vec3 { Vec3::from(self.position) * TRAJECTORY_SCALE }

    /// Impact inputs for this object striking Earth.
    pub fn parameters(&self) -> MeteoriteParameters {
        MeteoriteParameters::new(
            self.diameter_meters,
            estimate_impact_velocity(self.orbit_radius_au),
            DEFAULT_NEO_DENSITY_KG_M3,
        )
    }

    pub fn statistics(&self) -> ImpactStatistics {
        ImpactStatistics::from_diameter(self.diameter_meters, self.orbit_radius_au)
    }

    #[cfg(test)]
    pub fn sample(name: &str, position: Vec3) -> Self {
        Self {
            name:            name.to_string(),
            id:              String::new(),
            position:        NeoPosition {
                x: position.x,
                y: position.y,
                z: position.z,
            },
            diameter_meters: 370.0,
            orbit_radius_au: 0.92,
            is_hazardous:    true,
            size:            DEFAULT_MARKER_SIZE,
        }
    }
}

/// Near-Earth objects available for picking and focus, in file order.
#[derive(Resource, Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NeoCatalog {
    #[serde(default)]
    pub metadata: CatalogMetadata,
    #[serde(default)]
    pub neos:     Vec<NeoRecord>,
}

impl NeoCatalog {
    pub fn from_records(neos: Vec<NeoRecord>) -> Self {
        Self {
            metadata: CatalogMetadata {
                count: neos.len(),
                hazardous_count: neos.iter().filter(|neo| neo.is_hazardous).count(),
                ..default()
            },
            neos,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> { Ok(serde_json::from_str(json)?) }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// First object whose name contains `query`, ignoring case.
    pub fn find(&self, query: &str) -> Option<&NeoRecord> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return None;
        }
        self.neos
            .iter()
            .find(|neo| neo.name.to_lowercase().contains(&query))
    }

    pub fn hazardous(&self) -> impl Iterator<Item = &NeoRecord> {
        self.neos.iter().filter(|neo| neo.is_hazardous)
    }

    pub const fn len(&self) -> usize { self.neos.len() }

    pub const fn is_empty(&self) -> bool { self.neos.is_empty() }
}
