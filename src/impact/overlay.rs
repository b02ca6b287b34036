use bevy::prelude::*;

use super::constants::RADIUS_LABEL_KM_THRESHOLD;
use super::estimator::MeteoriteParameters;
use super::estimator::coerce_intensity;
use super::estimator::energy_megatons;
use super::estimator::intensity_to_radius_meters;

/// Map coordinate of an impact site in degrees.
#[derive(Reflect, Clone, Copy, Debug, Default, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self { Self { lat, lng } }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// What the map layer draws: a circle radius and the popup shown on it.
#[derive(Clone, Debug, PartialEq)]
pub struct ImpactOverlay {
    pub radius_meters: f64,
    pub popup_text:    String,
}

impl ImpactOverlay {
    /// Circle sized by intensity. An explicit intensity, even a bad one, wins over the one
    /// derived from the parameters; bad values are coerced the same way the radius is.
    pub fn from_intensity(parameters: &MeteoriteParameters, intensity: Option<f64>) -> Self {
        let intensity =
            coerce_intensity(intensity.unwrap_or_else(|| intensity_proxy(parameters)));
        let radius_meters = intensity_to_radius_meters(intensity);

        Self {
            radius_meters,
            popup_text: format!(
                "Intensity (megatons): {intensity}\nRadius: {}",
                format_radius(radius_meters)
            ),
        }
    }

    /// Circle sized by a known crater. `None` unless the diameter is positive.
    pub fn from_crater(crater_diameter_meters: f64) -> Option<Self> {
        if !(crater_diameter_meters.is_finite() && crater_diameter_meters > 0.0) {
            return None;
        }

        Some(Self {
            radius_meters: crater_diameter_meters / 2.0,
            popup_text:    format!("Crater diameter: {} m", crater_diameter_meters.round()),
        })
    }
}

/// Intensity used when nothing better is known: the impact energy, else a size-based
/// guess, else `1`.
pub fn intensity_proxy(parameters: &MeteoriteParameters) -> f64 {
    let energy = energy_megatons(
        parameters.diameter_meters,
        parameters.velocity_km_per_sec,
        parameters.density_kg_m3,
    );

    if energy > 0.0 {
        energy
    } else if parameters.diameter_meters.is_finite() && parameters.diameter_meters > 0.0 {
        parameters.diameter_meters / 1000.0
    } else {
        1.0
    }
}

pub fn format_radius(radius_meters: f64) -> String {
    if radius_meters >= RADIUS_LABEL_KM_THRESHOLD {
        format!("{:.2} km", radius_meters / 1000.0)
    } else {
        format!("{} m", radius_meters.round())
    }
}
