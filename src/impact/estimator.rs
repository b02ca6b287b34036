//! Closed-form impact energy, crater size, and intensity-to-radius estimates.
//!
//! Every function here is total: invalid physical input degrades to `0.0` (or the
//! fallback radius) so drawing code can treat zero as "nothing to draw".

use std::f64::consts::PI;

use bevy::prelude::*;

use super::constants::CRATER_COLLAPSE_MULTIPLIER;
use super::constants::CRATER_SCALING_COEFFICIENT;
use super::constants::CRATER_SCALING_EXPONENT;
use super::constants::DEFAULT_TARGET_DENSITY_KG_M3;
use super::constants::INTENSITY_FALLBACK;
use super::constants::INTENSITY_RADIUS_MAX_METERS;
use super::constants::INTENSITY_RADIUS_MIN_METERS;
use super::constants::JOULES_PER_MEGATON;

/// Physical description of an impactor, as typed into the form or taken from the catalog.
#[derive(Reflect, Clone, Copy, Debug, PartialEq)]
pub struct MeteoriteParameters {
    pub diameter_meters:     f64,
    pub velocity_km_per_sec: f64,
    pub density_kg_m3:       f64,
}

impl MeteoriteParameters {
    pub const fn new(diameter_meters: f64, velocity_km_per_sec: f64, density_kg_m3: f64) -> Self {
        Self {
            diameter_meters,
            velocity_km_per_sec,
            density_kg_m3,
        }
    }

    pub const fn is_valid(&self) -> bool {
        is_positive(self.diameter_meters)
            && is_positive(self.velocity_km_per_sec)
            && is_positive(self.density_kg_m3)
    }

    pub fn estimate(&self) -> ImpactEstimate { ImpactEstimate::from_parameters(self) }
}

/// Energy and crater size derived from one set of parameters. Recomputed, never stored.
#[derive(Reflect, Clone, Copy, Debug, Default, PartialEq)]
pub struct ImpactEstimate {
    pub energy_megatons:        f64,
    pub crater_diameter_meters: f64,
}

impl ImpactEstimate {
    pub fn from_parameters(parameters: &MeteoriteParameters) -> Self {
        let energy_megatons = energy_megatons(
            parameters.diameter_meters,
            parameters.velocity_km_per_sec,
            parameters.density_kg_m3,
        );
        Self {
            energy_megatons,
            crater_diameter_meters: crater_diameter_meters(energy_megatons),
        }
    }

    pub const fn is_drawable(&self) -> bool { self.energy_megatons > 0.0 }
}

const fn is_positive(value: f64) -> bool { value.is_finite() && value > 0.0 }

pub fn sphere_volume_m3(diameter_meters: f64) -> f64 {
    let radius = diameter_meters / 2.0;
    (4.0 / 3.0) * PI * radius.powi(3)
}

pub const fn kinetic_energy_joules(mass_kg: f64, velocity_km_per_sec: f64) -> f64 {
    let velocity_m_s = velocity_km_per_sec * 1000.0;
    0.5 * mass_kg * velocity_m_s * velocity_m_s
}

/// Kinetic energy of a spherical impactor in megatons of TNT.
///
/// Returns `0.0` when any argument is zero, negative, `NaN`, or infinite.
pub fn energy_megatons(diameter_meters: f64, velocity_km_per_sec: f64, density_kg_m3: f64) -> f64 {
    if !(is_positive(diameter_meters) && is_positive(velocity_km_per_sec) && is_positive(density_kg_m3))
    {
        return 0.0;
    }

    let mass_kg = sphere_volume_m3(diameter_meters) * density_kg_m3;
    kinetic_energy_joules(mass_kg, velocity_km_per_sec) / JOULES_PER_MEGATON
}

/// Final crater diameter in a target of the default density (sedimentary rock).
pub fn crater_diameter_meters(energy_megatons: f64) -> f64 {
    crater_diameter_meters_in(energy_megatons, DEFAULT_TARGET_DENSITY_KG_M3)
}

/// Final crater diameter for a given impact energy and target density.
///
/// Transient diameter is `Cf · (E / ρ)^(1/3.4)`; the final crater applies the collapse
/// multiplier on top.
pub fn crater_diameter_meters_in(energy_megatons: f64, target_density_kg_m3: f64) -> f64 {
    if !(is_positive(energy_megatons) && is_positive(target_density_kg_m3)) {
        return 0.0;
    }

    let energy_joules = energy_megatons * JOULES_PER_MEGATON;
    let transient_diameter = CRATER_SCALING_COEFFICIENT
        * (energy_joules / target_density_kg_m3).powf(CRATER_SCALING_EXPONENT);
    transient_diameter * CRATER_COLLAPSE_MULTIPLIER
}

/// Intensity actually used for sizing: `NaN` becomes `1`, and `1` is also the floor.
pub const fn coerce_intensity(intensity: f64) -> f64 {
    if intensity.is_nan() {
        INTENSITY_FALLBACK
    } else {
        intensity.max(INTENSITY_FALLBACK)
    }
}

/// Maps an energy-like intensity onto a circle radius in meters: `500 · 10^(i/2)`, clamped.
pub fn intensity_to_radius_meters(intensity: f64) -> f64 {
    let intensity = coerce_intensity(intensity);
    let radius = INTENSITY_RADIUS_MIN_METERS * 10_f64.powf(intensity / 2.0);
    radius.clamp(INTENSITY_RADIUS_MIN_METERS, INTENSITY_RADIUS_MAX_METERS)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIAMETER: f64 = 1000.0;
    const VELOCITY: f64 = 20.0;
    const DENSITY: f64 = 3000.0;

    #[test]
    fn reference_impactor_is_about_75_megatons() {
        let energy = energy_megatons(DIAMETER, VELOCITY, DENSITY);
        assert!((energy - 75.1).abs() < 0.5, "got {energy}");
    }

    #[test]
    fn reference_volume_and_mass() {
        let volume = sphere_volume_m3(DIAMETER);
        assert!((volume - 5.236e8).abs() / 5.236e8 < 1e-3);
        let mass = volume * DENSITY;
        assert!((mass - 1.5708e12).abs() / 1.5708e12 < 1e-3);
        let joules = kinetic_energy_joules(mass, VELOCITY);
        assert!((joules - 3.1416e20).abs() / 3.1416e20 < 1e-3);
    }

    #[test]
    fn energy_increases_with_each_argument() {
        let base = energy_megatons(DIAMETER, VELOCITY, DENSITY);
        assert!(energy_megatons(DIAMETER * 1.01, VELOCITY, DENSITY) > base);
        assert!(energy_megatons(DIAMETER, VELOCITY * 1.01, DENSITY) > base);
        assert!(energy_megatons(DIAMETER, VELOCITY, DENSITY * 1.01) > base);

        let small = energy_megatons(0.5, 0.1, 1.0);
        assert!(energy_megatons(0.6, 0.1, 1.0) > small);
    }

    #[test]
    fn invalid_inputs_yield_zero_energy() {
        for energy in [
            energy_megatons(0.0, VELOCITY, DENSITY),
            energy_megatons(DIAMETER, 0.0, DENSITY),
            energy_megatons(DIAMETER, VELOCITY, 0.0),
            energy_megatons(-5.0, VELOCITY, DENSITY),
            energy_megatons(DIAMETER, f64::NAN, DENSITY),
            energy_megatons(DIAMETER, VELOCITY, f64::INFINITY),
        ] {
            assert!(energy.abs() < f64::EPSILON, "got {energy}");
        }
    }

    #[test]
    fn energy_is_deterministic() {
        let first = energy_megatons(DIAMETER, VELOCITY, DENSITY);
        let second = energy_megatons(DIAMETER, VELOCITY, DENSITY);
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn crater_guard_and_positivity() {
        for crater in [
            crater_diameter_meters(0.0),
            crater_diameter_meters(-1.0),
            crater_diameter_meters(f64::NAN),
            crater_diameter_meters_in(10.0, 0.0),
        ] {
            assert!(crater.abs() < f64::EPSILON, "got {crater}");
        }
        assert!(crater_diameter_meters(1e-9) > 0.0);
        assert!(crater_diameter_meters(1.0) > 0.0);
    }

    #[test]
    fn reference_crater_is_low_kilometers() {
        let crater = crater_diameter_meters(75.1);
        assert!((1000.0..=5000.0).contains(&crater), "got {crater}");
    }

    #[test]
    fn denser_targets_make_smaller_craters() {
        assert!(crater_diameter_meters_in(75.1, 2700.0) < crater_diameter_meters(75.1));
    }

    #[test]
    fn intensity_radius_is_clamped() {
        let largest = intensity_to_radius_meters(100.0);
        assert!((largest - INTENSITY_RADIUS_MAX_METERS).abs() < f64::EPSILON);
        let infinite = intensity_to_radius_meters(f64::INFINITY);
        assert!((infinite - INTENSITY_RADIUS_MAX_METERS).abs() < f64::EPSILON);
    }

    #[test]
    fn intensity_radius_coerces_bad_input() {
        let fallback = intensity_to_radius_meters(INTENSITY_FALLBACK);
        assert!((fallback - 500.0 * 10_f64.sqrt()).abs() < 1e-9);
        for intensity in [-3.0, -0.5, 0.0, 0.5, f64::NAN, f64::NEG_INFINITY] {
            let radius = intensity_to_radius_meters(intensity);
            assert!(
                (radius - fallback).abs() < f64::EPSILON,
                "intensity {intensity} gave {radius}"
            );
        }
    }

    #[test]
    fn intensity_radius_is_non_decreasing() {
        let mut previous = intensity_to_radius_meters(-20.0);
        for step in -199..=200 {
            let radius = intensity_to_radius_meters(f64::from(step) * 0.1);
            assert!(radius >= previous);
            assert!((INTENSITY_RADIUS_MIN_METERS..=INTENSITY_RADIUS_MAX_METERS).contains(&radius));
            previous = radius;
        }
    }

    #[test]
    fn estimate_bundles_energy_and_crater() {
        let estimate = MeteoriteParameters::new(DIAMETER, VELOCITY, DENSITY).estimate();
        assert!(estimate.is_drawable());
        assert!(MeteoriteParameters::new(DIAMETER, VELOCITY, DENSITY).is_valid());
        let crater = crater_diameter_meters(estimate.energy_megatons);
        assert!((estimate.crater_diameter_meters - crater).abs() < f64::EPSILON);

        let empty = MeteoriteParameters::new(0.0, VELOCITY, DENSITY).estimate();
        assert!(!empty.is_drawable());
        assert!(!MeteoriteParameters::new(0.0, VELOCITY, DENSITY).is_valid());
        assert_eq!(empty, ImpactEstimate::default());
    }
}
