use std::fmt;

use super::constants::BELT_ORBIT_LIMIT_AU;
use super::constants::DEFAULT_NEO_DENSITY_KG_M3;
use super::constants::IMPACT_VELOCITY_BELT_KM_S;
use super::constants::IMPACT_VELOCITY_INNER_KM_S;
use super::constants::IMPACT_VELOCITY_NEAR_KM_S;
use super::constants::IMPACT_VELOCITY_OUTER_KM_S;
use super::constants::JOULES_PER_KILOTON;
use super::constants::KILOTONS_PER_MEGATON;
use super::constants::NEAR_ORBIT_LIMIT_AU;
use super::estimator::kinetic_energy_joules;
use super::estimator::sphere_volume_m3;

/// Typical Earth-relative impact speed for an orbit with the given semi-major axis.
pub const fn estimate_impact_velocity(semi_major_axis_au: f64) -> f64 {
    if semi_major_axis_au < 1.0 {
        IMPACT_VELOCITY_INNER_KM_S
    } else if semi_major_axis_au < NEAR_ORBIT_LIMIT_AU {
        IMPACT_VELOCITY_NEAR_KM_S
    } else if semi_major_axis_au < BELT_ORBIT_LIMIT_AU {
        IMPACT_VELOCITY_BELT_KM_S
    } else {
        // also catches NaN
        IMPACT_VELOCITY_OUTER_KM_S
    }
}

/// Qualitative impact scale, ordered from harmless to extinction level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ImpactScale {
    Negligible,
    VerySmall,
    Small,
    Moderate,
    Large,
    VeryLarge,
    Massive,
    Catastrophic,
    Global,
    Extinction,
}

impl ImpactScale {
    // upper bound (exclusive, kilotons) for every scale but the last
    const THRESHOLDS_KT: [(f64, Self); 9] = [
        (0.001, Self::Negligible),
        (0.01, Self::VerySmall),
        (0.1, Self::Small),
        (1.0, Self::Moderate),
        (15.0, Self::Large),
        (100.0, Self::VeryLarge),
        (1000.0, Self::Massive),
        (10_000.0, Self::Catastrophic),
        (100_000.0, Self::Global),
    ];

    pub fn from_kilotons(energy_kilotons: f64) -> Self {
        Self::THRESHOLDS_KT
            .iter()
            .find(|(limit, _)| energy_kilotons < *limit)
            .map_or(Self::Extinction, |(_, scale)| *scale)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Negligible => "Negligible",
            Self::VerySmall => "Very Small",
            Self::Small => "Small",
            Self::Moderate => "Moderate",
            Self::Large => "Large",
            Self::VeryLarge => "Very Large",
            Self::Massive => "Massive",
            Self::Catastrophic => "Catastrophic",
            Self::Global => "Global",
            Self::Extinction => "Extinction",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Negligible => "Small meteorite - burns up in atmosphere",
            Self::VerySmall => "Small meteorite impact",
            Self::Small => "Local damage possible",
            Self::Moderate => "City block damage",
            Self::Large => "City-wide destruction",
            Self::VeryLarge => "Regional devastation",
            Self::Massive => "Country-wide effects",
            Self::Catastrophic => "Continental damage",
            Self::Global => "Global climate effects",
            Self::Extinction => "Mass extinction event",
        }
    }

    pub const fn historical_comparison(self) -> &'static str {
        match self {
            Self::Negligible => "Typical shooting star",
            Self::VerySmall => "Car-sized object",
            Self::Small => "House-sized object",
            Self::Moderate => "Chelyabinsk meteor (2013)",
            Self::Large => "Hiroshima bomb equivalent",
            Self::VeryLarge => "Large nuclear weapon",
            Self::Massive => "Tunguska event (1908)",
            Self::Catastrophic => "Large hydrogen bomb",
            Self::Global => "K-Pg boundary impactor scale",
            Self::Extinction => "Dinosaur extinction level",
        }
    }
}

impl fmt::Display for ImpactScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
}

/// Mass, energy, and qualitative scale for a catalog object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImpactStatistics {
    pub volume_m3:            f64,
    pub mass_kg:              f64,
    pub impact_velocity_km_s: f64,
    pub energy_kilotons:      f64,
    pub scale:                ImpactScale,
}

impl ImpactStatistics {
    pub fn from_diameter(diameter_meters: f64, semi_major_axis_au: f64) -> Self {
        Self::from_diameter_with_density(
            diameter_meters,
            semi_major_axis_au,
            DEFAULT_NEO_DENSITY_KG_M3,
        )
    }

    pub fn from_diameter_with_density(
        diameter_meters: f64,
        semi_major_axis_au: f64,
        density_kg_m3: f64,
    ) -> Self {
        let diameter = if diameter_meters.is_finite() {
            diameter_meters.max(0.0)
        } else {
            0.0
        };
        let density = if density_kg_m3.is_finite() {
            density_kg_m3.max(0.0)
        } else {
            0.0
        };

        let volume_m3 = sphere_volume_m3(diameter);
        let mass_kg = volume_m3 * density;
        let impact_velocity_km_s = estimate_impact_velocity(semi_major_axis_au);
        let energy_kilotons =
            kinetic_energy_joules(mass_kg, impact_velocity_km_s) / JOULES_PER_KILOTON;

        Self {
            volume_m3,
            mass_kg,
            impact_velocity_km_s,
            energy_kilotons,
            scale: ImpactScale::from_kilotons(energy_kilotons),
        }
    }

    pub const fn mass_tons(&self) -> f64 { self.mass_kg / 1000.0 }

    pub const fn energy_megatons(&self) -> f64 { self.energy_kilotons / KILOTONS_PER_MEGATON }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impact::estimator::energy_megatons;

    #[test]
    fn impact_velocity_bands() {
        for (semi_major_axis_au, expected) in [
            (0.92, 25.0),
            (1.0, 20.0),
            (1.29, 20.0),
            (1.3, 15.0),
            (1.99, 15.0),
            (2.66, 12.0),
            (f64::NAN, 12.0),
        ] {
            let velocity = estimate_impact_velocity(semi_major_axis_au);
            assert!(
                (velocity - expected).abs() < f64::EPSILON,
                "{semi_major_axis_au} AU gave {velocity} km/s"
            );
        }
    }

    #[test]
    fn scale_thresholds_are_exclusive_upper_bounds() {
        assert_eq!(ImpactScale::from_kilotons(0.0), ImpactScale::Negligible);
        assert_eq!(ImpactScale::from_kilotons(0.001), ImpactScale::VerySmall);
        assert_eq!(ImpactScale::from_kilotons(0.5), ImpactScale::Moderate);
        assert_eq!(ImpactScale::from_kilotons(14.9), ImpactScale::Large);
        assert_eq!(ImpactScale::from_kilotons(15.0), ImpactScale::VeryLarge);
        assert_eq!(ImpactScale::from_kilotons(500.0), ImpactScale::Massive);
        assert_eq!(ImpactScale::from_kilotons(99_999.0), ImpactScale::Global);
        assert_eq!(ImpactScale::from_kilotons(1e9), ImpactScale::Extinction);
    }

    #[test]
    fn scales_are_ordered() {
        assert!(ImpactScale::Negligible < ImpactScale::Moderate);
        assert!(ImpactScale::Global < ImpactScale::Extinction);
        assert_eq!(ImpactScale::Massive.to_string(), "Massive");
        assert_eq!(
            ImpactScale::Massive.historical_comparison(),
            "Tunguska event (1908)"
        );
        assert_eq!(ImpactScale::Large.description(), "City-wide destruction");
    }

    #[test]
    fn statistics_agree_with_energy_estimator() {
        // 50 m stony body on a 1.5 AU orbit, roughly 4.6 Mt
        let stats = ImpactStatistics::from_diameter(50.0, 1.5);
        let expected_mt = energy_megatons(50.0, 15.0, DEFAULT_NEO_DENSITY_KG_M3);
        assert!((stats.energy_megatons() - expected_mt).abs() / expected_mt < 1e-12);
        assert!((stats.impact_velocity_km_s - 15.0).abs() < f64::EPSILON);
        assert!((stats.mass_tons() - stats.mass_kg / 1000.0).abs() < f64::EPSILON);
        assert_eq!(stats.scale, ImpactScale::Catastrophic);
    }

    #[test]
    fn degenerate_diameter_is_negligible() {
        let stats = ImpactStatistics::from_diameter(-10.0, 1.5);
        assert!(stats.mass_kg.abs() < f64::EPSILON);
        assert!(stats.energy_kilotons.abs() < f64::EPSILON);
        assert_eq!(stats.scale, ImpactScale::Negligible);
    }
}
