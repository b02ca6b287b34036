// Energy conversion
pub const JOULES_PER_MEGATON: f64 = 4.184e15;
pub const JOULES_PER_KILOTON: f64 = 4.184e12;
pub const KILOTONS_PER_MEGATON: f64 = 1000.0;

// Crater scaling law (empirical, fixed)
pub const CRATER_SCALING_COEFFICIENT: f64 = 1.161;
pub const CRATER_SCALING_EXPONENT: f64 = 1.0 / 3.4;
/// Final crater is wider than the transient cavity after rim collapse.
pub const CRATER_COLLAPSE_MULTIPLIER: f64 = 1.25;
pub const DEFAULT_TARGET_DENSITY_KG_M3: f64 = 1800.0;

// Intensity → display radius
pub const INTENSITY_RADIUS_MIN_METERS: f64 = 500.0;
pub const INTENSITY_RADIUS_MAX_METERS: f64 = 2_000_000.0;
/// Substituted for negative or non-numeric intensity before the curve is applied.
pub const INTENSITY_FALLBACK: f64 = 1.0;

// Catalog defaults
pub const DEFAULT_NEO_DENSITY_KG_M3: f64 = 2600.0;

// Impact velocity by semi-major axis (AU → km/s)
pub const IMPACT_VELOCITY_INNER_KM_S: f64 = 25.0;
pub const IMPACT_VELOCITY_NEAR_KM_S: f64 = 20.0;
pub const IMPACT_VELOCITY_BELT_KM_S: f64 = 15.0;
pub const IMPACT_VELOCITY_OUTER_KM_S: f64 = 12.0;
pub const NEAR_ORBIT_LIMIT_AU: f64 = 1.3;
pub const BELT_ORBIT_LIMIT_AU: f64 = 2.0;

/// Meters at which popup radii switch from meters to kilometers.
pub const RADIUS_LABEL_KM_THRESHOLD: f64 = 1000.0;
