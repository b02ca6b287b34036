use bevy::math::Vec3;

/// Camera pose at startup, an angled view of the Earth-Moon system.
pub const CAMERA_START_POSITION: Vec3 = Vec3::new(30.0, 20.0, 90.0);
pub const CAMERA_FOV_DEGREES: f32 = 60.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 2000.0;

/// Used when a direction cannot be normalized (zero or non-finite vector).
pub const FALLBACK_DIRECTION: Vec3 = Vec3::Y;

/// Polar angle is kept this far from the poles so the orbit basis stays defined.
pub const ORBIT_POLAR_MARGIN: f32 = 0.01;
/// Pan distance per input unit, relative to the camera's distance from its target.
pub const PAN_DISTANCE_SCALE: f32 = 0.001;

// Focus presets
pub const EARTH_VIEW_POSITION: Vec3 = Vec3::new(100.0, 80.0, 100.0);
pub const OVERVIEW_POSITION: Vec3 = Vec3::new(200.0, 150.0, 200.0);
/// NEO framing: camera sits this far behind the object, on the side away from Earth.
pub const FRAMED_FOCUS_DISTANCE: f32 = 40.0;
pub const FRAMED_FOCUS_NUDGE: Vec3 = Vec3::new(5.0, 8.0, 5.0);

/// Frames arriving within this much of the cap interval still count.
pub const FRAME_INTERVAL_TOLERANCE_MS: f32 = 0.5;

// Sun orbit supplying the daylight direction
pub const SUN_ORBIT_RADIUS: f32 = 200.0;
pub const SUN_ORBIT_RADIANS_PER_SEC: f32 = 0.1;
pub const SUN_ILLUMINANCE: f32 = 10_000.0;

/// Pointer travel in pixels below which a press-release counts as a click.
pub const CLICK_DRAG_TOLERANCE_PX: f32 = 4.0;
