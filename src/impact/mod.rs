mod constants;
mod estimator;
mod overlay;
mod statistics;

use bevy::ecs::message::Message;
use bevy::ecs::message::MessageReader;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

pub use constants::DEFAULT_NEO_DENSITY_KG_M3;
pub use estimator::ImpactEstimate;
pub use estimator::MeteoriteParameters;
pub use overlay::GeoPoint;
pub use overlay::ImpactOverlay;
pub use statistics::ImpactScale;
pub use statistics::ImpactStatistics;
pub use statistics::estimate_impact_velocity;

/// Default map view center, used when an impact is requested without a picked site.
pub const DEFAULT_IMPACT_SITE: GeoPoint = GeoPoint::new(20.0, 0.0);

pub struct ImpactPlugin;

impl Plugin for ImpactPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ImpactRequested>()
            .add_message::<ImpactDrawn>()
            .init_resource::<CurrentImpact>()
            .add_systems(Update, estimate_requested_impacts);
    }
}

/// Ask for an impact to be estimated and drawn at `location`.
#[derive(Message, Clone, Debug)]
pub struct ImpactRequested {
    pub location:               GeoPoint,
    pub parameters:             MeteoriteParameters,
    /// Intensity supplied by the user or a remote service; overrides the energy proxy.
    pub intensity:              Option<f64>,
    /// Crater diameter supplied by a remote service; when positive it sizes the circle.
    pub crater_diameter_meters: Option<f64>,
}

impl ImpactRequested {
    pub const fn new(location: GeoPoint, parameters: MeteoriteParameters) -> Self {
        Self {
            location,
            parameters,
            intensity: None,
            crater_diameter_meters: None,
        }
    }
}

/// An estimate ready for the map layer.
#[derive(Message, Clone, Debug, PartialEq)]
pub struct ImpactDrawn {
    pub location: GeoPoint,
    pub overlay:  ImpactOverlay,
    pub estimate: ImpactEstimate,
}

/// The most recent drawn impact; each new request replaces it.
#[derive(Resource, Default, Debug)]
pub struct CurrentImpact(pub Option<ImpactDrawn>);

fn estimate_requested_impacts(
    mut requests: MessageReader<ImpactRequested>,
    mut drawn: MessageWriter<ImpactDrawn>,
    mut current: ResMut<CurrentImpact>,
) {
    for request in requests.read() {
        if !request.location.is_valid() {
            warn!(
                "ignoring impact at invalid location ({}, {})",
                request.location.lat, request.location.lng
            );
            continue;
        }

        if !request.parameters.is_valid() {
            debug!(
                "impact parameters {:?} are incomplete, energy estimate is zero",
                request.parameters
            );
        }
        let estimate = request.parameters.estimate();
        let overlay = request
            .crater_diameter_meters
            .and_then(ImpactOverlay::from_crater)
            .unwrap_or_else(|| ImpactOverlay::from_intensity(&request.parameters, request.intensity));

        info!(
            "impact at ({:.4}, {:.4}): {:.2} Mt, crater {:.0} m, circle {:.0} m",
            request.location.lat,
            request.location.lng,
            estimate.energy_megatons,
            estimate.crater_diameter_meters,
            overlay.radius_meters
        );

        let impact = ImpactDrawn {
            location: request.location,
            overlay,
            estimate,
        };
        current.0 = Some(impact.clone());
        drawn.write(impact);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn impact_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins).add_plugins(ImpactPlugin);
        app
    }

    #[test]
    fn request_produces_current_impact() {
        let mut app = impact_app();
        app.world_mut().write_message(ImpactRequested::new(
            DEFAULT_IMPACT_SITE,
            MeteoriteParameters::new(1000.0, 20.0, 3000.0),
        ));
        app.update();

        let current = app.world().resource::<CurrentImpact>();
        let Some(impact) = current.0.as_ref() else {
            panic!("expected an impact to be drawn");
        };
        assert!((impact.estimate.energy_megatons - 75.1).abs() < 0.5);
        assert!(impact.overlay.popup_text.contains("km"));
    }

    #[test]
    fn crater_from_service_sizes_the_circle() {
        let mut app = impact_app();
        let mut request = ImpactRequested::new(
            GeoPoint::new(-33.4, -70.6),
            MeteoriteParameters::new(1000.0, 20.0, 3000.0),
        );
        request.crater_diameter_meters = Some(4000.0);
        app.world_mut().write_message(request);
        app.update();

        let current = app.world().resource::<CurrentImpact>();
        assert_eq!(
            current.0.as_ref().map(|impact| impact.overlay.radius_meters),
            Some(2000.0)
        );
    }

    #[test]
    fn invalid_location_is_ignored() {
        let mut app = impact_app();
        app.world_mut().write_message(ImpactRequested::new(
            GeoPoint::new(120.0, 0.0),
            MeteoriteParameters::new(1000.0, 20.0, 3000.0),
        ));
        app.update();

        assert!(app.world().resource::<CurrentImpact>().0.is_none());
    }

    #[test]
    fn newer_request_replaces_older() {
        let mut app = impact_app();
        app.world_mut().write_message(ImpactRequested::new(
            DEFAULT_IMPACT_SITE,
            MeteoriteParameters::new(1000.0, 20.0, 3000.0),
        ));
        app.update();
        app.world_mut().write_message(ImpactRequested::new(
            GeoPoint::new(10.0, 10.0),
            MeteoriteParameters::new(0.0, 0.0, 3000.0),
        ));
        app.update();

        let current = app.world().resource::<CurrentImpact>();
        let Some(impact) = current.0.as_ref() else {
            panic!("expected an impact to be drawn");
        };
        assert_eq!(impact.location, GeoPoint::new(10.0, 10.0));
        assert!(!impact.estimate.is_drawable());
    }
}
