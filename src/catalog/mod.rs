mod markers;
mod neo;

use std::path::Path;
use std::path::PathBuf;

use bevy::ecs::message::MessageReader;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use markers::NeoMarker;
use markers::spawn_earth_and_moon;
use markers::spawn_neo_markers;

pub use neo::CatalogError;
pub use neo::NeoCatalog;
pub use neo::NeoRecord;

use crate::camera::ObjectPicked;
use crate::impact::DEFAULT_IMPACT_SITE;
use crate::impact::ImpactRequested;
use crate::schedule::CameraSet;

/// Catalog file, relative to the directory holding `assets/`.
pub const CATALOG_PATH: &str = "assets/meteorites_data.json";

pub struct CatalogPlugin;

impl Plugin for CatalogPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            (load_catalog, spawn_neo_markers).chain(),
        )
        .add_systems(Startup, spawn_earth_and_moon)
        .add_systems(Update, request_impact_for_pick.in_set(CameraSet::Commands));
    }
}

/// Locates the catalog the way Bevy locates its asset folder: `BEVY_ASSET_ROOT`, then
/// `CARGO_MANIFEST_DIR`, then the executable's directory. The first root that has the file
/// wins; otherwise the crate directory this binary was built from.
fn catalog_path() -> PathBuf {
    let roots = [
        std::env::var_os("BEVY_ASSET_ROOT").map(PathBuf::from),
        std::env::var_os("CARGO_MANIFEST_DIR").map(PathBuf::from),
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf)),
    ];
    resolve_catalog_path(roots.into_iter().flatten(), Path::exists)
}

fn resolve_catalog_path(
    roots: impl IntoIterator<Item = PathBuf>,
    exists: impl Fn(&Path) -> bool,
) -> PathBuf {
    roots
        .into_iter()
        .map(|root| root.join(CATALOG_PATH))
        .find(|path| exists(path))
        .unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join(CATALOG_PATH))
}

fn load_catalog(mut commands: Commands) {
    let path = catalog_path();
    let catalog = match NeoCatalog::load(&path) {
        Ok(catalog) => {
            let metadata = &catalog.metadata;
            info!(
                "loaded {} NEOs ({} potentially hazardous) from {}: {} updated {}",
                catalog.len(),
                catalog.hazardous().count(),
                path.display(),
                metadata.source,
                metadata.last_updated
            );
            if metadata.count != catalog.len() || metadata.hazardous_count != catalog.hazardous().count() {
                warn!(
                    "catalog metadata lists {} NEOs ({} hazardous), file has {}",
                    metadata.count,
                    metadata.hazardous_count,
                    catalog.len()
                );
            }
            catalog
        },
        Err(error) => {
            warn!("{error}; continuing with an empty catalog");
            NeoCatalog::default()
        },
    };
    commands.insert_resource(catalog);
}

/// A picked NEO is estimated as if it struck the default impact site.
fn request_impact_for_pick(
    mut picks: MessageReader<ObjectPicked>,
    markers: Query<&NeoMarker>,
    catalog: Res<NeoCatalog>,
    mut impacts: MessageWriter<ImpactRequested>,
) {
    for pick in picks.read() {
        let Ok(marker) = markers.get(pick.entity) else {
            continue;
        };
        let Some(neo) = catalog.neos.get(marker.index) else {
            warn!("marker {} has no catalog entry", marker.index);
            continue;
        };
        let statistics = neo.statistics();
        info!(
            "{} [{}]: {:.0} m, {:.0} km/s, {:.2} Mt ({}: {}, {})",
            neo.name,
            neo.id,
            neo.diameter_meters,
            statistics.impact_velocity_km_s,
            statistics.energy_megatons(),
            statistics.scale,
            statistics.scale.description(),
            statistics.scale.historical_comparison()
        );
        impacts.write(ImpactRequested::new(DEFAULT_IMPACT_SITE, neo.parameters()));
    }
}
