//! Geocoding against a real Nominatim instance.
//!
//! Imports the Monaco extract into a `mediagis/nominatim` container, so the
//! first run takes several minutes. Run with `--ignored` when Docker is
//! available.

use std::time::{Duration, Instant};

use testcontainers::core::IntoContainerPort;
use testcontainers::runners::SyncRunner;
use testcontainers::{Container, GenericImage, ImageExt, ReuseDirective, TestcontainersError};

use delivery_route_planner::geocode::{NominatimClient, NominatimConfig};
use delivery_route_planner::traits::Geocoder;
use delivery_route_planner::{DeliveryRegistry, GeoPoint, optimize};

const MONACO_PBF: &str = "https://download.geofabrik.de/europe/monaco-latest.osm.pbf";
const MONACO_UPDATES: &str = "https://download.geofabrik.de/europe/monaco-updates/";

fn nominatim_container() -> Result<(Container<GenericImage>, String), TestcontainersError> {
    let image = GenericImage::new("mediagis/nominatim", "4.4")
        .with_exposed_port(8080.tcp())
        .with_env_var("PBF_URL", MONACO_PBF)
        .with_env_var("REPLICATION_URL", MONACO_UPDATES)
        .with_container_name("nominatim-monaco")
        .with_startup_timeout(Duration::from_secs(60))
        .with_reuse(ReuseDirective::Always);

    let container = image.start()?;
    let port = container.get_host_port_ipv4(8080.tcp())?;
    let base_url = format!("http://127.0.0.1:{}", port);

    Ok((container, base_url))
}

/// Poll until the import is done and the address resolves.
fn geocode_when_ready(client: &NominatimClient, address: &str) -> Option<GeoPoint> {
    let start = Instant::now();
    while start.elapsed() < Duration::from_secs(20 * 60) {
        if let Ok(Some(location)) = client.geocode(address) {
            return Some(location);
        }
        std::thread::sleep(Duration::from_secs(5));
    }
    None
}

#[test]
#[ignore = "needs Docker and a Nominatim import"]
fn nominatim_geocodes_monaco_addresses() {
    let (container, base_url) = nominatim_container().expect("start Nominatim container");

    let config = NominatimConfig {
        base_url,
        ..NominatimConfig::default()
    };
    let client = NominatimClient::new(config).expect("build Nominatim client");

    let casino = geocode_when_ready(&client, "Place du Casino, Monaco");
    if casino.is_none() {
        if let Ok(stderr) = container.stderr_to_vec() {
            if !stderr.is_empty() {
                eprintln!("Nominatim stderr:\n{}", String::from_utf8_lossy(&stderr));
            }
        }
    }
    let casino = casino.expect("Nominatim never answered");
    assert!((casino.latitude - 43.739).abs() < 0.01, "got {:?}", casino);
    assert!((casino.longitude - 7.428).abs() < 0.01, "got {:?}", casino);

    let mut registry = DeliveryRegistry::new();
    let addresses = [
        "Place du Casino, Monaco",
        "Stade Louis II, Monaco",
        "Musée Océanographique, Monaco",
    ];
    for address in addresses {
        registry
            .add_geocoded(&client, address, None)
            .expect("geocode request")
            .expect("address found in Monaco extract");
    }
    assert!(
        registry
            .add_geocoded(&client, "Nonexistent Boulevard 9999, Atlantis", None)
            .expect("geocode request")
            .is_none()
    );

    let snapshot = registry.all();
    let route = optimize(Some(casino), &snapshot).expect("optimize");
    assert_eq!(route.len(), addresses.len());
    registry.replace_order(route.stops()).expect("commit order");

    drop(container);
}
