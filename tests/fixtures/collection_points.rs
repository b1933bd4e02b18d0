//! Real Las Vegas locations used as a depot and collection points.

use delivery_route_planner::GeoPoint;

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

pub const DEPOT: Location = Location::new("Longhorn Casino", 36.1070664, -115.0591256);

pub const STRIP_BINS: &[Location] = &[
    Location::new("Wynn Las Vegas", 36.1263781, -115.1658180),
    Location::new("MGM Grand", 36.1023654, -115.1688720),
    Location::new("Bellagio", 36.1126, -115.1767),
    Location::new("Caesars Palace", 36.1162, -115.1745),
    Location::new("Hard Rock Cafe", 36.1041592, -115.1722166),
    Location::new("Brooklyn Bowl", 36.1175388, -115.1695094),
    Location::new("Gordon Ramsay BurGR", 36.1107195, -115.1720818),
    Location::new("Otto Pizzeria", 36.1231219, -115.1684514),
    Location::new("Il Fornaio", 36.1024474, -115.1740110),
    Location::new("Strip Steak", 36.0908722, -115.1776176),
];
