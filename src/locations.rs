// src/locations.rs
//! # Location Table
//! Canonical Punjab logistics nodes (hubs, mandis, villages, cities, roads) with
//! coordinates. Read-only and initialized once; the classifier only hands out names,
//! this module turns a name into a map target.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationKind {
    Hub,
    Mandi,
    Village,
    City,
    Road,
}

/// `[lat, lng]` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for GeoPoint {
    fn from(v: [f64; 2]) -> Self {
        Self::new(v[0], v[1])
    }
}

impl From<GeoPoint> for [f64; 2] {
    fn from(p: GeoPoint) -> Self {
        [p.lat, p.lng]
    }
}

/// Map target for `Unknown` or unmapped locations (Ludhiana Transport Nagar).
pub const DEFAULT_COORDINATE: GeoPoint = GeoPoint::new(30.9010, 75.8573);

#[derive(Debug, Clone, Serialize)]
pub struct Location {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: LocationKind,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

const fn loc(name: &'static str, kind: LocationKind, lat: f64, lng: f64) -> Location {
    Location {
        name,
        kind,
        lat,
        lng,
    }
}

use LocationKind::*;

/// Seeded nodes, grouped by kind.
pub static LOCATIONS: &[Location] = &[
    loc("Ludhiana Transport Nagar", Hub, 30.9010, 75.8573),
    loc("Jalandhar Bypass", Hub, 30.9450, 75.8300),
    loc("Rajpura Toll", Hub, 30.4840, 76.5940),
    loc("Amritsar Gate", Hub, 31.6340, 74.8723),
    loc("Bathinda Refinery", Hub, 30.2110, 74.9455),
    loc("Khanna Mandi", Mandi, 30.7070, 76.2170),
    loc("Sahnewal Mandi", Mandi, 30.8500, 75.9700),
    loc("Jagraon Mandi", Mandi, 30.7860, 75.4750),
    loc("Moga Grain Market", Mandi, 30.8230, 75.1730),
    loc("Sirhind Mandi", Mandi, 30.6300, 76.3900),
    loc("Raikot", Village, 30.6500, 75.6000),
    loc("Doraha", Village, 30.8000, 76.0300),
    loc("Machhiwara", Village, 30.9100, 76.2000),
    loc("Samrala", Village, 30.8400, 76.1900),
    loc("Phillaur", Village, 31.0200, 75.7800),
    loc("Nakodar", Village, 31.1300, 75.4700),
    loc("Malerkotla", Village, 30.5200, 75.8900),
    loc("Phagwara", City, 31.2240, 75.7708),
    loc("Hoshiarpur", City, 31.5143, 75.9115),
    loc("Ferozepur", City, 30.9237, 74.6100),
    loc("Patiala", City, 30.3398, 76.3869),
    loc("NH-44", Road, 30.9500, 75.9000),
    loc("GT Road", Road, 30.8800, 76.1000),
    loc("Ferozepur Road", Road, 30.8900, 75.8000),
    loc("Canal Road", Road, 30.8700, 75.8300),
    loc("Link Road #5", Road, 30.9200, 75.8800),
];

static BY_NAME: Lazy<HashMap<&'static str, &'static Location>> =
    Lazy::new(|| LOCATIONS.iter().map(|l| (l.name, l)).collect());

/// Exact-name lookup.
pub fn find(name: &str) -> Option<&'static Location> {
    BY_NAME.get(name).copied()
}

/// Resolve a canonical name to a map target; unknown names fall back to `default`.
pub fn resolve_or(name: &str, default: GeoPoint) -> GeoPoint {
    find(name).map(Location::point).unwrap_or(default)
}

/// Resolve with the built-in `DEFAULT_COORDINATE`.
pub fn resolve(name: &str) -> GeoPoint {
    resolve_or(name, DEFAULT_COORDINATE)
}

/// All nodes of one kind, in table order.
pub fn of_kind(kind: LocationKind) -> impl Iterator<Item = &'static Location> {
    LOCATIONS.iter().filter(move |l| l.kind == kind)
}
