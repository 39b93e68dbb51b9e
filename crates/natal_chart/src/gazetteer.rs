//! Built-in city list for requests that name a place instead of coordinates.

use lazy_static::lazy_static;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct City {
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
}

pub const CITIES: [City; 15] = [
    City { name: "New York, USA", lat: 40.7128, lon: -74.006 },
    City { name: "London, UK", lat: 51.5074, lon: -0.1278 },
    City { name: "Paris, France", lat: 48.8566, lon: 2.3522 },
    City { name: "Tokyo, Japan", lat: 35.6762, lon: 139.6503 },
    City { name: "Sydney, Australia", lat: -33.8688, lon: 151.2093 },
    City { name: "Kharkiv, Ukraine", lat: 49.9935, lon: 36.2304 },
    City { name: "Kyiv, Ukraine", lat: 50.4501, lon: 30.5234 },
    City { name: "Odessa, Ukraine", lat: 46.4825, lon: 30.7233 },
    City { name: "Moscow, Russia", lat: 55.7558, lon: 37.6176 },
    City { name: "Beijing, China", lat: 39.9042, lon: 116.4074 },
    City { name: "Delhi, India", lat: 28.7041, lon: 77.1025 },
    City { name: "Rio de Janeiro, Brazil", lat: -22.9068, lon: -43.1729 },
    City { name: "Cape Town, South Africa", lat: -33.9249, lon: 18.4241 },
    City { name: "Toronto, Canada", lat: 43.6532, lon: -79.3832 },
    City { name: "Mexico City, Mexico", lat: 19.4326, lon: -99.1332 },
];

lazy_static! {
    // Keyed by lowercased full name and by the part before the comma.
    static ref CITY_INDEX: HashMap<String, &'static City> = {
        let mut index = HashMap::new();
        for city in CITIES.iter() {
            index.insert(city.name.to_lowercase(), city);
            if let Some((short, _)) = city.name.split_once(',') {
                index.insert(short.trim().to_lowercase(), city);
            }
        }
        index
    };
}

/// Case-insensitive lookup by "Kharkiv, Ukraine" or just "Kharkiv".
pub fn find_city(name: &str) -> Option<&'static City> {
    CITY_INDEX.get(&name.trim().to_lowercase()).copied()
}

pub fn cities() -> &'static [City] {
    &CITIES
}
