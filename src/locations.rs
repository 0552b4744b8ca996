// 📍 Location Registry - whitelist of places a review may be filed against
//
// Loaded once at startup, read-only afterwards. Membership is exact string
// equality: no trimming, no case folding.

use std::collections::HashSet;

/// Locations accepted out of the box
pub const DEFAULT_LOCATIONS: &[&str] = &[
    "Albuquerque, New Mexico",
    "Carlsbad, California",
    "Chula Vista, California",
    "Colorado Springs, Colorado",
    "Denver, Colorado",
    "El Cajon, California",
    "El Paso, Texas",
    "Escondido, California",
    "Fresno, California",
    "La Mesa, California",
    "Las Vegas, Nevada",
    "Los Angeles, California",
    "Oceanside, California",
    "Phoenix, Arizona",
    "Sacramento, California",
    "Salt Lake City, Utah",
    "San Diego, California",
    "Tucson, Arizona",
];

#[derive(Debug, Clone)]
pub struct LocationRegistry {
    locations: HashSet<String>,
}

impl LocationRegistry {
    /// Registry seeded with [`DEFAULT_LOCATIONS`]
    pub fn new() -> Self {
        Self::from_list(DEFAULT_LOCATIONS.iter().copied())
    }

    /// Build from any list; duplicates collapse
    pub fn from_list<I, S>(locations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        LocationRegistry {
            locations: locations.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_valid(&self, location: &str) -> bool {
        self.locations.contains(location)
    }

    pub fn count(&self) -> usize {
        self.locations.len()
    }
}

impl Default for LocationRegistry {
    fn default() -> Self {
        Self::new()
    }
}
