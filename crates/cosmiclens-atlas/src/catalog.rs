//! Built-in astronomy data used when the remote generator is unavailable.
//!
//! Two tables live here: a handful of hand-written detail records for the
//! most commonly searched objects, and the twenty-object seed catalog that
//! populates the scatter plot before any query is made.

use cosmiclens_core::{CelestialRecord, PlotPoint, PlotPosition};

/// A hand-written detail record.
#[derive(Debug, Clone, Copy)]
pub struct CuratedEntry {
    pub name: &'static str,
    pub category: &'static str,
    pub distance: &'static str,
    pub mass: &'static str,
    pub temperature: &'static str,
    pub summary: &'static str,
    pub highlight: &'static str,
    pub discovered: &'static str,
    pub x: f64,
    pub y: f64,
}

impl CuratedEntry {
    pub fn to_record(&self) -> CelestialRecord {
        CelestialRecord {
            name: self.name.to_string(),
            category: self.category.to_string(),
            distance_label: self.distance.to_string(),
            mass_label: self.mass.to_string(),
            temperature_label: self.temperature.to_string(),
            summary: self.summary.to_string(),
            highlight: self.highlight.to_string(),
            discovered_label: self.discovered.to_string(),
            plot_position: Some(PlotPosition::clamped(self.x, self.y)),
            is_simulated: true,
            color_hint: None,
        }
    }
}

pub const CURATED: &[CuratedEntry] = &[
    CuratedEntry {
        name: "Sagittarius A*",
        category: "Supermassive Black Hole",
        distance: "26,000 Light Years",
        mass: "4 Million Suns",
        temperature: "N/A (Accretion: 10M K)",
        summary: "The supermassive black hole at the Galactic Center of the Milky Way. It is a compact radio source and the anchor around which our entire galaxy rotates.",
        highlight: "Time passes significantly slower near its event horizon due to extreme gravitational time dilation.",
        discovered: "1974",
        x: 90.0,
        y: 90.0,
    },
    CuratedEntry {
        name: "Ton 618",
        category: "Hyperluminous Quasar",
        distance: "10.4 Billion Light Years",
        mass: "66 Billion Suns",
        temperature: "Trillions of Degrees",
        summary: "One of the most massive black holes ever found, powering a quasar that outshines entire galaxies combined. Its accretion disk is larger than our solar system.",
        highlight: "It is so bright that we can see it from over 10 billion light years away.",
        discovered: "1957",
        x: 95.0,
        y: 95.0,
    },
    CuratedEntry {
        name: "Betelgeuse",
        category: "Red Supergiant",
        distance: "642.5 Light Years",
        mass: "11-19 Suns",
        temperature: "3,500 K",
        summary: "A colossal red supergiant in the constellation Orion. It is nearing the end of its life and is expected to explode as a supernova within the next 100,000 years.",
        highlight: "If placed in our solar system, its surface would extend beyond the orbit of Jupiter.",
        discovered: "Prehistoric",
        x: 20.0,
        y: 80.0,
    },
    CuratedEntry {
        name: "Pillars of Creation",
        category: "Nebula Region",
        distance: "7,000 Light Years",
        mass: "200 Suns (Gas)",
        temperature: "10,000 K",
        summary: "Elephant trunks of interstellar gas and dust in the Eagle Nebula. They are forming new stars while being eroded by the light of nearby massive stars.",
        highlight: "They may already have been destroyed by a supernova whose light has not reached Earth yet.",
        discovered: "1995 (Hubble)",
        x: 60.0,
        y: 50.0,
    },
    CuratedEntry {
        name: "Kepler-22b",
        category: "Exoplanet (Super-Earth)",
        distance: "600 Light Years",
        mass: "Unknown (~2.4 Earth Radii)",
        temperature: "262 K (-11°C)",
        summary: "The first transiting exoplanet found orbiting within the habitable zone of a sun-like star. It might be an ocean world covered entirely by water.",
        highlight: "A year on Kepler-22b lasts about 290 days, close to an Earth year.",
        discovered: "2011",
        x: 45.0,
        y: 50.0,
    },
];

/// One object of the local seed set.
#[derive(Debug, Clone, Copy)]
pub struct SeedEntry {
    pub name: &'static str,
    pub category: &'static str,
    pub x: f64,
    pub y: f64,
    pub weight: f64,
    pub color: &'static str,
}

impl SeedEntry {
    pub fn to_point(&self) -> PlotPoint {
        PlotPoint::new(self.name, self.category, self.x, self.y, self.weight, self.color)
    }
}

pub const SEED_CATALOG: &[SeedEntry] = &[
    SeedEntry { name: "Betelgeuse", category: "Red Supergiant", x: 20.0, y: 80.0, weight: 40.0, color: "#ff4500" },
    SeedEntry { name: "Sirius B", category: "White Dwarf", x: 10.0, y: 20.0, weight: 15.0, color: "#ffffff" },
    SeedEntry { name: "Sagittarius A*", category: "Supermassive Black Hole", x: 90.0, y: 90.0, weight: 50.0, color: "#bc13fe" },
    SeedEntry { name: "Pillars of Creation", category: "Nebula", x: 60.0, y: 50.0, weight: 45.0, color: "#00f3ff" },
    SeedEntry { name: "Crab Pulsar", category: "Pulsar", x: 75.0, y: 65.0, weight: 20.0, color: "#00ff9d" },
    SeedEntry { name: "Andromeda", category: "Galaxy", x: 85.0, y: 30.0, weight: 60.0, color: "#d8b4fe" },
    SeedEntry { name: "Kepler-186f", category: "Exoplanet", x: 40.0, y: 45.0, weight: 18.0, color: "#34d399" },
    SeedEntry { name: "Ton 618", category: "Quasar", x: 95.0, y: 95.0, weight: 55.0, color: "#fbbf24" },
    SeedEntry { name: "Horsehead Nebula", category: "Nebula", x: 55.0, y: 60.0, weight: 42.0, color: "#f472b6" },
    SeedEntry { name: "Proxima Centauri", category: "Red Dwarf", x: 5.0, y: 10.0, weight: 12.0, color: "#ef4444" },
    SeedEntry { name: "TRAPPIST-1e", category: "Exoplanet", x: 35.0, y: 55.0, weight: 16.0, color: "#60a5fa" },
    SeedEntry { name: "Whirlpool Galaxy", category: "Galaxy", x: 80.0, y: 25.0, weight: 58.0, color: "#818cf8" },
    SeedEntry { name: "Cygnus X-1", category: "Black Hole", x: 70.0, y: 85.0, weight: 35.0, color: "#a855f7" },
    SeedEntry { name: "Vela Pulsar", category: "Pulsar", x: 65.0, y: 70.0, weight: 18.0, color: "#22d3ee" },
    SeedEntry { name: "Oort Cloud", category: "Cometary Cloud", x: 15.0, y: 5.0, weight: 50.0, color: "#94a3b8" },
    SeedEntry { name: "Alpha Centauri A", category: "Star", x: 8.0, y: 82.0, weight: 25.0, color: "#fdb813" },
    SeedEntry { name: "Ring Nebula", category: "Nebula", x: 62.0, y: 45.0, weight: 38.0, color: "#2e8b57" },
    SeedEntry { name: "Kepler-22b", category: "Exoplanet", x: 45.0, y: 50.0, weight: 22.0, color: "#20b2aa" },
    SeedEntry { name: "UY Scuti", category: "Hypergiant", x: 30.0, y: 95.0, weight: 58.0, color: "#ff6347" },
    SeedEntry { name: "Halley's Comet", category: "Comet", x: 12.0, y: 5.0, weight: 10.0, color: "#a9a9a9" },
];

/// The local seed set as plot points, in catalog order.
pub fn seed_points() -> Vec<PlotPoint> {
    SEED_CATALOG.iter().map(SeedEntry::to_point).collect()
}

pub fn curated_exact(query: &str) -> Option<&'static CuratedEntry> {
    CURATED.iter().find(|e| e.name == query)
}

/// Curated entry whose name contains the query, ignoring case. Empty queries never match.
pub fn curated_partial(query: &str) -> Option<&'static CuratedEntry> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return None;
    }
    CURATED.iter().find(|e| e.name.to_lowercase().contains(&q))
}

/// Seed entry whose name contains the query, ignoring case.
pub fn seed_partial(query: &str) -> Option<&'static SeedEntry> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return None;
    }
    SEED_CATALOG.iter().find(|e| e.name.to_lowercase().contains(&q))
}
