//! Graph accumulator: the growing, name-deduplicated point set behind the
//! scatter plot. Insertion order is kept and nothing is ever evicted.

use cosmiclens_core::{CelestialRecord, PlotPoint};
use std::collections::HashMap;

/// Weight given to points created from a resolved record.
pub const RECORD_POINT_WEIGHT: f64 = 30.0;

const PULSAR_COLOR: &str = "#00ff9d";
const DEFAULT_COLOR: &str = "#00f3ff";

/// Lifecycle of the point set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointSetPhase {
    Empty,
    Seeded,
    /// Seeded (or not) and then grown by this many record insertions.
    Growing(usize),
}

#[derive(Debug, Default)]
pub struct Accumulator {
    points: Vec<PlotPoint>,
    index: HashMap<String, usize>,
    seeded: bool,
    added: usize,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the set wholesale. Later duplicates within `initial` are dropped.
    pub fn seed(&mut self, initial: Vec<PlotPoint>) {
        self.points.clear();
        self.index.clear();
        self.added = 0;
        self.seeded = true;
        for point in initial {
            self.insert(point);
        }
    }

    /// Add the point for a record. Returns `None` when the record has no
    /// position, otherwise the stored point: the new one, or the existing one
    /// with the same name.
    pub fn add_from_record(&mut self, record: &CelestialRecord) -> Option<PlotPoint> {
        let point = point_from_record(record)?;
        if let Some(&i) = self.index.get(&point.name) {
            return Some(self.points[i].clone());
        }
        self.added += 1;
        self.insert(point.clone());
        Some(point)
    }

    pub fn points(&self) -> &[PlotPoint] {
        &self.points
    }

    pub fn get(&self, name: &str) -> Option<&PlotPoint> {
        self.index.get(name).map(|&i| &self.points[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn phase(&self) -> PointSetPhase {
        match (self.seeded, self.added) {
            (_, n) if n > 0 => PointSetPhase::Growing(n),
            (true, _) => PointSetPhase::Seeded,
            (false, _) => PointSetPhase::Empty,
        }
    }

    fn insert(&mut self, point: PlotPoint) {
        if self.index.contains_key(&point.name) {
            return;
        }
        self.index.insert(point.name.clone(), self.points.len());
        self.points.push(point);
    }
}

/// Reduce a record to its plot point. `None` without a position.
pub fn point_from_record(record: &CelestialRecord) -> Option<PlotPoint> {
    let position = record.plot_position?;
    let color = record.color_hint.clone().unwrap_or_else(|| {
        if record.category.to_lowercase().contains("pulsar") {
            PULSAR_COLOR.to_string()
        } else {
            DEFAULT_COLOR.to_string()
        }
    });
    let mut point = PlotPoint::new(
        record.name.clone(),
        record.category.clone(),
        position.x,
        position.y,
        RECORD_POINT_WEIGHT,
        color,
    );
    point.summary = Some(record.summary.clone());
    point.distance_label = Some(record.distance_label.clone());
    Some(point)
}
