//! Spatial Index Module
//!
//! R-tree over table bounding boxes, used for pointer hit testing and for
//! finding box-selection candidates without scanning every table.

use crate::geometry::{Point, Rect};
use rstar::{AABB, RTree, RTreeObject};
use std::collections::HashMap;

/// A table's bounding box in diagram space.
#[derive(Debug, Clone)]
pub struct SpatialEntry {
    pub table_id: String,
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl SpatialEntry {
    pub fn new(table_id: impl Into<String>, rect: Rect) -> Self {
        Self {
            table_id: table_id.into(),
            min_x: rect.x,
            min_y: rect.y,
            max_x: rect.right(),
            max_y: rect.bottom(),
        }
    }

    #[inline]
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners([self.min_x, self.min_y], [self.max_x, self.max_y])
    }
}

impl PartialEq for SpatialEntry {
    fn eq(&self, other: &Self) -> bool {
        self.table_id == other.table_id
    }
}

/// Spatial index for tables using an R-tree.
#[derive(Default)]
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
    entries: HashMap<String, SpatialEntry>,
}

impl std::fmt::Debug for SpatialIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpatialIndex")
            .field("len", &self.entries.len())
            .finish()
    }
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from `(id, bounds)` pairs.
    pub fn from_tables<I, S>(tables: I) -> Self
    where
        I: IntoIterator<Item = (S, Rect)>,
        S: Into<String>,
    {
        let mut index = Self::new();
        index.rebuild(tables);
        index
    }

    /// Insert or move a table.
    pub fn insert(&mut self, table_id: &str, rect: Rect) {
        if let Some(old_entry) = self.entries.remove(table_id) {
            self.tree.remove(&old_entry);
        }

        let entry = SpatialEntry::new(table_id, rect);
        self.tree.insert(entry.clone());
        self.entries.insert(table_id.to_string(), entry);
    }

    pub fn remove(&mut self, table_id: &str) -> bool {
        if let Some(entry) = self.entries.remove(table_id) {
            self.tree.remove(&entry);
            true
        } else {
            false
        }
    }

    /// Ids of all tables whose bounds contain the point.
    pub fn query_point(&self, p: Point) -> Vec<String> {
        let point_envelope = AABB::from_point([p.x, p.y]);

        self.tree
            .locate_in_envelope_intersecting(&point_envelope)
            .filter(|entry| entry.contains_point(p.x, p.y))
            .map(|entry| entry.table_id.clone())
            .collect()
    }

    /// Ids of all tables whose bounds lie within the rectangle (edges inclusive).
    pub fn query_contained(&self, rect: Rect) -> Vec<String> {
        let envelope = AABB::from_corners([rect.x, rect.y], [rect.right(), rect.bottom()]);

        self.tree
            .locate_in_envelope(&envelope)
            .map(|entry| entry.table_id.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn rebuild<I, S>(&mut self, tables: I)
    where
        I: IntoIterator<Item = (S, Rect)>,
        S: Into<String>,
    {
        let entries: Vec<SpatialEntry> = tables
            .into_iter()
            .map(|(id, rect)| SpatialEntry::new(id, rect))
            .collect();

        self.entries = entries
            .iter()
            .map(|e| (e.table_id.clone(), e.clone()))
            .collect();
        self.tree = RTree::bulk_load(entries);
    }

    pub fn clear(&mut self) {
        self.tree = RTree::new();
        self.entries.clear();
    }
}
