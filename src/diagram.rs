//! Diagram model store: tables and relationships for one editor session.
//!
//! All mutations go through this store so the spatial index used for hit
//! testing never drifts from the table list. Relationship geometry is not
//! stored; [`DiagramStore::relationship_paths`] derives it on demand.

use crate::constants::{
    DEFAULT_TABLE_WIDTH, LINK_HANDLE_HIT_RADIUS, TABLE_FIELD_HEIGHT, TABLE_HEADER_HEIGHT,
};
use crate::geometry::{Point, Rect};
use crate::path::{PathGeometry, RelationshipPath, calc_path};
use crate::spatial_index::SpatialIndex;
use crate::types::{Field, FieldRef, Relationship, Table};
use std::collections::HashSet;
use tracing::debug;
use uuid::Uuid;

pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// What lies under a diagram-space point.
#[derive(Clone, Debug, PartialEq)]
pub struct HitTarget {
    pub table_id: String,
    pub field: Option<FieldHit>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldHit {
    pub field_id: String,
    pub index: usize,
    /// The point is on the field's link connector
    pub on_connector: bool,
}

#[derive(Debug, Default)]
pub struct DiagramStore {
    tables: Vec<Table>,
    relationships: Vec<Relationship>,
    index: SpatialIndex,
}

impl DiagramStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tables(tables: Vec<Table>) -> Self {
        let mut store = Self::new();
        store.set_tables(tables);
        store
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    pub fn table(&self, id: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == id)
    }

    pub fn relationship(&self, id: &str) -> Option<&Relationship> {
        self.relationships.iter().find(|r| r.id == id)
    }

    /// Look up both the table and the field a reference points at.
    pub fn resolve(&self, field_ref: &FieldRef) -> Option<(&Table, &Field)> {
        let table = self.table(&field_ref.table_id)?;
        let field = table.field(&field_ref.field_id)?;
        Some((table, field))
    }

    // ------------------------------------------------------------------------
    // Table mutations
    // ------------------------------------------------------------------------

    /// Replace every table. Relationships are left untouched.
    pub fn set_tables(&mut self, tables: Vec<Table>) {
        self.tables = tables;
        self.reindex();
    }

    /// Move a table. Returns false if the id is unknown.
    pub fn update_table_position(&mut self, id: &str, position: Point) -> bool {
        let Some(table) = self.tables.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        table.x = position.x;
        table.y = position.y;
        let rect = table.rect();
        self.index.insert(id, rect);
        true
    }

    /// Apply an arbitrary edit to a table, keeping the index in sync.
    pub fn update_table(&mut self, id: &str, edit: impl FnOnce(&mut Table)) -> bool {
        let Some(table) = self.tables.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        edit(table);
        // The edit may have renamed the table
        let (new_id, rect) = (table.id.clone(), table.rect());
        if new_id != id {
            self.index.remove(id);
        }
        self.index.insert(&new_id, rect);
        true
    }

    /// Create a default table at `position` and return its id.
    ///
    /// The table gets a fresh id, the name `table_<n>` and a single
    /// `id INTEGER` identity field.
    pub fn add_table(&mut self, position: Point) -> String {
        let id = new_id();
        let name = format!("table_{}", self.tables.len() + 1);
        let table = Table::new(&id, name, position).with_field(Field::identity(new_id()));
        debug!(table_id = %id, x = position.x, y = position.y, "table added");
        self.insert_table(table, None);
        id
    }

    /// Insert a fully specified table, at `index` when restoring a saved
    /// ordering (clamped to the list length) or at the end otherwise.
    pub fn insert_table(&mut self, table: Table, index: Option<usize>) {
        let rect = table.rect();
        let id = table.id.clone();
        match index {
            Some(i) => {
                let i = i.min(self.tables.len());
                self.tables.insert(i, table);
            }
            None => self.tables.push(table),
        }
        self.index.insert(&id, rect);
    }

    /// Remove a table and every relationship touching it.
    pub fn remove_table(&mut self, id: &str) -> Option<Table> {
        let pos = self.tables.iter().position(|t| t.id == id)?;
        let table = self.tables.remove(pos);
        self.index.remove(id);
        self.relationships.retain(|r| !r.touches_table(id));
        Some(table)
    }

    // ------------------------------------------------------------------------
    // Relationship mutations
    // ------------------------------------------------------------------------

    pub fn add_relationship(&mut self, relationship: Relationship) {
        debug!(
            relationship_id = %relationship.id,
            name = %relationship.name,
            "relationship added"
        );
        self.relationships.push(relationship);
    }

    pub fn remove_relationship(&mut self, id: &str) -> Option<Relationship> {
        let pos = self.relationships.iter().position(|r| r.id == id)?;
        Some(self.relationships.remove(pos))
    }

    // ------------------------------------------------------------------------
    // Derived geometry
    // ------------------------------------------------------------------------

    /// Routing inputs for a relationship, if both ends still resolve.
    pub fn path_geometry(&self, relationship: &Relationship) -> Option<PathGeometry> {
        let start_table = self.table(&relationship.start_table_id)?;
        let end_table = self.table(&relationship.end_table_id)?;
        Some(PathGeometry {
            start_table: start_table.position(),
            end_table: end_table.position(),
            start_field_index: start_table.field_index(&relationship.start_field_id)?,
            end_field_index: end_table.field_index(&relationship.end_field_id)?,
        })
    }

    /// Current path of every relationship whose ends resolve.
    pub fn relationship_paths(&self, zoom: f64) -> Vec<(String, RelationshipPath)> {
        self.relationships
            .iter()
            .filter_map(|r| {
                let geometry = self.path_geometry(r)?;
                Some((r.id.clone(), calc_path(&geometry, DEFAULT_TABLE_WIDTH, zoom)))
            })
            .collect()
    }

    /// Topmost table (last drawn) under the point, with the field row hit.
    ///
    /// The connector hit radius is fixed in screen space, so it grows in
    /// diagram units as `zoom` shrinks.
    pub fn hit_test(&self, p: Point, zoom: f64) -> Option<HitTarget> {
        let candidates: HashSet<String> = self.index.query_point(p).into_iter().collect();
        if candidates.is_empty() {
            return None;
        }
        let table = self
            .tables
            .iter()
            .rev()
            .find(|t| candidates.contains(&t.id) && t.rect().contains_point(p))?;

        let zoom = if zoom.is_finite() && zoom > 0.0 { zoom } else { 1.0 };
        Some(HitTarget {
            table_id: table.id.clone(),
            field: field_at(table, p, LINK_HANDLE_HIT_RADIUS / zoom),
        })
    }

    /// Tables whose full bounds lie strictly inside `rect`, in list order.
    pub fn tables_inside(&self, rect: Rect) -> Vec<&Table> {
        let candidates: HashSet<String> = self.index.query_contained(rect).into_iter().collect();
        self.tables
            .iter()
            .filter(|t| candidates.contains(&t.id) && t.rect().is_strictly_inside(&rect))
            .collect()
    }

    fn reindex(&mut self) {
        self.index
            .rebuild(self.tables.iter().map(|t| (t.id.clone(), t.rect())));
    }
}

fn field_at(table: &Table, p: Point, handle_radius: f64) -> Option<FieldHit> {
    let local_y = p.y - table.y - TABLE_HEADER_HEIGHT;
    if local_y < 0.0 {
        return None;
    }
    let index = (local_y / TABLE_FIELD_HEIGHT).floor() as usize;
    let field = table.fields.get(index)?;
    let anchor = table.connector_anchor(index);
    let on_connector = (p.x - anchor.x).hypot(p.y - anchor.y) <= handle_radius;
    Some(FieldHit {
        field_id: field.id.clone(),
        index,
        on_connector,
    })
}
