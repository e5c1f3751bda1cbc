//! Core types for the diagram model.
//!
//! This module defines the entities the interaction core reads and writes:
//! tables, their fields, the relationships between fields, and the
//! discriminant used to tell selectable element kinds apart.

use crate::constants::{DEFAULT_TABLE_COLOR, DEFAULT_TABLE_WIDTH, LINK_HANDLE_INSET};
use crate::geometry::{Point, Rect, table_height};
use crate::path::field_anchor_y;
use serde::{Deserialize, Serialize};

// ============================================================================
// Element Kinds
// ============================================================================

/// Kind of a selectable element.
///
/// Selection entries compare equal only when both id and kind match, so a
/// table and a note sharing an id are distinct elements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectType {
    #[default]
    None,
    Table,
    Area,
    Note,
    Relationship,
    Type,
}

// ============================================================================
// Tables & Fields
// ============================================================================

/// A column inside a table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: String,
    pub name: String,
    /// Key into the type registry (see [`crate::data_types`])
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub default: String,
    #[serde(default)]
    pub check: String,
    #[serde(default)]
    pub primary: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub not_null: bool,
    #[serde(default, rename = "increment")]
    pub auto_increment: bool,
    #[serde(default)]
    pub comment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,
    /// Allowed members for ENUM and SET columns
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

impl Field {
    /// Create a plain field with no flags set.
    pub fn new(id: impl Into<String>, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            type_name: type_name.into(),
            default: String::new(),
            check: String::new(),
            primary: false,
            unique: false,
            not_null: false,
            auto_increment: false,
            comment: String::new(),
            size: None,
            precision: None,
            values: Vec::new(),
        }
    }

    /// The identity column every new table starts with.
    pub fn identity(id: impl Into<String>) -> Self {
        Self {
            primary: true,
            unique: true,
            not_null: true,
            auto_increment: true,
            ..Self::new(id, "id", "INTEGER")
        }
    }

    /// Unique or primary. Drives cardinality inference when linking.
    #[inline]
    pub fn is_unique_like(&self) -> bool {
        self.unique || self.primary
    }
}

/// A table node on the canvas.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub id: String,
    pub name: String,
    /// Top-left corner in diagram space
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub locked: bool,
    #[serde(default = "default_table_color")]
    pub color: String,
    #[serde(default)]
    pub fields: Vec<Field>,
}

fn default_table_color() -> String {
    DEFAULT_TABLE_COLOR.to_string()
}

impl Table {
    /// Create an unlocked table with no fields.
    pub fn new(id: impl Into<String>, name: impl Into<String>, position: Point) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            x: position.x,
            y: position.y,
            locked: false,
            color: default_table_color(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    #[inline]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn height(&self) -> f64 {
        table_height(self.fields.len())
    }

    /// Bounding rectangle in diagram space.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, DEFAULT_TABLE_WIDTH, self.height())
    }

    pub fn field(&self, field_id: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == field_id)
    }

    pub fn field_index(&self, field_id: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.id == field_id)
    }

    /// Where a link drawn from this field starts: the connector dot on the
    /// left of the field row.
    pub fn connector_anchor(&self, index: usize) -> Point {
        Point::new(self.x + LINK_HANDLE_INSET, field_anchor_y(self.y, index))
    }
}

// ============================================================================
// Relationships
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    OneToOne,
    OneToMany,
    ManyToOne,
}

impl Cardinality {
    /// Infer cardinality from the uniqueness of both ends.
    ///
    /// Two non-unique ends fall back to one-to-one.
    pub fn infer(start: &Field, end: &Field) -> Self {
        match (start.is_unique_like(), end.is_unique_like()) {
            (true, true) => Self::OneToOne,
            (true, false) => Self::OneToMany,
            (false, true) => Self::ManyToOne,
            (false, false) => Self::OneToOne,
        }
    }
}

/// Referential action applied on update/delete.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Constraint {
    #[default]
    #[serde(rename = "No action")]
    None,
    #[serde(rename = "Restrict")]
    Restrict,
    #[serde(rename = "Cascade")]
    Cascade,
    #[serde(rename = "Set null")]
    SetNull,
    #[serde(rename = "Set default")]
    SetDefault,
}

/// A (table, field) pair identifying one end of a relationship.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRef {
    pub table_id: String,
    pub field_id: String,
}

impl FieldRef {
    pub fn new(table_id: impl Into<String>, field_id: impl Into<String>) -> Self {
        Self {
            table_id: table_id.into(),
            field_id: field_id.into(),
        }
    }
}

/// A foreign-key style link between two fields.
///
/// Holds no geometry: its path is recomputed from the current table
/// positions every time it is drawn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub id: String,
    pub start_table_id: String,
    pub start_field_id: String,
    pub end_table_id: String,
    pub end_field_id: String,
    pub cardinality: Cardinality,
    pub update_constraint: Constraint,
    pub delete_constraint: Constraint,
    pub name: String,
}

impl Relationship {
    pub fn start(&self) -> FieldRef {
        FieldRef::new(&self.start_table_id, &self.start_field_id)
    }

    pub fn end(&self) -> FieldRef {
        FieldRef::new(&self.end_table_id, &self.end_field_id)
    }

    /// True if either end lives in the given table.
    pub fn touches_table(&self, table_id: &str) -> bool {
        self.start_table_id == table_id || self.end_table_id == table_id
    }

    /// Display name derived from the participating table and field names.
    pub fn derive_name(start_table: &Table, start_field: &Field, end_table: &Table) -> String {
        format!("fk_{}_{}_{}", start_table.name, start_field.name, end_table.name)
    }
}
