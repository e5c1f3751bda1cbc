//! Selection state: one primary element plus the bulk set used for group
//! drags and box selection.

use crate::geometry::Point;
use crate::types::ObjectType;
use serde::{Deserialize, Serialize};

/// Identity of a selectable element.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementRef {
    pub id: String,
    pub kind: ObjectType,
}

impl ElementRef {
    pub fn new(id: impl Into<String>, kind: ObjectType) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    pub fn table(id: impl Into<String>) -> Self {
        Self::new(id, ObjectType::Table)
    }

    /// Nothing selected.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_none(&self) -> bool {
        self.kind == ObjectType::None || self.id.is_empty()
    }
}

/// A member of the bulk selection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkElement {
    pub id: String,
    pub kind: ObjectType,
    /// Live position, updated on every drag move
    pub current_coords: Point,
    /// Position when the current drag began
    pub initial_coords: Point,
}

impl BulkElement {
    pub fn new(element: ElementRef, position: Point) -> Self {
        Self {
            id: element.id,
            kind: element.kind,
            current_coords: position,
            initial_coords: position,
        }
    }

    pub fn element(&self) -> ElementRef {
        ElementRef::new(&self.id, self.kind)
    }

    /// Same element iff id and kind both match.
    #[inline]
    pub fn is(&self, other: &ElementRef) -> bool {
        self.id == other.id && self.kind == other.kind
    }

    pub fn has_moved(&self) -> bool {
        self.current_coords != self.initial_coords
    }
}

#[derive(Debug, Default)]
pub struct SelectionStore {
    selected: ElementRef,
    bulk: Vec<BulkElement>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> &ElementRef {
        &self.selected
    }

    pub fn set_selected(&mut self, element: ElementRef) {
        self.selected = element;
    }

    pub fn clear_selected(&mut self) {
        self.selected = ElementRef::none();
    }

    pub fn bulk(&self) -> &[BulkElement] {
        &self.bulk
    }

    pub fn bulk_mut(&mut self) -> &mut [BulkElement] {
        &mut self.bulk
    }

    pub fn set_bulk(&mut self, bulk: Vec<BulkElement>) {
        self.bulk = bulk;
    }

    pub fn contains(&self, element: &ElementRef) -> bool {
        self.bulk.iter().any(|el| el.is(element))
    }

    pub fn find(&self, element: &ElementRef) -> Option<&BulkElement> {
        self.bulk.iter().find(|el| el.is(element))
    }

    pub fn push(&mut self, element: BulkElement) {
        self.bulk.push(element);
    }

    pub fn remove(&mut self, element: &ElementRef) {
        self.bulk.retain(|el| !el.is(element));
    }

    /// Append elements not already in the bulk set.
    pub fn extend_unique<I: IntoIterator<Item = BulkElement>>(&mut self, elements: I) {
        for element in elements {
            if !self.contains(&element.element()) {
                self.bulk.push(element);
            }
        }
    }

    /// Drop both the primary and the bulk selection.
    pub fn clear(&mut self) {
        self.clear_selected();
        self.bulk.clear();
    }

    /// Make the live positions the baseline for the next drag.
    pub fn commit_positions(&mut self) {
        for el in &mut self.bulk {
            el.initial_coords = el.current_coords;
        }
    }
}
