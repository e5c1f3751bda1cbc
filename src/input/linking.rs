//! Link gesture: drag from one field's connector to another field to
//! create a relationship.

use crate::diagram::new_id;
use crate::editor::Editor;
use crate::input::{HoverTarget, InteractionState};
use crate::pointer::CursorStyle;
use crate::types::{Cardinality, Constraint, Field, FieldRef, Relationship, Table};
use thiserror::Error;
use tracing::debug;

/// Why a finished link gesture created nothing. Never shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    #[error("no field under the pointer")]
    NoHoverTarget,

    #[error("field {0:?} cannot link to itself")]
    SelfLink(FieldRef),

    /// The table was removed while the gesture was in progress
    #[error("table {0} no longer exists")]
    StaleTable(String),

    #[error("field {field_id} no longer exists in table {table_id}")]
    StaleField { table_id: String, field_id: String },
}

impl Editor {
    /// Enter Linking from the connector of `field_id`. Returns false if the
    /// field does not resolve.
    pub fn begin_link(&mut self, table_id: &str, field_id: &str) -> bool {
        let Some(table) = self.diagram.table(table_id) else {
            return false;
        };
        let Some(index) = table.field_index(field_id) else {
            return false;
        };
        let anchor = table.connector_anchor(index);

        self.input_state = InteractionState::Linking {
            start: FieldRef::new(table_id, field_id),
            start_point: anchor,
            end_point: anchor,
        };
        self.hover = None;
        self.pointer.set_style(CursorStyle::Crosshair);
        debug!(table_id, field_id, "Linking started");
        true
    }

    /// Report what the pointer is over. Hosts rendering their own field rows
    /// call this from row hover events.
    pub fn set_hover_target(&mut self, table_id: &str, field_id: &str) {
        self.hover = Some(HoverTarget::new(table_id, field_id));
    }

    pub fn clear_hover_target(&mut self) {
        self.hover = None;
    }

    /// Create the relationship from `start` to the hovered field and return
    /// its id.
    pub fn finalize_link(&mut self, start: &FieldRef) -> Result<String, LinkError> {
        let end = self
            .hover
            .as_ref()
            .filter(|h| h.is_complete())
            .map(HoverTarget::field_ref)
            .ok_or(LinkError::NoHoverTarget)?;

        if *start == end {
            return Err(LinkError::SelfLink(end));
        }

        let (start_table, start_field) = self.resolve_end(start)?;
        let (end_table, end_field) = self.resolve_end(&end)?;

        let relationship = Relationship {
            id: new_id(),
            start_table_id: start.table_id.clone(),
            start_field_id: start.field_id.clone(),
            end_table_id: end.table_id.clone(),
            end_field_id: end.field_id.clone(),
            cardinality: Cardinality::infer(start_field, end_field),
            update_constraint: Constraint::None,
            delete_constraint: Constraint::None,
            name: Relationship::derive_name(start_table, start_field, end_table),
        };
        let id = relationship.id.clone();
        self.diagram.add_relationship(relationship);
        Ok(id)
    }

    fn resolve_end(&self, field_ref: &FieldRef) -> Result<(&Table, &Field), LinkError> {
        let table = self
            .diagram
            .table(&field_ref.table_id)
            .ok_or_else(|| LinkError::StaleTable(field_ref.table_id.clone()))?;
        let field = table.field(&field_ref.field_id).ok_or_else(|| LinkError::StaleField {
            table_id: field_ref.table_id.clone(),
            field_id: field_ref.field_id.clone(),
        })?;
        Ok((table, field))
    }
}
