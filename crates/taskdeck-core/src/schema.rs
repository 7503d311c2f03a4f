//! Schema metadata types for dynamic form rendering.
//!
//! Mirrors the `/api/schema/*` responses. Consumed through the schema
//! cache in `taskdeck-store`.

use serde::{Deserialize, Serialize};

/// Field widget types the service can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Single-line text input
    Text,
    /// Multi-line text input
    Textarea,
    /// Selection from declared options
    Select,
    /// Display-only field
    Readonly,
    /// Date-time display
    Datetime,
}

/// One field definition within an entity schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaField {
    /// Field name
    pub name: String,
    /// Widget type
    #[serde(rename = "type")]
    pub kind: FieldType,
    /// Whether the field is required
    pub required: bool,
    /// Human-readable description
    pub description: String,
    /// Options for select fields
    #[serde(default)]
    pub options: Option<Vec<String>>,
}

/// Field definitions for one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySchema {
    /// Ordered field definitions
    pub fields: Vec<SchemaField>,
}

/// One enum value with display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumOption {
    /// Wire value
    pub value: String,
    /// Display label
    pub label: String,
    /// Icon name, if declared
    #[serde(default)]
    pub icon: Option<String>,
    /// Short prefix for compact IDs, if declared
    #[serde(default)]
    pub prefix: Option<String>,
}

/// Enum metadata from `/api/schema/enums`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaEnums {
    /// Task status values in column order
    pub task_status: Vec<EnumOption>,
    /// Task type values
    pub task_type: Vec<EnumOption>,
    /// Agent run status values
    pub agent_run_status: Vec<EnumOption>,
}

impl SchemaEnums {
    /// Display label for a task status value, falling back to the raw value.
    pub fn status_label<'a>(&'a self, value: &'a str) -> &'a str {
        self.task_status
            .iter()
            .find(|option| option.value == value)
            .map(|option| option.label.as_str())
            .unwrap_or(value)
    }

    /// Display label for a task type value, falling back to the raw value.
    pub fn type_label<'a>(&'a self, value: &'a str) -> &'a str {
        self.task_type
            .iter()
            .find(|option| option.value == value)
            .map(|option| option.label.as_str())
            .unwrap_or(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_label_lookup_falls_back_to_value() {
        let enums = SchemaEnums {
            task_status: vec![EnumOption {
                value: "todo".into(),
                label: "To Do".into(),
                icon: None,
                prefix: None,
            }],
            task_type: vec![],
            agent_run_status: vec![],
        };
        assert_eq!(enums.status_label("todo"), "To Do");
        assert_eq!(enums.status_label("done"), "done");
    }

    #[test]
    fn schema_field_parses_wire_shape() {
        let field: SchemaField = serde_json::from_str(
            r#"{"name":"status","type":"select","required":true,
               "description":"Kanban column","options":["todo","done"]}"#,
        )
        .unwrap();
        assert_eq!(field.kind, FieldType::Select);
        assert_eq!(field.options.unwrap().len(), 2);
    }
}
