//! FILENAME: core/accordion-engine/src/field_type.rs
//! PURPOSE: Decides whether a field looks date-valued.
//! CONTEXT: Only used to decide whether the date-format options are offered.
//! Runtime formatting never consults it; that is driven by the key itself.

use crate::definition::FieldDescriptor;

/// Handler plugin ids that always render dates.
const DATE_PLUGIN_IDS: [&str; 2] = ["datetime", "date"];

/// Substrings of a field id that suggest a date column.
const DATE_FIELD_ID_HINTS: [&str; 4] = ["date", "created", "changed", "timestamp"];

/// Storage types of date-valued entity fields.
const DATE_STORAGE_TYPES: [&str; 3] = ["datetime", "date", "timestamp"];

/// Returns true if the field is date-like by plugin, id or storage type.
pub fn is_date_field(descriptor: &FieldDescriptor) -> bool {
    is_date_plugin(&descriptor.plugin_id)
        || has_date_id_hint(&descriptor.id)
        || descriptor
            .storage_type
            .as_deref()
            .is_some_and(|storage| DATE_STORAGE_TYPES.contains(&storage))
}

/// Same as [`is_date_field`], but an unresolved field is never date-like.
pub fn is_date_field_opt(descriptor: Option<&FieldDescriptor>) -> bool {
    descriptor.is_some_and(is_date_field)
}

fn is_date_plugin(plugin_id: &str) -> bool {
    DATE_PLUGIN_IDS.contains(&plugin_id) || plugin_id.contains("date")
}

fn has_date_id_hint(field_id: &str) -> bool {
    DATE_FIELD_ID_HINTS.iter().any(|hint| field_id.contains(hint))
}
