use serde::{Deserialize, Serialize};

use super::id_macro::impl_id;

/// Identifier of one encrypted history record.
///
/// Assigned by the engine at encryption time and never reused: every call
/// draws a fresh UUID v4.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(String);

impl_id!(RecordId);
