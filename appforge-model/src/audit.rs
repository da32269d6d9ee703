use appforge_types::cast::Apply;
use appforge_types::ResourceId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Audit block shared by every entity: owning/creating actors and
/// lifecycle timestamps.
///
/// Timestamps are `None` until the corresponding lifecycle event happens;
/// actor IDs keep the unset sentinel until persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Audit {
    pub owned_by: ResourceId,
    pub created_by: ResourceId,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Audit {
    /// Overlays audit attributes defined in `raw`, leaving the rest as-is.
    pub fn apply(&mut self, raw: &Value) {
        let a = Apply::new(raw);

        a.id(&mut self.owned_by, "ownedBy");
        a.id(&mut self.created_by, "createdBy");
        a.date(&mut self.created_at, "createdAt");
        a.date(&mut self.updated_at, "updatedAt");
        a.date(&mut self.deleted_at, "deletedAt");
    }

    /// True once a deletion timestamp has been recorded.
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}
