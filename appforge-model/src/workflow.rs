use crate::{Audit, Resource};
use appforge_types::cast::{self, Apply};
use appforge_types::ResourceId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// An automation workflow.
///
/// Paths and steps are opaque graph payloads owned by the workflow
/// designer; this layer carries them without interpreting them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Workflow {
    #[serde(rename = "workflowID")]
    pub workflow_id: ResourceId,
    pub handle: String,
    pub run_as: ResourceId,
    pub enabled: bool,
    pub labels: HashMap<String, String>,

    pub paths: Vec<Value>,
    pub steps: Vec<Value>,

    pub meta: WorkflowMeta,

    #[serde(flatten)]
    pub audit: Audit,

    pub can_delete_workflow: bool,
    pub can_execute_workflow: bool,
    pub can_grant: bool,
    pub can_manage_workflow_sessions: bool,
    pub can_manage_workflow_triggers: bool,
    pub can_undelete_workflow: bool,
    pub can_update_workflow: bool,
}

/// Descriptive metadata of a workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkflowMeta {
    pub name: String,
    pub description: String,
    /// Opaque designer layout payload (node positions etc.).
    pub visual: Value,
    pub sub_workflow: bool,
}

impl Default for WorkflowMeta {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            visual: Value::Object(serde_json::Map::new()),
            sub_workflow: false,
        }
    }
}

impl Default for Workflow {
    fn default() -> Self {
        Self {
            workflow_id: ResourceId::NONE,
            handle: String::new(),
            run_as: ResourceId::NONE,
            enabled: true,
            labels: HashMap::new(),
            paths: Vec::new(),
            steps: Vec::new(),
            meta: WorkflowMeta::default(),
            audit: Audit::default(),
            can_delete_workflow: false,
            can_execute_workflow: false,
            can_grant: false,
            can_manage_workflow_sessions: false,
            can_manage_workflow_triggers: false,
            can_undelete_workflow: false,
            can_update_workflow: false,
        }
    }
}

impl Workflow {
    /// Constructs a workflow from raw input; empty input yields the
    /// fully-defaulted instance.
    #[must_use]
    pub fn new(raw: &Value) -> Self {
        let mut w = Self::default();
        w.apply(raw);
        w
    }

    /// Overlays attributes defined in `raw` onto this workflow.
    ///
    /// Scalar attributes coerce individually; `paths`, `steps` and
    /// `labels` replace wholesale when supplied; `meta` merges field-wise
    /// over the existing value.
    pub fn apply(&mut self, raw: &Value) {
        let a = Apply::new(raw);

        a.id(&mut self.workflow_id, "workflowID");
        a.string(&mut self.handle, "handle");

        a.bool(&mut self.enabled, "enabled");
        a.bool(&mut self.can_delete_workflow, "canDeleteWorkflow");
        a.bool(&mut self.can_execute_workflow, "canExecuteWorkflow");
        a.bool(&mut self.can_grant, "canGrant");
        a.bool(&mut self.can_manage_workflow_sessions, "canManageWorkflowSessions");
        a.bool(&mut self.can_manage_workflow_triggers, "canManageWorkflowTriggers");
        a.bool(&mut self.can_undelete_workflow, "canUndeleteWorkflow");
        a.bool(&mut self.can_update_workflow, "canUpdateWorkflow");

        a.id(&mut self.run_as, "runAs");
        self.audit.apply(raw);

        if let Some(paths) = a.get("paths").and_then(Value::as_array) {
            self.paths = paths.clone();
        }

        if let Some(steps) = a.get("steps").and_then(Value::as_array) {
            self.steps = steps.clone();
        }

        if let Some(meta) = a.get("meta") {
            self.meta.apply(meta);
        }

        if let Some(labels) = a.get("labels").and_then(Value::as_object) {
            self.labels = labels
                .iter()
                .map(|(k, v)| (k.clone(), cast::coerce_string(v)))
                .collect();
        }
    }
}

impl WorkflowMeta {
    /// Merges attributes defined in `raw` over the existing metadata.
    pub fn apply(&mut self, raw: &Value) {
        let a = Apply::new(raw);

        a.string(&mut self.name, "name");
        a.string(&mut self.description, "description");
        a.bool(&mut self.sub_workflow, "subWorkflow");

        if let Some(visual) = a.get("visual") {
            if visual.is_object() {
                self.visual = visual.clone();
            }
        }
    }
}

impl Resource for Workflow {
    fn resource_type(&self) -> &'static str {
        "automation:workflow"
    }

    fn id(&self) -> ResourceId {
        self.workflow_id
    }
}
