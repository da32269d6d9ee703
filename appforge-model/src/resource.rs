use appforge_types::ResourceId;

/// Stable identity of an entity within the platform's resource namespace.
///
/// Access-control rules and API references address entities through the
/// `"{type}:{id}"` string this trait renders.
pub trait Resource {
    /// The constant resource type, e.g. `"automation:workflow"`.
    fn resource_type(&self) -> &'static str;

    /// The entity's identifier; the unset sentinel until persisted.
    fn id(&self) -> ResourceId;

    /// Fully-qualified resource reference.
    fn resource_id(&self) -> String {
        format!("{}:{}", self.resource_type(), self.id())
    }
}
