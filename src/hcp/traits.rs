//! Common traits for TFE resources

/// Common trait for TFE resources listed in the report
///
/// Gives a unified way to identify workspaces, configuration versions
/// and state versions in log lines and error messages.
pub trait TfeResource {
    /// Get the resource ID
    fn id(&self) -> &str;

    /// Get the human-readable name
    fn name(&self) -> &str;

    /// Label used in error messages, e.g. "workspace 'net-prod'"
    fn label(&self) -> String {
        format!("'{}'", self.name())
    }
}
