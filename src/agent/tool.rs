use crate::openai::types::ToolSpec;

/// A capability the model may invoke during a run.
///
/// `call` returns text in every case; failures are described in the returned
/// string so the model can keep reasoning instead of the run aborting.
pub trait Tool {
    /// Tool name (must match what the model calls).
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON Schema for the arguments object.
    fn parameters(&self) -> serde_json::Value;

    /// Execute with the raw JSON arguments string produced by the model.
    async fn call(&self, arguments: &str) -> String;

    fn spec(&self) -> ToolSpec {
        ToolSpec::function(self.name(), self.description(), self.parameters())
    }
}
