use serde::{Deserialize, Serialize};

use crate::{ModelError, ModelResult};

/// Declarative configuration of a tagging step.
///
/// Field names follow the pipeline step syntax
/// (`tag rawLabelName: '...', rawLabelDesc: '...', onlyOnSuccess: true`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct TagStepSpec {
    /// Label name template, may reference `${VAR}` placeholders.
    pub raw_label_name: String,
    /// Label description template, may reference `${VAR}` placeholders.
    #[serde(default)]
    pub raw_label_desc: String,
    /// Label only runs whose result is `SUCCESS`.
    ///
    /// Opt-in; by default every run is labeled.
    #[serde(default)]
    pub only_on_success: bool,
}

impl TagStepSpec {
    pub fn new(raw_label_name: impl Into<String>, raw_label_desc: impl Into<String>) -> Self {
        Self {
            raw_label_name: raw_label_name.into(),
            raw_label_desc: raw_label_desc.into(),
            only_on_success: false,
        }
    }

    /// Builder-style helper for [`TagStepSpec::only_on_success`].
    pub fn with_only_on_success(mut self, only_on_success: bool) -> Self {
        self.only_on_success = only_on_success;
        self
    }

    /// Check the spec before it is handed to a step.
    ///
    /// Rules:
    /// - `rawLabelName` is not empty or whitespace-only.
    pub fn validate(&self) -> ModelResult<()> {
        if self.raw_label_name.trim().is_empty() {
            return Err(ModelError::Invalid("rawLabelName is empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_pipeline_field_names() {
        let json = r#"{"rawLabelName":"jenkins-label","rawLabelDesc":"TestLabel"}"#;
        let spec: TagStepSpec = serde_json::from_str(json).unwrap();

        assert_eq!(spec, TagStepSpec::new("jenkins-label", "TestLabel"));
        assert!(!spec.only_on_success, "onlyOnSuccess defaults to false");
    }

    #[test]
    fn only_on_success_is_read() {
        let json = r#"{"rawLabelName":"n","onlyOnSuccess":true}"#;
        let spec: TagStepSpec = serde_json::from_str(json).unwrap();
        assert!(spec.only_on_success);
        assert_eq!(spec.raw_label_desc, "");
    }

    #[test]
    fn validate_rejects_blank_name() {
        assert!(TagStepSpec::new("  ", "desc").validate().is_err());
        assert!(TagStepSpec::new("label-${BUILD_NUMBER}", "").validate().is_ok());
    }
}
