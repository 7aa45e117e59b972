#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use p4tag_core::{HostError, TagAction, TaskListener, Workspace};

/// One recorded `label_build` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCall {
    pub name: String,
    pub description: String,
    pub workspace: Workspace,
}

/// Tagging metadata that records calls instead of talking to a server.
#[derive(Default)]
pub struct RecordingAction {
    pub calls: Mutex<Vec<LabelCall>>,
    pub fail_with: Option<String>,
}

impl RecordingAction {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing(reason: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            fail_with: Some(reason.to_string()),
        })
    }

    pub fn calls(&self) -> Vec<LabelCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl TagAction for RecordingAction {
    fn label_build(
        &self,
        listener: &dyn TaskListener,
        name: &str,
        description: &str,
        workspace: &Workspace,
    ) -> Result<(), HostError> {
        listener.log("P4 Task: tagging build.");
        self.calls.lock().unwrap().push(LabelCall {
            name: name.to_string(),
            description: description.to_string(),
            workspace: workspace.clone(),
        });
        match &self.fail_with {
            Some(reason) => Err(HostError::Failed(reason.clone())),
            None => Ok(()),
        }
    }
}
