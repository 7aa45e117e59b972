//! Tagging metadata backed by an external label command.
//!
//! [`CommandTagAction`] plugs into `p4tag-core` as a [`p4tag_core::TagAction`]:
//! the label is applied by running a configured program (typically
//! `p4 tag -l ${LABEL_NAME} //...@${P4_CHANGELIST}`) in the workspace.
mod error;
pub use error::ExecError;

mod command;
pub use command::{ENV_LABEL_DESC, ENV_LABEL_NAME, LabelCommand};

mod output;
pub use output::OutputConfig;

mod action;
pub use action::CommandTagAction;
