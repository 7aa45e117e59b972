use std::{
    io::{BufRead, BufReader, Read},
    process::{Command, Stdio},
    thread,
};

use p4tag_core::{Expand, HostError, TagAction, TaskListener, Workspace};
use p4tag_model::Env;
use tracing::{debug, warn};

use crate::{ENV_LABEL_DESC, ENV_LABEL_NAME, ExecError, LabelCommand, OutputConfig};

/// Tagging metadata that labels by running a [`LabelCommand`].
///
/// Holds the environment of the run it was recorded for, so a promotion
/// labels with the upstream run's variables (changelist, client, ...).
#[derive(Debug, Clone)]
pub struct CommandTagAction {
    command: LabelCommand,
    run_env: Env,
    output: OutputConfig,
}

impl CommandTagAction {
    pub fn new(command: LabelCommand, run_env: Env) -> Result<Self, ExecError> {
        command.validate()?;
        Ok(Self {
            command,
            run_env,
            output: OutputConfig::default(),
        })
    }

    pub fn with_output(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }

    pub fn command(&self) -> &LabelCommand {
        &self.command
    }

    fn process_env(&self, name: &str, description: &str) -> Env {
        let mut label = Env::new();
        label
            .insert(ENV_LABEL_NAME, name)
            .insert(ENV_LABEL_DESC, description);
        self.run_env.merged(&label).merged(&self.command.env)
    }

    fn run(
        &self,
        listener: &dyn TaskListener,
        name: &str,
        description: &str,
        workspace: &Workspace,
    ) -> Result<(), ExecError> {
        let env = self.process_env(name, description);
        let expand = Expand::new(&env);
        let args = self
            .command
            .args
            .iter()
            .map(|a| expand.format(a))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ExecError::Template(e.to_string()))?;
        let cwd = self
            .command
            .cwd
            .as_deref()
            .unwrap_or_else(|| workspace.path());
        self.command.trace_state(&args, cwd);

        let stderr = if self.output.forward_stderr {
            Stdio::piped()
        } else {
            Stdio::null()
        };
        let mut child = Command::new(&self.command.command)
            .args(&args)
            .envs(env.iter())
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(stderr)
            .spawn()
            .map_err(|source| ExecError::Spawn {
                command: self.command.command.clone(),
                source,
            })?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        thread::scope(|s| {
            if let Some(stderr) = stderr {
                s.spawn(move || self.forward(listener, stderr));
            }
            if let Some(stdout) = stdout {
                self.forward(listener, stdout);
            }
        });

        let status = child.wait().map_err(|source| ExecError::Wait {
            command: self.command.command.clone(),
            source,
        })?;
        if !status.success() {
            return Err(ExecError::NonZeroExit {
                command: self.command.command.clone(),
                status: status.to_string(),
            });
        }
        debug!(label = name, "label command finished");
        Ok(())
    }

    /// Copy `stream` into the run log line by line, as it is produced.
    fn forward(&self, listener: &dyn TaskListener, stream: impl Read) {
        for chunk in BufReader::new(stream).split(b'\n') {
            let Ok(chunk) = chunk else {
                break;
            };
            let text = String::from_utf8_lossy(&chunk);
            let line = text.strip_suffix('\r').unwrap_or(text.as_ref());
            let (line, truncated) = self.output.clip(line);
            if truncated {
                listener.log(&format!("{line} [truncated]"));
            } else {
                listener.log(line);
            }
        }
    }
}

impl TagAction for CommandTagAction {
    fn label_build(
        &self,
        listener: &dyn TaskListener,
        name: &str,
        description: &str,
        workspace: &Workspace,
    ) -> Result<(), HostError> {
        listener.log("P4 Task: tagging build.");
        self.run(listener, name, description, workspace)
            .inspect_err(|e| warn!(command = %self.command, error = %e, "label command failed"))
            .map_err(HostError::from)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use p4tag_core::memory::BufferListener;

    fn sh(script: &str) -> LabelCommand {
        LabelCommand::new("sh").with_args(["-c", script])
    }

    fn ws() -> Workspace {
        Workspace::new(std::env::temp_dir())
    }

    #[test]
    fn exports_label_and_run_variables() {
        let action = CommandTagAction::new(
            sh("echo \"$LABEL_NAME|$LABEL_DESC|$P4_CHANGELIST\""),
            Env::single("P4_CHANGELIST", "1234"),
        )
        .unwrap();
        let listener = BufferListener::new();

        action
            .label_build(&listener, "rel-1", "Release one", &ws())
            .unwrap();

        assert_eq!(
            listener.lines(),
            vec!["P4 Task: tagging build.", "rel-1|Release one|1234"]
        );
    }

    #[test]
    fn expands_argument_templates() {
        let action = CommandTagAction::new(
            LabelCommand::new("echo").with_args([
                "tag",
                "-l",
                "${LABEL_NAME}",
                "//depot/...@${P4_CHANGELIST}",
            ]),
            Env::single("P4_CHANGELIST", "77"),
        )
        .unwrap();
        let listener = BufferListener::new();

        action
            .label_build(&listener, "jenkins-label", "", &ws())
            .unwrap();
        assert!(listener.contains("tag -l jenkins-label //depot/...@77"));
    }

    #[test]
    fn non_zero_exit_fails() {
        let action =
            CommandTagAction::new(sh("echo no such client >&2; exit 3"), Env::new()).unwrap();
        let listener = BufferListener::new();

        let err = action.label_build(&listener, "x", "", &ws()).unwrap_err();
        assert!(err.to_string().contains("exit status: 3"), "{err}");
        assert!(listener.contains("no such client"));
    }

    #[test]
    fn missing_program_is_named_in_error() {
        let action =
            CommandTagAction::new(LabelCommand::new("/nonexistent/p4tag-label-tool"), Env::new())
                .unwrap();
        let err = action
            .label_build(&BufferListener::new(), "x", "", &ws())
            .unwrap_err();
        assert!(
            err.to_string()
                .contains("failed to start '/nonexistent/p4tag-label-tool'"),
            "{err}"
        );
    }

    #[test]
    fn output_is_forwarded_while_the_command_runs() {
        struct Timed(std::sync::Mutex<Vec<(String, std::time::Instant)>>);

        impl TaskListener for Timed {
            fn log(&self, line: &str) {
                self.0
                    .lock()
                    .unwrap()
                    .push((line.to_string(), std::time::Instant::now()));
            }
        }

        let action =
            CommandTagAction::new(sh("echo first; sleep 1; echo second"), Env::new()).unwrap();
        let listener = Timed(Default::default());

        action.label_build(&listener, "x", "", &ws()).unwrap();

        let lines = listener.0.into_inner().unwrap();
        let at = |text: &str| lines.iter().find(|(l, _)| l == text).unwrap().1;
        assert!(
            at("second").duration_since(at("first")) >= std::time::Duration::from_millis(500),
            "first line was held back until exit"
        );
    }

    #[test]
    fn long_lines_are_clipped_and_stderr_can_be_dropped() {
        let action = CommandTagAction::new(sh("echo 0123456789; echo hidden >&2"), Env::new())
            .unwrap()
            .with_output(OutputConfig {
                max_line_length: 4,
                forward_stderr: false,
            });
        let listener = BufferListener::new();

        action.label_build(&listener, "x", "", &ws()).unwrap();
        assert_eq!(
            listener.lines(),
            vec!["P4 Task: tagging build.", "0123 [truncated]"]
        );
    }

    #[test]
    fn blank_command_is_rejected() {
        assert!(matches!(
            CommandTagAction::new(LabelCommand::new(""), Env::new()),
            Err(ExecError::InvalidSpec(_))
        ));
    }
}
