//! Plain-text rendering of form actions for the `foamer-post` binary.

use std::{
    io::{self, Write},
    process::ExitCode,
};

use crate::event::{FormAction, Status, StatusKind};

/// Write user-visible actions as `[kind] text` lines.
///
/// `HideStatus` is written as `[hidden]`. Other actions produce no output.
pub fn render_actions(out: &mut impl Write, actions: &[FormAction]) -> io::Result<()> {
    for action in actions {
        match action {
            FormAction::ShowStatus(status) => {
                writeln!(out, "[{}] {}", status.kind.as_str(), status.text)?;
            },
            FormAction::HideStatus => writeln!(out, "[hidden]")?,
            FormAction::SetInputsEnabled(_)
            | FormAction::ClearContent
            | FormAction::Post(_)
            | FormAction::Log { .. } => {},
        }
    }
    out.flush()
}

/// Whether the status left on screen reports a failure.
pub fn is_failure(status: Option<&Status>) -> bool {
    status.is_some_and(|s| s.kind == StatusKind::Error)
}

/// Process exit code for the status left on screen.
pub fn exit_code(status: Option<&Status>) -> ExitCode {
    if is_failure(status) { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}
