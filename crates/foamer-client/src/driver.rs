//! Async driver that runs the form against a transport.
//!
//! The driver executes the I/O actions the form produces (`Post`, `Log`) and
//! hands everything else back to the caller for rendering.

use std::collections::VecDeque;

use foamer_core::Environment;

use crate::{
    error::FormError,
    event::{FormAction, FormEvent, LogLevel, SubmitOutcome},
    form::{Form, FormConfig},
    transport::Transport,
};

/// Runs a [`Form`] over a [`Transport`].
pub struct Submitter<E: Environment, T: Transport> {
    form: Form<E>,
    transport: T,
    env: E,
}

impl<E: Environment, T: Transport> Submitter<E, T> {
    /// Create a driver with an empty form.
    pub fn new(env: E, config: FormConfig, transport: T) -> Self {
        Self { form: Form::new(env.clone(), config), transport, env }
    }

    /// The underlying form.
    pub fn form(&self) -> &Form<E> {
        &self.form
    }

    /// The transport requests go through.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Set the message field.
    pub fn set_content(
        &mut self,
        content: impl Into<String>,
    ) -> Result<Vec<FormAction>, FormError> {
        self.form.handle(FormEvent::ContentChanged { content: content.into() })
    }

    /// Set the API key field.
    pub fn set_api_key(
        &mut self,
        api_key: impl Into<String>,
    ) -> Result<Vec<FormAction>, FormError> {
        self.form.handle(FormEvent::ApiKeyChanged { api_key: api_key.into() })
    }

    /// Submit the form and run the resulting request to completion.
    ///
    /// Returns every action produced, in order, including the executed `Post`.
    pub async fn submit(&mut self) -> Result<Vec<FormAction>, FormError> {
        let mut pending: VecDeque<FormAction> = self.form.handle(FormEvent::Submit)?.into();
        let mut produced = Vec::with_capacity(pending.len());

        while let Some(action) = pending.pop_front() {
            match &action {
                FormAction::Post(request) => {
                    let outcome = SubmitOutcome::from_result(self.transport.post(request).await);
                    pending.extend(self.form.handle(FormEvent::ResponseReceived(outcome))?);
                },
                FormAction::Log { level, message } => log(*level, message),
                FormAction::SetInputsEnabled(_)
                | FormAction::ShowStatus(_)
                | FormAction::HideStatus
                | FormAction::ClearContent => {},
            }
            produced.push(action);
        }

        Ok(produced)
    }

    /// Wait out the current status's auto-hide deadline, if it has one.
    pub async fn settle(&mut self) -> Result<Vec<FormAction>, FormError> {
        let Some(hide_at) = self.form.hide_deadline() else {
            return Ok(Vec::new());
        };

        let now = self.env.now();
        if hide_at > now {
            self.env.sleep(hide_at - now).await;
        }

        self.form.handle(FormEvent::Tick { now: self.env.now() })
    }
}

fn log(level: LogLevel, message: &str) {
    match level {
        LogLevel::Debug => tracing::debug!("{message}"),
        LogLevel::Info => tracing::info!("{message}"),
        LogLevel::Warn => tracing::warn!("{message}"),
    }
}
