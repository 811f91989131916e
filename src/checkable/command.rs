/*!
 * Command Checkable Object
 * Intercepted process-execution calls (argv plus the captured call stack)
 */

use super::{encode_lookup_key, CheckCategory, Checkable};
use crate::core::limits::MAX_STACK_FRAMES;
use crate::core::types::LookupKey;
use crate::params::{ParamResult, ParamSink};

/// An intercepted process execution
///
/// Parameter keys written for policy rules: `command` (the argv joined with
/// single spaces) and `stack` (the captured frames, innermost first).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandObject {
    command: String,
    stack: Vec<String>,
}

impl CommandObject {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            stack: Vec::new(),
        }
    }

    /// Build from an argv as observed at the call site
    pub fn from_argv<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let command = argv
            .into_iter()
            .map(|arg| arg.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(" ");
        Self::new(command)
    }

    /// Attach the captured call stack, truncated to `MAX_STACK_FRAMES`
    pub fn with_stack(mut self, mut stack: Vec<String>) -> Self {
        stack.truncate(MAX_STACK_FRAMES);
        self.stack = stack;
        self
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn stack(&self) -> &[String] {
        &self.stack
    }
}

impl Checkable for CommandObject {
    fn lookup_key(&self) -> LookupKey {
        // Rules may inspect the stack, so it participates in the key
        let mut fields: Vec<&str> = Vec::with_capacity(1 + self.stack.len());
        fields.push(&self.command);
        fields.extend(self.stack.iter().map(String::as_str));
        encode_lookup_key(CheckCategory::Command, &fields)
    }

    fn category(&self) -> CheckCategory {
        CheckCategory::Command
    }

    /// An empty command line leaves nothing for policy rules to inspect
    fn is_well_formed(&self) -> bool {
        !self.command.is_empty()
    }

    fn populate_params(&self, params: &mut dyn ParamSink) -> ParamResult<()> {
        params.put_str("command", &self.command)?;
        params.put_str_list("stack", &self.stack)
    }
}
