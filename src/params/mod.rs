/*!
 * Parameter Sink
 * Key/value collection handed to the policy evaluator
 *
 * Models the engine-owned parameter object: checkable objects write their
 * fields under stable, documented key names so policy rules can reference
 * them. A sink can be invalidated (engine teardown), after which every write
 * fails; that failure is the caller's to handle, never masked here.
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Result type for parameter-sink operations
pub type ParamResult<T> = Result<T, ParamError>;

/// Parameter-sink errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ParamError {
    #[error("Parameter sink is closed")]
    #[diagnostic(
        code(params::sink_closed),
        help("The evaluation engine invalidated this handle. Build a fresh sink for the next check.")
    )]
    SinkClosed,
}

/// Write-only view of an engine-owned parameter collection
///
/// Writes are last-write-wins: repopulating the same sink produces the same
/// final entries with no duplication.
pub trait ParamSink {
    /// Write a text entry
    fn put_str(&mut self, key: &str, value: &str) -> ParamResult<()>;

    /// Write a list-of-text entry
    fn put_str_list(&mut self, key: &str, values: &[String]) -> ParamResult<()>;
}

/// In-process parameter collection backed by a JSON object
#[derive(Debug, Clone, Default)]
pub struct JsonParams {
    entries: Map<String, Value>,
    closed: bool,
}

impl JsonParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidate the handle; subsequent writes fail with `SinkClosed`
    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(Value::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume into a JSON value for handing to an external evaluator
    pub fn into_value(self) -> Value {
        Value::Object(self.entries)
    }

    fn guard(&self) -> ParamResult<()> {
        if self.closed {
            Err(ParamError::SinkClosed)
        } else {
            Ok(())
        }
    }
}

impl ParamSink for JsonParams {
    fn put_str(&mut self, key: &str, value: &str) -> ParamResult<()> {
        self.guard()?;
        self.entries
            .insert(key.to_string(), Value::String(value.to_string()));
        Ok(())
    }

    fn put_str_list(&mut self, key: &str, values: &[String]) -> ParamResult<()> {
        self.guard()?;
        let list = values.iter().cloned().map(Value::String).collect();
        self.entries.insert(key.to_string(), Value::Array(list));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_and_get() {
        let mut params = JsonParams::new();
        params.put_str("query", "{find: 'users'}").unwrap();
        assert_eq!(params.get_str("query"), Some("{find: 'users'}"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_last_write_wins() {
        let mut params = JsonParams::new();
        params.put_str("query", "first").unwrap();
        params.put_str("query", "second").unwrap();
        assert_eq!(params.get_str("query"), Some("second"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_closed_sink_rejects_writes() {
        let mut params = JsonParams::new();
        params.close();
        assert_eq!(params.put_str("query", "x"), Err(ParamError::SinkClosed));
        assert_eq!(
            params.put_str_list("stack", &["frame".to_string()]),
            Err(ParamError::SinkClosed)
        );
        assert!(params.is_empty());
    }

    #[test]
    fn test_into_value() {
        let mut params = JsonParams::new();
        params.put_str("command", "ls").unwrap();
        params.put_str_list("stack", &["main".to_string()]).unwrap();

        let value = params.into_value();
        assert_eq!(value["command"], "ls");
        assert_eq!(value["stack"][0], "main");
    }
}
