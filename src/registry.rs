use crate::params::{Arguments, ParamKind, ParamSpec, validate_arguments};
use crate::tools::ToolContext;
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, warn};

/// Failures that abort an invocation before or instead of a tool result.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("unknown tool: {0}")]
    UnknownOperation(String),
    #[error("tool already registered: {0}")]
    DuplicateOperation(String),
    #[error("missing required parameter '{param}' for {tool}")]
    MissingParameter { tool: String, param: String },
    #[error("parameter '{param}' for {tool} must be a {expected}, got {found}")]
    TypeMismatch {
        tool: String,
        param: String,
        expected: ParamKind,
        found: &'static str,
    },
    #[error("{0}")]
    MalformedArguments(String),
    #[error("invalid SVG structure: {0}")]
    InvalidSvgStructure(String),
}

pub type Handler = fn(&Arguments, &ToolContext) -> Result<Value, DispatchError>;

#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub params: Vec<ParamSpec>,
}

impl ToolDescriptor {
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        for param in &self.params {
            properties.insert(param.name.to_string(), param.schema());
        }
        let required: Vec<&str> = self
            .params
            .iter()
            .filter(|param| param.is_required())
            .map(|param| param.name)
            .collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required
        })
    }

    pub fn definition(&self) -> Value {
        json!({
            "name": self.name,
            "title": self.title,
            "description": self.description,
            "inputSchema": self.input_schema()
        })
    }
}

struct Entry {
    descriptor: ToolDescriptor,
    handler: Handler,
}

/// Name-indexed tool table. Populated once at startup, read-only afterwards.
#[derive(Default)]
pub struct ToolRegistry {
    entries: Vec<Entry>,
    index: HashMap<&'static str, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        descriptor: ToolDescriptor,
        handler: Handler,
    ) -> Result<(), DispatchError> {
        if self.index.contains_key(descriptor.name) {
            return Err(DispatchError::DuplicateOperation(
                descriptor.name.to_string(),
            ));
        }
        self.index.insert(descriptor.name, self.entries.len());
        self.entries.push(Entry {
            descriptor,
            handler,
        });
        Ok(())
    }

    /// Tool definitions in registration order, as advertised by `tools/list`.
    pub fn definitions(&self) -> Vec<Value> {
        self.entries
            .iter()
            .map(|entry| entry.descriptor.definition())
            .collect()
    }

    /// Validates `args` against the named tool's contract and runs its handler.
    ///
    /// Handler-level failures come back as `Ok` envelopes with `isError` set;
    /// only request-level problems are returned as `Err`.
    pub fn dispatch(
        &self,
        name: &str,
        args: Option<&Value>,
        ctx: &ToolContext,
    ) -> Result<Value, DispatchError> {
        let Some(&position) = self.index.get(name) else {
            warn!(tool = name, "rejected call to unknown tool");
            return Err(DispatchError::UnknownOperation(name.to_string()));
        };
        let entry = &self.entries[position];

        let arguments = validate_arguments(name, &entry.descriptor.params, args)
            .inspect_err(|err| warn!(tool = name, error = %err, "rejected tool arguments"))?;

        debug!(tool = name, "dispatching tool call");
        (entry.handler)(&arguments, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamKind;
    use crate::tools::text_result;
    use std::path::PathBuf;

    fn echo(args: &Arguments, _ctx: &ToolContext) -> Result<Value, DispatchError> {
        Ok(text_result(args.require_str("text")?))
    }

    fn echo_descriptor(name: &'static str) -> ToolDescriptor {
        ToolDescriptor {
            name,
            title: "Echo",
            description: "Echo text back.",
            params: vec![ParamSpec::required("text", ParamKind::String, "text")],
        }
    }

    fn context() -> ToolContext {
        ToolContext::new(PathBuf::from("."), PathBuf::from("output"))
    }

    #[test]
    fn register_and_dispatch() {
        let mut registry = ToolRegistry::new();
        registry.register(echo_descriptor("echo"), echo).expect("register");
        let result = registry
            .dispatch("echo", Some(&json!({"text": "hi"})), &context())
            .expect("dispatch");
        assert_eq!(
            result.pointer("/content/0/text").and_then(|v| v.as_str()),
            Some("hi")
        );
    }

    #[test]
    fn duplicate_registration_rejected() {
        let mut registry = ToolRegistry::new();
        registry.register(echo_descriptor("echo"), echo).expect("register");
        let err = registry
            .register(echo_descriptor("echo"), echo)
            .expect_err("duplicate");
        assert!(matches!(err, DispatchError::DuplicateOperation(name) if name == "echo"));
    }

    #[test]
    fn unknown_tool_rejected() {
        let registry = ToolRegistry::new();
        let err = registry
            .dispatch("missing", Some(&json!({})), &context())
            .expect_err("unknown");
        assert!(matches!(err, DispatchError::UnknownOperation(name) if name == "missing"));
    }

    #[test]
    fn missing_parameter_stops_before_handler() {
        fn must_not_run(_: &Arguments, _: &ToolContext) -> Result<Value, DispatchError> {
            panic!("handler invoked with invalid arguments");
        }

        let mut registry = ToolRegistry::new();
        registry
            .register(echo_descriptor("guarded"), must_not_run)
            .expect("register");
        let err = registry
            .dispatch("guarded", Some(&json!({"other": 1})), &context())
            .expect_err("missing");
        assert!(matches!(err, DispatchError::MissingParameter { .. }));
    }

    #[test]
    fn definitions_keep_registration_order() {
        let mut registry = ToolRegistry::new();
        registry.register(echo_descriptor("b"), echo).expect("register");
        registry.register(echo_descriptor("a"), echo).expect("register");
        let names: Vec<String> = registry
            .definitions()
            .iter()
            .filter_map(|tool| tool.get("name").and_then(|v| v.as_str()).map(String::from))
            .collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn input_schema_lists_required() {
        let schema = echo_descriptor("echo").input_schema();
        assert_eq!(schema.get("required"), Some(&json!(["text"])));
        assert_eq!(
            schema.pointer("/properties/text/type").and_then(|v| v.as_str()),
            Some("string")
        );
    }
}
