use crate::registry::DispatchError;
use serde_json::{Map, Value, json};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Number,
    Boolean,
}

impl ParamKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ParamKind::String => "string",
            ParamKind::Number => "number",
            ParamKind::Boolean => "boolean",
        }
    }

    fn accepts(self, value: &Value) -> bool {
        match self {
            ParamKind::String => value.is_string(),
            ParamKind::Number => value.is_number(),
            ParamKind::Boolean => value.is_boolean(),
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Presence {
    Required,
    Optional,
    Default(Value),
}

/// One named parameter of a tool's input contract.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub description: &'static str,
    pub presence: Presence,
}

impl ParamSpec {
    pub fn required(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            description,
            presence: Presence::Required,
        }
    }

    pub fn optional(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            description,
            presence: Presence::Optional,
        }
    }

    pub fn with_default(
        name: &'static str,
        kind: ParamKind,
        description: &'static str,
        default: Value,
    ) -> Self {
        Self {
            name,
            kind,
            description,
            presence: Presence::Default(default),
        }
    }

    pub fn is_required(&self) -> bool {
        self.presence == Presence::Required
    }

    pub fn schema(&self) -> Value {
        let mut schema = json!({
            "type": self.kind.as_str(),
            "description": self.description,
        });
        if let Presence::Default(default) = &self.presence
            && let Some(obj) = schema.as_object_mut()
        {
            obj.insert("default".to_string(), default.clone());
        }
        schema
    }
}

/// Arguments that passed contract validation, with defaults filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct Arguments {
    tool: String,
    values: Map<String, Value>,
}

impl Arguments {
    pub fn str(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(|value| value.as_str())
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.values.get(name).and_then(|value| value.as_f64())
    }

    pub fn boolean(&self, name: &str) -> Option<bool> {
        self.values.get(name).and_then(|value| value.as_bool())
    }

    pub fn require_str(&self, name: &str) -> Result<&str, DispatchError> {
        self.str(name)
            .ok_or_else(|| DispatchError::MissingParameter {
                tool: self.tool.clone(),
                param: name.to_string(),
            })
    }
}

/// Checks supplied arguments against a tool's declared parameters.
///
/// Keys that are not declared are dropped without complaint. A JSON `null`
/// counts as absent.
pub fn validate_arguments(
    tool: &str,
    params: &[ParamSpec],
    supplied: Option<&Value>,
) -> Result<Arguments, DispatchError> {
    let empty = Map::new();
    let supplied = match supplied {
        None | Some(Value::Null) => &empty,
        Some(Value::Object(map)) => map,
        Some(other) => {
            return Err(DispatchError::MalformedArguments(format!(
                "arguments must be an object, got {}",
                json_type_name(other)
            )));
        }
    };

    let mut values = Map::new();
    for param in params {
        match supplied.get(param.name) {
            None | Some(Value::Null) => match &param.presence {
                Presence::Required => {
                    return Err(DispatchError::MissingParameter {
                        tool: tool.to_string(),
                        param: param.name.to_string(),
                    });
                }
                Presence::Optional => {}
                Presence::Default(default) => {
                    values.insert(param.name.to_string(), default.clone());
                }
            },
            Some(value) if param.kind.accepts(value) => {
                values.insert(param.name.to_string(), value.clone());
            }
            Some(value) => {
                return Err(DispatchError::TypeMismatch {
                    tool: tool.to_string(),
                    param: param.name.to_string(),
                    expected: param.kind,
                    found: json_type_name(value),
                });
            }
        }
    }

    Ok(Arguments {
        tool: tool.to_string(),
        values,
    })
}

pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
