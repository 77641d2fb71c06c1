// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Parameter validation against declared input schemas.
//!
//! Mirrors the SDK's own parameter validation: a method's declared input
//! schema is checked against the caller's params before the fake runs. A
//! rejection is delivered through the completion callback exactly as the
//! real SDK would deliver it, and the fake is never invoked for that call.

use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Errors produced when params do not satisfy an input schema.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field '{field}' in params")]
    MissingField { field: String },

    #[error("field '{field}' has wrong type, expected {expected}")]
    WrongType { field: String, expected: &'static str },

    #[error("params must be an object")]
    NotAnObject,
}

/// Declared shape of one input member.
#[derive(Clone, Debug)]
pub enum MemberShape {
    String,
    Integer,
    Boolean,
    Structure(InputSchema),
    List(Box<MemberShape>),
    /// Accepts any value
    Any,
}

impl MemberShape {
    fn expected(&self) -> &'static str {
        match self {
            MemberShape::String => "string",
            MemberShape::Integer => "integer",
            MemberShape::Boolean => "boolean",
            MemberShape::Structure(_) => "structure",
            MemberShape::List(_) => "list",
            MemberShape::Any => "any",
        }
    }

    fn check(&self, field: &str, value: &Value) -> Result<(), ValidationError> {
        let ok = match self {
            MemberShape::String => value.is_string(),
            MemberShape::Integer => value.is_i64() || value.is_u64(),
            MemberShape::Boolean => value.is_boolean(),
            MemberShape::Structure(schema) => return schema.validate_at(field, value),
            MemberShape::List(inner) => {
                let Some(items) = value.as_array() else {
                    return Err(ValidationError::WrongType {
                        field: field.to_string(),
                        expected: self.expected(),
                    });
                };
                for (index, item) in items.iter().enumerate() {
                    inner.check(&format!("{}[{}]", field, index), item)?;
                }
                return Ok(());
            }
            MemberShape::Any => true,
        };

        if ok {
            Ok(())
        } else {
            Err(ValidationError::WrongType {
                field: field.to_string(),
                expected: self.expected(),
            })
        }
    }
}

/// Declared input schema for one SDK operation.
///
/// Unknown members are ignored; only declared shapes and required
/// membership are enforced.
#[derive(Clone, Debug, Default)]
pub struct InputSchema {
    required: Vec<String>,
    members: HashMap<String, MemberShape>,
}

impl InputSchema {
    /// Create an empty schema (accepts any object)
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a required member
    pub fn required(mut self, name: &str, shape: MemberShape) -> Self {
        self.required.push(name.to_string());
        self.members.insert(name.to_string(), shape);
        self
    }

    /// Declare an optional member
    pub fn optional(mut self, name: &str, shape: MemberShape) -> Self {
        self.members.insert(name.to_string(), shape);
        self
    }

    /// Validate params against this schema
    pub fn validate(&self, params: &Value) -> Result<(), ValidationError> {
        self.validate_at("", params)
    }

    fn validate_at(&self, prefix: &str, params: &Value) -> Result<(), ValidationError> {
        let Some(object) = params.as_object() else {
            return Err(ValidationError::NotAnObject);
        };

        for name in &self.required {
            if !object.contains_key(name) {
                return Err(ValidationError::MissingField {
                    field: join_field(prefix, name),
                });
            }
        }

        for (name, value) in object {
            if let Some(shape) = self.members.get(name) {
                shape.check(&join_field(prefix, name), value)?;
            }
        }

        Ok(())
    }
}

fn join_field(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
