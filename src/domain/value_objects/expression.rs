//! Attribute expressions
//!
//! A resource attribute is either a literal value or a reference to an
//! attribute of another construct. References render as Terraform
//! interpolations (`${aws_s3_bucket.bucket.bucket}`) in the synthesized plan.

use std::fmt;

use serde_json::Value;

/// Reference to an attribute exported by another construct
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    /// Address of the referenced construct (`aws_s3_bucket.bucket`, `module.vpc`)
    address: String,
    attribute: String,
}

impl Reference {
    pub fn new(address: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            attribute: attribute.into(),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Terraform interpolation string
    pub fn interpolation(&self) -> String {
        format!("${{{}.{}}}", self.address, self.attribute)
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.interpolation())
    }
}

/// Attribute value
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(Value),
    Reference(Reference),
}

impl Expression {
    /// True for empty string literals and JSON nulls
    pub fn is_blank(&self) -> bool {
        match self {
            Expression::Literal(Value::String(s)) => s.trim().is_empty(),
            Expression::Literal(Value::Null) => true,
            _ => false,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Expression::Literal(value) => value.clone(),
            Expression::Reference(reference) => Value::String(reference.interpolation()),
        }
    }

    /// Literal string content, if this is a string literal
    pub fn as_literal_str(&self) -> Option<&str> {
        match self {
            Expression::Literal(Value::String(s)) => Some(s),
            _ => None,
        }
    }
}

impl From<Expression> for Value {
    fn from(expr: Expression) -> Self {
        match expr {
            Expression::Literal(value) => value,
            Expression::Reference(reference) => Value::String(reference.interpolation()),
        }
    }
}

impl From<Reference> for Expression {
    fn from(reference: Reference) -> Self {
        Expression::Reference(reference)
    }
}

impl From<&Reference> for Expression {
    fn from(reference: &Reference) -> Self {
        Expression::Reference(reference.clone())
    }
}

impl From<&str> for Expression {
    fn from(s: &str) -> Self {
        Expression::Literal(Value::String(s.to_string()))
    }
}

impl From<String> for Expression {
    fn from(s: String) -> Self {
        Expression::Literal(Value::String(s))
    }
}

impl From<&String> for Expression {
    fn from(s: &String) -> Self {
        Expression::Literal(Value::String(s.clone()))
    }
}

impl From<bool> for Expression {
    fn from(b: bool) -> Self {
        Expression::Literal(Value::Bool(b))
    }
}

impl From<i64> for Expression {
    fn from(n: i64) -> Self {
        Expression::Literal(Value::from(n))
    }
}

impl From<Value> for Expression {
    fn from(value: Value) -> Self {
        Expression::Literal(value)
    }
}
