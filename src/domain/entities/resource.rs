//! Declarative constructs: resources, providers, outputs and module calls
//!
//! These are plain data plus validation. Rendering to Terraform JSON lives in
//! the synthesizer.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::domain::resources;
use crate::domain::value_objects::{ConstructId, Expression, Reference};
use crate::error::{StackError, StackResult};

/// Ordered attribute map
pub type Attributes = BTreeMap<String, Expression>;

fn render(attributes: &Attributes) -> Map<String, Value> {
    attributes
        .iter()
        .map(|(k, v)| (k.clone(), v.to_value()))
        .collect()
}

fn check_resource_type(resource_type: &str) -> StackResult<()> {
    let valid = resource_type
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_lowercase())
        && resource_type
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StackError::InvalidId {
            id: resource_type.to_string(),
            reason: "resource types are lowercase snake_case".to_string(),
        })
    }
}

/// A managed resource (`resource "<type>" "<id>"`)
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    resource_type: String,
    id: ConstructId,
    attributes: Attributes,
}

impl Resource {
    pub fn new(
        resource_type: impl Into<String>,
        id: impl TryInto<ConstructId, Error = StackError>,
    ) -> StackResult<Self> {
        let resource_type = resource_type.into();
        check_resource_type(&resource_type)?;
        Ok(Self {
            resource_type,
            id: id.try_into()?,
            attributes: Attributes::new(),
        })
    }

    /// Builder: set an attribute
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<Expression>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Expression>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    pub fn id(&self) -> &ConstructId {
        &self.id
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn get(&self, name: &str) -> Option<&Expression> {
        self.attributes.get(name)
    }

    /// Terraform address (`aws_s3_bucket.bucket`)
    pub fn address(&self) -> String {
        format!("{}.{}", self.resource_type, self.id)
    }

    /// Check required attributes of known resource types.
    pub fn validate(&self) -> StackResult<()> {
        for field in resources::required_attributes(&self.resource_type) {
            match self.attributes.get(*field) {
                Some(expr) if !expr.is_blank() => {}
                _ => return Err(StackError::empty_field(self.address(), field)),
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> Value {
        Value::Object(render(&self.attributes))
    }
}

/// Handle to a registered resource, used to build references
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRef {
    address: String,
}

impl ResourceRef {
    pub(crate) fn new(resource: &Resource) -> Self {
        Self {
            address: resource.address(),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Reference one of the resource's attributes
    pub fn get(&self, attribute: &str) -> Reference {
        Reference::new(self.address.clone(), attribute)
    }
}

/// Provider binding (`provider "<name>"`)
#[derive(Debug, Clone, PartialEq)]
pub struct Provider {
    name: ConstructId,
    source: String,
    version: Option<String>,
    alias: Option<ConstructId>,
    attributes: Attributes,
}

impl Provider {
    /// `source` is the registry address (`hashicorp/aws`)
    pub fn new(
        name: impl TryInto<ConstructId, Error = StackError>,
        source: impl Into<String>,
    ) -> StackResult<Self> {
        let name = name.try_into()?;
        let source = source.into();
        if source.trim().is_empty() {
            return Err(StackError::empty_field(format!("provider.{}", name), "source"));
        }
        Ok(Self {
            name,
            source,
            version: None,
            alias: None,
            attributes: Attributes::new(),
        })
    }

    pub fn version(mut self, constraint: impl Into<String>) -> Self {
        self.version = Some(constraint.into());
        self
    }

    pub fn alias(
        mut self,
        alias: impl TryInto<ConstructId, Error = StackError>,
    ) -> StackResult<Self> {
        self.alias = Some(alias.try_into()?);
        Ok(self)
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<Expression>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn name(&self) -> &ConstructId {
        &self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn version_constraint(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn alias_name(&self) -> Option<&ConstructId> {
        self.alias.as_ref()
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Key used for duplicate detection (`aws` or `aws.west`)
    pub fn key(&self) -> String {
        match &self.alias {
            Some(alias) => format!("{}.{}", self.name, alias),
            None => self.name.to_string(),
        }
    }

    pub fn to_json(&self) -> Value {
        let mut body = render(&self.attributes);
        if let Some(alias) = &self.alias {
            body.insert("alias".to_string(), Value::String(alias.to_string()));
        }
        Value::Object(body)
    }
}

/// Stack output (`output "<id>"`)
#[derive(Debug, Clone, PartialEq)]
pub struct Output {
    id: ConstructId,
    value: Expression,
    description: Option<String>,
    sensitive: bool,
}

impl Output {
    pub fn new(
        id: impl TryInto<ConstructId, Error = StackError>,
        value: impl Into<Expression>,
    ) -> StackResult<Self> {
        let id = id.try_into()?;
        let value = value.into();
        if value.is_blank() {
            return Err(StackError::empty_field(format!("output.{}", id), "value"));
        }
        Ok(Self {
            id,
            value,
            description: None,
            sensitive: false,
        })
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn sensitive(mut self, sensitive: bool) -> Self {
        self.sensitive = sensitive;
        self
    }

    pub fn id(&self) -> &ConstructId {
        &self.id
    }

    pub fn value(&self) -> &Expression {
        &self.value
    }

    pub fn to_json(&self) -> Value {
        let mut body = Map::new();
        body.insert("value".to_string(), self.value.to_value());
        if let Some(description) = &self.description {
            body.insert("description".to_string(), Value::String(description.clone()));
        }
        if self.sensitive {
            body.insert("sensitive".to_string(), Value::Bool(true));
        }
        Value::Object(body)
    }
}

/// Call of an external Terraform module (`module "<id>"`)
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleCall {
    id: ConstructId,
    source: String,
    version: Option<String>,
    inputs: Attributes,
}

impl ModuleCall {
    pub fn new(
        id: impl TryInto<ConstructId, Error = StackError>,
        source: impl Into<String>,
    ) -> StackResult<Self> {
        let id = id.try_into()?;
        let source = source.into();
        if source.trim().is_empty() {
            return Err(StackError::empty_field(format!("module.{}", id), "source"));
        }
        Ok(Self {
            id,
            source,
            version: None,
            inputs: Attributes::new(),
        })
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn input(mut self, name: impl Into<String>, value: impl Into<Expression>) -> Self {
        self.inputs.insert(name.into(), value.into());
        self
    }

    pub fn id(&self) -> &ConstructId {
        &self.id
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn inputs(&self) -> &Attributes {
        &self.inputs
    }

    pub fn to_json(&self) -> Value {
        let mut body = render(&self.inputs);
        body.insert("source".to_string(), Value::String(self.source.clone()));
        if let Some(version) = &self.version {
            body.insert("version".to_string(), Value::String(version.clone()));
        }
        Value::Object(body)
    }
}

/// Handle to a registered module call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRef {
    id: ConstructId,
}

impl ModuleRef {
    pub(crate) fn new(module: &ModuleCall) -> Self {
        Self {
            id: module.id.clone(),
        }
    }

    /// Reference one of the module's outputs
    pub fn output(&self, name: &str) -> Reference {
        Reference::new(format!("module.{}", self.id), name)
    }
}
