//! Declarative stack files (`terrastack.toml`)
//!
//! A stack file declares one stack in TOML. Assets are packaged in file
//! order and may be referenced from later string values with
//! `${asset.<id>.file_name}`, `${asset.<id>.path}` or `${asset.<id>.hash}`.
//! Other `${...}` interpolations pass through untouched to Terraform.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::application::{App, Stack};
use crate::config::{unknown_key_warnings, AppSection, ConfigWarning};
use crate::domain::entities::{Asset, ModuleCall, Output, Provider, Resource};
use crate::domain::resources::aws;
use crate::domain::value_objects::{AssetType, Expression};
use crate::error::{StackError, StackResult};

/// Default stack file name, looked up in the working directory
pub const STACK_FILE_NAME: &str = "terrastack.toml";

const ASSET_PLACEHOLDER: &str = "${asset.";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StackSection {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderDecl {
    pub name: String,
    /// Registry address; defaults to `hashicorp/<name>`
    pub source: Option<String>,
    pub version: Option<String>,
    pub alias: Option<String>,
    #[serde(flatten)]
    pub attributes: BTreeMap<String, toml::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetDecl {
    pub id: String,
    /// Relative to the stack file's directory
    pub path: PathBuf,
    #[serde(rename = "type", default)]
    pub asset_type: AssetType,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResourceDecl {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub id: String,
    #[serde(flatten)]
    pub attributes: BTreeMap<String, toml::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputDecl {
    pub id: String,
    pub value: toml::Value,
    pub description: Option<String>,
    #[serde(default)]
    pub sensitive: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModuleDecl {
    pub id: String,
    pub source: String,
    pub version: Option<String>,
    #[serde(default)]
    pub inputs: BTreeMap<String, toml::Value>,
}

/// Parsed stack file
#[derive(Debug, Clone, Deserialize)]
pub struct StackFile {
    #[serde(default)]
    pub app: AppSection,
    pub stack: StackSection,
    #[serde(default)]
    pub providers: Vec<ProviderDecl>,
    #[serde(default)]
    pub assets: Vec<AssetDecl>,
    #[serde(default)]
    pub resources: Vec<ResourceDecl>,
    #[serde(default)]
    pub outputs: Vec<OutputDecl>,
    #[serde(default)]
    pub modules: Vec<ModuleDecl>,
    /// Directory asset paths are resolved against
    #[serde(skip)]
    base_dir: PathBuf,
}

impl StackFile {
    /// Read and parse a stack file, collecting unknown-key warnings.
    pub fn load(path: &Path) -> StackResult<(Self, Vec<ConfigWarning>)> {
        let content = fs::read_to_string(path).map_err(|e| StackError::Config {
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let (mut file, warnings) = Self::parse(&content, path)?;
        file.base_dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Ok((file, warnings))
    }

    /// Parse stack file content; `path` is only used in diagnostics.
    pub fn parse(content: &str, path: &Path) -> StackResult<(Self, Vec<ConfigWarning>)> {
        let mut unknown_paths: Vec<String> = Vec::new();
        let deserializer = toml::de::Deserializer::new(content);
        let file: StackFile = serde_ignored::deserialize(deserializer, |p| {
            unknown_paths.push(p.to_string());
        })
        .map_err(|e| StackError::Config {
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let warnings = unknown_key_warnings(path, content, unknown_paths);
        Ok((file.with_base_dir("."), warnings))
    }

    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Construct the declared stack against `app`.
    ///
    /// Assets are packaged (and staged) as a side effect.
    pub fn build(&self, app: &App) -> StackResult<Stack> {
        let mut stack = Stack::new(app, &self.stack.name)?;

        for decl in &self.providers {
            let source = decl
                .source
                .clone()
                .unwrap_or_else(|| default_provider_source(&decl.name));
            let mut provider = Provider::new(decl.name.as_str(), source)?;
            if let Some(version) = &decl.version {
                provider = provider.version(version.as_str());
            }
            if let Some(alias) = &decl.alias {
                provider = provider.alias(alias.as_str())?;
            }
            for (key, value) in &decl.attributes {
                provider = provider.attr(key.as_str(), to_expression(value, stack.assets())?);
            }
            stack.add_provider(provider)?;
        }

        for decl in &self.assets {
            let source = self.base_dir.join(&decl.path);
            stack.add_asset(&decl.id, &source, decl.asset_type)?;
        }

        for decl in &self.resources {
            let mut resource = Resource::new(decl.resource_type.as_str(), decl.id.as_str())?;
            for (key, value) in &decl.attributes {
                resource.set(key.as_str(), to_expression(value, stack.assets())?);
            }
            stack.add_resource(resource)?;
        }

        for decl in &self.modules {
            let mut module = ModuleCall::new(decl.id.as_str(), decl.source.as_str())?;
            if let Some(version) = &decl.version {
                module = module.version(version.as_str());
            }
            for (key, value) in &decl.inputs {
                module = module.input(key.as_str(), to_expression(value, stack.assets())?);
            }
            stack.add_module(module)?;
        }

        for decl in &self.outputs {
            let value = to_expression(&decl.value, stack.assets())?;
            let mut output = Output::new(decl.id.as_str(), value)?.sensitive(decl.sensitive);
            if let Some(description) = &decl.description {
                output = output.description(description.as_str());
            }
            stack.add_output(output)?;
        }

        Ok(stack)
    }
}

fn default_provider_source(name: &str) -> String {
    if name == aws::PROVIDER_NAME {
        aws::PROVIDER_SOURCE.to_string()
    } else {
        format!("hashicorp/{}", name)
    }
}

fn to_expression(value: &toml::Value, assets: &[Asset]) -> StackResult<Expression> {
    let json = serde_json::to_value(value)?;
    Ok(Expression::Literal(resolve_value(json, assets)?))
}

fn resolve_value(value: Value, assets: &[Asset]) -> StackResult<Value> {
    Ok(match value {
        Value::String(s) => Value::String(resolve_placeholders(&s, assets)?),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|v| resolve_value(v, assets))
                .collect::<StackResult<_>>()?,
        ),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| Ok((k, resolve_value(v, assets)?)))
                .collect::<StackResult<_>>()?,
        ),
        other => other,
    })
}

/// Replace every `${asset.<id>.<attr>}` in `input`.
pub fn resolve_placeholders(input: &str, assets: &[Asset]) -> StackResult<String> {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find(ASSET_PLACEHOLDER) {
        out.push_str(&rest[..start]);
        let after = &rest[start + ASSET_PLACEHOLDER.len()..];
        let end = after.find('}').ok_or_else(|| StackError::UnresolvedReference {
            reference: rest[start..].to_string(),
        })?;
        let inner = &after[..end];
        let reference = format!("{}{}}}", ASSET_PLACEHOLDER, inner);

        let resolved = inner
            .split_once('.')
            .and_then(|(id, attr)| {
                assets
                    .iter()
                    .find(|a| a.id().as_str() == id)
                    .and_then(|a| a.attribute(attr))
            })
            .ok_or(StackError::UnresolvedReference { reference })?;

        out.push_str(resolved);
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const DEMO: &str = r#"
[stack]
name = "demo"

[[providers]]
name = "aws"
region = "eu-central-1"

[[assets]]
id = "lambda-asset"
path = "lambda"
type = "archive"

[[resources]]
type = "aws_s3_bucket"
id = "bucket"
bucket = "demo"

[[resources]]
type = "aws_s3_bucket_object"
id = "lambda-archive"
bucket = "${aws_s3_bucket.bucket.bucket}"
key = "${asset.lambda-asset.file_name}"
source = "${asset.lambda-asset.path}"

[[outputs]]
id = "archive-key"
value = "${aws_s3_bucket_object.lambda-archive.key}"
"#;

    fn project() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("lambda")).unwrap();
        fs::write(dir.path().join("lambda/index.py"), "def handler(e, c):\n    pass\n").unwrap();
        fs::write(dir.path().join(STACK_FILE_NAME), DEMO).unwrap();
        dir
    }

    #[test]
    fn parses_demo_file() {
        let (file, warnings) = StackFile::parse(DEMO, Path::new(STACK_FILE_NAME)).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(file.stack.name, "demo");
        assert_eq!(file.assets[0].asset_type, AssetType::Archive);
        assert_eq!(file.resources.len(), 2);
        assert_eq!(
            file.resources[0].attributes["bucket"],
            toml::Value::String("demo".to_string())
        );
    }

    #[test]
    fn builds_stack_with_resolved_asset_placeholders() {
        let dir = project();
        let (file, _) = StackFile::load(&dir.path().join(STACK_FILE_NAME)).unwrap();
        let app = App::new(dir.path().join("out"));

        let stack = file.build(&app).unwrap();
        let asset = stack.asset("lambda-asset").unwrap();
        let object = stack
            .resource("aws_s3_bucket_object", "lambda-archive")
            .unwrap();

        assert_eq!(object.get("key").unwrap().as_literal_str(), Some(asset.file_name()));
        assert_eq!(object.get("source").unwrap().as_literal_str(), Some(asset.path()));
        assert_eq!(
            object.get("bucket").unwrap().as_literal_str(),
            Some("${aws_s3_bucket.bucket.bucket}")
        );
        assert_eq!(stack.providers()[0].source(), "hashicorp/aws");
    }

    #[test]
    fn unknown_top_level_key_warns() {
        let content = format!("resource = []\n{}", DEMO);
        let (_, warnings) = StackFile::parse(&content, Path::new(STACK_FILE_NAME)).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].key, "resource");
        assert_eq!(warnings[0].suggestion.as_deref(), Some("resources"));
    }

    #[test]
    fn missing_stack_table_is_config_error() {
        let err = StackFile::parse("[app]\n", Path::new(STACK_FILE_NAME)).unwrap_err();
        assert!(matches!(err, StackError::Config { .. }));
    }

    #[test]
    fn unknown_asset_reference_fails() {
        let err = resolve_placeholders("${asset.nope.path}", &[]).unwrap_err();
        assert!(matches!(
            err,
            StackError::UnresolvedReference { ref reference } if reference == "${asset.nope.path}"
        ));
    }

    #[test]
    fn unterminated_placeholder_fails() {
        assert!(resolve_placeholders("${asset.x.path", &[]).is_err());
    }

    #[test]
    fn non_asset_interpolations_pass_through() {
        assert_eq!(
            resolve_placeholders("s3://${aws_s3_bucket.b.bucket}/k", &[]).unwrap(),
            "s3://${aws_s3_bucket.b.bucket}/k"
        );
    }

    #[test]
    fn empty_key_fails_before_synthesis() {
        let dir = project();
        let content = DEMO.replace("${asset.lambda-asset.file_name}", "");
        let (file, _) = StackFile::parse(&content, Path::new(STACK_FILE_NAME)).unwrap();
        let app = App::new(dir.path().join("out"));

        let err = file.with_base_dir(dir.path()).build(&app).unwrap_err();
        assert!(matches!(err, StackError::InvalidField { ref field, .. } if field == "key"));
        assert!(!dir.path().join("out").join("manifest.json").exists());
    }
}
