//! AWS provider and S3 resource shapes

use crate::domain::entities::{Provider, Resource};
use crate::domain::value_objects::Expression;
use crate::error::{StackError, StackResult};

use super::TypedResource;

pub const PROVIDER_NAME: &str = "aws";
pub const PROVIDER_SOURCE: &str = "hashicorp/aws";

pub const S3_BUCKET_TYPE: &str = "aws_s3_bucket";
pub const S3_BUCKET_OBJECT_TYPE: &str = "aws_s3_bucket_object";
/// Successor of `aws_s3_bucket_object` in newer provider releases
pub const S3_OBJECT_TYPE: &str = "aws_s3_object";

pub(super) const S3_BUCKET_REQUIRED: &[&str] = &["bucket"];
pub(super) const S3_OBJECT_REQUIRED: &[&str] = &["bucket", "key", "source"];

/// `provider "aws"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwsProvider {
    pub region: String,
    pub profile: Option<String>,
    pub alias: Option<String>,
}

impl AwsProvider {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            profile: None,
            alias: None,
        }
    }

    pub fn into_provider(self) -> StackResult<Provider> {
        if self.region.trim().is_empty() {
            return Err(StackError::empty_field("provider.aws", "region"));
        }
        let mut provider =
            Provider::new(PROVIDER_NAME, PROVIDER_SOURCE)?.attr("region", self.region);
        if let Some(profile) = self.profile {
            provider = provider.attr("profile", profile);
        }
        if let Some(alias) = self.alias {
            provider = provider.alias(alias.as_str())?;
        }
        Ok(provider)
    }
}

/// `resource "aws_s3_bucket"`
#[derive(Debug, Clone, PartialEq)]
pub struct S3Bucket {
    pub bucket: Expression,
    pub force_destroy: bool,
}

impl S3Bucket {
    pub fn new(bucket: impl Into<Expression>) -> Self {
        Self {
            bucket: bucket.into(),
            force_destroy: false,
        }
    }
}

impl TypedResource for S3Bucket {
    const RESOURCE_TYPE: &'static str = S3_BUCKET_TYPE;

    fn into_resource(self, id: &str) -> StackResult<Resource> {
        let mut resource = Resource::new(Self::RESOURCE_TYPE, id)?.attr("bucket", self.bucket);
        if self.force_destroy {
            resource.set("force_destroy", true);
        }
        Ok(resource)
    }
}

/// `resource "aws_s3_bucket_object"`
///
/// `key` and `source` are normally the asset's file name and path.
#[derive(Debug, Clone, PartialEq)]
pub struct S3BucketObject {
    pub bucket: Expression,
    pub key: Expression,
    pub source: Expression,
    pub content_type: Option<String>,
}

impl S3BucketObject {
    pub fn new(
        bucket: impl Into<Expression>,
        key: impl Into<Expression>,
        source: impl Into<Expression>,
    ) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
            source: source.into(),
            content_type: None,
        }
    }
}

impl TypedResource for S3BucketObject {
    const RESOURCE_TYPE: &'static str = S3_BUCKET_OBJECT_TYPE;

    fn into_resource(self, id: &str) -> StackResult<Resource> {
        let mut resource = Resource::new(Self::RESOURCE_TYPE, id)?
            .attr("bucket", self.bucket)
            .attr("key", self.key)
            .attr("source", self.source);
        if let Some(content_type) = self.content_type {
            resource.set("content_type", content_type);
        }
        Ok(resource)
    }
}
