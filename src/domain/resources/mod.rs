//! Typed resource shapes
//!
//! Thin typed front-ends over [`Resource`](crate::domain::entities::Resource)
//! for the resource types this crate knows about. Known types carry a list of
//! required attributes that is enforced whether the resource was built through
//! the typed shape or declared generically (e.g. from a stack file).

pub mod aws;

pub use aws::{AwsProvider, S3Bucket, S3BucketObject};

use crate::domain::entities::Resource;
use crate::error::StackResult;

/// A resource with a fixed Terraform type
pub trait TypedResource {
    const RESOURCE_TYPE: &'static str;

    /// Convert into a generic resource with the given id
    fn into_resource(self, id: &str) -> StackResult<Resource>;
}

/// Attributes that must be present and non-empty for a resource type
pub fn required_attributes(resource_type: &str) -> &'static [&'static str] {
    match resource_type {
        aws::S3_BUCKET_TYPE => aws::S3_BUCKET_REQUIRED,
        aws::S3_BUCKET_OBJECT_TYPE | aws::S3_OBJECT_TYPE => aws::S3_OBJECT_REQUIRED,
        _ => &[],
    }
}
