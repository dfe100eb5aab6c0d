//! Scenario: upload an archived lambda directory into an S3 bucket.

use std::fs;

use terrastack::application::synth::Manifest;
use terrastack::{
    App, AssetType, AwsProvider, S3Bucket, S3BucketObject, Stack, StackError,
};

use crate::common::write_lambda_dir;

fn declare(app: &App, key_override: Option<&str>) -> Result<Stack, StackError> {
    let lambda = write_lambda_dir(app.outdir().parent().unwrap());

    let mut stack = Stack::new(app, "demo")?;
    stack.add_provider(AwsProvider::new("eu-central-1").into_provider()?)?;
    let asset = stack.add_asset("lambda-asset", &lambda, AssetType::Archive)?;
    let bucket = stack.add("bucket", S3Bucket::new("demo"))?;
    stack.add(
        "lambda-archive",
        S3BucketObject::new(
            bucket.get("bucket"),
            key_override.unwrap_or(asset.file_name()),
            asset.path(),
        ),
    )?;
    Ok(stack)
}

#[test]
fn synthesizes_one_bucket_and_one_object() {
    let work = tempfile::tempdir().unwrap();
    let mut app = App::new(work.path().join("cdktf.out"));
    let stack = declare(&app, None).unwrap();
    let asset = stack.asset("lambda-asset").unwrap().clone();
    app.add_stack(stack).unwrap();

    let report = app.synth().unwrap();
    let plan = report.plan("demo").unwrap().unwrap();

    let buckets = plan.resources_of("aws_s3_bucket");
    assert_eq!(buckets.len(), 1);
    assert_eq!(buckets[0].1["bucket"], "demo");

    let objects = plan.resources_of("aws_s3_bucket_object");
    assert_eq!(objects.len(), 1);
    let (id, object) = objects[0];
    assert_eq!(id, "lambda-archive");
    assert_eq!(object["bucket"], "${aws_s3_bucket.bucket.bucket}");
    assert_eq!(object["key"], asset.file_name());
    assert_eq!(object["source"], asset.path());

    assert!(asset.file_name().ends_with(".tar.gz"));
    assert!(asset.staged_path().is_file());
    assert_eq!(
        report.stacks[0].plan_path.parent().unwrap().join(asset.path()),
        asset.staged_path()
    );
}

#[test]
fn manifest_lists_the_asset() {
    let work = tempfile::tempdir().unwrap();
    let outdir = work.path().join("cdktf.out");
    let mut app = App::new(&outdir);
    let stack = declare(&app, None).unwrap();
    app.add_stack(stack).unwrap();
    app.synth().unwrap();

    let manifest = Manifest::load(&outdir).unwrap();
    let demo = &manifest.stacks["demo"];
    assert_eq!(demo.working_directory, "stacks/demo");
    assert_eq!(demo.assets.len(), 1);
    assert_eq!(demo.assets[0].id, "lambda-asset");

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(outdir.join("manifest.json")).unwrap())
            .unwrap();
    assert_eq!(raw["stacks"]["demo"]["synthesizedStackPath"], "stacks/demo/cdk.tf.json");
}

#[test]
fn empty_key_fails_before_synthesis() {
    let work = tempfile::tempdir().unwrap();
    let outdir = work.path().join("cdktf.out");
    let app = App::new(&outdir);

    let err = declare(&app, Some("")).unwrap_err();

    match err {
        StackError::InvalidField { resource, field, .. } => {
            assert_eq!(resource, "aws_s3_bucket_object.lambda-archive");
            assert_eq!(field, "key");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!outdir.join("manifest.json").exists());
    assert!(!outdir.join("stacks/demo/cdk.tf.json").exists());
}

#[test]
fn unchanged_app_resynthesizes_identically() {
    let work = tempfile::tempdir().unwrap();
    let outdir = work.path().join("cdktf.out");

    let mut first = App::new(&outdir);
    let stack = declare(&first, None).unwrap();
    first.add_stack(stack).unwrap();
    let report = first.synth().unwrap();
    let plan_a = fs::read(&report.stacks[0].plan_path).unwrap();

    let mut second = App::new(&outdir);
    let stack = declare(&second, None).unwrap();
    second.add_stack(stack).unwrap();
    let report = second.synth().unwrap();

    assert_eq!(fs::read(&report.stacks[0].plan_path).unwrap(), plan_a);
}
