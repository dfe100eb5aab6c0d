//! Reusable project content.

use std::path::Path;

/// Body of the single-file lambda used by most scenarios
pub const LAMBDA_HANDLER: &str = "def handler(event, context):\n    return {\"ok\": True}\n";

/// Stack file declaring the bucket + archived lambda example
pub const LAMBDA_STACK_FILE: &str = r#"[stack]
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
"#;

/// Create `lambda/index.py` below `root`.
pub fn write_lambda_dir(root: &Path) -> std::path::PathBuf {
    let dir = root.join("lambda");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("index.py"), LAMBDA_HANDLER).unwrap();
    dir
}
