//! Report output: HTML visualization and stable JSON.

mod html;

use std::path::Path;

use scribecheck_application::{ApplicationError, ApplicationResult};
use serde::Serialize;
use tokio::fs;

use crate::serialization::to_json_stable;

pub use html::{DEFAULT_TEMPLATE, HtmlReportRenderer};

/// Serializes a report value as stable JSON.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
pub fn report_json<T: Serialize + ?Sized>(value: &T) -> ApplicationResult<String> {
    to_json_stable(value).map_err(|e| ApplicationError::Render(e.to_string()))
}

/// Writes rendered report text to `path`, creating parent directories.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub async fn write_report(path: &Path, contents: &str) -> ApplicationResult<()> {
    let render_error =
        |e: std::io::Error| ApplicationError::Render(format!("{}: {e}", path.display()));

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.map_err(render_error)?;
    }
    fs::write(path, contents).await.map_err(render_error)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_report_json_is_stable() {
        let text = report_json(&json!({"passed": 10, "failed": 0})).unwrap();
        assert_eq!(text, "{\n  \"failed\": 0,\n  \"passed\": 10\n}\n");
    }

    #[tokio::test]
    async fn test_write_report_creates_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reports").join("run.html");

        write_report(&path, "<p>ok</p>").await.unwrap();
        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "<p>ok</p>");
    }
}
