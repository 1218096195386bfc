use crate::error::{ReleaseBumpError, Result};
use serde_json::Value;

/// Returns the top-level `"version"` of a package.json document.
pub fn read_version(content: &str) -> Result<Option<String>> {
    let document: Value = serde_json::from_str(content)?;
    Ok(document
        .get("version")
        .and_then(Value::as_str)
        .map(str::to_string))
}

/// Sets the top-level `"version"`, keeping key order, with 2-space
/// indentation and a trailing newline.
pub fn write_version(content: &str, version: &str) -> Result<String> {
    let mut document: Value = serde_json::from_str(content)?;
    let object = document.as_object_mut().ok_or_else(|| {
        ReleaseBumpError::manifest("package.json root must be a JSON object")
    })?;
    object.insert("version".to_string(), Value::String(version.to_string()));

    let mut rendered = serde_json::to_string_pretty(&document)?;
    rendered.push('\n');
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PACKAGE: &str = r#"{
  "name": "music",
  "version": "1.2.3",
  "private": true,
  "scripts": {
    "start": "expo start"
  }
}
"#;

    #[test]
    fn test_read_version() {
        assert_eq!(read_version(PACKAGE).unwrap(), Some("1.2.3".to_string()));
        assert_eq!(read_version("{\"name\": \"x\"}").unwrap(), None);
    }

    #[test]
    fn test_write_version_preserves_order_and_layout() {
        let rendered = write_version(PACKAGE, "2.0.0-rc.1").unwrap();
        assert_eq!(rendered, PACKAGE.replace("1.2.3", "2.0.0-rc.1"));
    }

    #[test]
    fn test_write_version_inserts_missing_key() {
        let rendered = write_version("{\"name\": \"music\"}", "1.0.0").unwrap();
        assert_eq!(
            rendered,
            "{\n  \"name\": \"music\",\n  \"version\": \"1.0.0\"\n}\n"
        );
    }

    #[test]
    fn test_write_version_rejects_non_object() {
        let err = write_version("[1, 2]", "1.0.0").unwrap_err();
        assert!(err.to_string().contains("JSON object"));
    }

    #[test]
    fn test_invalid_json() {
        assert!(read_version("{ not json").is_err());
    }
}
