//! Line-level rewriting of TypeScript sources: the app constants module and
//! the Expo `app.config.ts`.

use crate::error::{ReleaseBumpError, Result};
use regex::{Captures, Regex};

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| ReleaseBumpError::manifest(format!("Invalid pattern: {}", e)))
}

fn constant_regex(name: &str) -> Result<Regex> {
    compile(&format!(
        r#"(?m)^(?P<head>[ \t]*(?:export[ \t]+)?const[ \t]+{}\b[^=\n]*=[ \t]*)["'](?P<value>[^"'\n]*)["'](?P<tail>[^\n]*)$"#,
        regex::escape(name)
    ))
}

/// Returns the string value assigned to `const <name>`, if declared.
pub fn read_constant(content: &str, name: &str) -> Result<Option<String>> {
    let re = constant_regex(name)?;
    Ok(re
        .captures(content)
        .map(|caps| caps["value"].to_string()))
}

/// Replaces the value of the first `const <name>` declaration.
///
/// Returns `None` when the constant is not declared.
pub fn write_constant(content: &str, name: &str, value: &str) -> Result<Option<String>> {
    let re = constant_regex(name)?;
    if !re.is_match(content) {
        return Ok(None);
    }

    let rendered = re.replacen(content, 1, |caps: &Captures| {
        format!("{}\"{}\"{}", &caps["head"], value, &caps["tail"])
    });
    Ok(Some(rendered.into_owned()))
}

fn expo_version_regex() -> Result<Regex> {
    compile(r#"(?m)^(?P<head>[ \t]+version:[ \t]*)["'](?P<value>[^"'\n]*)["'](?P<tail>[^\n]*)$"#)
}

fn expo_version_code_regex() -> Result<Regex> {
    compile(r"(?m)^(?P<head>[ \t]+versionCode:[ \t]*)(?P<code>\d+)(?P<tail>[^\n]*)$")
}

/// Returns the `version: "…"` value of an Expo config.
pub fn read_expo_version(content: &str) -> Result<Option<String>> {
    let re = expo_version_regex()?;
    Ok(re.captures(content).map(|caps| caps["value"].to_string()))
}

/// Returns the Android `versionCode` of an Expo config.
pub fn read_expo_version_code(content: &str) -> Result<Option<u32>> {
    let re = expo_version_code_regex()?;
    re.captures(content)
        .map(|caps| super::parse_build_code(&caps["code"]))
        .transpose()
}

/// Rewrites every `version:` field and, when a build code is given, every
/// `versionCode:` field of an Expo config.
///
/// Returns `None` when the config has no `version:` field.
pub fn write_expo_config(
    content: &str,
    version: &str,
    build_code: Option<u32>,
) -> Result<Option<String>> {
    let version_re = expo_version_regex()?;
    if !version_re.is_match(content) {
        return Ok(None);
    }

    let rendered = version_re.replace_all(content, |caps: &Captures| {
        format!("{}\"{}\"{}", &caps["head"], version, &caps["tail"])
    });

    let rendered = match build_code {
        Some(code) => expo_version_code_regex()?
            .replace_all(&rendered, |caps: &Captures| {
                format!("{}{}{}", &caps["head"], code, &caps["tail"])
            })
            .into_owned(),
        None => rendered.into_owned(),
    };

    Ok(Some(rendered))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONSTANTS: &str = "export const APP_VERSION = \"v1.2.3\";\n\nexport const REPO = \"https://example.com\";\n";

    const EXPO: &str = r#"import type { ExpoConfig } from "expo/config";

const config: ExpoConfig = {
  name: "Music",
  slug: "music",
  version: "1.2.3",
  runtimeVersion: "1.0.0",
  android: {
    package: "com.example.music",
    versionCode: 41,
  },
};

export default config;
"#;

    #[test]
    fn test_read_constant() {
        assert_eq!(
            read_constant(CONSTANTS, "APP_VERSION").unwrap(),
            Some("v1.2.3".to_string())
        );
        assert_eq!(read_constant(CONSTANTS, "MISSING").unwrap(), None);
    }

    #[test]
    fn test_read_constant_does_not_match_prefix_names() {
        let content = "export const APP_VERSION_CODE = \"7\";\n";
        assert_eq!(read_constant(content, "APP_VERSION").unwrap(), None);
    }

    #[test]
    fn test_read_constant_with_type_annotation() {
        let content = "export const APP_VERSION: string = 'v0.9.0';\n";
        assert_eq!(
            read_constant(content, "APP_VERSION").unwrap(),
            Some("v0.9.0".to_string())
        );
    }

    #[test]
    fn test_write_constant_keeps_other_lines() {
        let rendered = write_constant(CONSTANTS, "APP_VERSION", "v1.3.0-rc.1")
            .unwrap()
            .unwrap();
        assert_eq!(
            rendered,
            "export const APP_VERSION = \"v1.3.0-rc.1\";\n\nexport const REPO = \"https://example.com\";\n"
        );
    }

    #[test]
    fn test_write_constant_missing() {
        assert!(write_constant("const OTHER = 1;\n", "APP_VERSION", "v1.0.0")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_read_expo_fields() {
        assert_eq!(read_expo_version(EXPO).unwrap(), Some("1.2.3".to_string()));
        assert_eq!(read_expo_version_code(EXPO).unwrap(), Some(41));
    }

    #[test]
    fn test_read_expo_version_code_out_of_range() {
        let content = "export default {\n  android: {\n    versionCode: 4294967296,\n  },\n};\n";
        let err = read_expo_version_code(content).unwrap_err();
        assert!(err.to_string().starts_with("Manifest error"));
    }

    #[test]
    fn test_write_expo_config() {
        let rendered = write_expo_config(EXPO, "1.3.0", Some(42)).unwrap().unwrap();
        assert!(rendered.contains("  version: \"1.3.0\",\n"));
        assert!(rendered.contains("    versionCode: 42,\n"));
        assert!(rendered.contains("  runtimeVersion: \"1.0.0\",\n"));
        assert!(rendered.contains("  slug: \"music\",\n"));
    }

    #[test]
    fn test_write_expo_config_without_build_code() {
        let rendered = write_expo_config(EXPO, "1.3.0", None).unwrap().unwrap();
        assert!(rendered.contains("    versionCode: 41,\n"));
    }

    #[test]
    fn test_write_expo_config_missing_version() {
        assert!(write_expo_config("export default {};\n", "1.0.0", Some(1))
            .unwrap()
            .is_none());
    }
}
