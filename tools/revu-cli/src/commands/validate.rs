//! Validate tenant config files.

use std::fs;
use std::path::Path;

use anyhow::{bail, Result};
use serde::Serialize;

use revu_tenant::is_valid_key;

use super::ValidateArgs;
use crate::context::Context;

/// Fields the site reads from a tenant config.
const KNOWN_FIELDS: &[&str] = &[
    "name",
    "companyName",
    "city",
    "serviceArea",
    "googleReviewLink",
    "variant",
];

/// Validation report for one configs directory.
#[derive(Debug, Serialize)]
pub struct ValidationReport {
    pub checked_at: chrono::DateTime<chrono::Utc>,
    pub files: Vec<FileReport>,
    pub errors: usize,
    pub warnings: usize,
}

/// Validation outcome for one config file.
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub file: String,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Run the validate command.
pub async fn run(args: ValidateArgs, ctx: &Context) -> Result<()> {
    let dir = match &args.path {
        Some(path) => ctx.resolve_path(path),
        None => ctx.configs_dir(),
    };

    if !dir.is_dir() {
        bail!("Configs directory not found: {}", dir.display());
    }

    let mut entries: Vec<_> = fs::read_dir(&dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().map(|ext| ext == "json").unwrap_or(false))
        .collect();
    entries.sort();

    ctx.output
        .header(&format!("Validating {} ({} files)", dir.display(), entries.len()));

    let pb = ctx.output.progress(entries.len() as u64, "checking");
    let mut files = Vec::new();
    for path in &entries {
        ctx.output.debug(&format!("checking {}", path.display()));
        files.push(validate_file(path));
        pb.inc(1);
    }
    pb.finish_and_clear();

    let errors: usize = files.iter().map(|f| f.errors.len()).sum();
    let warnings: usize = files.iter().map(|f| f.warnings.len()).sum();

    let report = ValidationReport {
        checked_at: chrono::Utc::now(),
        files,
        errors,
        warnings,
    };

    if ctx.output.is_json() {
        ctx.output.json(&report);
    } else {
        for file in &report.files {
            for error in &file.errors {
                ctx.output.error(&format!("{}: {}", file.file, error));
            }
            for warning in &file.warnings {
                ctx.output.warn(&format!("{}: {}", file.file, warning));
            }
        }
    }

    if errors > 0 {
        bail!("{} config error(s) in {}", errors, dir.display());
    }

    if warnings > 0 {
        ctx.output
            .success(&format!("All configs valid ({} warning(s))", warnings));
    } else {
        ctx.output.success("All configs valid");
    }

    Ok(())
}

/// Validate one `<key>.json` file.
pub fn validate_file(path: &Path) -> FileReport {
    let file = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    if !is_valid_key(&stem) {
        warnings.push(format!(
            "'{}' is not resolvable as a tenant key (letters, digits, '-' and '_' only)",
            stem
        ));
    }

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            errors.push(format!("unreadable: {}", e));
            return FileReport { file, errors, warnings };
        }
    };

    let value: serde_json::Value = match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            errors.push(format!("invalid JSON: {}", e));
            return FileReport { file, errors, warnings };
        }
    };

    let Some(object) = value.as_object() else {
        errors.push("top-level value must be a JSON object".to_string());
        return FileReport { file, errors, warnings };
    };

    for (key, field) in object {
        if !KNOWN_FIELDS.contains(&key.as_str()) {
            warnings.push(format!("unknown field '{}' is ignored by the site", key));
            continue;
        }
        if key == "variant" {
            match field.as_str() {
                Some("classic") | Some("curated") => {}
                Some(other) => {
                    errors.push(format!(
                        "variant must be 'classic' or 'curated', got '{}'",
                        other
                    ));
                }
                None => errors.push("variant must be a string".to_string()),
            }
        } else if !field.is_string() {
            errors.push(format!("field '{}' must be a string", key));
        }
    }

    let has_display_name = ["companyName", "name"].iter().any(|k| {
        object
            .get(*k)
            .and_then(|v| v.as_str())
            .map(|s| !s.trim().is_empty())
            .unwrap_or(false)
    });
    if !has_display_name {
        warnings.push("no companyName or name; pages fall back to the generic display name".to_string());
    }

    if let Some(link) = object.get("googleReviewLink").and_then(|v| v.as_str()) {
        if !link.starts_with("https://") && !link.starts_with("http://") && link != "#" {
            warnings.push(format!(
                "googleReviewLink '{}' is not an http(s) URL",
                link
            ));
        }
    }

    FileReport { file, errors, warnings }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join("revu-cli-validate-tests");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_valid_config_has_no_errors() {
        let path = write_temp(
            "summit.json",
            r#"{"companyName": "Summit Roofing", "city": "Denver", "variant": "classic"}"#,
        );
        let report = validate_file(&path);
        assert!(report.errors.is_empty(), "{:?}", report.errors);
        assert!(report.warnings.is_empty(), "{:?}", report.warnings);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let path = write_temp("broken.json", "{not json");
        let report = validate_file(&path);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("invalid JSON"));
    }

    #[test]
    fn test_unknown_fields_warn_but_pass() {
        let path = write_temp(
            "extra.json",
            r##"{"companyName": "X", "themeColor": "#fff"}"##,
        );
        let report = validate_file(&path);
        assert!(report.errors.is_empty());
        assert!(report.warnings.iter().any(|w| w.contains("themeColor")));
    }

    #[test]
    fn test_bad_variant_is_an_error() {
        let path = write_temp("variant.json", r#"{"companyName": "X", "variant": "bespoke"}"#);
        let report = validate_file(&path);
        assert!(report.errors.iter().any(|e| e.contains("variant")));
    }

    #[test]
    fn test_nameless_config_warns_about_fallback() {
        let path = write_temp("nameless.json", r#"{"city": "Austin"}"#);
        let report = validate_file(&path);
        assert!(report
            .warnings
            .iter()
            .any(|w| w.contains("generic display name")));
    }
}
