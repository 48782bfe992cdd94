//! Rendering the generated `__init__.py` from `init.template`.
//!
//! Placeholders are `$name` or `${name}`, `$$` is a literal `$`. Substitution
//! is permissive: names without a value and stray `$` signs are kept verbatim.

use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, info};

use crate::error::{BuildError, Result};

/// Template file name in the project root.
pub const TEMPLATE_FILENAME: &str = "init.template";

/// Generated stub name in the output folder.
pub const STUB_FILENAME: &str = "__init__.py";

fn placeholder() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$(?:(\$)|([_A-Za-z][_A-Za-z0-9]*)|\{([_A-Za-z][_A-Za-z0-9]*)\})")
            .expect("placeholder pattern is valid")
    })
}

/// Result of a substitution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    /// Placeholder names that had no value, in order of appearance.
    pub unresolved: Vec<String>,
}

/// Substitute `vars` into `template`, leaving unknown placeholders untouched.
pub fn safe_substitute(template: &str, vars: &BTreeMap<String, String>) -> Rendered {
    let mut unresolved = Vec::new();
    let text = placeholder()
        .replace_all(template, |caps: &Captures| {
            if caps.get(1).is_some() {
                return "$".to_string();
            }
            let name = caps.get(2).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
            match vars.get(name) {
                Some(value) => value.clone(),
                None => {
                    unresolved.push(name.to_string());
                    caps[0].to_string()
                }
            }
        })
        .into_owned();
    Rendered { text, unresolved }
}

/// Render `template_path` with `vars` and write the result to `output_path`.
pub fn render_file(
    template_path: &Path,
    output_path: &Path,
    vars: &BTreeMap<String, String>,
) -> Result<Rendered> {
    let template =
        fs::read_to_string(template_path).map_err(|e| BuildError::io(template_path, e))?;
    let rendered = safe_substitute(&template, vars);

    if !rendered.unresolved.is_empty() {
        debug!(
            "placeholders left in {}: {}",
            output_path.display(),
            rendered.unresolved.join(", ")
        );
    }

    fs::write(output_path, &rendered.text).map_err(|e| BuildError::io(output_path, e))?;
    info!("generated {} from {}", output_path.display(), template_path.display());
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_named_and_braced() {
        let out = safe_substitute(
            "__version__ = '$version'\nreact = '${react}'",
            &vars(&[("version", "1.0.0"), ("react", "16.8.6")]),
        );
        assert_eq!(out.text, "__version__ = '1.0.0'\nreact = '16.8.6'");
        assert!(out.unresolved.is_empty());
    }

    #[test]
    fn test_unknown_placeholders_kept() {
        let out = safe_substitute("$missing and ${other}", &vars(&[]));
        assert_eq!(out.text, "$missing and ${other}");
        assert_eq!(out.unresolved, vec!["missing", "other"]);
    }

    #[test]
    fn test_escape_and_stray_dollar() {
        let out = safe_substitute("cost $$5, $ alone, ${not closed", &vars(&[]));
        assert_eq!(out.text, "cost $5, $ alone, ${not closed");
    }

    #[test]
    fn test_identifier_boundary() {
        let package = vars(&[("package", "dash_renderer")]);
        let out = safe_substitute("${package}_x $package.js", &package);
        assert_eq!(out.text, "dash_renderer_x dash_renderer.js");
    }

    #[test]
    fn test_render_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let template = tmp.path().join(TEMPLATE_FILENAME);
        let output = tmp.path().join(STUB_FILENAME);
        fs::write(&template, "v = '$version'").unwrap();

        render_file(&template, &output, &vars(&[("version", "2.1.0")])).unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "v = '2.1.0'");
    }

    #[test]
    fn test_render_missing_template() {
        let tmp = tempfile::TempDir::new().unwrap();
        let err = render_file(
            &tmp.path().join(TEMPLATE_FILENAME),
            &tmp.path().join(STUB_FILENAME),
            &vars(&[]),
        )
        .unwrap_err();
        assert!(matches!(err, BuildError::Io { .. }));
    }
}
