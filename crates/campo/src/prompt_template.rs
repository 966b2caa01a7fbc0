use std::fs;
use std::path::PathBuf;

use regex::Regex;
use serde::Serialize;
use tera::{Context, Tera};

use crate::errors::{CampoError, Result};

/// Every value a template may reference. Templates naming anything else are
/// rejected when they are built.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PromptContext {
    pub agent_name: String,
    pub region: String,
    pub language: String,
    pub date_context: String,
    pub data: String,
    pub products: String,
    pub topic: String,
    pub limit: usize,
}

impl PromptContext {
    pub const FIELDS: [&'static str; 8] = [
        "agent_name",
        "region",
        "language",
        "date_context",
        "data",
        "products",
        "topic",
        "limit",
    ];
}

// the variable at the head of `{{ name }}` or `{{ name | filter }}`
const PLACEHOLDER: &str = r"\{\{-?\s*([A-Za-z_][A-Za-z0-9_]*)[^}]*\}\}";

#[derive(Debug)]
pub struct PromptTemplate {
    name: String,
    placeholders: Vec<String>,
    tera: Tera,
}

impl PromptTemplate {
    pub fn new(name: impl Into<String>, body: &str) -> Result<Self> {
        let name = name.into();

        let mut placeholders: Vec<String> = Vec::new();
        let pattern = Regex::new(PLACEHOLDER)
            .map_err(|e| CampoError::Template(format!("placeholder pattern: {}", e)))?;
        for capture in pattern.captures_iter(body) {
            let field = &capture[1];
            if !PromptContext::FIELDS.contains(&field) {
                return Err(CampoError::Template(format!(
                    "unknown placeholder `{}` in template {}",
                    field, name
                )));
            }
            if !placeholders.iter().any(|p| p == field) {
                placeholders.push(field.to_string());
            }
        }

        let mut tera = Tera::default();
        tera.add_raw_template(&name, body)?;

        Ok(Self {
            name,
            placeholders,
            tera,
        })
    }

    pub fn from_file(name: impl Into<String>, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let body = fs::read_to_string(&path).map_err(|e| {
            CampoError::Template(format!("failed to read template {}: {}", path.display(), e))
        })?;
        Self::new(name, &body)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Placeholders in order of first appearance.
    pub fn placeholders(&self) -> &[String] {
        &self.placeholders
    }

    pub fn render(&self, context: &PromptContext) -> Result<String> {
        let context = Context::from_serialize(context)?;
        Ok(self.tera.render(&self.name, &context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> PromptContext {
        PromptContext {
            agent_name: "PREDICTOR_INUNDACIONES".to_string(),
            region: "Colombia".to_string(),
            language: "ESPAÑOL".to_string(),
            date_context: "Fecha actual: hoy".to_string(),
            data: "rain \"heavy\" <north>".to_string(),
            products: "café, cacao".to_string(),
            topic: "inundaciones".to_string(),
            limit: 3,
        }
    }

    #[test]
    fn test_render_substitutes_fields() {
        let template =
            PromptTemplate::new("t", "Region {{ region }} in {{language}}: {{ data }}").unwrap();
        let rendered = template.render(&context()).unwrap();
        // plain-text templates are not html escaped
        assert_eq!(rendered, "Region Colombia in ESPAÑOL: rain \"heavy\" <north>");
    }

    #[test]
    fn test_placeholders_are_ordered_and_unique() {
        let template = PromptTemplate::new(
            "t",
            "{{ region }} {{ data }} {{ region | upper }} {{ limit }}",
        )
        .unwrap();
        assert_eq!(template.placeholders(), &["region", "data", "limit"]);
        assert_eq!(template.render(&context()).unwrap(), "Colombia rain \"heavy\" <north> COLOMBIA 3");
    }

    #[test]
    fn test_unknown_placeholder_fails_at_construction() {
        let err = PromptTemplate::new("bad", "Hello {{ farmer }}").unwrap_err();
        match err {
            CampoError::Template(msg) => assert!(msg.contains("farmer")),
            other => panic!("Expected Template error, got {:?}", other),
        }
    }

    #[test]
    fn test_syntax_error_fails_at_construction() {
        assert!(PromptTemplate::new("bad", "{% if region %}unterminated").is_err());
    }

    #[test]
    fn test_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file_path = temp_dir.path().join("flood.txt");
        fs::write(&file_path, "Inundaciones en {{ region }}").unwrap();

        let template = PromptTemplate::from_file("flood", &file_path).unwrap();
        assert_eq!(template.render(&context()).unwrap(), "Inundaciones en Colombia");
    }

    #[test]
    fn test_from_missing_file() {
        let result = PromptTemplate::from_file("missing", "non_existent_template.txt");
        assert!(matches!(result, Err(CampoError::Template(_))));
    }
}
