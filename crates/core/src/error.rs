// src/error.rs
//! Error types for catalog loading, templating and SVG post-processing.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Failed to read resource '{path}': {message}")]
    ResourceRead { path: String, message: String },
    #[error("Name table is not valid YAML: {0}")]
    NameTable(#[from] serde_yaml::Error),
    #[error("Template parameter '{0}' has no value")]
    MissingTemplateParameter(String),
    #[error("Template error: {0}")]
    Template(String),
    #[error("SVG optimization failed: {0}")]
    Optimize(String),
    #[error("Cannot build sprite fragment: {0}")]
    SpriteFragment(String),
}

impl From<handlebars::TemplateError> for CoreError {
    fn from(e: handlebars::TemplateError) -> Self {
        CoreError::Template(e.to_string())
    }
}

impl From<handlebars::RenderError> for CoreError {
    fn from(e: handlebars::RenderError) -> Self {
        match e.reason() {
            handlebars::RenderErrorReason::MissingVariable(name) => {
                CoreError::MissingTemplateParameter(name.clone().unwrap_or_default())
            }
            _ => CoreError::Template(e.to_string()),
        }
    }
}

impl From<usvg::Error> for CoreError {
    fn from(e: usvg::Error) -> Self {
        CoreError::Optimize(e.to_string())
    }
}
