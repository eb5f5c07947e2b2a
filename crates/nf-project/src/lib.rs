//! nf-project: problem definition documents and their validation.

pub mod schema;
pub mod validate;

pub use schema::*;
pub use validate::{ValidationError, validate_problem};

/// Newest document version this crate understands.
pub const LATEST_VERSION: u32 = 1;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn from_yaml_str(content: &str) -> ProjectResult<ProblemDef> {
    let problem: ProblemDef = serde_yaml::from_str(content)?;
    validate_problem(&problem)?;
    Ok(problem)
}

pub fn from_json_str(content: &str) -> ProjectResult<ProblemDef> {
    let problem: ProblemDef = serde_json::from_str(content)?;
    validate_problem(&problem)?;
    Ok(problem)
}

pub fn load_yaml(path: &std::path::Path) -> ProjectResult<ProblemDef> {
    let content = std::fs::read_to_string(path)?;
    from_yaml_str(&content)
}

pub fn load_json(path: &std::path::Path) -> ProjectResult<ProblemDef> {
    let content = std::fs::read_to_string(path)?;
    from_json_str(&content)
}
