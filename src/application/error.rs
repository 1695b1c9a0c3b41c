// Generation errors
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("duplicate dashboard uid: {uid}")]
    DuplicateUid { uid: String },

    #[error("dashboard {dashboard}: {location} references undeclared variable ${variable}")]
    UndeclaredVariable {
        dashboard: String,
        variable: String,
        location: String,
    },

    #[error("dashboard {dashboard}: {location} binds ${variable}, which is not a {expected} data source variable")]
    DataSourceMismatch {
        dashboard: String,
        variable: String,
        location: String,
        expected: &'static str,
    },

    #[error("dashboard {dashboard}: panel id {id} is used twice")]
    DuplicatePanelId { dashboard: String, id: u32 },

    #[error("dashboard {dashboard}, panel {panel:?}: {found} target on a {expected} panel")]
    TargetBackendMismatch {
        dashboard: String,
        panel: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("dashboard {dashboard}, panel {panel:?}: override {matcher} is masked by later rules")]
    MaskedOverride {
        dashboard: String,
        panel: String,
        matcher: String,
    },

    #[error("dashboard {dashboard}, panel {panel:?}: override {matcher} matches no target")]
    UnmatchedOverride {
        dashboard: String,
        panel: String,
        matcher: String,
    },

    #[error("dashboard {dashboard}, panel {panel:?}: invalid matcher pattern {pattern:?}")]
    InvalidMatcherPattern {
        dashboard: String,
        panel: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("unknown dashboard uid: {0}")]
    UnknownDashboard(String),

    #[error("failed to serialize dashboard: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, GenerationError>;
