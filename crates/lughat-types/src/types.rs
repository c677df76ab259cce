use serde::{Deserialize, Serialize};

/// State of the CSV import attached to a language form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message", rename_all = "lowercase")]
pub enum ImportStatus {
    #[default]
    Idle,
    Loading(String),
    Success(String),
    Error(String),
}

impl ImportStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, ImportStatus::Loading(_))
    }

    pub fn message(&self) -> &str {
        match self {
            ImportStatus::Idle => "",
            ImportStatus::Loading(m) | ImportStatus::Success(m) | ImportStatus::Error(m) => m,
        }
    }
}

/// User-facing notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Notice {
    Info(String),
    Error(String),
}

/// Who is issuing a request; only administrators may mutate the catalog
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Caller {
    #[default]
    Visitor,
    Admin {
        uid: String,
        email: Option<String>,
    },
}

impl Caller {
    pub fn is_admin(&self) -> bool {
        matches!(self, Caller::Admin { .. })
    }

    pub fn uid(&self) -> Option<&str> {
        match self {
            Caller::Visitor => None,
            Caller::Admin { uid, .. } => Some(uid),
        }
    }
}
