use std::fmt;

/// Failure of a service mutation. The service state is unchanged when one is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    NotFound { service: &'static str, id: String },
    DuplicateId { service: &'static str, id: String },
    NotAFolder { id: String },
}

impl StateError {
    pub fn not_found(service: &'static str, id: impl Into<String>) -> Self {
        StateError::NotFound {
            service,
            id: id.into(),
        }
    }

    pub fn duplicate(service: &'static str, id: impl Into<String>) -> Self {
        StateError::DuplicateId {
            service,
            id: id.into(),
        }
    }
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::NotFound { service, id } => write!(f, "{}: id not found: {}", service, id),
            StateError::DuplicateId { service, id } => {
                write!(f, "{}: id already registered: {}", service, id)
            }
            StateError::NotAFolder { id } => write!(f, "node is not a folder: {}", id),
        }
    }
}

impl std::error::Error for StateError {}

/// Failure reading or writing the configuration store.
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    NotAnObject,
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "configuration io error: {}", e),
            SettingsError::Parse(e) => write!(f, "configuration is not valid json: {}", e),
            SettingsError::NotAnObject => write!(f, "configuration must be a json object"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
            SettingsError::NotAnObject => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}
