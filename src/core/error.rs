use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalcError {
    #[error("No Pokémon name provided")]
    EmptyName,

    #[error("Pokémon \"{0}\" not found")]
    NotFound(String),

    #[error("Move \"{0}\" not found")]
    MoveNotFound(String),

    #[error("Request failed: {0}")]
    Http(String),

    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    #[error("Please select an attacker, defender, and move before calculating.")]
    MissingSelection,

    #[error("Failed to create Pokémon objects: {0}")]
    EntityConstruction(String),

    #[error("Calculation failed: {0}")]
    NoDamage(String),

    #[error("Unsupported generation: {0}")]
    UnsupportedGeneration(u8),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl CalcError {
    /// Errors that come back from the remote lookup rather than from local input
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            CalcError::NotFound(_)
                | CalcError::MoveNotFound(_)
                | CalcError::Http(_)
                | CalcError::MalformedRecord(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_the_creature() {
        let err = CalcError::NotFound("missingno".into());
        assert_eq!(err.to_string(), "Pokémon \"missingno\" not found");
    }

    #[test]
    fn test_remote_classification() {
        assert!(CalcError::Http("timeout".into()).is_remote());
        assert!(!CalcError::EmptyName.is_remote());
        assert!(!CalcError::MissingSelection.is_remote());
    }
}
