use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required setting. Please set {env_var}")]
    MissingEnvVar { env_var: String },

    #[error("Configuration error: {0}")]
    Other(#[from] config::ConfigError),
}

/// Environment variable that sets a dotted settings key, e.g.
/// `provider.api_key` -> `QUILL_PROVIDER__API_KEY`
pub fn to_env_var(key: &str) -> String {
    format!("QUILL_{}", key.replace('.', "__").to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_env_var() {
        assert_eq!(to_env_var("provider.api_key"), "QUILL_PROVIDER__API_KEY");
        assert_eq!(to_env_var("chat.priming"), "QUILL_CHAT__PRIMING");
    }

    #[test]
    fn test_missing_env_var_message() {
        let err = ConfigError::MissingEnvVar {
            env_var: to_env_var("provider.api_key"),
        };
        assert_eq!(
            err.to_string(),
            "Missing required setting. Please set QUILL_PROVIDER__API_KEY"
        );
    }
}
