use crate::error::ConfigError;
use std::fmt;
use std::path::PathBuf;

/// Environment variable holding the GitHub personal access token.
pub const PAT_ENV_VAR: &str = "PAT";

/// Organisation owning the repositories whose releases are fetched.
pub const DEFAULT_OWNER: &str = "icon-project";

pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

pub const GITHUB_API_URL: &str = "https://api.github.com";

/// Bearer token used for the release listing request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Reads the token from the `PAT` environment variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_value(std::env::var(PAT_ENV_VAR).ok())
    }

    /// Builds a credential from an already looked-up value.
    /// A missing or empty value is a configuration error. The token is kept as given.
    pub fn from_value(value: Option<String>) -> Result<Self, ConfigError> {
        match value {
            Some(token) if !token.is_empty() => Ok(Self(token)),
            _ => Err(ConfigError::MissingCredential { var: PAT_ENV_VAR }),
        }
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Owner of the repository (organisation or user)
    pub owner: String,

    /// Name of the repository whose releases are listed
    pub repository: String,

    /// Version that release tags are matched against, e.g. `1.2.3`
    pub base_version: String,

    /// Directory that is cleared and then filled with downloaded assets
    pub artifacts_dir: PathBuf,

    /// Base URL of the GitHub REST API
    pub api_url: String,
}

impl Config {
    pub fn new(repository: &str, base_version: &str) -> Result<Self, ConfigError> {
        if repository.trim().is_empty() {
            return Err(ConfigError::EmptyArgument { name: "repository" });
        }
        if base_version.trim().is_empty() {
            return Err(ConfigError::EmptyArgument {
                name: "base_version",
            });
        }

        Ok(Self {
            owner: DEFAULT_OWNER.to_string(),
            repository: repository.trim().to_string(),
            base_version: base_version.trim().to_string(),
            artifacts_dir: PathBuf::from(DEFAULT_ARTIFACTS_DIR),
            api_url: GITHUB_API_URL.to_string(),
        })
    }

    pub fn releases_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/releases",
            self.api_url.trim_end_matches('/'),
            self.owner,
            self.repository
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential() {
        let err = Credential::from_value(None).unwrap_err();
        assert_eq!(err, ConfigError::MissingCredential { var: "PAT" });
        assert!(err.to_string().contains("PAT"));

        assert!(Credential::from_value(Some(String::new())).is_err());
    }

    #[test]
    fn test_credential_kept_as_given() {
        let credential = Credential::from_value(Some(" tok ".to_string())).unwrap();
        assert_eq!(credential.bearer(), "Bearer  tok ");
    }

    #[test]
    fn test_credential_is_redacted() {
        let credential = Credential::from_value(Some("ghp_secret".to_string())).unwrap();
        assert_eq!(credential.bearer(), "Bearer ghp_secret");
        assert!(!format!("{credential:?}").contains("ghp_secret"));
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::new("ibc-relay", "1.2.3").unwrap();
        assert_eq!(config.owner, "icon-project");
        assert_eq!(config.artifacts_dir, PathBuf::from("artifacts"));
        assert_eq!(
            config.releases_url(),
            "https://api.github.com/repos/icon-project/ibc-relay/releases"
        );
    }

    #[test]
    fn test_releases_url_with_custom_api() {
        let config = Config {
            api_url: "http://localhost:8080/".to_string(),
            owner: "someone".to_string(),
            ..Config::new("repo", "1.0.0").unwrap()
        };
        assert_eq!(
            config.releases_url(),
            "http://localhost:8080/repos/someone/repo/releases"
        );
    }

    #[test]
    fn test_empty_arguments_rejected() {
        assert_eq!(
            Config::new("", "1.0.0").unwrap_err(),
            ConfigError::EmptyArgument { name: "repository" }
        );
        assert_eq!(
            Config::new("repo", " ").unwrap_err(),
            ConfigError::EmptyArgument {
                name: "base_version"
            }
        );
    }
}
