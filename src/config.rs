use std::time::Duration;

use crate::util::mask_secret;

#[derive(Clone, Debug)]
pub struct Config {
    // TDX web API
    pub base_url: String,
    pub beid: String,
    pub web_services_key: String,
    pub report_id: String,

    // Output
    pub output_path: String,
    pub log_dir: String,

    // Downstream automation; empty disables the handoff
    pub handoff_command: String,

    pub http_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let http_timeout = humantime::parse_duration(&env("HTTP_TIMEOUT", "30s"))
            .map_err(|e| ConfigError::InvalidEnvVar("HTTP_TIMEOUT".to_string(), e.to_string()))?;

        Ok(Self {
            base_url: env("TDX_BASE_URL", "https://yourorg.teamdynamix.com/TDWebApi/api"),
            beid: env("TDX_BEID", ""),
            web_services_key: env("TDX_WEB_SERVICES_KEY", ""),
            report_id: env("TDX_REPORT_ID", ""),
            output_path: env("OUTPUT_PATH", "tdxFlowOutput.csv"),
            log_dir: env("LOG_DIR", "logs"),
            handoff_command: env("HANDOFF_COMMAND", "pwsh ./azureFlow.ps1"),
            http_timeout,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.is_empty() {
            return Err(ConfigError::MissingEnvVar("TDX_BASE_URL".to_string()));
        }
        if self.beid.is_empty() {
            return Err(ConfigError::MissingEnvVar("TDX_BEID".to_string()));
        }
        if self.web_services_key.is_empty() {
            return Err(ConfigError::MissingEnvVar("TDX_WEB_SERVICES_KEY".to_string()));
        }
        if self.report_id.is_empty() {
            return Err(ConfigError::MissingEnvVar("TDX_REPORT_ID".to_string()));
        }
        if self.output_path.is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "OUTPUT_PATH".to_string(),
                "cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn masked_key(&self) -> String {
        mask_secret(&self.web_services_key, 4, 4)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

fn env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            base_url: "https://msudenver.teamdynamix.com/TDWebApi/api".to_string(),
            beid: "12345678-1234-1234-1234-123456789012".to_string(),
            web_services_key: "87654321-4321-4321-4321-210987654321".to_string(),
            report_id: "112233".to_string(),
            output_path: "tdxFlowOutput.csv".to_string(),
            log_dir: "logs".to_string(),
            handoff_command: "pwsh ./azureFlow.ps1".to_string(),
            http_timeout: Duration::from_secs(30),
        }
    }

    #[test]
    fn valid_config_passes_validation() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn empty_credentials_fail_validation() {
        let mut cfg = base_config();
        cfg.beid = String::new();
        assert!(matches!(cfg.validate(), Err(ConfigError::MissingEnvVar(v)) if v == "TDX_BEID"));

        let mut cfg = base_config();
        cfg.web_services_key = String::new();
        assert!(cfg.validate().is_err());

        let mut cfg = base_config();
        cfg.report_id = String::new();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn empty_output_path_fails_validation() {
        let mut cfg = base_config();
        cfg.output_path = String::new();
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidEnvVar(v, _)) if v == "OUTPUT_PATH"));
    }

    #[test]
    fn masked_key_hides_middle() {
        let cfg = base_config();
        let masked = cfg.masked_key();
        assert!(masked.starts_with("8765"));
        assert!(masked.ends_with("4321"));
        assert!(masked.contains("..."));
        assert!(!masked.contains(&cfg.web_services_key));
    }
}
