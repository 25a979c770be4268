use crate::error::{ComplaintError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Sentinels used when a credential is not configured
pub const SERVICE_ID_PLACEHOLDER: &str = "SERVICE_ID";
pub const TEMPLATE_ID_PLACEHOLDER: &str = "TEMPLATE_ID";
pub const PUBLIC_KEY_PLACEHOLDER: &str = "PUBLIC_KEY";

pub const DEFAULT_API_URL: &str = "https://api.emailjs.com/api/v1.0/email/send";
pub const DEFAULT_RECIPIENT: &str = "reklamace@example.com";

/// EmailJS credentials and delivery settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailJsConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    /// Fixed address every complaint is sent to
    pub recipient: String,
    pub api_url: String,
    pub timeout_seconds: u64,
}

impl Default for EmailJsConfig {
    fn default() -> Self {
        Self {
            service_id: SERVICE_ID_PLACEHOLDER.into(),
            template_id: TEMPLATE_ID_PLACEHOLDER.into(),
            public_key: PUBLIC_KEY_PLACEHOLDER.into(),
            recipient: DEFAULT_RECIPIENT.into(),
            api_url: DEFAULT_API_URL.into(),
            timeout_seconds: 30,
        }
    }
}

impl EmailJsConfig {
    /// Names of the credentials still unset or left at their sentinel
    pub fn missing_keys(&self) -> Vec<&'static str> {
        let credentials = [
            ("service_id", self.service_id.as_str(), SERVICE_ID_PLACEHOLDER),
            ("template_id", self.template_id.as_str(), TEMPLATE_ID_PLACEHOLDER),
            ("public_key", self.public_key.as_str(), PUBLIC_KEY_PLACEHOLDER),
        ];

        credentials
            .iter()
            .filter(|(_, value, placeholder)| {
                let value = value.trim();
                value.is_empty() || is_placeholder(value, placeholder)
            })
            .map(|(name, _, _)| *name)
            .collect()
    }

    pub fn is_configured(&self) -> bool {
        self.missing_keys().is_empty()
    }

    /// Applies `EMAILJS_*` environment variables over the stored values
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("EMAILJS_SERVICE_ID") {
            self.service_id = v;
        }
        if let Some(v) = get("EMAILJS_TEMPLATE_ID") {
            self.template_id = v;
        }
        if let Some(v) = get("EMAILJS_PUBLIC_KEY") {
            self.public_key = v;
        }
        if let Some(v) = get("EMAILJS_RECIPIENT") {
            self.recipient = v;
        }
        self
    }
}

// Any of the three sentinels counts, whichever slot it ended up in
fn is_placeholder(value: &str, own: &str) -> bool {
    value == own
        || [SERVICE_ID_PLACEHOLDER, TEMPLATE_ID_PLACEHOLDER, PUBLIC_KEY_PLACEHOLDER].contains(&value)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub emailjs: EmailJsConfig,
    /// TTF/OTF font embedded into the PDF (builtin Helvetica otherwise)
    pub font_path: Option<PathBuf>,
    /// Where PDFs of unsent complaints are written
    pub recovery_dir: Option<PathBuf>,
    /// Send picked photos as extra attachments
    pub attach_photos: bool,
}

impl Config {
    /// Stored config with environment overrides applied
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        let mut config = Self::load_from(&config_path)?;
        config.emailjs = config.emailjs.with_env_overrides();
        Ok(config)
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ComplaintError::Config("Domovská složka nenalezena".into()))?;
        Ok(home.join(".config").join("complaint-form").join("config.json"))
    }

    /// Recovery directory, defaulting to the platform data dir
    pub fn recovery_dir(&self) -> PathBuf {
        self.recovery_dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("complaint-form")
                .join("unsent")
        })
    }
}

/// Shows the first and last characters of a secret only
pub fn mask_secret(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    format!(
        "{}{}{}",
        chars[..2].iter().collect::<String>(),
        "*".repeat(chars.len() - 4),
        chars[chars.len() - 2..].iter().collect::<String>()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn configured() -> EmailJsConfig {
        EmailJsConfig {
            service_id: "service_abc".into(),
            template_id: "template_xyz".into(),
            public_key: "pk_123456".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_is_unconfigured() {
        let config = EmailJsConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.missing_keys(), vec!["service_id", "template_id", "public_key"]);
    }

    #[test]
    fn test_single_placeholder_is_unconfigured() {
        let config = EmailJsConfig {
            template_id: TEMPLATE_ID_PLACEHOLDER.into(),
            ..configured()
        };
        assert_eq!(config.missing_keys(), vec!["template_id"]);
    }

    #[test]
    fn test_blank_value_is_unconfigured() {
        let config = EmailJsConfig {
            public_key: "  ".into(),
            ..configured()
        };
        assert!(!config.is_configured());
    }

    #[test]
    fn test_configured() {
        assert!(configured().is_configured());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("EMAILJS_SERVICE_ID", "service_env"),
            ("EMAILJS_TEMPLATE_ID", ""),
            ("EMAILJS_RECIPIENT", "servis@example.cz"),
        ]
        .into_iter()
        .collect();

        let config = EmailJsConfig::default()
            .with_overrides(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.service_id, "service_env");
        // empty values do not override
        assert_eq!(config.template_id, TEMPLATE_ID_PLACEHOLDER);
        assert_eq!(config.recipient, "servis@example.cz");
        assert_eq!(config.missing_keys(), vec!["template_id", "public_key"]);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"emailjs":{"service_id":"s1"}}"#).unwrap();
        assert_eq!(config.emailjs.service_id, "s1");
        assert_eq!(config.emailjs.template_id, TEMPLATE_ID_PLACEHOLDER);
        assert_eq!(config.emailjs.api_url, DEFAULT_API_URL);
        assert!(!config.attach_photos);
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("abcdefgh"), "ab****gh");
        assert_eq!(mask_secret("abc"), "***");
    }
}
