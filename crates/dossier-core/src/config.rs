//! Configuration management for the dossier system

use serde::{Deserialize, Serialize};
use crate::error::{DossierError, Result};
use crate::paths;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variables that override file configuration
pub const ENV_OUTPUT_DIR: &str = "DOSSIER_OUTPUT_DIR";
pub const ENV_TEMPLATE_PATH: &str = "DOSSIER_TEMPLATE_PATH";
pub const ENV_PORTAL_ID: &str = "HUBSPOT_PORTAL_ID";
pub const ENV_FORM_GUID: &str = "HUBSPOT_FORM_GUID";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DossierConfig {
    #[serde(default)]
    pub hubspot: HubSpotConfig,

    #[serde(default)]
    pub document: DocumentConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubSpotConfig {
    #[serde(alias = "account_id", default = "default_portal_id")]
    pub portal_id: String,

    #[serde(alias = "form_id", default = "default_form_guid")]
    pub form_guid: String,

    #[serde(alias = "api_url", default = "default_hubspot_base_url")]
    pub api_base_url: String,

    #[serde(alias = "request_timeout", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Value of the hidden `mercado_de_origen` form field
    #[serde(default = "default_market")]
    pub market: String,

    /// Value of the hidden `lead_partner_source` form field
    #[serde(default = "default_partner_source")]
    pub partner_source: String,

    #[serde(default = "default_page_name")]
    pub page_name: String,

    /// Used when the submission carries no page URI
    #[serde(default = "default_page_uri")]
    pub default_page_uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentConfig {
    #[serde(default = "default_template_path")]
    pub template_path: PathBuf,

    #[serde(alias = "template_field_name", default = "default_field_name")]
    pub field_name: String,

    /// Falls back to the platform documents folder when unset
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    #[serde(default = "default_downloads_base_path")]
    pub downloads_base_path: String,

    #[serde(default = "default_brand")]
    pub brand: String,
}

impl Default for HubSpotConfig {
    fn default() -> Self {
        Self {
            portal_id: default_portal_id(),
            form_guid: default_form_guid(),
            api_base_url: default_hubspot_base_url(),
            timeout_secs: default_timeout_secs(),
            market: default_market(),
            partner_source: default_partner_source(),
            page_name: default_page_name(),
            default_page_uri: default_page_uri(),
        }
    }
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            template_path: default_template_path(),
            field_name: default_field_name(),
            output_dir: None,
            downloads_base_path: default_downloads_base_path(),
            brand: default_brand(),
        }
    }
}

// Default functions
fn default_portal_id() -> String {
    "147219365".to_string()
}

fn default_form_guid() -> String {
    "34afefab-a031-4516-838e-f0edf0b98bc7".to_string()
}

fn default_hubspot_base_url() -> String {
    "https://api.hsforms.com".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_market() -> String {
    "España".to_string()
}

fn default_partner_source() -> String {
    "Partner_Landing_ES_Playa_Viva".to_string()
}

fn default_page_name() -> String {
    "Playa Viva Dossier Download".to_string()
}

fn default_page_uri() -> String {
    "https://landing-page-playa-viva.vercel.app/".to_string()
}

fn default_template_path() -> PathBuf {
    PathBuf::from(paths::DEFAULT_TEMPLATE_PATH)
}

fn default_field_name() -> String {
    "nombre_personalizacion_lead".to_string()
}

fn default_downloads_base_path() -> String {
    paths::DEFAULT_DOWNLOADS_BASE_PATH.to_string()
}

fn default_brand() -> String {
    "Playa_Viva".to_string()
}

impl HubSpotConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl DocumentConfig {
    /// Configured output directory or the platform default
    pub fn resolved_output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(paths::default_output_dir)
    }
}

impl DossierConfig {
    /// Load configuration from a JSON file. Not validated: apply overrides,
    /// then call `validate`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Load configuration from a JSON string. Not validated.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Apply overrides from the process environment
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup. Empty values are ignored.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(dir) = get(ENV_OUTPUT_DIR) {
            log::debug!("Output directory overridden by {}", ENV_OUTPUT_DIR);
            self.document.output_dir = Some(PathBuf::from(dir));
        }
        if let Some(template) = get(ENV_TEMPLATE_PATH) {
            self.document.template_path = PathBuf::from(template);
        }
        if let Some(portal_id) = get(ENV_PORTAL_ID) {
            self.hubspot.portal_id = portal_id;
        }
        if let Some(form_guid) = get(ENV_FORM_GUID) {
            self.hubspot.form_guid = form_guid;
        }

        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.hubspot.portal_id.trim().is_empty() || self.hubspot.form_guid.trim().is_empty() {
            return Err(DossierError::Config(
                "HubSpot portal_id and form_guid are required".to_string()
            ));
        }

        if !self.hubspot.api_base_url.starts_with("http://") && !self.hubspot.api_base_url.starts_with("https://") {
            return Err(DossierError::Config(format!(
                "HubSpot api_base_url must be an http(s) URL, got '{}'",
                self.hubspot.api_base_url
            )));
        }

        if self.hubspot.timeout_secs == 0 {
            return Err(DossierError::Config("HubSpot timeout_secs must be greater than zero".to_string()));
        }

        if self.document.field_name.trim().is_empty() {
            return Err(DossierError::Config("Document field_name is required".to_string()));
        }

        if self.document.template_path.as_os_str().is_empty() {
            return Err(DossierError::Config("Document template_path is required".to_string()));
        }

        Ok(())
    }
}
