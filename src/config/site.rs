//! Site configuration (site.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub tagline: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub author: String,

    // URL
    pub url: String,
    pub root: String,

    // Blog
    pub per_page: usize,
    pub blog_dir: String,

    // Static assets
    pub static_dir: String,

    // Branding (used by the web manifest and page chrome)
    pub theme_color: String,
    pub background_color: String,

    // Public contact details shown on the site. SMTP credentials are
    // never part of this file; they come from the environment only.
    pub contact: ContactInfo,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Prime Accounting".to_string(),
            tagline: "Your Trusted Partner in Financial Success".to_string(),
            description: "Professional accounting and tax services".to_string(),
            keywords: vec![
                "accounting".to_string(),
                "tax planning".to_string(),
                "bookkeeping".to_string(),
                "audit".to_string(),
            ],
            author: "Prime Accounting".to_string(),

            url: "https://primeaccounting.com".to_string(),
            root: "/".to_string(),

            per_page: 6,
            blog_dir: "blog".to_string(),

            static_dir: "static".to_string(),

            theme_color: "#EAB308".to_string(),
            background_color: "#ffffff".to_string(),

            contact: ContactInfo::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Public-facing contact details
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactInfo {
    pub phone: String,
    pub alt_phone: String,
    pub email: String,
    pub support_email: String,
    pub address: String,
    pub hours: Vec<String>,
}

impl Default for ContactInfo {
    fn default() -> Self {
        Self {
            phone: "(555) 123-4567".to_string(),
            alt_phone: "(555) 987-6543".to_string(),
            email: "info@primeaccounting.com".to_string(),
            support_email: "support@primeaccounting.com".to_string(),
            address: "123 Business Avenue, Suite 100, New York, NY 10001".to_string(),
            hours: vec![
                "Monday - Friday: 9:00 AM - 6:00 PM".to_string(),
                "Saturday: 10:00 AM - 2:00 PM".to_string(),
                "Sunday: Closed".to_string(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Prime Accounting");
        assert_eq!(config.per_page, 6);
        assert_eq!(config.root, "/");
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Acme Accounting
url: https://acme.example
per_page: 12
contact:
  phone: "(111) 222-3333"
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Acme Accounting");
        assert_eq!(config.url, "https://acme.example");
        assert_eq!(config.per_page, 12);
        assert_eq!(config.contact.phone, "(111) 222-3333");
        // Unset fields fall back to defaults
        assert_eq!(config.contact.email, "info@primeaccounting.com");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "title: From File\nper_page: 3").unwrap();
        let config = SiteConfig::load(file.path()).unwrap();
        assert_eq!(config.title, "From File");
        assert_eq!(config.per_page, 3);
    }
}
