//! Status page served on GET.
//!
//! The template is either compiled into the binary or read from disk on every
//! request (`--template`). Placeholders are substituted from the server
//! configuration.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::ServerConfig;

const BUILTIN_TEMPLATE: &str = include_str!("../../assets/app.html");

/// Value rendered for `%startTime`.
const START_TIME_UNAVAILABLE: &str = "N/A";

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Error loading template {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Where the template comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Builtin,
    File(PathBuf),
}

/// Renders the status page for one configuration.
#[derive(Debug, Clone)]
pub struct StatusPage {
    source: TemplateSource,
}

impl StatusPage {
    pub fn new(source: TemplateSource) -> Self {
        Self { source }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        match &config.template_path {
            Some(path) => Self::new(TemplateSource::File(path.clone())),
            None => Self::new(TemplateSource::Builtin),
        }
    }

    pub fn source(&self) -> &TemplateSource {
        &self.source
    }

    /// Load the template and substitute configuration values.
    pub async fn render(&self, config: &ServerConfig) -> Result<String, TemplateError> {
        let template = self.load().await?;
        Ok(substitute(&template, config))
    }

    async fn load(&self) -> Result<String, TemplateError> {
        match &self.source {
            TemplateSource::Builtin => Ok(BUILTIN_TEMPLATE.to_string()),
            TemplateSource::File(path) => read_template(path).await,
        }
    }
}

async fn read_template(path: &Path) -> Result<String, TemplateError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| TemplateError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Replace every placeholder in `template`.
pub fn substitute(template: &str, config: &ServerConfig) -> String {
    template
        .replace("%port", &config.port.to_string())
        .replace("%version", &config.version)
        .replace("%debug", &config.debug.to_string())
        .replace("%backlog", &config.backlog.to_string())
        .replace("%threads", &config.worker_count.to_string())
        .replace("%startTime", START_TIME_UNAVAILABLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ServerConfig {
        ServerConfig {
            port: 9123,
            backlog: 12,
            worker_count: 3,
            debug: true,
            ..ServerConfig::default()
        }
    }

    #[test]
    fn substitutes_every_placeholder() {
        let out = substitute(
            "%port|%version|%debug|%backlog|%threads|%startTime",
            &config(),
        );
        assert_eq!(out, format!("9123|{}|true|12|3|N/A", env!("CARGO_PKG_VERSION")));
    }

    #[tokio::test]
    async fn builtin_template_has_no_placeholders_left() {
        let page = StatusPage::new(TemplateSource::Builtin);
        let html = page.render(&config()).await.unwrap();
        assert!(html.contains("9123"));
        for placeholder in ["%port", "%version", "%debug", "%backlog", "%threads", "%startTime"] {
            assert!(!html.contains(placeholder), "{placeholder} left in page");
        }
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let page = StatusPage::new(TemplateSource::File(PathBuf::from(
            "/nonexistent/sqlgate/app.html",
        )));
        let err = page.render(&config()).await.unwrap_err();
        assert!(err.to_string().contains("/nonexistent/sqlgate/app.html"));
    }

    #[test]
    fn source_follows_config() {
        assert_eq!(
            StatusPage::from_config(&ServerConfig::default()).source(),
            &TemplateSource::Builtin
        );
        let config = ServerConfig {
            template_path: Some(PathBuf::from("page.html")),
            ..ServerConfig::default()
        };
        assert_eq!(
            StatusPage::from_config(&config).source(),
            &TemplateSource::File(PathBuf::from("page.html"))
        );
    }
}
