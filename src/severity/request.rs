//! Request mapping for the classifier
//!
//! [`SeverityRequest`] is the flat input mapping (`airway_cc`, `volume_mm2`,
//! `bmi`, `mouth_breathing`, `bruxism`). Optional keys may be absent or `null`;
//! both decode to unknown. Only type coercion happens here, measurement ranges
//! are never checked.

use crate::severity::classifier::classify;
use crate::severity::types::{Classification, Measurements, RiskFactors};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Failed to read request from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid JSON request: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML request: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Encoding of a request body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestFormat {
    Json,
    Yaml,
}

impl RequestFormat {
    /// `.yaml`/`.yml` files are YAML, everything else is treated as JSON
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => RequestFormat::Yaml,
            _ => RequestFormat::Json,
        }
    }

    /// Sniffs an unnamed body: a JSON object starts with `{`, anything else
    /// is decoded as YAML
    pub fn detect(content: &str) -> Self {
        if content.trim_start().starts_with('{') {
            RequestFormat::Json
        } else {
            RequestFormat::Yaml
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeverityRequest {
    pub airway_cc: f64,
    pub volume_mm2: f64,
    #[serde(default)]
    pub bmi: Option<f64>,
    #[serde(default)]
    pub mouth_breathing: Option<bool>,
    #[serde(default)]
    pub bruxism: Option<bool>,
}

impl SeverityRequest {
    pub fn new(airway_cc: f64, volume_mm2: f64) -> Self {
        Self {
            airway_cc,
            volume_mm2,
            bmi: None,
            mouth_breathing: None,
            bruxism: None,
        }
    }

    pub fn with_bmi(mut self, bmi: Option<f64>) -> Self {
        self.bmi = bmi;
        self
    }

    pub fn with_mouth_breathing(mut self, present: Option<bool>) -> Self {
        self.mouth_breathing = present;
        self
    }

    pub fn with_bruxism(mut self, present: Option<bool>) -> Self {
        self.bruxism = present;
        self
    }

    pub fn measurements(&self) -> Measurements {
        Measurements::new(self.airway_cc, self.volume_mm2)
    }

    pub fn risk_factors(&self) -> RiskFactors {
        RiskFactors {
            bmi: self.bmi,
            mouth_breathing: self.mouth_breathing,
            bruxism: self.bruxism,
        }
    }

    pub fn from_json(content: &str) -> Result<Self, RequestError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_yaml(content: &str) -> Result<Self, RequestError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn parse(content: &str, format: RequestFormat) -> Result<Self, RequestError> {
        match format {
            RequestFormat::Json => Self::from_json(content),
            RequestFormat::Yaml => Self::from_yaml(content),
        }
    }

    /// Loads a request from a file, choosing the decoder by extension
    pub fn from_file(path: &Path) -> Result<Self, RequestError> {
        let content = fs::read_to_string(path).map_err(|source| RequestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = content.len(), "read request file");
        Self::parse(&content, RequestFormat::from_path(path))
    }

    /// Reads a JSON or YAML request body from any reader (e.g. stdin)
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, RequestError> {
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .map_err(|source| RequestError::Io {
                path: PathBuf::from("-"),
                source,
            })?;
        let format = RequestFormat::detect(&content);
        debug!(?format, bytes = content.len(), "read request body");
        Self::parse(&content, format)
    }
}

/// Stages a decoded request
pub fn predict_severity(request: &SeverityRequest) -> Classification {
    classify(&request.measurements(), &request.risk_factors())
}
