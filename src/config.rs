//! Conversion configuration, loadable from TOML.
//!
//! ```toml
//! namespace = "http://example.org/data#"
//! id_predicate = "http://simile.mit.edu/2006/11/exhibit#id"
//! input_encoding = "windows-1252"
//! output_encoding = "utf-8"
//! ```

use std::path::Path;

use encoding_rs::Encoding;
use oxigraph::model::NamedNode;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Predicate carrying each entity's id.
pub const EXHIBIT_ID: &str = "http://simile.mit.edu/2006/11/exhibit#id";

/// Settings for one conversion. Every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// IRI prefix for every synthesized resource and predicate.
    pub namespace: String,
    /// Predicate used for the `(entity, id, "...")` statement.
    pub id_predicate: String,
    /// WHATWG label of the input text encoding.
    pub input_encoding: String,
    /// WHATWG label of the output text encoding; the input encoding if unset.
    pub output_encoding: Option<String>,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            namespace: "urn:babel:".into(),
            id_predicate: EXHIBIT_ID.into(),
            input_encoding: "utf-8".into(),
            output_encoding: None,
        }
    }
}

impl ConvertConfig {
    /// Config with a specific namespace (other fields default).
    pub fn with_namespace(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..Default::default()
        }
    }

    /// Load and validate a TOML config file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the namespace and id predicate are absolute IRIs and both
    /// encoding labels are known.
    pub fn validate(&self) -> ConfigResult<()> {
        if NamedNode::new(self.namespace.as_str()).is_err() {
            return Err(ConfigError::InvalidNamespace {
                namespace: self.namespace.clone(),
            });
        }
        if NamedNode::new(self.id_predicate.as_str()).is_err() {
            return Err(ConfigError::InvalidNamespace {
                namespace: self.id_predicate.clone(),
            });
        }
        self.encoding()?;
        self.output_encoding().map(|_| ())
    }

    /// Resolve `input_encoding` to an encoding.
    pub fn encoding(&self) -> ConfigResult<&'static Encoding> {
        encoding_for(&self.input_encoding)
    }

    /// Resolve the encoding output is written in. Encodings that cannot be
    /// written (UTF-16, replacement) become UTF-8.
    pub fn output_encoding(&self) -> ConfigResult<&'static Encoding> {
        let encoding = match &self.output_encoding {
            Some(label) => encoding_for(label)?,
            None => self.encoding()?,
        };
        Ok(encoding.output_encoding())
    }

    /// Decode raw input bytes with the configured encoding. A byte-order mark
    /// overrides the label; malformed sequences become U+FFFD.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> ConfigResult<std::borrow::Cow<'a, str>> {
        let encoding = self.encoding()?;
        let (text, used, had_errors) = encoding.decode(bytes);
        if had_errors {
            tracing::warn!(encoding = used.name(), "input contained malformed byte sequences");
        }
        Ok(text)
    }
}

fn encoding_for(label: &str) -> ConfigResult<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| ConfigError::UnknownEncoding {
        label: label.to_string(),
    })
}
