//! Static registry of input and output formats.
//!
//! Formats are addressed by a short name (`tsv`, `turtle`, ...) or by MIME
//! type. Resolution is a plain match over enums, so every format the binary
//! supports is known at compile time.

use std::fmt;
use std::path::Path;

use oxigraph::io::RdfFormat;

use crate::error::{FormatError, FormatResult};

/// Formats that can be read into a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputFormat {
    Tsv,
    Turtle,
    RdfXml,
    NTriples,
}

/// Formats a graph can be written as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Turtle,
    RdfXml,
    NTriples,
    /// Lexical forms of all literal objects, space separated.
    Text,
}

impl InputFormat {
    pub const ALL: [Self; 4] = [Self::Tsv, Self::Turtle, Self::RdfXml, Self::NTriples];

    pub fn name(self) -> &'static str {
        match self {
            Self::Tsv => "tsv",
            Self::Turtle => "turtle",
            Self::RdfXml => "rdf-xml",
            Self::NTriples => "ntriples",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Tsv => "Tab-separated values with typed header",
            Self::Turtle => "Turtle",
            Self::RdfXml => "RDF/XML",
            Self::NTriples => "N-Triples",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Tsv => "text/tab-separated-values",
            Self::Turtle => "application/rdf+turtle",
            Self::RdfXml => "application/rdf+xml",
            Self::NTriples => "application/n-triples",
        }
    }

    pub fn from_name(name: &str) -> FormatResult<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "tsv" => Ok(Self::Tsv),
            "turtle" | "ttl" => Ok(Self::Turtle),
            "rdf-xml" | "rdfxml" => Ok(Self::RdfXml),
            "ntriples" | "nt" => Ok(Self::NTriples),
            "text" => Err(FormatError::UnsupportedDirection {
                format: name.to_string(),
            }),
            _ => Err(FormatError::UnknownFormat {
                name: name.to_string(),
            }),
        }
    }

    pub fn from_mime_type(mime: &str) -> FormatResult<Self> {
        match essence(mime).as_str() {
            "text/tab-separated-values" => Ok(Self::Tsv),
            "application/rdf+turtle" | "application/rdf+n3" | "text/turtle" => Ok(Self::Turtle),
            "application/rdf+xml" => Ok(Self::RdfXml),
            "application/n-triples" => Ok(Self::NTriples),
            _ => Err(FormatError::UnknownMimeType {
                mime: mime.to_string(),
            }),
        }
    }

    /// Guess from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "tsv" | "tab" | "txt" => Some(Self::Tsv),
            "ttl" | "n3" => Some(Self::Turtle),
            "rdf" | "xml" | "owl" => Some(Self::RdfXml),
            "nt" => Some(Self::NTriples),
            _ => None,
        }
    }

    /// The oxigraph parser format, for RDF inputs.
    pub fn rdf_format(self) -> Option<RdfFormat> {
        match self {
            Self::Tsv => None,
            Self::Turtle => Some(RdfFormat::Turtle),
            Self::RdfXml => Some(RdfFormat::RdfXml),
            Self::NTriples => Some(RdfFormat::NTriples),
        }
    }
}

impl OutputFormat {
    pub const ALL: [Self; 4] = [Self::Turtle, Self::RdfXml, Self::NTriples, Self::Text];

    pub fn name(self) -> &'static str {
        match self {
            Self::Turtle => "turtle",
            Self::RdfXml => "rdf-xml",
            Self::NTriples => "ntriples",
            Self::Text => "text",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Turtle => "Turtle",
            Self::RdfXml => "RDF/XML",
            Self::NTriples => "N-Triples",
            Self::Text => "Plain text of all literal values",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Turtle => "application/rdf+turtle",
            Self::RdfXml => "application/rdf+xml",
            Self::NTriples => "application/n-triples",
            Self::Text => "text/plain",
        }
    }

    pub fn from_name(name: &str) -> FormatResult<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "turtle" | "ttl" => Ok(Self::Turtle),
            "rdf-xml" | "rdfxml" => Ok(Self::RdfXml),
            "ntriples" | "nt" => Ok(Self::NTriples),
            "text" => Ok(Self::Text),
            "tsv" => Err(FormatError::UnsupportedDirection {
                format: name.to_string(),
            }),
            _ => Err(FormatError::UnknownFormat {
                name: name.to_string(),
            }),
        }
    }

    pub fn from_mime_type(mime: &str) -> FormatResult<Self> {
        match essence(mime).as_str() {
            "application/rdf+turtle" | "application/rdf+n3" | "text/turtle" => Ok(Self::Turtle),
            "application/rdf+xml" => Ok(Self::RdfXml),
            "application/n-triples" => Ok(Self::NTriples),
            "text/plain" => Ok(Self::Text),
            _ => Err(FormatError::UnknownMimeType {
                mime: mime.to_string(),
            }),
        }
    }

    /// The oxigraph serializer format; `None` for the text writer.
    pub fn rdf_format(self) -> Option<RdfFormat> {
        match self {
            Self::Turtle => Some(RdfFormat::Turtle),
            Self::RdfXml => Some(RdfFormat::RdfXml),
            Self::NTriples => Some(RdfFormat::NTriples),
            Self::Text => None,
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// MIME type without parameters, lower-cased.
fn essence(mime: &str) -> String {
    mime.split(';').next().unwrap_or("").trim().to_ascii_lowercase()
}
