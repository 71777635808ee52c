//! Rich diagnostic error types for tsvgraph.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes, help text, and source chains so users know exactly what
//! went wrong and how to fix it.
//!
//! Note that most malformed *data* is not an error at all: unusable headers,
//! blank labels, failed coercions and dangling item references all degrade to
//! documented fallbacks. Errors here are reserved for I/O, configuration, and
//! sinks that refuse a statement.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for a conversion.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text, source spans) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum ConvertError {
    #[error("I/O error while reading input: {source}")]
    #[diagnostic(
        code(tsvgraph::convert::io),
        help(
            "The input stream failed mid-read. Statements added before the failure \
             remain in the graph; re-run the conversion on a readable input."
        )
    )]
    Io {
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Sink(#[from] SinkError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

impl From<std::io::Error> for ConvertError {
    fn from(source: std::io::Error) -> Self {
        Self::Io { source }
    }
}

// ---------------------------------------------------------------------------
// Sink errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum SinkError {
    #[error("not a valid IRI: \"{iri}\"")]
    #[diagnostic(
        code(tsvgraph::sink::invalid_iri),
        help(
            "Values in the `uri` column are used verbatim as resource IRIs. \
             Make sure they are absolute IRIs (e.g. `http://example.org/x`), \
             or leave the cell blank to have one synthesized from the id."
        )
    )]
    InvalidIri { iri: String },

    #[error("graph store error: {message}")]
    #[diagnostic(
        code(tsvgraph::sink::store),
        help("The oxigraph store rejected an operation. This is usually an internal error.")
    )]
    Store { message: String },
}

// ---------------------------------------------------------------------------
// Format errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum FormatError {
    #[error("unknown format: \"{name}\"")]
    #[diagnostic(
        code(tsvgraph::format::unknown),
        help("Run `tsvgraph formats` to list the supported format names.")
    )]
    UnknownFormat { name: String },

    #[error("unknown MIME type: \"{mime}\"")]
    #[diagnostic(
        code(tsvgraph::format::unknown_mime),
        help("Run `tsvgraph formats` to list the supported MIME types.")
    )]
    UnknownMimeType { mime: String },

    #[error("format \"{format}\" cannot be used in this direction")]
    #[diagnostic(
        code(tsvgraph::format::direction),
        help("Some formats are read-only (tsv) and some are write-only (text).")
    )]
    UnsupportedDirection { format: String },

    #[error("failed to parse RDF input: {message}")]
    #[diagnostic(
        code(tsvgraph::format::parse),
        help("Check that the input really is in the format passed with --from.")
    )]
    Parse { message: String },

    #[error("failed to serialize graph: {message}")]
    #[diagnostic(
        code(tsvgraph::format::serialize),
        help("Check that the output destination is writable.")
    )]
    Serialize { message: String },
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config: {path}")]
    #[diagnostic(
        code(tsvgraph::config::read),
        help("Ensure the config file exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {path}: {message}")]
    #[diagnostic(
        code(tsvgraph::config::parse),
        help("Check the TOML syntax in the config file.")
    )]
    Parse { path: String, message: String },

    #[error("namespace is not an absolute IRI: \"{namespace}\"")]
    #[diagnostic(
        code(tsvgraph::config::namespace),
        help(
            "Every synthesized resource IRI starts with the namespace, \
             so it must itself be an absolute IRI such as `urn:babel:` \
             or `http://example.org/data#`."
        )
    )]
    InvalidNamespace { namespace: String },

    #[error("unknown input encoding: \"{label}\"")]
    #[diagnostic(
        code(tsvgraph::config::encoding),
        help("Use a WHATWG encoding label such as `utf-8`, `iso-8859-1` or `windows-1252`.")
    )]
    UnknownEncoding { label: String },
}

pub type SinkResult<T> = std::result::Result<T, SinkError>;
pub type FormatResult<T> = std::result::Result<T, FormatError>;
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Convenience alias for functions returning conversion results.
pub type ConvertResult<T> = std::result::Result<T, ConvertError>;
