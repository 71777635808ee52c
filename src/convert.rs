//! The conversion pipeline: header → pass 1 (resolve) → pass 2 (emit).
//!
//! The two passes are strictly sequential. Pass 2 only starts once the
//! whole input has been consumed, because item references may point at
//! rows further down the file.

use std::io::{BufRead, Write};

use serde::{Deserialize, Serialize};

use crate::column::Header;
use crate::config::ConvertConfig;
use crate::emit::StatementEmitter;
use crate::error::{ConvertResult, FormatError};
use crate::format::{InputFormat, OutputFormat};
use crate::graph::RdfGraph;
use crate::resolve::EntityResolver;
use crate::sink::GraphSink;

/// Summary of one conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionReport {
    /// Positions in the header row, blank cells included.
    pub columns: usize,
    /// Non-blank lines after the header.
    pub data_rows: usize,
    /// Data rows dropped for a blank label.
    pub skipped_rows: usize,
    /// Distinct entities after merging rows by id.
    pub entities: usize,
    /// Statements handed to the sink (RDF inputs: triples parsed).
    pub statements: usize,
}

/// Read tab-separated input and add its statements to `sink`.
///
/// An input without a usable header (no lines, or no non-blank header cell)
/// produces an empty report and touches neither the rest of the input nor
/// the sink. I/O errors abort; anything already added stays in the sink.
pub fn read_tsv<R: BufRead, S: GraphSink>(
    reader: R,
    config: &ConvertConfig,
    sink: &mut S,
) -> ConvertResult<ConversionReport> {
    let namespace = config.namespace.as_str();
    let mut lines = reader.lines();

    let mut header = None;
    for line in lines.by_ref() {
        let line = line?;
        let line = line.strip_prefix('\u{feff}').unwrap_or(&line);
        if !line.trim().is_empty() {
            header = Some(Header::parse(line, namespace));
            break;
        }
    }

    let Some(header) = header.filter(Header::is_usable) else {
        tracing::info!("no usable header columns, nothing to convert");
        return Ok(ConversionReport::default());
    };

    let mut resolver = EntityResolver::new(&header, namespace);
    for line in lines {
        resolver.ingest_line(&line?);
    }
    let report = ConversionReport {
        columns: header.columns.len(),
        data_rows: resolver.data_rows(),
        skipped_rows: resolver.skipped_rows(),
        ..Default::default()
    };
    let index = resolver.into_index();
    tracing::info!(
        rows = report.data_rows,
        skipped = report.skipped_rows,
        entities = index.len(),
        "resolved entities"
    );

    let statements = StatementEmitter::new(&header, &index, namespace, &config.id_predicate)
        .emit_all(sink)?;
    tracing::info!(statements, "emitted statements");

    Ok(ConversionReport {
        entities: index.len(),
        statements,
        ..report
    })
}

/// Decode `input` with the configured encoding and read it into a fresh graph.
pub fn read_graph(
    input: &[u8],
    format: InputFormat,
    config: &ConvertConfig,
) -> ConvertResult<(RdfGraph, ConversionReport)> {
    config.validate()?;
    let mut graph = RdfGraph::in_memory()?;
    let text = config.decode(input)?;

    let report = match format.rdf_format() {
        None => read_tsv(text.as_bytes(), config, &mut graph)?,
        Some(rdf) => {
            let statements = graph.load(rdf, text.as_bytes(), &config.namespace)?;
            ConversionReport {
                statements,
                ..Default::default()
            }
        }
    };
    Ok((graph, report))
}

/// Serialize `graph` to `writer` in `format`, encoded with the configured
/// output encoding.
pub fn write_graph<W: Write>(
    graph: &RdfGraph,
    format: OutputFormat,
    writer: W,
    config: &ConvertConfig,
) -> ConvertResult<W> {
    let encoding = config.output_encoding()?;
    let mut writer = if encoding == encoding_rs::UTF_8 {
        serialize(graph, format, writer, config)?
    } else {
        let utf8 = serialize(graph, format, Vec::new(), config)?;
        let text = String::from_utf8(utf8).map_err(|e| FormatError::Serialize {
            message: e.to_string(),
        })?;
        let (bytes, _, unmappable) = encoding.encode(&text);
        if unmappable {
            tracing::warn!(
                encoding = encoding.name(),
                "output has characters the encoding cannot represent, written as character references"
            );
        }
        let mut writer = writer;
        writer.write_all(&bytes).map_err(|e| FormatError::Serialize {
            message: e.to_string(),
        })?;
        writer
    };
    writer.flush().map_err(|e| FormatError::Serialize {
        message: e.to_string(),
    })?;
    Ok(writer)
}

fn serialize<W: Write>(
    graph: &RdfGraph,
    format: OutputFormat,
    writer: W,
    config: &ConvertConfig,
) -> ConvertResult<W> {
    Ok(match format.rdf_format() {
        Some(rdf) => graph.write_rdf(rdf, writer, &config.namespace)?,
        None => graph.write_text(writer)?,
    })
}
