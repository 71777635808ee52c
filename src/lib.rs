// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # tsvgraph
//!
//! Converts tab-separated tables into RDF statements.
//!
//! The header row declares what each column means: `name[:detail,...]`,
//! where details pick a multiplicity (`single`) and a value kind (`item`,
//! `number`, `boolean`, `date`, `url`). Four reserved columns, `uri`, `id`,
//! `label` and `type`, shape the entity each row describes instead of
//! becoming properties.
//!
//! ## Architecture
//!
//! - **Header** (`column`): column descriptors aligned with tab positions
//! - **Pass 1** (`resolve`): rows merged into entities keyed by id
//! - **Pass 2** (`emit`): entities to statements, with typed coercion (`value`)
//!   and item references resolved against the complete id index
//! - **Sinks** (`sink`, `graph`): a plain statement list, or an oxigraph store
//!   that also parses and serializes RDF (`format`)
//!
//! ## Library usage
//!
//! ```no_run
//! use tsvgraph::config::ConvertConfig;
//! use tsvgraph::convert::read_tsv;
//! use tsvgraph::sink::TripleList;
//!
//! let input = "id\tlabel\tspouse:item\nalice\tAlice\tbob\nbob\tBob\talice\n";
//! let mut sink = TripleList::new();
//! let report = read_tsv(input.as_bytes(), &ConvertConfig::default(), &mut sink).unwrap();
//! assert_eq!(report.entities, 2);
//! ```

pub mod column;
pub mod config;
pub mod convert;
pub mod emit;
pub mod encode;
pub mod entity;
pub mod error;
pub mod format;
pub mod graph;
pub mod resolve;
pub mod sink;
pub mod value;
