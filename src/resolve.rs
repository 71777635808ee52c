//! First pass: rows to deduplicated entities.
//!
//! Each data row is resolved to an entity id. The first row seen for an id
//! fixes the entity's uri, label and type; every row (first or later)
//! appends its non-blank property cells. Nothing is emitted here because
//! item references in pass two need the complete index.

use oxiri::Iri;

use crate::column::Header;
use crate::encode;
use crate::entity::{Entity, EntityIndex};

/// Type name used when a row has no type cell.
pub const DEFAULT_TYPE: &str = "Item";

/// What happened to one input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    /// Blank line, ignored.
    Blank,
    /// Label cell empty; the row contributed nothing.
    NoLabel,
    /// First row for this id; a new entity was created.
    Created,
    /// Row merged into an existing entity.
    Merged,
}

/// Accumulates entities from data rows against a parsed header.
#[derive(Debug)]
pub struct EntityResolver<'h> {
    header: &'h Header,
    namespace: &'h str,
    index: EntityIndex,
    data_rows: usize,
    skipped_rows: usize,
}

impl<'h> EntityResolver<'h> {
    pub fn new(header: &'h Header, namespace: &'h str) -> Self {
        Self {
            header,
            namespace,
            index: EntityIndex::new(),
            data_rows: 0,
            skipped_rows: 0,
        }
    }

    /// Resolve one data line.
    pub fn ingest_line(&mut self, line: &str) -> RowOutcome {
        if line.trim().is_empty() {
            return RowOutcome::Blank;
        }
        let Some(label_column) = self.header.label else {
            return RowOutcome::NoLabel;
        };
        self.data_rows += 1;

        let header = self.header;
        let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
        let at = |column: Option<usize>| cell(&fields, column);

        let label = at(Some(label_column));
        if label.is_empty() {
            self.skipped_rows += 1;
            tracing::debug!(row = self.data_rows, "skipping row with blank label");
            return RowOutcome::NoLabel;
        }

        let id = match at(header.id) {
            "" => label,
            id => id,
        };

        let namespace = self.namespace;
        let mut created = false;
        let entity = self.index.get_or_insert_with(id, || {
            created = true;
            let uri = match at(header.uri) {
                "" => encode::qualify(namespace, id),
                uri => resolve_uri(uri, namespace, id),
            };
            let type_name = match at(header.type_column) {
                "" => DEFAULT_TYPE,
                t => t,
            };
            Entity::new(
                id.to_string(),
                uri,
                label.to_string(),
                encode::qualify(namespace, type_name),
            )
        });

        for (index, field) in fields.iter().enumerate() {
            if field.is_empty() {
                continue;
            }
            let has_predicate = header
                .column(index)
                .is_some_and(|c| c.predicate.is_some());
            if has_predicate {
                entity.push_value(index, field.to_string());
            }
        }

        if created {
            RowOutcome::Created
        } else {
            RowOutcome::Merged
        }
    }

    /// Non-blank data lines seen so far.
    pub fn data_rows(&self) -> usize {
        self.data_rows
    }

    /// Data lines dropped for having a blank label.
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    pub fn into_index(self) -> EntityIndex {
        self.index
    }
}

/// Absolute form of a `uri` cell. Relative references resolve against the
/// namespace; anything that still is not an IRI is replaced by the
/// synthesized `namespace + encode(id)`.
fn resolve_uri(cell: &str, namespace: &str, id: &str) -> String {
    let resolved = Iri::parse(cell)
        .map(|iri| iri.into_inner().to_string())
        .or_else(|_| Iri::parse(namespace).and_then(|base| base.resolve(cell)).map(Iri::into_inner));
    match resolved {
        Ok(uri) => uri,
        Err(e) => {
            tracing::warn!(uri = cell, id, error = %e, "unusable uri cell, synthesizing one");
            encode::qualify(namespace, id)
        }
    }
}

/// Trimmed cell at `column`; missing columns and short rows read as blank.
fn cell<'a>(fields: &[&'a str], column: Option<usize>) -> &'a str {
    column.and_then(|i| fields.get(i).copied()).unwrap_or("")
}
