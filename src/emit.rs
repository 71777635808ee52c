//! Second pass: entities to statements.

use oxigraph::model::vocab::{rdf, rdfs};

use crate::column::{Header, Multiplicity};
use crate::entity::{Entity, EntityIndex};
use crate::error::SinkResult;
use crate::sink::{GraphSink, Statement};
use crate::value::{self, Object};

/// Separator between values of a multi-valued cell.
pub const LIST_SEPARATOR: char = ';';

/// Writes every entity of a complete index into a sink.
pub struct StatementEmitter<'a> {
    header: &'a Header,
    index: &'a EntityIndex,
    namespace: &'a str,
    id_predicate: &'a str,
}

impl<'a> StatementEmitter<'a> {
    pub fn new(
        header: &'a Header,
        index: &'a EntityIndex,
        namespace: &'a str,
        id_predicate: &'a str,
    ) -> Self {
        Self {
            header,
            index,
            namespace,
            id_predicate,
        }
    }

    /// Emit all entities. Returns the number of statements added.
    pub fn emit_all(&self, sink: &mut impl GraphSink) -> SinkResult<usize> {
        let mut count = 0;
        for entity in self.index.iter() {
            count += self.emit_entity(entity, sink)?;
        }
        Ok(count)
    }

    /// Emit the type, label and id statements of one entity, then one
    /// statement per coerced property value.
    pub fn emit_entity(&self, entity: &Entity, sink: &mut impl GraphSink) -> SinkResult<usize> {
        let subject = entity.uri.as_str();
        sink.add_statement(Statement::new(
            subject,
            rdf::TYPE.as_str(),
            Object::Resource(entity.type_uri.clone()),
        ))?;
        sink.add_statement(Statement::new(
            subject,
            rdfs::LABEL.as_str(),
            Object::Text(entity.label.clone()),
        ))?;
        sink.add_statement(Statement::new(
            subject,
            self.id_predicate,
            Object::Text(entity.id.clone()),
        ))?;
        let mut count = 3;

        for (&column_index, raw_values) in &entity.properties {
            let Some(column) = self.header.column(column_index) else {
                continue;
            };
            let Some(predicate) = column.predicate.as_deref() else {
                continue;
            };

            for raw in raw_values {
                let pieces: Vec<&str> = match column.multiplicity {
                    Multiplicity::Single => vec![raw.as_str()],
                    Multiplicity::Multi => raw
                        .split(LIST_SEPARATOR)
                        .map(str::trim)
                        .filter(|piece| !piece.is_empty())
                        .collect(),
                };
                for piece in pieces {
                    let object = value::coerce(piece, column.kind, self.index, self.namespace);
                    sink.add_statement(Statement::new(subject, predicate, object))?;
                    count += 1;
                }
            }
        }
        Ok(count)
    }
}
