//! The destination graph, seen from the converter.
//!
//! The converter only ever appends statements; it never reads, updates or
//! removes them. Anything that can take a statement is a sink: the oxigraph
//! backed [`RdfGraph`](crate::graph::RdfGraph) for real output, or a
//! [`TripleList`] when only the statements themselves matter.

use crate::error::SinkResult;
use crate::value::Object;

/// A subject–predicate–object fact.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub subject: String,
    pub predicate: String,
    pub object: Object,
}

impl Statement {
    pub fn new(subject: impl Into<String>, predicate: impl Into<String>, object: Object) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object,
        }
    }
}

/// Append-only statement destination.
pub trait GraphSink {
    fn add_statement(&mut self, statement: Statement) -> SinkResult<()>;
}

impl<S: GraphSink + ?Sized> GraphSink for &mut S {
    fn add_statement(&mut self, statement: Statement) -> SinkResult<()> {
        (**self).add_statement(statement)
    }
}

/// Plain append-only list of statements, in emission order.
#[derive(Debug, Clone, Default)]
pub struct TripleList {
    statements: Vec<Statement>,
}

impl TripleList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Statements about `subject`.
    pub fn about<'a>(&'a self, subject: &'a str) -> impl Iterator<Item = &'a Statement> + 'a {
        self.statements.iter().filter(move |s| s.subject == subject)
    }

    /// Objects of `(subject, predicate, ?)`.
    pub fn objects<'a>(
        &'a self,
        subject: &'a str,
        predicate: &'a str,
    ) -> impl Iterator<Item = &'a Object> + 'a {
        self.about(subject)
            .filter(move |s| s.predicate == predicate)
            .map(|s| &s.object)
    }
}

impl GraphSink for TripleList {
    fn add_statement(&mut self, statement: Statement) -> SinkResult<()> {
        self.statements.push(statement);
        Ok(())
    }
}
