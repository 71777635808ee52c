//! In-memory RDF graph backed by oxigraph.
//!
//! This is the production [`GraphSink`]: statements become default-graph
//! quads in an oxigraph [`Store`], which also handles RDF parsing (for RDF
//! inputs) and serialization (for every RDF output format).

use std::io::{Read, Write};

use oxigraph::io::{RdfFormat, RdfParser, RdfSerializer};
use oxigraph::model::vocab::xsd;
use oxigraph::model::{GraphNameRef, Literal, NamedNode, Quad, Term, Triple};
use oxigraph::sparql::{QueryResults, SparqlEvaluator};
use oxigraph::store::Store;

use crate::error::{FormatError, FormatResult, SinkError, SinkResult};
use crate::sink::{GraphSink, Statement};
use crate::value::Object;

/// Prefix bound to the conversion namespace in Turtle output.
const NAMESPACE_PREFIX: &str = "ns";

/// RDF graph the converter writes into.
pub struct RdfGraph {
    store: Store,
}

impl RdfGraph {
    /// Create an empty in-memory graph.
    pub fn in_memory() -> SinkResult<Self> {
        let store = Store::new().map_err(|e| SinkError::Store {
            message: format!("failed to create oxigraph store: {e}"),
        })?;
        Ok(Self { store })
    }

    fn named_node(iri: &str) -> SinkResult<NamedNode> {
        NamedNode::new(iri).map_err(|_| SinkError::InvalidIri {
            iri: iri.to_string(),
        })
    }

    fn term(object: &Object) -> SinkResult<Term> {
        Ok(match object {
            Object::Resource(iri) => Self::named_node(iri)?.into(),
            Object::Text(s) => Literal::new_simple_literal(s).into(),
            Object::Integer(n) => Literal::from(*n).into(),
            Object::Double(x) => Literal::from(*x).into(),
            Object::Boolean(b) => Literal::from(*b).into(),
            Object::DateTime(s) => Literal::new_typed_literal(s, xsd::DATE_TIME).into(),
        })
    }

    fn quad(statement: &Statement) -> SinkResult<Quad> {
        Ok(Quad::new(
            Self::named_node(&statement.subject)?,
            Self::named_node(&statement.predicate)?,
            Self::term(&statement.object)?,
            GraphNameRef::DefaultGraph,
        ))
    }

    /// Insert one statement. Returns `false` if it was already present.
    pub fn insert_statement(&self, statement: &Statement) -> SinkResult<bool> {
        let quad = Self::quad(statement)?;
        self.store.insert(&quad).map_err(|e| SinkError::Store {
            message: format!("insert failed: {e}"),
        })
    }

    /// Whether the statement is in the graph.
    pub fn contains(&self, statement: &Statement) -> SinkResult<bool> {
        let quad = Self::quad(statement)?;
        self.store.contains(&quad).map_err(|e| SinkError::Store {
            message: format!("lookup failed: {e}"),
        })
    }

    /// Number of distinct statements.
    pub fn len(&self) -> SinkResult<usize> {
        self.store.len().map_err(|e| SinkError::Store {
            message: format!("count failed: {e}"),
        })
    }

    pub fn is_empty(&self) -> SinkResult<bool> {
        self.len().map(|n| n == 0)
    }

    fn triples(&self) -> impl Iterator<Item = SinkResult<Triple>> + '_ {
        self.store.iter().map(|quad| {
            quad.map(|q| Triple::new(q.subject, q.predicate, q.object))
                .map_err(|e| SinkError::Store {
                    message: format!("iteration failed: {e}"),
                })
        })
    }

    /// Parse RDF from `reader` into the graph, resolving relative IRIs
    /// against `base_iri`. Returns the number of triples read.
    pub fn load(&self, format: RdfFormat, reader: impl Read, base_iri: &str) -> FormatResult<usize> {
        let parser = RdfParser::from_format(format)
            .with_base_iri(base_iri)
            .map_err(|e| FormatError::Parse {
                message: format!("invalid base IRI {base_iri}: {e}"),
            })?;
        let mut count = 0;
        for quad in parser.for_reader(reader) {
            let quad = quad.map_err(|e| FormatError::Parse {
                message: e.to_string(),
            })?;
            self.store.insert(&quad).map_err(|e| FormatError::Parse {
                message: format!("insert failed: {e}"),
            })?;
            count += 1;
        }
        tracing::info!(count, ?format, "loaded RDF input");
        Ok(count)
    }

    /// Serialize the graph. `namespace` is declared as a prefix where the
    /// format supports prefixes.
    pub fn write_rdf<W: Write>(&self, format: RdfFormat, writer: W, namespace: &str) -> FormatResult<W> {
        let mut serializer = RdfSerializer::from_format(format)
            .with_prefix(NAMESPACE_PREFIX, namespace)
            .map_err(|e| FormatError::Serialize {
                message: format!("invalid prefix IRI {namespace}: {e}"),
            })?
            .for_writer(writer);
        for triple in self.triples() {
            let triple = triple.map_err(|e| FormatError::Serialize {
                message: e.to_string(),
            })?;
            serializer
                .serialize_triple(&triple)
                .map_err(|e| FormatError::Serialize {
                    message: e.to_string(),
                })?;
        }
        serializer.finish().map_err(|e| FormatError::Serialize {
            message: e.to_string(),
        })
    }

    /// Write the lexical form of every literal object, each followed by a space.
    pub fn write_text<W: Write>(&self, mut writer: W) -> FormatResult<W> {
        for triple in self.triples() {
            let triple = triple.map_err(|e| FormatError::Serialize {
                message: e.to_string(),
            })?;
            if let Term::Literal(literal) = &triple.object {
                write!(writer, "{} ", literal.value()).map_err(|e| FormatError::Serialize {
                    message: e.to_string(),
                })?;
            }
        }
        Ok(writer)
    }

    /// Execute a SPARQL ASK query.
    pub fn query_ask(&self, sparql: &str) -> SinkResult<bool> {
        let results = SparqlEvaluator::new()
            .parse_query(sparql)
            .map_err(|e| SinkError::Store {
                message: format!("SPARQL syntax error: {e}"),
            })?
            .on_store(&self.store)
            .execute()
            .map_err(|e| SinkError::Store {
                message: format!("SPARQL query failed: {e}"),
            })?;
        match results {
            QueryResults::Boolean(b) => Ok(b),
            _ => Err(SinkError::Store {
                message: "expected boolean result from ASK query".into(),
            }),
        }
    }
}

impl GraphSink for RdfGraph {
    fn add_statement(&mut self, statement: Statement) -> SinkResult<()> {
        self.insert_statement(&statement).map(|_| ())
    }
}

impl std::fmt::Debug for RdfGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RdfGraph").finish()
    }
}
