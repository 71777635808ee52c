//! End-to-end tests for tsvgraph.
//!
//! These exercise the whole pipeline from raw TSV text through entity
//! resolution and statement emission, into both the plain statement list and
//! the oxigraph-backed graph, and back out through the serializers.

use std::collections::BTreeSet;

use oxigraph::model::vocab::{rdf, rdfs};

use tsvgraph::config::{ConvertConfig, EXHIBIT_ID};
use tsvgraph::convert::{read_graph, read_tsv, write_graph};
use tsvgraph::format::{InputFormat, OutputFormat};
use tsvgraph::sink::TripleList;
use tsvgraph::value::Object;

const NS: &str = "http://example.org/data#";

fn config() -> ConvertConfig {
    ConvertConfig::with_namespace(NS)
}

fn convert(input: &str) -> TripleList {
    let mut sink = TripleList::new();
    read_tsv(input.as_bytes(), &config(), &mut sink).unwrap();
    sink
}

fn iri(local: &str) -> String {
    format!("{NS}{local}")
}

const PEOPLE: &str = "\
id\tlabel\ttype\tspouse:item\tage:number,single\ttags\tmember:boolean\tborn:date\thomepage:url
alice\tAlice\tPerson\tbob\t34\tchess;go\ttrue\t1990-01-02\thttp://alice.example/
bob\tBob\tPerson\talice\t35.5\t\tnope\t\t
carol\tCarol\t\tdave\tunknown\tknitting\tFALSE\t\t

alice\tAlice Again\tRobot\t\t\tpoker\t\t\t
\tEve\t\t\t\t\t\t\t
";

#[test]
fn end_to_end_people_table() {
    let sink = convert(PEOPLE);

    // Entities: alice, bob, carol, Eve (blank id falls back to label).
    let subjects: BTreeSet<String> =
        sink.statements().iter().map(|s| s.subject.clone()).collect();
    let expected: BTreeSet<String> = [iri("Eve"), iri("alice"), iri("bob"), iri("carol")]
        .into_iter()
        .collect();
    assert_eq!(subjects, expected);

    let alice = iri("alice");

    // First row wins for type and label.
    assert_eq!(
        sink.objects(&alice, rdf::TYPE.as_str()).collect::<Vec<_>>(),
        [&Object::Resource(iri("Person"))]
    );
    assert_eq!(
        sink.objects(&alice, rdfs::LABEL.as_str()).collect::<Vec<_>>(),
        [&Object::Text("Alice".into())]
    );
    assert_eq!(
        sink.objects(&alice, EXHIBIT_ID).collect::<Vec<_>>(),
        [&Object::Text("alice".into())]
    );

    // Properties are the union of both rows.
    assert_eq!(
        sink.objects(&alice, &iri("tags")).collect::<Vec<_>>(),
        [
            &Object::Text("chess".into()),
            &Object::Text("go".into()),
            &Object::Text("poker".into())
        ]
    );

    // Typed values.
    assert_eq!(
        sink.objects(&alice, &iri("age")).collect::<Vec<_>>(),
        [&Object::Integer(34)]
    );
    assert_eq!(
        sink.objects(&iri("bob"), &iri("age")).collect::<Vec<_>>(),
        [&Object::Double(35.5)]
    );
    assert_eq!(
        sink.objects(&iri("carol"), &iri("age")).collect::<Vec<_>>(),
        [&Object::Text("unknown".into())]
    );
    assert_eq!(
        sink.objects(&alice, &iri("member")).collect::<Vec<_>>(),
        [&Object::Boolean(true)]
    );
    assert_eq!(
        sink.objects(&iri("bob"), &iri("member")).collect::<Vec<_>>(),
        [&Object::Text("nope".into())]
    );
    assert_eq!(
        sink.objects(&iri("carol"), &iri("member")).collect::<Vec<_>>(),
        [&Object::Boolean(false)]
    );
    assert_eq!(
        sink.objects(&alice, &iri("born")).collect::<Vec<_>>(),
        [&Object::DateTime("1990-01-02".into())]
    );
    assert_eq!(
        sink.objects(&alice, &iri("homepage")).collect::<Vec<_>>(),
        [&Object::Text("http://alice.example/".into())]
    );

    // Item references: resolved and dangling.
    assert_eq!(
        sink.objects(&alice, &iri("spouse")).collect::<Vec<_>>(),
        [&Object::Resource(iri("bob"))]
    );
    assert_eq!(
        sink.objects(&iri("carol"), &iri("spouse")).collect::<Vec<_>>(),
        [&Object::Resource(iri("dave"))]
    );
    assert_eq!(sink.about(&iri("dave")).count(), 0);

    // Carol has a blank type cell.
    assert_eq!(
        sink.objects(&iri("carol"), rdf::TYPE.as_str()).collect::<Vec<_>>(),
        [&Object::Resource(iri("Item"))]
    );
}

#[test]
fn blank_label_row_is_dropped_entirely() {
    let sink = convert("id\tlabel\tcolor\nx\t\tred\nx\tX\tblue\n");
    assert_eq!(
        sink.objects(&iri("x"), &iri("color")).collect::<Vec<_>>(),
        [&Object::Text("blue".into())]
    );
    assert_eq!(
        sink.objects(&iri("x"), rdfs::LABEL.as_str()).collect::<Vec<_>>(),
        [&Object::Text("X".into())]
    );
}

#[test]
fn input_without_header_converts_nothing() {
    let mut sink = TripleList::new();
    let report = read_tsv("\n \t \n\t\n".as_bytes(), &config(), &mut sink).unwrap();
    assert_eq!(report.entities, 0);
    assert_eq!(report.statements, 0);
    assert!(sink.is_empty());
}

#[test]
fn label_fallback_uses_first_declared_column() {
    let sink = convert("\tname\tcity\n\tParis\tFrance\n");
    let paris = iri("Paris");
    assert_eq!(
        sink.objects(&paris, rdfs::LABEL.as_str()).collect::<Vec<_>>(),
        [&Object::Text("Paris".into())]
    );
    // The label column is an ordinary column too, so it also becomes a property.
    assert_eq!(
        sink.objects(&paris, &iri("name")).collect::<Vec<_>>(),
        [&Object::Text("Paris".into())]
    );
    assert_eq!(
        sink.objects(&paris, &iri("city")).collect::<Vec<_>>(),
        [&Object::Text("France".into())]
    );
}

#[test]
fn synthesized_iris_are_percent_encoded() {
    let sink = convert("label\tplace of birth:item\nJosé Martí\tLa Habana\n");
    let jose = iri("Jos%C3%A9%20Mart%C3%AD");
    assert_eq!(
        sink.objects(&jose, &iri("place%20of%20birth")).collect::<Vec<_>>(),
        [&Object::Resource(iri("La%20Habana"))]
    );
}

#[test]
fn oxigraph_graph_deduplicates_statements() {
    let input = b"id\tlabel\ttags\na\tA\tx;x\na\tA\tx\n";
    let (graph, report) = read_graph(input, InputFormat::Tsv, &config()).unwrap();
    // 3 core + 3 tag statements handed over, but they collapse in a set-based store.
    assert_eq!(report.statements, 6);
    assert_eq!(graph.len().unwrap(), 4);
}

#[test]
fn sparql_sees_typed_literals() {
    let (graph, _) = read_graph(
        b"label\tn:number\tok:boolean\nA\t42\ttrue\n",
        InputFormat::Tsv,
        &config(),
    )
    .unwrap();
    assert!(graph
        .query_ask(&format!("ASK {{ <{NS}A> <{NS}n> 42 ; <{NS}ok> true }}"))
        .unwrap());
}

#[test]
fn convert_file_to_every_output_format() {
    let dir = tempfile::TempDir::new().unwrap();
    let input_path = dir.path().join("people.tsv");
    std::fs::write(&input_path, PEOPLE).unwrap();

    let bytes = std::fs::read(&input_path).unwrap();
    let format = InputFormat::from_path(&input_path).unwrap();
    let (graph, _) = read_graph(&bytes, format, &config()).unwrap();

    for output in OutputFormat::ALL {
        let path = dir.path().join(format!("people.{}", output.name()));
        let file = std::fs::File::create(&path).unwrap();
        write_graph(&graph, output, file, &config()).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("Alice"), "{output} output lacks Alice");
    }
}

#[test]
fn ntriples_output_reads_back_identically() {
    let (graph, _) = read_graph(PEOPLE.as_bytes(), InputFormat::Tsv, &config()).unwrap();
    let nt = write_graph(&graph, OutputFormat::NTriples, Vec::new(), &config()).unwrap();

    let (copy, report) = read_graph(&nt, InputFormat::NTriples, &config()).unwrap();
    assert_eq!(report.statements, graph.len().unwrap());
    assert_eq!(copy.len().unwrap(), graph.len().unwrap());
}

#[test]
fn latin1_input_with_configured_encoding() {
    let config = ConvertConfig {
        input_encoding: "iso-8859-1".into(),
        ..config()
    };
    let (graph, report) = read_graph(b"label\nCaf\xe9\n", InputFormat::Tsv, &config).unwrap();
    assert_eq!(report.entities, 1);
    assert!(graph
        .query_ask(&format!("ASK {{ <{NS}Caf%C3%A9> ?p \"Café\" }}"))
        .unwrap());
}

#[test]
fn latin1_output_follows_input_encoding() {
    let config = ConvertConfig {
        input_encoding: "iso-8859-1".into(),
        ..config()
    };
    let (graph, _) = read_graph(b"label\nCaf\xe9\n", InputFormat::Tsv, &config).unwrap();
    let out = write_graph(&graph, OutputFormat::Text, Vec::new(), &config).unwrap();
    assert!(out.windows(4).any(|w| w == b"Caf\xe9"));
    assert!(String::from_utf8(out).is_err());

    let utf8 = ConvertConfig {
        output_encoding: Some("utf-8".into()),
        ..config
    };
    let out = write_graph(&graph, OutputFormat::Text, Vec::new(), &utf8).unwrap();
    assert!(String::from_utf8(out).unwrap().contains("Café"));
}
