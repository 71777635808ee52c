//! Header parsing: column descriptors and reserved column roles.
//!
//! A header cell has the shape `name[:detail{,detail}]`. Details choose the
//! multiplicity (`single`) and the value kind (`item`, `number`, `boolean`,
//! `date`, `url`). Four names (`uri`, `id`, `label`, `type`, any case) are
//! reserved: they shape the entity instead of becoming properties.

use std::fmt;

use crate::encode;

/// Whether a cell holds one value or a `;`-separated list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Multiplicity {
    Single,
    #[default]
    Multi,
}

/// The literal type a cell's content is coerced toward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Reference to another row's entity, by id.
    Item,
    #[default]
    Text,
    Number,
    Boolean,
    Date,
    Url,
}

impl ValueKind {
    /// Match a header detail token. Case-insensitive.
    fn from_detail(detail: &str) -> Option<Self> {
        match detail.to_ascii_lowercase().as_str() {
            "item" => Some(Self::Item),
            "number" => Some(Self::Number),
            "boolean" => Some(Self::Boolean),
            "date" => Some(Self::Date),
            "url" => Some(Self::Url),
            _ => None,
        }
    }
}

/// Reserved column roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservedRole {
    Uri,
    Id,
    Label,
    Type,
}

impl ReservedRole {
    fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("uri") {
            Some(Self::Uri)
        } else if name.eq_ignore_ascii_case("id") {
            Some(Self::Id)
        } else if name.eq_ignore_ascii_case("label") {
            Some(Self::Label)
        } else if name.eq_ignore_ascii_case("type") {
            Some(Self::Type)
        } else {
            None
        }
    }

    /// Canonical lower-case column name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Uri => "uri",
            Self::Id => "id",
            Self::Label => "label",
            Self::Type => "type",
        }
    }
}

impl fmt::Display for ReservedRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed metadata for one non-blank header cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Declared name; lower-cased for reserved columns.
    pub name: String,
    /// Predicate IRI. `None` exactly for reserved columns.
    pub predicate: Option<String>,
    pub multiplicity: Multiplicity,
    pub kind: ValueKind,
}

impl ColumnSpec {
    /// Parse one trimmed, non-empty header cell.
    ///
    /// Returns the descriptor and, if the name is reserved, its role.
    pub fn parse(cell: &str, namespace: &str) -> (Self, Option<ReservedRole>) {
        let (name, details) = match cell.split_once(':') {
            Some((name, details)) => (name.trim(), Some(details)),
            None => (cell, None),
        };

        let mut multiplicity = Multiplicity::default();
        let mut kind = ValueKind::default();
        for detail in details.into_iter().flat_map(|d| d.split(',')) {
            let detail = detail.trim();
            if detail.eq_ignore_ascii_case("single") {
                multiplicity = Multiplicity::Single;
            } else if let Some(k) = ValueKind::from_detail(detail) {
                kind = k;
            }
        }

        let role = ReservedRole::from_name(name);
        let spec = match role {
            Some(role) => Self {
                name: role.as_str().to_string(),
                predicate: None,
                multiplicity,
                kind,
            },
            None => Self {
                name: name.to_string(),
                predicate: Some(encode::qualify(namespace, name)),
                multiplicity,
                kind,
            },
        };
        (spec, role)
    }
}

/// The parsed header row: descriptors aligned 1:1 with tab positions plus
/// the reserved column indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    /// `None` where the header cell was blank.
    pub columns: Vec<Option<ColumnSpec>>,
    pub uri: Option<usize>,
    pub id: Option<usize>,
    /// Declared `label` column, or the first non-blank column if none was declared.
    pub label: Option<usize>,
    pub type_column: Option<usize>,
}

impl Header {
    /// Parse a header line. The line is split on `\t` with empty fields kept.
    pub fn parse(line: &str, namespace: &str) -> Self {
        let mut header = Self::default();

        for (index, cell) in line.split('\t').enumerate() {
            let cell = cell.trim();
            if cell.is_empty() {
                header.columns.push(None);
                continue;
            }
            let (spec, role) = ColumnSpec::parse(cell, namespace);
            if let Some(role) = role {
                header.bind(role, index);
            }
            header.columns.push(Some(spec));
        }

        if header.label.is_none() {
            header.label = header.columns.iter().position(Option::is_some);
            if let Some(index) = header.label {
                tracing::debug!(index, "no label column declared, using first non-blank column");
            }
        }

        tracing::debug!(
            columns = header.columns.len(),
            uri = ?header.uri,
            id = ?header.id,
            label = ?header.label,
            type_column = ?header.type_column,
            "parsed header"
        );
        header
    }

    fn bind(&mut self, role: ReservedRole, index: usize) {
        let slot = match role {
            ReservedRole::Uri => &mut self.uri,
            ReservedRole::Id => &mut self.id,
            ReservedRole::Label => &mut self.label,
            ReservedRole::Type => &mut self.type_column,
        };
        if let Some(previous) = slot.replace(index) {
            tracing::warn!(
                %role,
                previous,
                index,
                "reserved column declared twice, later column wins"
            );
        }
    }

    /// Whether any rows can be ingested. A header with no label column
    /// (i.e. no non-blank cell at all) yields nothing.
    pub fn is_usable(&self) -> bool {
        self.label.is_some()
    }

    /// Descriptor at `index`, if the header cell there was non-blank.
    pub fn column(&self, index: usize) -> Option<&ColumnSpec> {
        self.columns.get(index).and_then(Option::as_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NS: &str = "urn:test:";

    #[test]
    fn plain_column_defaults() {
        let (spec, role) = ColumnSpec::parse("color", NS);
        assert_eq!(role, None);
        assert_eq!(spec.name, "color");
        assert_eq!(spec.predicate.as_deref(), Some("urn:test:color"));
        assert_eq!(spec.multiplicity, Multiplicity::Multi);
        assert_eq!(spec.kind, ValueKind::Text);
    }

    #[test]
    fn details_are_case_insensitive_and_last_kind_wins() {
        let (spec, _) = ColumnSpec::parse("born : Single , NUMBER, date", NS);
        assert_eq!(spec.name, "born");
        assert_eq!(spec.multiplicity, Multiplicity::Single);
        assert_eq!(spec.kind, ValueKind::Date);
    }

    #[test]
    fn unknown_details_are_ignored() {
        let (spec, _) = ColumnSpec::parse("homepage:url,sortable,,", NS);
        assert_eq!(spec.kind, ValueKind::Url);
        assert_eq!(spec.multiplicity, Multiplicity::Multi);
    }

    #[test]
    fn predicate_is_percent_encoded() {
        let (spec, _) = ColumnSpec::parse("birth place:item", NS);
        assert_eq!(spec.name, "birth place");
        assert_eq!(spec.predicate.as_deref(), Some("urn:test:birth%20place"));
        assert_eq!(spec.kind, ValueKind::Item);
    }

    #[test]
    fn reserved_names_are_normalized() {
        let (spec, role) = ColumnSpec::parse("LaBeL", NS);
        assert_eq!(role, Some(ReservedRole::Label));
        assert_eq!(spec.name, "label");
        assert!(spec.predicate.is_none());
    }

    #[test]
    fn blank_cells_keep_their_index() {
        let header = Header::parse("label\t\tcolor\t \tsize:number", NS);
        assert_eq!(header.columns.len(), 5);
        assert!(header.columns[0].is_some());
        assert!(header.columns[1].is_none());
        assert!(header.columns[2].is_some());
        assert!(header.columns[3].is_none());
        assert_eq!(header.column(4).map(|c| c.kind), Some(ValueKind::Number));
    }

    #[test]
    fn reserved_indices_recorded() {
        let header = Header::parse("ID\tLabel\tURI\tType\tnotes", NS);
        assert_eq!(header.id, Some(0));
        assert_eq!(header.label, Some(1));
        assert_eq!(header.uri, Some(2));
        assert_eq!(header.type_column, Some(3));
    }

    #[test]
    fn duplicate_reserved_column_last_wins() {
        let header = Header::parse("label\tid\tLABEL", NS);
        assert_eq!(header.label, Some(2));
        assert_eq!(header.id, Some(1));
    }

    #[test]
    fn label_falls_back_to_first_non_blank_column() {
        let header = Header::parse("\t\tname\tage", NS);
        assert_eq!(header.label, Some(2));
        assert!(header.is_usable());
    }

    #[test]
    fn fallback_label_may_be_a_reserved_column() {
        let header = Header::parse("id\tname", NS);
        assert_eq!(header.id, Some(0));
        assert_eq!(header.label, Some(0));
    }

    #[test]
    fn all_blank_header_is_unusable() {
        let header = Header::parse("\t \t", NS);
        assert_eq!(header.columns.len(), 3);
        assert!(!header.is_usable());
    }
}
