//! Percent-encoding for synthesized IRIs.
//!
//! Every IRI the converter invents (column predicates, entity URIs, type
//! URIs, dangling item references) is `namespace + encode(text)`. Bytes of the
//! UTF-8 encoding pass through when they fall in `a-z`, `@`–`Z`, `'`–`.`,
//! `0`–`;` or are one of `$ = _ !`; everything else becomes `%XX`.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Bytes that are escaped. Starts from "everything but alphanumerics" and
/// lets the pass-through punctuation back out.
const IRI_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'$')
    .remove(b'=')
    .remove(b'_')
    .remove(b'!')
    .remove(b'@')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b'-')
    .remove(b'.')
    .remove(b':')
    .remove(b';');

/// Percent-encode `text` for use as the local part of an IRI.
pub fn encode(text: &str) -> String {
    utf8_percent_encode(text, IRI_SEGMENT).to_string()
}

/// `namespace` followed by the encoded `local` part.
pub fn qualify(namespace: &str, local: &str) -> String {
    let mut iri = String::with_capacity(namespace.len() + local.len());
    iri.push_str(namespace);
    iri.push_str(&encode(local));
    iri
}
