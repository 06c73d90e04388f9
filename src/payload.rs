//! Discovery of the YANG modules referenced by a payload
//!
//! Before a payload can be decoded, the schemas of every module it touches
//! must be loaded. XML payloads identify modules by namespace URI, JSON
//! payloads by the `module:` prefix of member names (RFC 7951).

use std::collections::BTreeSet;

use quick_xml::events::Event;
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;
use serde_json::Value;

use crate::error::{ProviderError, Result};

/// Namespace URIs of all elements in an XML document
pub fn xml_namespaces(payload: &str) -> Result<BTreeSet<String>> {
    let mut reader = NsReader::from_str(payload);
    let mut namespaces = BTreeSet::new();

    loop {
        match reader.read_resolved_event() {
            Ok((ResolveResult::Bound(ns), Event::Start(_) | Event::Empty(_))) => {
                namespaces.insert(String::from_utf8_lossy(ns.as_ref()).into_owned());
            }
            Ok((_, Event::Eof)) => break,
            Ok(_) => {}
            Err(e) => return Err(ProviderError::Xml(e.to_string())),
        }
    }

    Ok(namespaces)
}

/// Module of the top level node of a JSON document
///
/// A member name without a module prefix is returned as is.
pub fn json_top_module_name(payload: &str) -> Result<String> {
    let value: Value = serde_json::from_str(payload)?;
    let Value::Object(map) = value else {
        return Err(ProviderError::InvalidPayload(
            "top level JSON value must be an object".into(),
        ));
    };

    let identifier = map
        .keys()
        .next()
        .ok_or_else(|| ProviderError::InvalidPayload("JSON object is empty".into()))?;

    let module = identifier
        .split_once(':')
        .map_or(identifier.as_str(), |(module, _)| module);
    Ok(module.to_string())
}

/// Every module named in a JSON document
///
/// Collects the prefixes of qualified member names, and of string values
/// holding identities or instance identifiers (`"iana-if-type:ethernetCsmacd"`).
pub fn json_module_names(payload: &str) -> Result<BTreeSet<String>> {
    let value: Value = serde_json::from_str(payload)?;
    let mut modules = BTreeSet::new();
    collect_module_names(&value, &mut modules);
    Ok(modules)
}

fn collect_module_names(value: &Value, modules: &mut BTreeSet<String>) {
    match value {
        Value::Object(map) => {
            for (key, v) in map {
                if let Some((module, _)) = key.split_once(':') {
                    modules.insert(module.to_string());
                }
                collect_module_names(v, modules);
            }
        }
        Value::Array(arr) => {
            for elem in arr {
                collect_module_names(elem, modules);
            }
        }
        Value::String(s) => {
            modules.extend(value_module_names(s));
        }
        _ => {}
    }
}

// Prefixes of the path segments of an identity or instance identifier value
fn value_module_names(value: &str) -> impl Iterator<Item = String> + '_ {
    value.split('/').filter_map(|segment| {
        let (module, _) = segment.split_once(':')?;
        is_identifier(module).then(|| module.to_string())
    })
}

// YANG identifier: letter or underscore, then letters, digits, '_', '-', '.'
fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}
