//! Qualified names.
//!
//! A qualified name joins the local names of an element's owning namespaces
//! with `::`. Local names that are not basic identifiers are written in
//! single quotes, with `\'` and `\\` escapes.

use crate::{NameError, NameResult};
use regex_lite::Regex;
use sema_core::ElementRef;
use sema_graph::GraphView;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Separator between qualified name segments.
pub const SEPARATOR: &str = "::";

fn basic_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("basic name pattern compiles"))
}

/// Check whether a name can be written without quotes.
pub fn is_basic_name(name: &str) -> bool {
    basic_name_pattern().is_match(name)
}

/// Escape one local name for use as a qualified name segment.
pub fn escape_name(name: &str) -> String {
    if is_basic_name(name) {
        return name.to_string();
    }
    let mut out = String::with_capacity(name.len() + 2);
    out.push('\'');
    for c in name.chars() {
        if c == '\'' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('\'');
    out
}

/// Split a qualified name into unescaped segments.
pub fn split_qualified_name(name: &str) -> NameResult<Vec<String>> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = name.chars().peekable();
    let mut quoted = false;
    let mut in_quotes = false;

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '\\' => match chars.next() {
                    Some(escaped) => current.push(escaped),
                    None => return Err(NameError::malformed(name, "dangling escape")),
                },
                '\'' => in_quotes = false,
                _ => current.push(c),
            }
            continue;
        }

        match c {
            '\'' if current.is_empty() && !quoted => {
                in_quotes = true;
                quoted = true;
            }
            ':' if chars.peek() == Some(&':') => {
                chars.next();
                if current.is_empty() && !quoted {
                    return Err(NameError::malformed(name, "empty segment"));
                }
                segments.push(std::mem::take(&mut current));
                quoted = false;
            }
            _ => current.push(c),
        }
    }

    if in_quotes {
        return Err(NameError::malformed(name, "unterminated quote"));
    }
    if current.is_empty() && !quoted {
        return Err(NameError::malformed(name, "empty segment"));
    }
    segments.push(current);
    Ok(segments)
}

/// The declared name of an element, else its declared short name.
pub fn local_name<V: GraphView + ?Sized>(view: &V, element: ElementRef) -> Option<String> {
    let vocab = view.registry().vocabulary();
    view.property(element, &vocab.declared_name)
        .or_else(|| view.property(element, &vocab.declared_short_name))
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

/// Compute the qualified name of an element from its containment.
///
/// Root namespaces have no qualified name; their members are named by their
/// escaped local name alone. Unnamed elements, elements owned by anything
/// other than a membership, and elements under an unnamed non-root
/// namespace have none either.
pub fn qualified_name_of<V: GraphView + ?Sized>(view: &V, element: ElementRef) -> Option<String> {
    let vocab = view.registry().vocabulary();
    let mut segments = vec![escape_name(&local_name(view, element)?)];
    let mut visited = HashSet::from([element]);
    let mut current = element;

    loop {
        let membership = view.first_link(current, &vocab.owning_relationship)?;
        if !view.is_a(membership, &vocab.membership_class) {
            return None;
        }
        let namespace = view.first_link(membership, &vocab.owning_related_element)?;
        if view.first_link(namespace, &vocab.owning_relationship).is_none() {
            break;
        }
        if !visited.insert(namespace) {
            return None;
        }
        segments.push(escape_name(&local_name(view, namespace)?));
        current = namespace;
    }

    segments.reverse();
    Some(segments.join(SEPARATOR))
}
