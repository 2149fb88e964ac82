use std::iter;

use serde_json::Value;

use super::vocab::{self, Term};

static NULL: Value = Value::Null;

/// The two serializations of the same JSON-LD graph we know how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Form {
    /// Short property names, values possibly bare scalars.
    Compacted,
    /// IRI property keys, values wrapped in sequences of `@value` / `@id`
    /// objects.
    Expanded,
}

impl Form {
    pub(crate) fn detect(value: &Value) -> Form {
        match value {
            Value::Array(_) => Form::Expanded,
            Value::Object(map) => {
                if map.contains_key(vocab::CONTEXT) {
                    return Form::Compacted;
                }
                // A single extension property does not make a document expanded.
                let expanded = !map.is_empty()
                    && map
                        .keys()
                        .all(|key| key.starts_with('@') || key.contains("://"));
                if expanded {
                    Form::Expanded
                } else {
                    Form::Compacted
                }
            }
            _ => Form::Compacted,
        }
    }
}

/// Read-only view of a JSON-LD node.
///
/// Lookups never fail: absent properties and values of unexpected shape are
/// reported as `None` or as an empty sequence.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Node<'a> {
    value: &'a Value,
    form: Form,
}

impl<'a> Node<'a> {
    /// Wrap a whole document, detecting its form.
    pub(crate) fn root(document: &'a Value) -> Node<'a> {
        Node::root_as(document, Form::detect(document))
    }

    /// Wrap a whole document whose form is already known.
    pub(crate) fn root_as(document: &'a Value, form: Form) -> Node<'a> {
        let value = match document {
            // Expanded documents are a top-level array of node objects.
            Value::Array(nodes) => nodes.iter().find(|v| v.is_object()).unwrap_or(&NULL),
            value => value,
        };
        Node { value, form }
    }

    pub(crate) fn empty(form: Form) -> Node<'static> {
        Node { value: &NULL, form }
    }

    pub(crate) fn form(&self) -> Form {
        self.form
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.value.as_object().is_none_or(|map| map.is_empty())
    }

    /// A node object that only names another node, like `{"id": "..."}`.
    pub(crate) fn is_reference(&self) -> bool {
        self.value.as_object().is_some_and(|map| {
            !map.is_empty()
                && map
                    .keys()
                    .all(|key| key == vocab::ID.name() || key == vocab::ID.iri())
        })
    }

    fn raw(&self, term: Term) -> Option<&'a Value> {
        let map = self.value.as_object()?;
        match self.form {
            Form::Compacted => map.get(term.name()).or_else(|| map.get(term.iri())),
            Form::Expanded => map.get(term.iri()),
        }
    }

    /// All values of a property, with sequences and `@list` wrappers
    /// flattened. `null` entries are dropped.
    fn values(&self, term: Term) -> Box<dyn Iterator<Item = &'a Value> + 'a> {
        let Some(value) = self.raw(term) else {
            return Box::new(iter::empty::<&'a Value>());
        };
        Box::new(flatten(value).filter(|v| !v.is_null()))
    }

    pub(crate) fn has(&self, term: Term) -> bool {
        self.values(term).next().is_some()
    }

    pub(crate) fn id(&self) -> Option<&'a str> {
        self.get_str(vocab::ID)
    }

    pub(crate) fn type_name(&self) -> Option<&'a str> {
        self.values(vocab::TYPE)
            .find_map(Value::as_str)
            .map(vocab::compact_type)
    }

    pub(crate) fn type_is(&self, ty: &str) -> bool {
        self.values(vocab::TYPE)
            .filter_map(Value::as_str)
            .any(|type_name| vocab::compact_type(type_name) == ty)
    }

    /// String value of a singular property. Several values are ambiguous and
    /// read as absent.
    pub(crate) fn get_str(&self, term: Term) -> Option<&'a str> {
        single(self.values(term).filter_map(scalar_str))
    }

    /// The string value that carries no language tag.
    pub(crate) fn get_plain_str(&self, term: Term) -> Option<&'a str> {
        single(
            self.values(term)
                .filter(|v| v.get(vocab::LANGUAGE).is_none())
                .filter_map(scalar_str),
        )
    }

    /// Node reference: either a bare IRI, or the `id` of an embedded node.
    pub(crate) fn get_iri(&self, term: Term) -> Option<&'a str> {
        let form = self.form;
        single(self.values(term).filter_map(|v| iri_of(v, form)))
    }

    /// Set of node references, in document order.
    pub(crate) fn get_iris(&self, term: Term) -> Vec<&'a str> {
        let form = self.form;
        self.values(term).filter_map(|v| iri_of(v, form)).collect()
    }

    pub(crate) fn get_node(&self, term: Term) -> Option<Node<'a>> {
        let form = self.form;
        self.values(term)
            .find(|v| is_node_object(v))
            .map(|value| Node { value, form })
    }

    pub(crate) fn get_nodes(&self, term: Term) -> Vec<Node<'a>> {
        let form = self.form;
        self.values(term)
            .filter(|v| is_node_object(v))
            .map(|value| Node { value, form })
            .collect()
    }

    pub(crate) fn get_u64(&self, term: Term) -> Option<u64> {
        self.values(term).find_map(|v| {
            let v = v.get(vocab::VALUE).unwrap_or(v);
            match v {
                Value::Number(n) => n.as_u64(),
                Value::String(s) => s.trim().parse().ok(),
                _ => None,
            }
        })
    }

    pub(crate) fn get_bool(&self, term: Term) -> Option<bool> {
        self.values(term)
            .find_map(|v| v.get(vocab::VALUE).unwrap_or(v).as_bool())
    }

    /// Language tagged strings of a property, as `(tag, text)` pairs.
    ///
    /// Compacted documents carry them in a sibling `<name>Map` object, expanded
    /// documents as `@value` objects with a `@language` key.
    pub(crate) fn get_lang_map(&self, term: Term) -> Vec<(&'a str, &'a str)> {
        let mut result = Vec::new();
        if self.form == Form::Compacted {
            let map_key = format!("{}Map", term.name());
            if let Some(Value::Object(map)) = self.value.get(map_key.as_str()) {
                result.extend(
                    map.iter()
                        .filter_map(|(lang, text)| Some((lang.as_str(), text.as_str()?))),
                );
            }
        }
        result.extend(self.values(term).filter_map(|v| {
            let lang = v.get(vocab::LANGUAGE)?.as_str()?;
            let text = v.get(vocab::VALUE)?.as_str()?;
            Some((lang, text))
        }));
        result
    }
}

fn single<T>(mut values: impl Iterator<Item = T>) -> Option<T> {
    let first = values.next()?;
    values.next().is_none().then_some(first)
}

fn flatten<'a>(value: &'a Value) -> Box<dyn Iterator<Item = &'a Value> + 'a> {
    match value {
        Value::Array(array) => Box::new(array.iter().flat_map(flatten)),
        Value::Object(map) => match map.get("@list") {
            Some(list) => flatten(list),
            None => Box::new(iter::once(value)),
        },
        value => Box::new(iter::once(value)),
    }
}

fn is_node_object(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|map| !map.contains_key(vocab::VALUE))
}

fn scalar_str(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => Some(s),
        Value::Object(map) => map
            .get(vocab::VALUE)
            .or_else(|| map.get(vocab::ID.iri()))
            .and_then(Value::as_str),
        _ => None,
    }
}

fn iri_of(value: &Value, form: Form) -> Option<&str> {
    if let Some(s) = scalar_str(value) {
        return Some(s);
    }
    if is_node_object(value) {
        return Node { value, form }.id();
    }
    None
}
