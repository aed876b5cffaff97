//! Attributes that decorate graphs, nodes and edges.

use super::error::DotError;
use crate::backends::dot::is_quotable;
use crate::gv::html::validate_html_string;
use std::fmt;

/// The value of an attribute: a plain string, or an HTML-like markup string
/// that was validated when it was created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    String(String),
    Markup(String),
}

impl AttrValue {
    /// Creates a markup value. Fails if \p markup is not well formed.
    pub fn markup(markup: &str) -> Result<Self, DotError> {
        if let Err(reason) = validate_html_string(markup) {
            let msg = format!("invalid markup value: {}", reason);
            return Err(DotError::model(&msg));
        }
        Ok(AttrValue::Markup(markup.to_string()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            AttrValue::String(s) | AttrValue::Markup(s) => s,
        }
    }

    pub fn is_markup(&self) -> bool {
        matches!(self, AttrValue::Markup(_))
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::String(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::String(s)
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::String(s) => write!(f, "{}", s),
            AttrValue::Markup(s) => write!(f, "<{}>", s),
        }
    }
}

/// A single name=value pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    name: String,
    value: AttrValue,
}

impl Attribute {
    pub fn new(name: &str, value: AttrValue) -> Result<Self, DotError> {
        if name.is_empty() {
            return Err(DotError::model(
                "attribute names must be non-empty strings",
            ));
        }
        let text = match &value {
            AttrValue::String(s) => Some(s.as_str()),
            AttrValue::Markup(_) => None,
        };
        if !is_quotable(name) || !text.map_or(true, is_quotable) {
            return Err(DotError::model(
                "odd runs of backslashes must be followed by another character",
            ));
        }
        Ok(Self {
            name: name.to_string(),
            value,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &AttrValue {
        &self.value
    }
}

/// An ordered collection of attributes, indexed by name. The order is the
/// order in which names were first inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    list: Vec<Attribute>,
}

impl Attributes {
    pub fn new() -> Self {
        Self { list: Vec::new() }
    }

    /// Builds a collection from name/value pairs. Later pairs overwrite
    /// earlier pairs with the same name.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, DotError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<AttrValue>,
    {
        let mut attrs = Self::new();
        for (k, v) in pairs {
            attrs.set(k.as_ref(), v)?;
        }
        Ok(attrs)
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.list.iter().find(|a| a.name == name).map(|a| &a.value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Sets the attribute \p name, overwriting the previous value.
    pub fn set<V: Into<AttrValue>>(
        &mut self,
        name: &str,
        value: V,
    ) -> Result<(), DotError> {
        let attr = Attribute::new(name, value.into())?;
        self.insert(attr);
        Ok(())
    }

    /// Adds \p attr, or replaces the value of the attribute with the same
    /// name.
    pub fn insert(&mut self, attr: Attribute) {
        for existing in self.list.iter_mut() {
            if existing.name == attr.name {
                existing.value = attr.value;
                return;
            }
        }
        self.list.push(attr);
    }

    pub fn remove(&mut self, name: &str) -> Option<AttrValue> {
        let idx = self.list.iter().position(|a| a.name == name)?;
        Some(self.list.remove(idx).value)
    }

    /// Overwrites existing keys with the values of \p other and appends the
    /// keys that are new.
    pub fn merge(&mut self, other: &Attributes) {
        for attr in other.list.iter() {
            self.insert(attr.clone());
        }
    }

    pub fn iter(&self) -> std::slice::Iter<Attribute> {
        self.list.iter()
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.iter()
    }
}

#[test]
fn test_attribute_merge() {
    let mut a = Attributes::from_pairs(vec![("color", "red"), ("shape", "box")])
        .unwrap();
    let b = Attributes::from_pairs(vec![("label", "x"), ("color", "blue")])
        .unwrap();
    a.merge(&b);

    let names: Vec<&str> = a.iter().map(|x| x.name()).collect();
    assert_eq!(names, vec!["color", "shape", "label"]);
    assert_eq!(a.get("color"), Some(&AttrValue::from("blue")));
    assert_eq!(a.len(), 3);
}

#[test]
fn test_attribute_validation() {
    let mut a = Attributes::new();
    assert!(matches!(a.set("", "x"), Err(DotError::Model { .. })));
    assert!(a.is_empty());
    a.set("color", "red").unwrap();
    a.set("color", "green").unwrap();
    assert_eq!(a.len(), 1);
    assert_eq!(a.remove("color"), Some(AttrValue::from("green")));
    assert_eq!(a.remove("color"), None);

    // Values that could not be written back as quoted strings.
    for bad in &["a\\", "a\\\"b", "a\\\nb", "a\\\\\\"] {
        assert!(matches!(a.set("label", *bad), Err(DotError::Model { .. })));
    }
    assert!(a.set("x\\", "1").is_err());
    assert!(a.is_empty());
    for good in &["a\\\\", "a\\b", "a\\\\\"b", "\\n"] {
        a.set("label", *good).unwrap();
    }
}

#[cfg(feature = "xml")]
#[test]
fn test_markup_value() {
    let v = AttrValue::markup("<b>x</b>").unwrap();
    assert!(v.is_markup());
    assert_eq!(v.to_string(), "<<b>x</b>>");
    assert!(AttrValue::markup("<b>x").is_err());
}
