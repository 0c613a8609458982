use std::cell::RefCell;
use std::rc::Rc;

/// Typed engine value kinds the coercion layer can produce from tuple
/// shorthand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EngineValueKind {
    Pixel,
    Size,
    LngLat,
    Bounds,
}

impl EngineValueKind {
    pub fn field_names(&self) -> &'static [&'static str] {
        match self {
            EngineValueKind::Pixel => &["x", "y"],
            EngineValueKind::Size => &["width", "height"],
            EngineValueKind::LngLat => &["lng", "lat"],
            EngineValueKind::Bounds => &["sw_lng", "sw_lat", "ne_lng", "ne_lat"],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EngineValueKind::Pixel => "Pixel",
            EngineValueKind::Size => "Size",
            EngineValueKind::LngLat => "LngLat",
            EngineValueKind::Bounds => "Bounds",
        }
    }
}

/// An already-typed engine value object. Immutable once constructed;
/// coercing one is a no-op.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineValue {
    kind: EngineValueKind,
    fields: Vec<(&'static str, f64)>,
}

impl EngineValue {
    /// Build from positional tuple components. Missing components are
    /// zero-filled, extra components are dropped.
    pub fn from_tuple(kind: EngineValueKind, components: &[f64]) -> Self {
        let fields = kind
            .field_names()
            .iter()
            .enumerate()
            .map(|(i, name)| (*name, components.get(i).copied().unwrap_or(0.0)))
            .collect();
        Self { kind, fields }
    }

    pub fn kind(&self) -> EngineValueKind {
        self.kind
    }

    pub fn fields(&self) -> &[(&'static str, f64)] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<f64> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| *value)
    }
}

/// Shared sequence with engine-side aliasing semantics: cloning an
/// `OptionValue::Seq` clones the handle, not the contents, so a value
/// handed to the engine without crossing the deep-copy boundary can be
/// mutated in place underneath the caller.
pub type SharedSeq = Rc<RefCell<Vec<OptionValue>>>;

/// Shared nested option object, same aliasing semantics as `SharedSeq`.
pub type SharedObject = Rc<RefCell<OptionMap>>;

/// One render-option value. Sequences and nested objects are shared
/// handles; everything else is plain data.
#[derive(Clone, Debug)]
pub enum OptionValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Seq(SharedSeq),
    Object(SharedObject),
    Engine(EngineValue),
}

impl OptionValue {
    pub fn text(value: &str) -> Self {
        OptionValue::Text(value.to_string())
    }

    /// Tuple shorthand: a sequence of raw numbers.
    pub fn tuple(components: &[f64]) -> Self {
        OptionValue::Seq(Rc::new(RefCell::new(
            components.iter().map(|n| OptionValue::Number(*n)).collect(),
        )))
    }

    pub fn seq(items: Vec<OptionValue>) -> Self {
        OptionValue::Seq(Rc::new(RefCell::new(items)))
    }

    pub fn object(map: OptionMap) -> Self {
        OptionValue::Object(Rc::new(RefCell::new(map)))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, OptionValue::Null)
    }

    /// Interpret as an all-number tuple. Anything else yields `None`.
    pub fn as_number_slice(&self) -> Option<Vec<f64>> {
        let OptionValue::Seq(seq) = self else {
            return None;
        };
        let seq = seq.borrow();
        let mut components = Vec::with_capacity(seq.len());
        for item in seq.iter() {
            match item {
                OptionValue::Number(n) => components.push(*n),
                _ => return None,
            }
        }
        Some(components)
    }

    /// Copy with fresh handles throughout. The deep-copy boundary uses
    /// this for mutation-prone fields before anything reaches the engine.
    pub fn deep_clone(&self) -> Self {
        match self {
            OptionValue::Seq(seq) => {
                let items = seq.borrow().iter().map(|item| item.deep_clone()).collect();
                OptionValue::Seq(Rc::new(RefCell::new(items)))
            }
            OptionValue::Object(object) => {
                OptionValue::Object(Rc::new(RefCell::new(object.borrow().deep_clone())))
            }
            other => other.clone(),
        }
    }
}

/// Ordered render-options bag. Cloning clones the entry list but keeps
/// nested `Seq`/`Object` handles shared, mirroring a shallow spread.
#[derive(Clone, Debug, Default)]
pub struct OptionMap {
    entries: Vec<(String, OptionValue)>,
}

impl OptionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, field: &str, value: OptionValue) -> Self {
        self.insert(field, value);
        self
    }

    /// Insert or replace, preserving first-insertion order.
    pub fn insert(&mut self, field: &str, value: OptionValue) {
        if let Some(entry) = self.entries.iter_mut().find(|(name, _)| name == field) {
            entry.1 = value;
        } else {
            self.entries.push((field.to_string(), value));
        }
    }

    pub fn get(&self, field: &str) -> Option<&OptionValue> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn remove(&mut self, field: &str) -> Option<OptionValue> {
        let index = self.entries.iter().position(|(name, _)| name == field)?;
        Some(self.entries.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn deep_clone(&self) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .map(|(name, value)| (name.clone(), value.deep_clone()))
                .collect(),
        }
    }
}
