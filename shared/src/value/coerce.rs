use std::cell::RefCell;
use std::rc::Rc;

use super::option_value::{EngineValue, EngineValueKind, OptionMap, OptionValue};

/// Declarative coercion rule for one field. Rules are declared `const` in
/// the overlay schema catalog.
///
/// `Value` turns tuple shorthand into a typed engine value; an
/// already-typed engine value passes through untouched, which makes the
/// whole operation idempotent. `Object` coerces named members of a nested
/// option object (or of every element when applied to a sequence of
/// objects, as a mass-point style list).
#[derive(Clone, Copy, Debug)]
pub enum CoerceRule {
    Value {
        kind: EngineValueKind,
        /// Fallback tuple applied when the input is neither tuple
        /// shorthand nor an engine value (and not an explicit null).
        default: Option<&'static [f64]>,
    },
    Object {
        members: &'static [(&'static str, CoerceRule)],
    },
}

/// Normalize one field value. Explicit null stays null so the lifecycle
/// layer can clear the corresponding engine sub-object; an absent field is
/// the caller's concern and never reaches this function.
pub fn coerce(rule: &CoerceRule, value: &OptionValue) -> OptionValue {
    match rule {
        CoerceRule::Value { kind, default } => coerce_value(*kind, *default, value),
        CoerceRule::Object { members } => coerce_object(members, value),
    }
}

fn coerce_value(
    kind: EngineValueKind,
    default: Option<&'static [f64]>,
    value: &OptionValue,
) -> OptionValue {
    match value {
        OptionValue::Engine(_) => value.clone(),
        OptionValue::Null => OptionValue::Null,
        other => {
            if let Some(components) = other.as_number_slice() {
                return OptionValue::Engine(EngineValue::from_tuple(kind, &components));
            }
            match default {
                Some(components) => {
                    OptionValue::Engine(EngineValue::from_tuple(kind, components))
                }
                None => other.clone(),
            }
        }
    }
}

fn coerce_object(
    members: &'static [(&'static str, CoerceRule)],
    value: &OptionValue,
) -> OptionValue {
    match value {
        OptionValue::Null => OptionValue::Null,
        OptionValue::Object(object) => {
            let source = object.borrow();
            let mut coerced = OptionMap::new();
            for (field, member_value) in source.iter() {
                match members.iter().find(|(name, _)| *name == field) {
                    Some((_, rule)) => coerced.insert(field, coerce(rule, member_value)),
                    None => coerced.insert(field, member_value.clone()),
                }
            }
            // Members with a declared default materialize even when absent.
            for (field, rule) in members {
                if coerced.contains(field) {
                    continue;
                }
                if let CoerceRule::Value {
                    kind,
                    default: Some(components),
                } = rule
                {
                    coerced.insert(
                        field,
                        OptionValue::Engine(EngineValue::from_tuple(*kind, components)),
                    );
                }
            }
            OptionValue::Object(Rc::new(RefCell::new(coerced)))
        }
        OptionValue::Seq(seq) => {
            // A sequence of style objects coerces element-wise.
            let items = seq
                .borrow()
                .iter()
                .map(|item| coerce_object(members, item))
                .collect();
            OptionValue::Seq(Rc::new(RefCell::new(items)))
        }
        other => other.clone(),
    }
}

/// Apply a schema's rule set across a raw options bag. Fields without a
/// rule pass through by handle; ruled fields are re-allocated, which is
/// why the diff layer compares raw pre-coercion values instead.
pub fn coerce_options(rules: &[(&str, CoerceRule)], options: &OptionMap) -> OptionMap {
    let mut coerced = OptionMap::new();
    for (field, value) in options.iter() {
        match rules.iter().find(|(name, _)| *name == field) {
            Some((_, rule)) => coerced.insert(field, coerce(rule, value)),
            None => coerced.insert(field, value.clone()),
        }
    }
    // Value rules with a declared default materialize even when the
    // field is absent, same as object members. An explicit null is
    // present and stays null.
    for (field, rule) in rules {
        if coerced.contains(field) {
            continue;
        }
        if let CoerceRule::Value {
            kind,
            default: Some(components),
        } = rule
        {
            coerced.insert(
                field,
                OptionValue::Engine(EngineValue::from_tuple(*kind, components)),
            );
        }
    }
    coerced
}

/// Look up and apply the rule for a single field, passing unruled fields
/// through untouched.
pub fn coerce_field(rules: &[(&str, CoerceRule)], field: &str, value: &OptionValue) -> OptionValue {
    match rules.iter().find(|(name, _)| *name == field) {
        Some((_, rule)) => coerce(rule, value),
        None => value.clone(),
    }
}
