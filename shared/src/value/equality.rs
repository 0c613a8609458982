use super::option_value::{OptionMap, OptionValue};

/// Structural equality over option values, with the scalar rules the diff
/// layer depends on: `NaN` equals itself, two non-container unequal values
/// are unequal, and differing key sets are unequal. Sequences and nested
/// objects compare by value, never by handle identity, so a freshly
/// allocated tuple with the same components compares equal.
pub fn shallow_eq(a: &OptionValue, b: &OptionValue) -> bool {
    match (a, b) {
        (OptionValue::Null, OptionValue::Null) => true,
        (OptionValue::Bool(x), OptionValue::Bool(y)) => x == y,
        (OptionValue::Number(x), OptionValue::Number(y)) => number_eq(*x, *y),
        (OptionValue::Text(x), OptionValue::Text(y)) => x == y,
        (OptionValue::Seq(x), OptionValue::Seq(y)) => {
            if std::rc::Rc::ptr_eq(x, y) {
                return true;
            }
            let x = x.borrow();
            let y = y.borrow();
            x.len() == y.len() && x.iter().zip(y.iter()).all(|(a, b)| shallow_eq(a, b))
        }
        (OptionValue::Object(x), OptionValue::Object(y)) => {
            if std::rc::Rc::ptr_eq(x, y) {
                return true;
            }
            options_eq(&x.borrow(), &y.borrow())
        }
        (OptionValue::Engine(x), OptionValue::Engine(y)) => {
            x.kind() == y.kind()
                && x.fields().len() == y.fields().len()
                && x.fields()
                    .iter()
                    .zip(y.fields().iter())
                    .all(|((fa, va), (fb, vb))| fa == fb && number_eq(*va, *vb))
        }
        _ => false,
    }
}

/// Field-wise equality of two option bags: same key set, equal values.
pub fn options_eq(a: &OptionMap, b: &OptionMap) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().all(|(field, value)| match b.get(field) {
        Some(other) => shallow_eq(value, other),
        None => false,
    })
}

fn number_eq(x: f64, y: f64) -> bool {
    x == y || (x.is_nan() && y.is_nan())
}
