use mapsync_shared::{
    coerce_field, shallow_eq, CoerceRule, OptionMap, OptionValue, UnsupportedFieldError,
};

/// Per-field diff over a setter table. For each independently settable
/// field, the previous and next *raw* values are compared by value; the
/// setter runs only on difference, receiving the newly coerced (and,
/// where whitelisted, deep-copied) value. An omitted field preserves the
/// prior state; an explicit null reaches the setter and clears the
/// engine sub-object.
pub fn diff_apply<F>(
    prev: &OptionMap,
    next: &OptionMap,
    setters: &[(&str, &str)],
    rules: &[(&str, CoerceRule)],
    deep_fields: &[&str],
    mut apply: F,
) -> Result<(), UnsupportedFieldError>
where
    F: FnMut(&str, OptionValue) -> Result<(), UnsupportedFieldError>,
{
    for (field, setter) in setters {
        let Some(next_value) = next.get(field) else {
            continue;
        };
        if let Some(prev_value) = prev.get(field) {
            if shallow_eq(prev_value, next_value) {
                continue;
            }
        }
        let coerced = coerce_field(rules, field, next_value);
        let value = if deep_fields.contains(field) {
            coerced.deep_clone()
        } else {
            coerced
        };
        apply(setter, value)?;
    }
    Ok(())
}

/// Whether a bag marks the node visible. Absent means visible.
pub fn visible_in(options: &OptionMap) -> bool {
    options
        .get("visible")
        .and_then(|value| value.as_bool())
        .unwrap_or(true)
}

/// Bag equality for the bulk update style, ignoring the distinguished
/// visibility field so a pure show/hide toggle never re-issues the
/// master options call.
pub fn bulk_eq(a: &OptionMap, b: &OptionMap) -> bool {
    let strip = |map: &OptionMap| {
        let mut stripped = map.clone();
        stripped.remove("visible");
        stripped
    };
    mapsync_shared::options_eq(&strip(a), &strip(b))
}
