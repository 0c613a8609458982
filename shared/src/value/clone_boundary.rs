use super::option_value::OptionMap;

/// The deep-copy boundary. The engine mutates nested sequences and
/// objects it receives in place, so every field named in an overlay's
/// mutation-prone whitelist is deep-cloned immediately before a
/// construct or update call. All other fields keep their shared handles.
pub fn clone_for_engine(options: &OptionMap, deep_fields: &[&str]) -> OptionMap {
    let mut prepared = OptionMap::new();
    for (field, value) in options.iter() {
        if deep_fields.contains(&field) {
            prepared.insert(field, value.deep_clone());
        } else {
            prepared.insert(field, value.clone());
        }
    }
    prepared
}
