use crate::value::OptionMap;

use super::overlay_schema::OverlaySchema;

/// Declarative input to one node after splitting: plain render options on
/// one side, the names of any event-callback fields that were present on
/// the other. Callbacks themselves are registered separately so the
/// options bag stays pure data.
#[derive(Debug)]
pub struct OverlayConfig {
    pub render_options: OptionMap,
    pub event_fields: Vec<&'static str>,
}

/// The one shared splitting function. Pure and stable: the same input
/// always produces the same split, driven entirely by the schema's fixed
/// callback-field list.
pub fn parse_config(schema: &'static OverlaySchema, config: &OptionMap) -> OverlayConfig {
    let mut render_options = OptionMap::new();
    let mut event_fields = Vec::new();
    for (field, value) in config.iter() {
        match schema
            .event_fields
            .iter()
            .chain(schema.complete_on_construct.then_some(&"on_complete"))
            .find(|name| **name == field)
        {
            Some(name) => event_fields.push(*name),
            None => render_options.insert(field, value.clone()),
        }
    }
    OverlayConfig {
        render_options,
        event_fields,
    }
}
