use crate::types::OverlayKind;
use crate::value::CoerceRule;

/// How an overlay's host object accepts updates.
#[derive(Clone, Copy, Debug)]
pub enum UpdateStyle {
    /// One setter per independently settable field, `(field, setter)`.
    Fields(&'static [(&'static str, &'static str)]),
    /// One master "set all options" call, still gated by a value
    /// comparison over the whole raw bag.
    Bulk { setter: &'static str },
}

/// Fixed, versioned declaration of one overlay type: which config fields
/// are event callbacks, which are mutation-prone, how shorthand values
/// coerce, and how updates reach the engine. Consumed by the shared
/// config splitter and the generic lifecycle driver; no per-type
/// lifecycle code exists anywhere else.
#[derive(Debug)]
pub struct OverlaySchema {
    pub kind: OverlayKind,
    /// What a `MissingScope` error names as the required ancestor.
    pub required_parent: &'static str,
    /// Callback fields bound as engine events at construction.
    pub event_fields: &'static [&'static str],
    /// Whether `on_complete` fires synchronously at construction instead
    /// of arriving as an engine event.
    pub complete_on_construct: bool,
    /// Mutation-prone fields deep-cloned at the engine boundary.
    pub deep_copy_fields: &'static [&'static str],
    pub coerce_rules: &'static [(&'static str, CoerceRule)],
    pub update_style: UpdateStyle,
}

impl OverlaySchema {
    /// Engine event name for a callback field: `on_dbl_click` binds as
    /// `dblclick`.
    pub fn event_name(field: &str) -> String {
        field.trim_start_matches("on_").replace('_', "")
    }

    /// All callback field names this overlay accepts.
    pub fn accepts_callback(&self, field: &str) -> bool {
        if self.event_fields.contains(&field) {
            return true;
        }
        self.complete_on_construct && field == "on_complete"
    }

    pub fn is_event_field(&self, field: &str) -> bool {
        self.accepts_callback(field)
    }

    pub fn setter_for(&self, field: &str) -> Option<&'static str> {
        match self.update_style {
            UpdateStyle::Fields(setters) => setters
                .iter()
                .find(|(name, _)| *name == field)
                .map(|(_, setter)| *setter),
            UpdateStyle::Bulk { .. } => None,
        }
    }
}
