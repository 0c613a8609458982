use mapsync_shared::{
    clone_for_engine, coerce_options, parse_config, schema, EngineApi, EventTarget, HostId,
    ListenerId, OptionMap, OverlayKind, OverlaySchema, SurfaceId, UpdateStyle,
};

use crate::events::{self, CallbackTable, OverlayCallback};

use super::diff::{bulk_eq, diff_apply, visible_in};
use super::error::LifecycleError;

/// Where a host object attaches: directly to the surface, or to a parent
/// container object for nested overlays.
#[derive(Clone, Copy, Debug)]
pub enum AttachPoint {
    Surface(SurfaceId),
    Parent(HostId),
}

/// Engine-side half of a node, present only while mounted.
struct LiveHost {
    host: HostId,
    listeners: Vec<ListenerId>,
}

/// The generic lifecycle driver. Every overlay type runs through this
/// one implementation, parameterized entirely by its schema: construct
/// creates and attaches the host, update diffs raw values field by
/// field, teardown unbinds and destroys. There is no per-type lifecycle
/// code.
pub struct OverlayNode {
    schema: &'static OverlaySchema,
    /// Last raw, pre-coercion render options applied. Coercion allocates
    /// fresh objects even for unchanged logical values, so diffing runs
    /// against raw values and only coerced values reach the engine.
    snapshot: OptionMap,
    callbacks: CallbackTable,
    live: Option<LiveHost>,
}

impl OverlayNode {
    /// Create an unmounted node holding its declarative config. The
    /// scene uses this to buffer nodes whose scope is not ready yet.
    pub fn new(
        kind: OverlayKind,
        options: OptionMap,
        callbacks: Vec<(&'static str, OverlayCallback)>,
    ) -> Self {
        let schema = schema(kind);
        let split = parse_config(schema, &options);
        let mut table = CallbackTable::new();
        table.replace_all(kind.label(), |field| schema.accepts_callback(field), callbacks);
        Self {
            schema,
            snapshot: split.render_options,
            callbacks: table,
            live: None,
        }
    }

    pub fn kind(&self) -> OverlayKind {
        self.schema.kind
    }

    pub fn schema(&self) -> &'static OverlaySchema {
        self.schema
    }

    pub fn host(&self) -> Option<HostId> {
        self.live.as_ref().map(|live| live.host)
    }

    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }

    pub fn snapshot(&self) -> &OptionMap {
        &self.snapshot
    }

    /// Create the host from the current snapshot: coerce, cross the
    /// deep-copy boundary, attach, apply initial visibility, bind every
    /// declared event, fire `on_complete` where the schema says so.
    pub fn attach(
        &mut self,
        engine: &mut dyn EngineApi,
        at: AttachPoint,
    ) -> Result<HostId, LifecycleError> {
        let coerced = coerce_options(self.schema.coerce_rules, &self.snapshot);
        let prepared = clone_for_engine(&coerced, self.schema.deep_copy_fields);
        let host = match at {
            AttachPoint::Surface(surface) => {
                engine.create_host(surface, self.schema.kind, prepared)
            }
            AttachPoint::Parent(parent) => {
                engine.create_child_host(parent, self.schema.kind, prepared)
            }
        };
        if !visible_in(&self.snapshot) {
            engine.hide(host);
        }
        let listeners = events::bind_host(engine, host, self.schema.event_fields);
        self.live = Some(LiveHost { host, listeners });
        if self.schema.complete_on_construct {
            self.callbacks
                .fire("on_complete", EventTarget::Host(host), &[]);
        }
        Ok(host)
    }

    /// Diff-update against the next declarative config. Replaces the
    /// callback table first, so handlers swapped between updates fire on
    /// the very next event without any rebinding.
    pub fn update(
        &mut self,
        engine: &mut dyn EngineApi,
        options: OptionMap,
        callbacks: Vec<(&'static str, OverlayCallback)>,
    ) -> Result<(), LifecycleError> {
        let schema = self.schema;
        let split = parse_config(schema, &options);
        let next = split.render_options;
        self.callbacks.replace_all(
            schema.kind.label(),
            |field| schema.accepts_callback(field),
            callbacks,
        );

        let Some(live) = &self.live else {
            // Not mounted yet: just replace the buffered config.
            self.snapshot = next;
            return Ok(());
        };
        let host = live.host;

        // Visibility is distinguished: only a true<->false transition
        // reaches the engine.
        let was_visible = visible_in(&self.snapshot);
        let now_visible = visible_in(&next);
        if was_visible && !now_visible {
            engine.hide(host);
        } else if !was_visible && now_visible {
            engine.show(host);
        }

        match self.schema.update_style {
            UpdateStyle::Fields(setters) => {
                diff_apply(
                    &self.snapshot,
                    &next,
                    setters,
                    self.schema.coerce_rules,
                    self.schema.deep_copy_fields,
                    |setter, value| engine.call_setter(host, setter, value),
                )?;
            }
            UpdateStyle::Bulk { setter: _ } => {
                // Value-identical bags never retrigger the master call,
                // however many fresh instances they are built from.
                if !bulk_eq(&self.snapshot, &next) {
                    let coerced = coerce_options(self.schema.coerce_rules, &next);
                    let prepared = clone_for_engine(&coerced, self.schema.deep_copy_fields);
                    engine.set_all_options(host, prepared);
                }
            }
        }

        self.snapshot = next;
        Ok(())
    }

    /// Unbind every listener bound at attach, then destroy the host.
    /// The declarative config survives, so a provider rebuild can
    /// re-attach the same node at the next generation.
    pub fn detach(&mut self, engine: &mut dyn EngineApi) {
        if let Some(mut live) = self.live.take() {
            events::unbind(engine, &mut live.listeners);
            engine.destroy_host(live.host);
        }
    }

    /// Deliver an engine event to the current handler for its field.
    pub fn handle_event(&mut self, event: &str, target: EventTarget, args: &[mapsync_shared::OptionValue]) {
        if let Some(field) = events::field_for_event(self.schema.event_fields, event) {
            self.callbacks.fire(field, target, args);
        }
    }
}
