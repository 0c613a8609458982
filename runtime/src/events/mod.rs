mod bridge;

pub use bridge::{
    bind_host, bind_surface, field_for_event, unbind, CallbackTable, OverlayCallback,
};
