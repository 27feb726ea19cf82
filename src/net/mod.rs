//! Network transports used by the widget.

pub mod api;
