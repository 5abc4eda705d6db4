// Presentation layer: results view, upload widget state, notifications, and their renderers.

pub mod notice;
pub mod render;
pub mod view;
pub mod widget;
