//! Data models for shell geometry and keyboard notifications.
//!
//! Models are independent of any host and of the controller.

pub mod geometry;
pub mod keyboard_event;

pub use geometry::{KeyboardState, LayoutConstants, LayoutFrames, Rect, SafeAreaInsets};
pub use keyboard_event::{
    Animation, AnimationCurve, KeyboardEvent, KeyboardNotification, NotificationKind,
};
