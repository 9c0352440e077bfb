//! Keyboard visibility notifications and the typed events derived from them.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Animation curve reported by the platform with keyboard notifications.
///
/// Raw values follow the platform's curve enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationCurve {
    /// Slow start and end
    EaseInOut = 0,
    /// Slow start
    EaseIn = 1,
    /// Slow end
    EaseOut = 2,
    /// Constant speed
    Linear = 3,
}

impl AnimationCurve {
    /// Maps a raw platform value to a curve; unknown values yield `None`.
    #[must_use]
    pub const fn from_raw(raw: i64) -> Option<Self> {
        match raw {
            0 => Some(Self::EaseInOut),
            1 => Some(Self::EaseIn),
            2 => Some(Self::EaseOut),
            3 => Some(Self::Linear),
            _ => None,
        }
    }

    /// Eased progress for linear progress `t` in `[0, 1]`.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t * t,
            Self::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
        }
    }
}

/// Duration and curve of a geometry transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Animation {
    /// Total duration
    pub duration: Duration,
    /// Easing curve
    pub curve: AnimationCurve,
}

/// Which keyboard notification was posted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Keyboard is about to appear
    WillShow,
    /// Keyboard is about to disappear
    WillHide,
}

/// Raw keyboard notification payload as posted by the platform.
///
/// Every field may be missing; see [`KeyboardEvent::from_notification`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyboardNotification {
    /// Notification name
    pub kind: NotificationKind,
    /// Raw animation curve value
    #[serde(default)]
    pub curve: Option<i64>,
    /// Animation duration in seconds
    #[serde(default)]
    pub duration: Option<f64>,
    /// Height of the keyboard's end frame
    #[serde(default)]
    pub height: Option<f64>,
}

impl KeyboardNotification {
    /// Complete "will show" payload.
    #[must_use]
    pub fn will_show(height: f64, duration: f64, curve: AnimationCurve) -> Self {
        Self {
            kind: NotificationKind::WillShow,
            curve: Some(curve as i64),
            duration: Some(duration),
            height: Some(height),
        }
    }

    /// Complete "will hide" payload.
    #[must_use]
    pub fn will_hide(duration: f64, curve: AnimationCurve) -> Self {
        Self {
            kind: NotificationKind::WillHide,
            curve: Some(curve as i64),
            duration: Some(duration),
            height: None,
        }
    }
}

/// Validated keyboard visibility event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyboardEvent {
    /// Keyboard will show with the given height
    VisibilityChanged {
        /// Keyboard height
        height: f64,
        /// Platform animation
        animation: Animation,
    },
    /// Keyboard will hide
    Hidden {
        /// Platform animation
        animation: Animation,
    },
}

impl KeyboardEvent {
    /// Validates a raw notification.
    ///
    /// Returns `None` when the curve or duration is missing or invalid, or when
    /// a "will show" payload has no usable height. Callers treat `None` as a
    /// no-op.
    #[must_use]
    pub fn from_notification(notification: &KeyboardNotification) -> Option<Self> {
        let curve = AnimationCurve::from_raw(notification.curve?)?;
        let duration = Duration::try_from_secs_f64(notification.duration?).ok()?;
        let animation = Animation { duration, curve };

        match notification.kind {
            NotificationKind::WillShow => {
                let height = notification.height?;
                if !height.is_finite() || height < 0.0 {
                    return None;
                }
                Some(Self::VisibilityChanged { height, animation })
            }
            NotificationKind::WillHide => Some(Self::Hidden { animation }),
        }
    }

    /// The animation carried by the event.
    #[must_use]
    pub const fn animation(&self) -> Animation {
        match self {
            Self::VisibilityChanged { animation, .. } | Self::Hidden { animation } => *animation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_show_payload() {
        let n = KeyboardNotification::will_show(300.0, 0.25, AnimationCurve::EaseInOut);
        let event = KeyboardEvent::from_notification(&n).unwrap();
        assert_eq!(
            event,
            KeyboardEvent::VisibilityChanged {
                height: 300.0,
                animation: Animation {
                    duration: Duration::from_millis(250),
                    curve: AnimationCurve::EaseInOut,
                },
            }
        );
    }

    #[test]
    fn test_missing_fields_are_rejected() {
        let full = KeyboardNotification::will_show(300.0, 0.25, AnimationCurve::EaseOut);

        let no_height = KeyboardNotification { height: None, ..full };
        assert!(KeyboardEvent::from_notification(&no_height).is_none());

        let no_curve = KeyboardNotification { curve: None, ..full };
        assert!(KeyboardEvent::from_notification(&no_curve).is_none());

        let no_duration = KeyboardNotification { duration: None, ..full };
        assert!(KeyboardEvent::from_notification(&no_duration).is_none());

        let bad_curve = KeyboardNotification { curve: Some(7), ..full };
        assert!(KeyboardEvent::from_notification(&bad_curve).is_none());

        let nan_height = KeyboardNotification { height: Some(f64::NAN), ..full };
        assert!(KeyboardEvent::from_notification(&nan_height).is_none());
    }

    #[test]
    fn test_hide_ignores_height() {
        let n = KeyboardNotification::will_hide(0.25, AnimationCurve::Linear);
        assert!(matches!(
            KeyboardEvent::from_notification(&n),
            Some(KeyboardEvent::Hidden { .. })
        ));
    }

    #[test]
    fn test_payload_from_json() {
        let n: KeyboardNotification =
            serde_json::from_str(r#"{"kind":"will_show","curve":0,"duration":0.25}"#).unwrap();
        assert_eq!(n.height, None);
        assert!(KeyboardEvent::from_notification(&n).is_none());
    }

    #[test]
    fn test_curves_hit_endpoints() {
        for curve in [
            AnimationCurve::EaseInOut,
            AnimationCurve::EaseIn,
            AnimationCurve::EaseOut,
            AnimationCurve::Linear,
        ] {
            assert_eq!(curve.apply(0.0), 0.0);
            assert!((curve.apply(1.0) - 1.0).abs() < 1e-10);
            assert_eq!(AnimationCurve::from_raw(curve as i64), Some(curve));
        }
        assert!((AnimationCurve::EaseInOut.apply(0.5) - 0.5).abs() < 1e-10);
    }
}
