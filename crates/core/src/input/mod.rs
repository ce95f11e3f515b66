use serde::{Deserialize, Serialize};

/// Arrow keys the carousel reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavKey {
    ArrowLeft,
    ArrowRight,
}

impl NavKey {
    /// Maps a DOM `KeyboardEvent.key` value. Other keys are not ours.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(NavKey::ArrowLeft),
            "ArrowRight" => Some(NavKey::ArrowRight),
            _ => None,
        }
    }
}

/// One input delivered to the carousel, as recorded in simulator scripts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    Prev,
    Next,
    Dot {
        index: usize,
    },
    Key {
        key: String,
        /// Whether focus was inside the carousel viewport when it was pressed.
        #[serde(default)]
        in_carousel: bool,
    },
    PointerEnter,
    PointerLeave,
    FocusIn,
    FocusOut,
    TouchStart {
        x: f64,
    },
    TouchMove {
        x: f64,
    },
    TouchEnd {
        #[serde(default)]
        x: Option<f64>,
    },
    /// Lets the clock run; only meaningful to a driver that owns a clock.
    Wait {
        ms: u64,
    },
}

impl InputEvent {
    /// Parses a JSON array of events.
    pub fn parse_script(text: &str) -> crate::Result<Vec<InputEvent>> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_only_arrow_keys() {
        assert_eq!(NavKey::from_key("ArrowLeft"), Some(NavKey::ArrowLeft));
        assert_eq!(NavKey::from_key("ArrowRight"), Some(NavKey::ArrowRight));
        assert_eq!(NavKey::from_key("ArrowUp"), None);
        assert_eq!(NavKey::from_key("a"), None);
    }

    #[test]
    fn parses_tagged_script() {
        let script = r#"[
            { "type": "next" },
            { "type": "dot", "index": 2 },
            { "type": "key", "key": "ArrowLeft" },
            { "type": "touch_start", "x": 100 },
            { "type": "touch_end" },
            { "type": "wait", "ms": 5000 }
        ]"#;
        let events = InputEvent::parse_script(script).unwrap();

        assert_eq!(events.len(), 6);
        assert_eq!(events[1], InputEvent::Dot { index: 2 });
        assert_eq!(
            events[2],
            InputEvent::Key {
                key: "ArrowLeft".to_string(),
                in_carousel: false
            }
        );
        assert_eq!(events[4], InputEvent::TouchEnd { x: None });
    }

    #[test]
    fn rejects_unknown_event_type() {
        assert!(InputEvent::parse_script(r#"[{ "type": "shake" }]"#).is_err());
    }
}
