//! Classification of the invocation event that started the run.
//!
//! The job can be started by an HTTP trigger, a timer trigger, or a local
//! invocation; the shapes below mirror the cloud runtime's event payloads.
//! The classification is used only for logging — the pipeline behaves the
//! same regardless of trigger kind.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    Http,
    Timer(String),
    Local,
    Unknown,
    NotParsed,
}

impl std::fmt::Display for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trigger::Http => write!(f, "http"),
            Trigger::Timer(id) => write!(f, "timer: {id}"),
            Trigger::Local => write!(f, "local"),
            Trigger::Unknown => write!(f, "unknown"),
            Trigger::NotParsed => write!(f, "not parsed"),
        }
    }
}

/// A locally generated event with a single body field.
#[derive(Debug, Default, Deserialize)]
struct LocalEvent {
    #[serde(default)]
    body: String,
}

/// An event from a cloud timer trigger.
#[derive(Debug, Default, Deserialize)]
struct TimerEvent {
    #[serde(default)]
    details: TimerDetails,
}

#[derive(Debug, Default, Deserialize)]
struct TimerDetails {
    #[serde(default)]
    trigger_id: String,
}

/// An event from a cloud HTTP trigger.
#[derive(Debug, Default, Deserialize)]
struct HttpEvent {
    #[serde(rename = "httpMethod", default)]
    http_method: String,
}

/// Determines which trigger kind produced `raw_event`.
///
/// Shapes are probed most-specific first; an event that parses as JSON but
/// matches none of them is `Unknown`, and a body that is not JSON at all is
/// `NotParsed`.
#[must_use]
pub fn detect(raw_event: &str) -> Trigger {
    let Ok(event) = serde_json::from_str::<serde_json::Value>(raw_event) else {
        return Trigger::NotParsed;
    };

    if let Ok(local) = serde_json::from_value::<LocalEvent>(event.clone()) {
        if local.body == "local" {
            return Trigger::Local;
        }
    }

    if let Ok(timer) = serde_json::from_value::<TimerEvent>(event.clone()) {
        if !timer.details.trigger_id.is_empty() {
            return Trigger::Timer(timer.details.trigger_id);
        }
    }

    if let Ok(http) = serde_json::from_value::<HttpEvent>(event) {
        if !http.http_method.is_empty() {
            return Trigger::Http;
        }
    }

    Trigger::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_local_event() {
        assert_eq!(detect(r#"{"body":"local"}"#), Trigger::Local);
    }

    #[test]
    fn detects_timer_event_with_its_trigger_id() {
        let raw = r#"{"details":{"trigger_id":"a1b2c3"}}"#;
        assert_eq!(detect(raw), Trigger::Timer("a1b2c3".to_owned()));
    }

    #[test]
    fn detects_http_event() {
        let raw = r#"{"httpMethod":"POST","headers":{},"body":"","url":"/sync"}"#;
        assert_eq!(detect(raw), Trigger::Http);
    }

    #[test]
    fn http_body_does_not_shadow_local() {
        let raw = r#"{"httpMethod":"GET","body":"payload"}"#;
        assert_eq!(detect(raw), Trigger::Http);
    }

    #[test]
    fn unmatched_json_is_unknown() {
        assert_eq!(detect(r#"{"something":"else"}"#), Trigger::Unknown);
        assert_eq!(detect("{}"), Trigger::Unknown);
    }

    #[test]
    fn invalid_json_is_not_parsed() {
        assert_eq!(detect("not json at all"), Trigger::NotParsed);
        assert_eq!(detect(""), Trigger::NotParsed);
    }

    #[test]
    fn display_formats_match_log_labels() {
        assert_eq!(Trigger::Http.to_string(), "http");
        assert_eq!(Trigger::Timer("t1".to_owned()).to_string(), "timer: t1");
        assert_eq!(Trigger::Local.to_string(), "local");
        assert_eq!(Trigger::Unknown.to_string(), "unknown");
        assert_eq!(Trigger::NotParsed.to_string(), "not parsed");
    }
}
