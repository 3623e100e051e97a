//! Feed message decoding.
//!
//! Inbound frames are UTF-8 text carrying one or more newline-delimited
//! JSON records, each tagged with a `type` discriminator.

use crate::types::Market;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Server greeting replayed at the start of every session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Welcome {
    /// Free-form server note (effective filters, warnings).
    pub message: Option<String>,
    /// Server timestamp.
    pub timestamp: Option<String>,
}

/// Incremental odds update carried by `created`/`updated` messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OddsUpdate {
    /// Event identifier.
    pub id: String,
    /// Bookmaker identifier.
    pub bookie: String,
    /// Server timestamp.
    pub timestamp: Option<String>,
    /// Full market list for this (event, bookmaker) pair.
    #[serde(default)]
    pub markets: Vec<Market>,
}

/// A single decoded feed record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeedMessage {
    /// Session confirmation with the effective filters. Informational;
    /// recorded for diagnostics, never blocks processing.
    Welcome(Welcome),
    /// First market list seen for a (event, bookmaker) pair.
    Created(OddsUpdate),
    /// Replacement market list for a known (event, bookmaker) pair.
    Updated(OddsUpdate),
    /// The (event, bookmaker) entry is gone.
    Deleted {
        /// Event identifier.
        id: String,
        /// Bookmaker identifier.
        bookie: String,
        /// Server timestamp.
        timestamp: Option<String>,
    },
    /// The event matched the filters but has no quotable markets.
    /// Informational; distinguishes "confirmed empty" from "no data yet".
    NoMarkets {
        /// Event identifier.
        id: String,
        /// Server timestamp.
        timestamp: Option<String>,
    },
    /// Unrecognized message type, ignored for forward compatibility.
    #[serde(other)]
    Unknown,
}

/// Splits a raw text frame into feed messages.
///
/// A frame may carry several newline-delimited records. A record that
/// fails to parse is logged and dropped without affecting the rest of
/// the frame; records with an unknown `type` are logged and ignored.
#[must_use]
pub fn decode_frame(frame: &str) -> Vec<FeedMessage> {
    let mut messages = Vec::new();
    for line in frame.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<FeedMessage>(line) {
            Ok(FeedMessage::Unknown) => {
                debug!(record = line, "ignoring unknown feed message type");
            }
            Ok(message) => messages.push(message),
            Err(e) => {
                warn!(error = %e, "dropping malformed feed record");
            }
        }
    }
    messages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_welcome() {
        let frame = r#"{"type":"welcome","message":"markets=ML; sport=football","timestamp":"2025-11-02T19:00:00Z"}"#;

        let messages = decode_frame(frame);
        assert_eq!(messages.len(), 1);
        match &messages[0] {
            FeedMessage::Welcome(w) => {
                assert_eq!(w.message.as_deref(), Some("markets=ML; sport=football"));
            }
            other => panic!("expected welcome, got {:?}", other),
        }
    }

    #[test]
    fn decodes_created_with_markets() {
        let frame = r#"{"type":"created","id":"E1","bookie":"bet365","timestamp":"2025-11-02T19:01:00Z","markets":[{"name":"ML","updatedAt":"2025-11-02T19:01:00Z","odds":[{"home":"1.85","draw":"3.40","away":"4.20","max":500}]}]}"#;

        let messages = decode_frame(frame);
        match &messages[0] {
            FeedMessage::Created(update) => {
                assert_eq!(update.id, "E1");
                assert_eq!(update.bookie, "bet365");
                assert_eq!(update.markets.len(), 1);
                assert_eq!(update.markets[0].odds[0].home, Some(1.85));
                assert_eq!(update.markets[0].odds[0].max, Some(500.0));
            }
            other => panic!("expected created, got {:?}", other),
        }
    }

    #[test]
    fn decodes_deleted_without_markets() {
        let frame = r#"{"type":"deleted","id":"E1","bookie":"bet365"}"#;

        let messages = decode_frame(frame);
        match &messages[0] {
            FeedMessage::Deleted { id, bookie, timestamp } => {
                assert_eq!(id, "E1");
                assert_eq!(bookie, "bet365");
                assert!(timestamp.is_none());
            }
            other => panic!("expected deleted, got {:?}", other),
        }
    }

    #[test]
    fn decodes_no_markets() {
        let frame = r#"{"type":"no_markets","id":"E9"}"#;

        let messages = decode_frame(frame);
        assert!(matches!(&messages[0], FeedMessage::NoMarkets { id, .. } if id == "E9"));
    }

    #[test]
    fn splits_multi_record_frame() {
        let frame = concat!(
            r#"{"type":"created","id":"E1","bookie":"bet365","markets":[]}"#,
            "\n",
            r#"{"type":"updated","id":"E2","bookie":"singbet","markets":[]}"#,
            "\n",
            r#"{"type":"deleted","id":"E1","bookie":"bet365"}"#,
        );

        let messages = decode_frame(frame);
        assert_eq!(messages.len(), 3);
    }

    #[test]
    fn malformed_line_does_not_drop_the_rest() {
        let frame = concat!(
            r#"{"type":"created","id":"E1","bookie":"bet365","markets":[]}"#,
            "\n",
            "{not json",
            "\n",
            r#"{"type":"created","id":"E2","bookie":"bet365","markets":[]}"#,
        );

        let messages = decode_frame(frame);
        assert_eq!(messages.len(), 2);
        assert!(matches!(&messages[0], FeedMessage::Created(u) if u.id == "E1"));
        assert!(matches!(&messages[1], FeedMessage::Created(u) if u.id == "E2"));
    }

    #[test]
    fn unknown_type_is_ignored_not_fatal() {
        let frame = concat!(
            r#"{"type":"odds_boost","id":"E1"}"#,
            "\n",
            r#"{"type":"created","id":"E2","bookie":"bet365","markets":[]}"#,
        );

        let messages = decode_frame(frame);
        assert_eq!(messages.len(), 1);
        assert!(matches!(&messages[0], FeedMessage::Created(u) if u.id == "E2"));
    }

    #[test]
    fn blank_lines_are_skipped() {
        let frame = "\n\n  \n";

        assert!(decode_frame(frame).is_empty());
    }

    #[test]
    fn known_type_with_bad_payload_is_dropped() {
        // "created" without the required bookie field.
        let frame = r#"{"type":"created","id":"E1"}"#;

        assert!(decode_frame(frame).is_empty());
    }
}
