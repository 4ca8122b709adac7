//! Ticket data model for tix
//!
//! A ticket is one markdown file: a YAML frontmatter header plus a free-text
//! body. The header is an open mapping - known fields are typed, everything
//! else round-trips through an order-preserving extension map.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

/// Type applied when a ticket is created without one.
pub const DEFAULT_TYPE: &str = "Feature";

/// Status applied when a header is written without one.
pub const DEFAULT_STATUS: &str = "Backlog";

/// Reference field that admits both a single ID and a list of IDs.
///
/// `blocks: TICKET-002` and `blocks: [TICKET-002]` are both valid headers;
/// the stored shape is preserved on re-serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Refs {
    One(String),
    Many(Vec<String>),
}

impl Refs {
    /// Normalize to a list, turning a scalar into a singleton.
    pub fn to_list(&self) -> Vec<String> {
        match self {
            Refs::One(id) => vec![id.clone()],
            Refs::Many(ids) => ids.clone(),
        }
    }
}

/// Ticket frontmatter header.
///
/// Known fields are typed and serialized in declaration order; unrecognized
/// keys land in `extra` and keep their insertion order, so updating a ticket
/// never drops metadata it does not understand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Header {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ticket_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Set once at creation, never auto-updated afterwards.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// Weak reference; not validated to exist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    /// Tickets this one blocks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocks: Option<Refs>,

    /// Tickets blocking this one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked_by: Option<Refs>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate: Option<Value>,

    /// Arbitrary additional keys, preserved in insertion order.
    #[serde(flatten)]
    pub extra: Mapping,
}

impl Header {
    /// Fill in `created_at` and `status` if absent. Every written header
    /// carries both.
    pub fn ensure_defaults(&mut self) {
        if self.created_at.is_none() {
            self.created_at = Some(Utc::now().to_rfc3339());
        }
        if self.status.is_none() {
            self.status = Some(DEFAULT_STATUS.to_string());
        }
    }

    /// View the whole header as a YAML mapping (known fields first, then
    /// extension keys).
    pub fn to_mapping(&self) -> Result<Mapping, serde_yaml::Error> {
        match serde_yaml::to_value(self)? {
            Value::Mapping(map) => Ok(map),
            _ => Ok(Mapping::new()),
        }
    }

    /// Rebuild a header from a YAML mapping.
    pub fn from_mapping(map: Mapping) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_value(Value::Mapping(map))
    }
}

/// Full ticket record: header plus body, as returned by get/create/update.
#[derive(Debug, Clone, Serialize)]
pub struct Ticket {
    pub id: String,

    #[serde(flatten)]
    pub header: Header,

    pub body: String,
}

/// Ticket metadata as returned by list/search/subtickets (no body).
#[derive(Debug, Clone, Serialize)]
pub struct TicketSummary {
    pub id: String,

    /// Source filename within the tickets directory.
    #[serde(rename = "_file")]
    pub file: String,

    #[serde(flatten)]
    pub header: Header,
}
