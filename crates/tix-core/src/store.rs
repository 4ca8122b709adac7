//! Ticket store: one markdown file per ticket in a single directory
//!
//! No locking, no daemon - every operation is a short sequence of blocking
//! reads and writes against the tickets directory. Concurrent invocations
//! against the same directory can race on the counter and on ticket files.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::ticket::{DEFAULT_STATUS, DEFAULT_TYPE, Header, Refs, Ticket, TicketSummary};
use crate::{Error, Result, frontmatter, id};

/// Fields accepted by [`TicketStore::create`] (the CLI reads these as a JSON
/// object from stdin). Unknown keys are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRequest {
    pub title: String,
    pub description: String,

    #[serde(rename = "type")]
    pub ticket_type: Option<String>,

    pub parent: Option<String>,
    pub status: Option<String>,
    pub blocks: Option<Refs>,
    pub blocked_by: Option<Refs>,
    pub labels: Option<serde_yaml::Value>,
    pub estimate: Option<serde_yaml::Value>,
}

/// Equality filters applied by [`TicketStore::list`].
#[derive(Debug, Clone, Default)]
pub struct ListFilters {
    pub status: Option<String>,
    pub ticket_type: Option<String>,
}

/// Parameters for [`TicketStore::search`].
#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    /// Case-insensitive substring matched against titles, then bodies.
    /// Empty matches everything.
    pub query: String,
    pub status: Option<String>,
    pub ticket_type: Option<String>,
    /// Accepted for parity with the other relationship queries; the search
    /// path does not apply it.
    pub parent: Option<String>,
}

/// File-per-ticket store rooted at a tickets directory.
pub struct TicketStore {
    root: PathBuf,
}

impl TicketStore {
    /// Open a store, creating the tickets directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// The tickets directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn ticket_path(&self, ticket_id: &str) -> PathBuf {
        self.root.join(format!("{}.md", ticket_id))
    }

    /// List ticket metadata (no bodies), lexicographically by filename.
    pub fn list(&self, filters: &ListFilters) -> Result<Vec<TicketSummary>> {
        let mut names: Vec<String> = fs::read_dir(&self.root)?
            .flatten()
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().into_owned();
                id::is_ticket_file(&name).then_some(name)
            })
            .collect();
        names.sort();

        let mut tickets = Vec::new();
        for name in names {
            let content = fs::read_to_string(self.root.join(&name))?;
            let (header, _body) = frontmatter::decode(&content).into_parts();

            if let Some(ref status) = filters.status
                && header.status.as_deref() != Some(status)
            {
                continue;
            }
            if let Some(ref ticket_type) = filters.ticket_type
                && header.ticket_type.as_deref() != Some(ticket_type)
            {
                continue;
            }

            let ticket_id = name.strip_suffix(".md").unwrap_or(&name).to_string();
            tickets.push(TicketSummary {
                id: ticket_id,
                file: name,
                header,
            });
        }

        Ok(tickets)
    }

    /// Fetch one ticket with its body.
    pub fn get(&self, ticket_id: &str) -> Result<Ticket> {
        let path = self.ticket_path(ticket_id);
        if !path.exists() {
            return Err(Error::NotFound(ticket_id.to_string()));
        }

        let content = fs::read_to_string(&path)?;
        let (header, body) = frontmatter::decode(&content).into_parts();
        Ok(Ticket {
            id: ticket_id.to_string(),
            header,
            body,
        })
    }

    /// Allocate an ID and write a new ticket file.
    pub fn create(&self, request: CreateRequest) -> Result<Ticket> {
        let ticket_id = id::next_id(&self.root)?;

        let mut header = Header {
            title: Some(request.title),
            ticket_type: Some(
                request
                    .ticket_type
                    .unwrap_or_else(|| DEFAULT_TYPE.to_string()),
            ),
            status: Some(request.status.unwrap_or_else(|| DEFAULT_STATUS.to_string())),
            parent: request.parent,
            blocks: request.blocks,
            blocked_by: request.blocked_by,
            labels: request.labels,
            estimate: request.estimate,
            ..Default::default()
        };
        header.ensure_defaults();

        let content = format!("{}{}", frontmatter::encode(&header)?, request.description);
        fs::write(self.ticket_path(&ticket_id), content)?;
        tracing::debug!("created {}", ticket_id);

        Ok(Ticket {
            id: ticket_id,
            header,
            body: request.description,
        })
    }

    /// Apply field updates to an existing ticket and rewrite it in place.
    ///
    /// `body` and `description` both replace the body; any other key
    /// overwrites that header field (removal is not supported). The rewrite
    /// is not atomic.
    pub fn update(
        &self,
        ticket_id: &str,
        updates: serde_json::Map<String, serde_json::Value>,
    ) -> Result<Ticket> {
        let path = self.ticket_path(ticket_id);
        if !path.exists() {
            return Err(Error::NotFound(ticket_id.to_string()));
        }

        let content = fs::read_to_string(&path)?;
        let (header, mut body) = frontmatter::decode(&content).into_parts();

        let mut map = header.to_mapping()?;
        for (key, value) in updates {
            if key == "body" || key == "description" {
                body = value
                    .as_str()
                    .ok_or_else(|| Error::Other(format!("{} must be a string", key)))?
                    .to_string();
            } else {
                map.insert(serde_yaml::Value::String(key), serde_yaml::to_value(&value)?);
            }
        }

        let mut header = Header::from_mapping(map)?;
        header.ensure_defaults();

        let content = format!("{}{}", frontmatter::encode(&header)?, body);
        fs::write(&path, content)?;
        tracing::debug!("updated {}", ticket_id);

        Ok(Ticket {
            id: ticket_id.to_string(),
            header,
            body,
        })
    }

    /// Search by substring: title first, full body as fallback.
    pub fn search(&self, params: &SearchParams) -> Result<Vec<TicketSummary>> {
        let filters = ListFilters {
            status: params.status.clone(),
            ticket_type: params.ticket_type.clone(),
        };
        let tickets = self.list(&filters)?;

        if params.query.is_empty() {
            return Ok(tickets);
        }

        let needle = params.query.to_lowercase();
        let mut matches = Vec::new();
        for ticket in tickets {
            let title = ticket.header.title.as_deref().unwrap_or("");
            if title.to_lowercase().contains(&needle) {
                matches.push(ticket);
                continue;
            }

            match self.get(&ticket.id) {
                Ok(full) => {
                    if full.body.to_lowercase().contains(&needle) {
                        matches.push(ticket);
                    }
                }
                Err(Error::NotFound(_)) => {}
                Err(err) => return Err(err),
            }
        }

        Ok(matches)
    }

    /// Tickets whose `parent` field equals the given ID, exact match only.
    pub fn subtickets(&self, parent_id: &str) -> Result<Vec<TicketSummary>> {
        Ok(self
            .list(&ListFilters::default())?
            .into_iter()
            .filter(|ticket| ticket.header.parent.as_deref() == Some(parent_id))
            .collect())
    }

    /// Build the dependency graph over all tickets.
    pub fn analyze_dependencies(&self) -> Result<crate::DependencyGraph> {
        let tickets = self.list(&ListFilters::default())?;
        Ok(crate::DependencyGraph::from_tickets(&tickets))
    }
}
