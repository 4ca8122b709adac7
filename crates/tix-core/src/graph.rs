//! Dependency graph aggregation for tix
//!
//! One linear pass over ticket metadata. Relationships are collected as-is:
//! no cycle detection, no traversal, no referential integrity.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::ticket::TicketSummary;

/// Derived blocks/blocked-by/parent relationships across all tickets.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DependencyGraph {
    /// Ticket ID -> IDs it blocks, copied from each `blocks` field.
    pub blocks: BTreeMap<String, Vec<String>>,

    /// Ticket ID -> IDs blocking it. Populated both by inverting `blocks`
    /// entries and by appending each ticket's explicit `blocked_by` list.
    /// The two sources are concatenated, not deduplicated, so a
    /// relationship declared from both ends appears twice.
    pub blocked_by: BTreeMap<String, Vec<String>>,

    /// Ticket ID -> parent ID, for every ticket with a parent.
    pub parent: BTreeMap<String, String>,

    /// Count of all tickets scanned.
    pub total_tickets: usize,
}

impl DependencyGraph {
    /// Aggregate relationships from ticket metadata in scan order.
    pub fn from_tickets(tickets: &[TicketSummary]) -> Self {
        let mut graph = Self {
            total_tickets: tickets.len(),
            ..Default::default()
        };

        for ticket in tickets {
            if let Some(parent) = ticket.header.parent.as_deref()
                && !parent.is_empty()
            {
                graph.parent.insert(ticket.id.clone(), parent.to_string());
            }

            if let Some(ref blocks) = ticket.header.blocks {
                let blocked = blocks.to_list();
                if !blocked.is_empty() {
                    for target in &blocked {
                        graph
                            .blocked_by
                            .entry(target.clone())
                            .or_default()
                            .push(ticket.id.clone());
                    }
                    graph.blocks.insert(ticket.id.clone(), blocked);
                }
            }

            if let Some(ref blocked_by) = ticket.header.blocked_by {
                let blockers = blocked_by.to_list();
                if !blockers.is_empty() {
                    graph
                        .blocked_by
                        .entry(ticket.id.clone())
                        .or_default()
                        .extend(blockers);
                }
            }
        }

        graph
    }
}
