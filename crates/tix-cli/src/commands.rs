//! CLI command implementations

use std::io::Read;

use anyhow::Result;
use colored::Colorize;
use tix_core::{
    Config, CreateRequest, ListFilters, SearchParams, Ticket, TicketStore, TicketSummary,
};

pub fn list(
    store: &TicketStore,
    status: Option<String>,
    ticket_type: Option<String>,
    pretty: bool,
) -> Result<()> {
    let tickets = store.list(&ListFilters {
        status,
        ticket_type,
    })?;

    if pretty {
        print_summaries(&tickets);
    } else {
        println!("{}", serde_json::to_string_pretty(&tickets)?);
    }
    Ok(())
}

pub fn get(store: &TicketStore, id: &str, pretty: bool) -> Result<()> {
    let ticket = store.get(id)?;

    if pretty {
        print_ticket(&ticket);
    } else {
        println!("{}", serde_json::to_string_pretty(&ticket)?);
    }
    Ok(())
}

pub fn create(store: &TicketStore, config: &Config, pretty: bool) -> Result<()> {
    let mut request: CreateRequest = serde_json::from_str(&read_stdin()?)?;
    request
        .ticket_type
        .get_or_insert_with(|| config.default_type.clone());
    request
        .status
        .get_or_insert_with(|| config.default_status.clone());

    let ticket = store.create(request)?;

    if pretty {
        println!("{} Created {}", "✓".green(), ticket.id.cyan());
        if let Some(ref title) = ticket.header.title {
            println!("  Title: {}", title);
        }
    } else {
        println!("{}", serde_json::to_string_pretty(&ticket)?);
    }
    Ok(())
}

pub fn update(store: &TicketStore, id: &str, pretty: bool) -> Result<()> {
    let updates: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(&read_stdin()?)?;
    let ticket = store.update(id, updates)?;

    if pretty {
        println!("{} Updated {}", "✓".green(), ticket.id.cyan());
    } else {
        println!("{}", serde_json::to_string_pretty(&ticket)?);
    }
    Ok(())
}

pub fn search(
    store: &TicketStore,
    query: Option<String>,
    status: Option<String>,
    pretty: bool,
) -> Result<()> {
    let params = SearchParams {
        query: query.unwrap_or_default(),
        status,
        ..Default::default()
    };
    let tickets = store.search(&params)?;

    if pretty {
        print_summaries(&tickets);
    } else {
        println!("{}", serde_json::to_string_pretty(&tickets)?);
    }
    Ok(())
}

pub fn analyze_dependencies(store: &TicketStore) -> Result<()> {
    let graph = store.analyze_dependencies()?;
    println!("{}", serde_json::to_string_pretty(&graph)?);
    Ok(())
}

pub fn get_subtickets(store: &TicketStore, parent_id: &str, pretty: bool) -> Result<()> {
    let tickets = store.subtickets(parent_id)?;

    if pretty {
        print_summaries(&tickets);
    } else {
        println!("{}", serde_json::to_string_pretty(&tickets)?);
    }
    Ok(())
}

fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

fn print_summaries(tickets: &[TicketSummary]) {
    if tickets.is_empty() {
        println!("No tickets found");
        return;
    }
    for ticket in tickets {
        println!(
            "{} [{}] {} - {}",
            ticket.id.cyan(),
            ticket
                .header
                .ticket_type
                .as_deref()
                .unwrap_or("-")
                .blue(),
            status_colored(ticket.header.status.as_deref().unwrap_or("-")),
            ticket.header.title.as_deref().unwrap_or("(untitled)")
        );
    }
}

fn print_ticket(ticket: &Ticket) {
    println!(
        "{} {}",
        ticket.id.cyan().bold(),
        ticket.header.title.as_deref().unwrap_or("(untitled)").bold()
    );
    println!();
    println!(
        "Status:  {}",
        status_colored(ticket.header.status.as_deref().unwrap_or("-"))
    );
    println!(
        "Type:    {}",
        ticket.header.ticket_type.as_deref().unwrap_or("-")
    );
    if let Some(ref created) = ticket.header.created_at {
        println!("Created: {}", created);
    }
    if let Some(ref parent) = ticket.header.parent {
        println!("Parent:  {}", parent);
    }
    if let Some(ref blocks) = ticket.header.blocks {
        println!("Blocks:  {}", blocks.to_list().join(", "));
    }
    if let Some(ref blocked_by) = ticket.header.blocked_by {
        println!("Blocked by: {}", blocked_by.to_list().join(", "));
    }

    if !ticket.body.is_empty() {
        println!();
        println!("{}", ticket.body);
    }
}

fn status_colored(status: &str) -> colored::ColoredString {
    match status {
        "Backlog" => status.white(),
        "In Progress" => status.yellow(),
        "Blocked" => status.red(),
        "Done" => status.green(),
        _ => status.normal(),
    }
}
