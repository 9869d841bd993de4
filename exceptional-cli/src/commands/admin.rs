//! Admin commands - review and decide day-off requests

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use comfy_table::Cell;
use dialoguer::Confirm;

use exceptional_core::domain::quota;
use exceptional_core::ExceptionalContext;

use super::{get_context, require_login};
use crate::output::{create_table, spinner, status_cell};

#[derive(Subcommand)]
pub enum AdminCommands {
    /// List all users
    Users {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the day-off requests of one user
    Review {
        /// User ID to review
        user_id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Approve a pending request
    Approve {
        /// ID of the request
        id: String,
    },
    /// Refuse a pending request
    Refuse {
        /// ID of the request
        id: String,
    },
    /// Remove an approved request on behalf of its owner
    Remove {
        /// ID of the request
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn run(command: AdminCommands) -> Result<()> {
    let ctx = get_context()?;
    require_login(&ctx)?;
    require_superuser(&ctx)?;

    match command {
        AdminCommands::Users { json } => run_users(&ctx, json).await,
        AdminCommands::Review { user_id, json } => run_review(&ctx, &user_id, json).await,
        AdminCommands::Approve { id } => run_decide(&ctx, &id, Decision::Approve).await,
        AdminCommands::Refuse { id } => run_decide(&ctx, &id, Decision::Refuse).await,
        AdminCommands::Remove { id, yes } => run_remove(&ctx, &id, yes).await,
    }
}

enum Decision {
    Approve,
    Refuse,
}

/// Local gate for a friendlier message; the server checks again on every call
fn require_superuser(ctx: &ExceptionalContext) -> Result<()> {
    match ctx.session.user() {
        Some(user) if user.super_user => Ok(()),
        _ => anyhow::bail!("Superuser required. Log in with a superuser account."),
    }
}

async fn run_users(ctx: &ExceptionalContext, json: bool) -> Result<()> {
    let pb = spinner("Loading users");
    let result = ctx.day_off_service.users().await;
    pb.finish_and_clear();
    let users = result?;

    if json {
        println!("{}", serde_json::to_string_pretty(&users)?);
        return Ok(());
    }

    let mut table = create_table();
    table.set_header(vec!["ID", "Name", "Email", "Superuser"]);
    for user in &users {
        table.add_row(vec![
            Cell::new(&user.id),
            Cell::new(&user.name),
            Cell::new(&user.email),
            Cell::new(if user.super_user { "yes" } else { "" }),
        ]);
    }
    println!("{}", table);

    Ok(())
}

async fn run_review(ctx: &ExceptionalContext, user_id: &str, json: bool) -> Result<()> {
    let pb = spinner("Loading day offs");
    let result = ctx.day_off_service.load_for_user(user_id).await;
    pb.finish_and_clear();
    let day_offs = result?;

    if json {
        println!("{}", serde_json::to_string_pretty(&day_offs)?);
        return Ok(());
    }

    println!("{}", format!("Day offs for user {}", user_id).bold());
    println!();

    if day_offs.is_empty() {
        println!("{}", "No day-off requests for this user.".yellow());
    } else {
        let mut table = create_table();
        table.set_header(vec!["ID", "Date", "Status", "Requested"]);
        for day_off in &day_offs {
            table.add_row(vec![
                Cell::new(&day_off.id),
                Cell::new(day_off.date.to_string()),
                status_cell(day_off.status),
                Cell::new(day_off.created_at.format("%Y-%m-%d").to_string()),
            ]);
        }
        println!("{}", table);
    }

    println!();
    println!(
        "Remaining: {} of {}",
        ctx.day_off_service.remaining(),
        quota::MAX_REQUESTS
    );

    Ok(())
}

async fn run_decide(ctx: &ExceptionalContext, id: &str, decision: Decision) -> Result<()> {
    let pb = spinner("Sending decision");
    let (result, verb) = match decision {
        Decision::Approve => (ctx.day_off_service.approve(id).await, "approved"),
        Decision::Refuse => (ctx.day_off_service.refuse(id).await, "refused"),
    };
    pb.finish_and_clear();
    result?;

    println!("{} Request {} {}", "✓".green(), id, verb);

    Ok(())
}

async fn run_remove(ctx: &ExceptionalContext, id: &str, yes: bool) -> Result<()> {
    if !yes {
        println!(
            "\n{}",
            format!("This will remove request '{}' from its owner's allowance.", id).yellow()
        );

        if !Confirm::new()
            .with_prompt("Are you sure?")
            .default(false)
            .interact()?
        {
            println!("{}", "Cancelled".dimmed());
            return Ok(());
        }
    }

    let pb = spinner("Removing request");
    let result = ctx.day_off_service.cancel(id).await;
    pb.finish_and_clear();
    result?;

    println!("{} Request {} removed", "✓".green(), id);

    Ok(())
}
