//! Request and cancel commands - manage your own day offs

use anyhow::Result;
use chrono::NaiveDate;
use colored::Colorize;
use dialoguer::Confirm;

use exceptional_core::domain::quota;

use super::{get_context, require_login};
use crate::output::spinner;

pub async fn run_request(date: NaiveDate, yes: bool, json: bool) -> Result<()> {
    let ctx = get_context()?;
    require_login(&ctx)?;

    // Load current state first so the confirmation shows a real allowance
    let pb = spinner("Loading day offs");
    let result = ctx.day_off_service.load_mine().await;
    pb.finish_and_clear();
    result?;

    if !yes && !json {
        let remaining = ctx.day_off_service.remaining();
        println!(
            "Requesting {} ({} of {} requests left)",
            date,
            remaining,
            quota::MAX_REQUESTS
        );

        if !Confirm::new()
            .with_prompt("Send the request?")
            .default(true)
            .interact()?
        {
            println!("{}", "Cancelled".dimmed());
            return Ok(());
        }
    }

    let pb = spinner("Sending request");
    let result = ctx.day_off_service.request_date(date).await;
    pb.finish_and_clear();
    let day_off = result?;

    if json {
        println!("{}", serde_json::to_string_pretty(&day_off)?);
        return Ok(());
    }

    println!("{} Requested {} (id {})", "✓".green(), day_off.date, day_off.id);
    println!("{} requests remaining.", ctx.day_off_service.remaining());

    Ok(())
}

pub async fn run_cancel(id: &str, yes: bool) -> Result<()> {
    let ctx = get_context()?;
    require_login(&ctx)?;

    let pb = spinner("Loading day offs");
    let result = ctx.day_off_service.load_mine().await;
    pb.finish_and_clear();
    let day_offs = result?;

    let entry = match day_offs.iter().find(|d| d.id == id) {
        Some(d) => d,
        None => {
            eprintln!("{}", format!("Day-off request '{}' not found", id).red());
            if day_offs.is_empty() {
                eprintln!("{}", "You have no day-off requests".dimmed());
            } else {
                let ids: Vec<_> = day_offs.iter().map(|d| d.id.as_str()).collect();
                eprintln!("{}", format!("Your requests: {}", ids.join(", ")).dimmed());
            }
            std::process::exit(1);
        }
    };

    // Confirm removal unless --yes
    if !yes {
        println!(
            "\n{}",
            format!("This will cancel the {} request for {}.", entry.status, entry.date).yellow()
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

    let pb = spinner("Cancelling request");
    let result = ctx.day_off_service.cancel(id).await;
    pb.finish_and_clear();
    result?;

    println!("{} Request for {} cancelled", "✓".green(), entry.date);

    Ok(())
}
