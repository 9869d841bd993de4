//! Login, logout and password reset commands

use anyhow::Result;
use colored::Colorize;
use dialoguer::{Input, Password};

use super::get_context;
use crate::output::spinner;

pub async fn run_login(email: Option<String>, password: Option<String>) -> Result<()> {
    let ctx = get_context()?;

    // Prompt for whatever was not passed as a flag
    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let password = match password {
        Some(p) => p,
        None => Password::new().with_prompt("Password").interact()?,
    };

    let pb = spinner("Signing in");
    let result = ctx.auth_service.login(&email, &password).await;
    pb.finish_and_clear();
    let user = result?;

    println!("{} Logged in as {} <{}>", "✓".green(), user.name, user.email);
    if user.super_user {
        println!("{}", "Superuser account: 'exc admin' commands are available.".cyan());
    }

    Ok(())
}

pub fn run_logout() -> Result<()> {
    let ctx = get_context()?;
    ctx.auth_service.logout()?;
    println!("{} Logged out", "✓".green());
    Ok(())
}

pub async fn run_reset_password(email: Option<String>) -> Result<()> {
    let ctx = get_context()?;

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };

    let pb = spinner("Requesting password reset");
    let result = ctx.auth_service.reset_password(&email).await;
    pb.finish_and_clear();
    result?;

    println!("{} Password reset requested for {}", "✓".green(), email);
    println!("Check your inbox for further instructions.");

    Ok(())
}
