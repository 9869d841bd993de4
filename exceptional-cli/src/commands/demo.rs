//! Demo command - manage demo mode

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use exceptional_core::config::Config;

use super::get_app_dir;

#[derive(Subcommand)]
pub enum DemoCommands {
    /// Enable demo mode
    #[command(name = "on")]
    On,
    /// Disable demo mode
    #[command(name = "off")]
    Off,
    /// Show demo mode status
    Status,
}

pub fn run(command: Option<DemoCommands>) -> Result<()> {
    let app_dir = get_app_dir();
    std::fs::create_dir_all(&app_dir)?;

    match command {
        Some(DemoCommands::On) => {
            let mut config = Config::load(&app_dir)?;
            config.enable_demo_mode();
            config.save(&app_dir)?;
            println!("{}", "Demo mode enabled".green());
            println!("Requests are served from built-in demo data. Log in with any email to try it.");
            Ok(())
        }
        Some(DemoCommands::Off) => {
            let mut config = Config::load(&app_dir)?;
            config.disable_demo_mode();
            config.save(&app_dir)?;
            println!("{}", "Demo mode disabled".yellow());
            Ok(())
        }
        Some(DemoCommands::Status) | None => {
            let config = Config::load(&app_dir)?;
            if config.demo_mode {
                println!("Demo mode is {}", "ON".green());
            } else {
                println!("Demo mode is {}", "OFF".yellow());
            }
            Ok(())
        }
    }
}
