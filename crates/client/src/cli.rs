// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `zyroctl`: terminal admin console over the API client.

use std::time::Duration;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::api::assets::AssetFilter;
use crate::api::failures::FailureFilter;
use crate::api::workorders::WorkOrderFilter;
use crate::config::{state_dir, ClientConfig};
use crate::http::Client;
use crate::query::Page;

#[derive(Debug, Parser)]
#[command(name = "zyroctl", about = "Admin CLI for the Zyro maintenance-management API")]
pub struct Cli {
    /// Base address of the API.
    #[arg(long, default_value = "http://localhost:8000/v1", env = "ZYRO_API_URL")]
    pub api_url: String,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 30, env = "ZYRO_TIMEOUT_SECS")]
    pub timeout_secs: u64,

    /// Log filter (tracing env-filter syntax).
    #[arg(long, default_value = "warn", env = "ZYRO_LOG")]
    pub log_level: String,

    /// Log format: text or json.
    #[arg(long, default_value = "text", env = "ZYRO_LOG_FORMAT")]
    pub log_format: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and persist the session.
    Login {
        username: String,
        /// Prefer the env var over the flag to keep the password out of
        /// shell history.
        #[arg(long, env = "ZYRO_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// End the current session.
    Logout,
    /// Show the authenticated profile.
    Whoami,
    /// List assets.
    Assets(ListArgs),
    /// List work orders.
    Workorders(ListArgs),
    /// List failures.
    Failures(ListArgs),
    /// Dashboard KPI summary.
    Kpi,
    /// Weekly capacity planner grid.
    Planner {
        /// First day (YYYY-MM-DD); defaults to the current week.
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Number of days in the window.
        #[arg(long)]
        days: Option<u32>,
    },
}

#[derive(Debug, clap::Args)]
pub struct ListArgs {
    #[arg(long)]
    pub page: Option<u32>,
    #[arg(long)]
    pub page_size: Option<u32>,
    #[arg(long)]
    pub search: Option<String>,
}

impl ListArgs {
    fn page(&self) -> Page {
        Page { page: self.page, page_size: self.page_size, search: self.search.clone() }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = ClientConfig::new(cli.api_url)
        .with_timeout(Duration::from_secs(cli.timeout_secs))
        .with_state_dir(state_dir());
    let client = Client::new(config);

    if let Command::Login { username, password } = &cli.command {
        client.auth().login(username, password).await?;
        let profile = client.auth().me().await?;
        return print_json(&profile);
    }

    // Every other command operates on a restored session.
    let Some(profile) = client.restore_session().await? else {
        anyhow::bail!("not logged in; run `zyroctl login <username>` first");
    };

    match cli.command {
        // Handled above.
        Command::Login { .. } => Ok(()),
        Command::Logout => {
            client.auth().logout().await?;
            tracing::info!("logged out");
            Ok(())
        }
        Command::Whoami => print_json(&profile),
        Command::Assets(args) => {
            let assets = client.assets().list(&args.page(), &AssetFilter::default()).await?;
            print_json(&assets)
        }
        Command::Workorders(args) => {
            let orders = client.workorders().list(&args.page(), &WorkOrderFilter::default()).await?;
            print_json(&orders)
        }
        Command::Failures(args) => {
            let failures = client.failures().list(&args.page(), &FailureFilter::default()).await?;
            print_json(&failures)
        }
        Command::Kpi => print_json(&client.kpi().summary().await?),
        Command::Planner { start, days } => print_json(&client.planner().week(start, days).await?),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
