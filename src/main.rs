// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::Path;
use tracing_subscriber::EnvFilter;

use finboard::api::ApiClient;
use finboard::commands::{self, Ctx};
use finboard::config::Config;
use finboard::{cli, db};

fn init_logging(verbose: bool, configured: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { configured };
        EnvFilter::new(format!("finboard={}", level))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let config = Config::load(matches.get_one::<String>("config").map(Path::new))?;
    init_logging(matches.get_flag("verbose"), &config.logging.level);
    tracing::debug!(api = %config.api.base_url, "finboard v{}", env!("CARGO_PKG_VERSION"));

    let conn = db::open_or_init()?;
    let api = ApiClient::new(&config.api)?;
    let ctx = Ctx {
        conn: &conn,
        config: &config,
        api: &api,
    };

    match matches.subcommand() {
        Some(("session", sub)) => commands::session::handle(&conn, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&ctx, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&ctx, sub)?,
        Some(("category", sub)) => commands::categories::handle(&ctx, sub)?,
        Some(("goal", sub)) => commands::goals::handle(&ctx, sub)?,
        Some(("notify", sub)) => commands::notify::handle(&ctx, sub)?,
        Some(("report", sub)) => commands::reports::handle(&ctx, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&ctx, sub)?,
        Some(("dashboard", sub)) => commands::dashboard::handle(&ctx, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&ctx)?,
        Some(("config", sub)) => commands::config::handle(&config, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
