mod cli;
mod commands;
mod error;
mod output;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use secrecy::SecretString;
use tracing_subscriber::EnvFilter;

use airlift_api::{DashboardClient, TlsMode, TransportConfig};
use airlift_core::{ManagementApi, builtin_registry};

use crate::cli::{Cli, Command, GlobalOpts};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "airlift", &mut std::io::stdout());
            Ok(())
        }

        // Both pipeline commands need a dashboard client and the
        // builtin handler registry.
        Command::Apply(args) => {
            let api = build_dashboard(&cli.global)?;
            let registry = builtin_registry();
            commands::apply::handle(&registry, api, args, &cli.global).await
        }

        Command::Verify(args) => {
            let api = build_dashboard(&cli.global)?;
            let registry = builtin_registry();
            commands::verify::handle(&registry, api, args, &cli.global).await
        }
    }
}

/// Build a `DashboardClient` from the config file, profile, and CLI
/// overrides. CLI flags win over profile fields.
fn build_dashboard(global: &GlobalOpts) -> Result<Arc<dyn ManagementApi>, CliError> {
    let config = airlift_config::load_config_or_default();

    let profile = match airlift_config::select_profile(&config, global.profile.as_deref()) {
        Ok((profile, name)) => Some((profile.clone(), name)),
        // A missing default profile is fine when flags carry the config;
        // an explicitly named profile must exist.
        Err(_) if global.profile.is_none() => None,
        Err(err) => return Err(err.into()),
    };

    let base_url_raw = global
        .base_url
        .clone()
        .or_else(|| profile.as_ref().map(|(p, _)| p.base_url.clone()))
        .ok_or_else(|| CliError::NoConfig {
            path: airlift_config::config_path().display().to_string(),
        })?;
    let base_url = airlift_config::parse_base_url(&base_url_raw)?;

    let api_key = if let Some(ref key) = global.api_key {
        SecretString::from(key.clone())
    } else if let Some((ref prof, ref name)) = profile {
        airlift_config::resolve_api_key(prof, name)?
    } else {
        return Err(CliError::NoCredentials {
            profile: "default".into(),
        });
    };

    let insecure =
        global.insecure || profile.as_ref().is_some_and(|(p, _)| p.insecure == Some(true));
    let tls = if let Some(ca) = profile.as_ref().and_then(|(p, _)| p.ca_cert.clone()) {
        TlsMode::CustomCa(ca)
    } else if insecure {
        TlsMode::DangerAcceptInvalid
    } else {
        TlsMode::System
    };

    let timeout = global
        .timeout
        .or_else(|| profile.as_ref().and_then(|(p, _)| p.timeout))
        .unwrap_or(30);

    let transport = TransportConfig {
        tls,
        timeout: Duration::from_secs(timeout),
    };

    let client = DashboardClient::new(base_url, &api_key, &transport)?;
    Ok(Arc::new(client))
}
