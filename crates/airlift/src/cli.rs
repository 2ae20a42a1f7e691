//! Clap derive structures for the `airlift` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// airlift -- declarative configuration for wireless access points
#[derive(Debug, Parser)]
#[command(
    name = "airlift",
    version,
    about = "Apply declarative access-point configuration documents",
    long_about = "Reads a YAML document describing desired access-point settings,\n\
        verifies every device-class section against its vendor handler, and\n\
        pushes the translated updates through the vendor's management API.\n\n\
        Verification always runs to completion before any update is sent;\n\
        sections that fail verification are skipped without blocking the rest.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Dashboard profile to use
    #[arg(long, short = 'p', env = "AIRLIFT_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Dashboard API base URL (overrides profile)
    #[arg(long, short = 'u', env = "AIRLIFT_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Dashboard API key
    #[arg(long, env = "AIRLIFT_API_KEY", global = true, hide_env = true)]
    pub api_key: Option<String>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "AIRLIFT_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (default 30)
    #[arg(long, env = "AIRLIFT_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Verify a document and apply every section that passes
    Apply(ApplyArgs),

    /// Verify a document without applying anything
    #[command(alias = "check")]
    Verify(VerifyArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Path to the YAML configuration document
    pub file: PathBuf,
}

#[derive(Debug, Args)]
pub struct VerifyArgs {
    /// Path to the YAML configuration document
    pub file: PathBuf,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
