//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use hexago_core::domain::AdapterDirection;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "hexago",
    bin_name = "hexago",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Hexagonal architecture scaffolding for Go projects",
    long_about = "hexago adds services, domain types and adapters to Go projects \
                  laid out in the hexagonal (ports & adapters) style, renders \
                  them from overridable templates, and checks existing trees \
                  for dependency-direction violations.",
    after_help = "EXAMPLES:\n\
        \x20 hexago add service CreateOrder\n\
        \x20 hexago templates list\n\
        \x20 hexago templates export service/service.go.tmpl\n\
        \x20 hexago validate --path ./my-service\n\
        \x20 hexago completions bash > /usr/share/bash-completion/completions/hexago",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a component into the current project.
    #[command(
        subcommand,
        about = "Add a service, domain type or adapter",
        after_help = "EXAMPLES:\n\
            \x20 hexago add service CreateOrder -d \"places new orders\"\n\
            \x20 hexago add domain entity Order --fields \"email:string,placedAt:time.Time\"\n\
            \x20 hexago add domain value-object Money --fields \"amount:int64,currency:string\"\n\
            \x20 hexago add adapter primary http Order\n\
            \x20 hexago add adapter secondary database OrderRepository"
    )]
    Add(AddCommands),

    /// Inspect and customise code generation templates.
    #[command(
        subcommand,
        visible_alias = "t",
        about = "Manage code generation templates",
        long_about = "Inspect and customise the templates used to generate code.\n\n\
            Templates are loaded from multiple sources in priority order:\n\
            \x20 1. binary-local   templates/ next to the hexago binary\n\
            \x20 2. project-local  .hexago/templates/ in the current project\n\
            \x20 3. user-global    ~/.hexago/templates/ in your home directory\n\
            \x20 4. embedded       built-in templates compiled into the binary"
    )]
    Templates(TemplatesCommands),

    /// Check a project for dependency-direction violations.
    #[command(
        about = "Validate hexagonal architecture compliance",
        after_help = "EXAMPLES:\n\
            \x20 hexago validate\n\
            \x20 hexago validate --path ../billing\n\
            \x20 hexago validate --output-format json"
    )]
    Validate,

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 hexago completions bash > ~/.local/share/bash-completion/completions/hexago\n\
            \x20 hexago completions zsh  > ~/.zfunc/_hexago\n\
            \x20 hexago completions fish > ~/.config/fish/completions/hexago.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the hexago configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 hexago config get templates.user_dir\n\
            \x20 hexago config list\n\
            \x20 hexago config path"
    )]
    Config(ConfigCommands),
}

// ── add ───────────────────────────────────────────────────────────────────────

/// Subcommands for `hexago add`. Names must be Go identifiers; they are
/// exported (`createOrder` becomes `CreateOrder`) and file names are their
/// snake case.
#[derive(Debug, Subcommand)]
pub enum AddCommands {
    /// Add a service to the business-logic directory, with a test.
    Service {
        name: String,

        /// Doc-comment text for the service type
        #[arg(short, long, value_name = "TEXT")]
        description: Option<String>,
    },

    /// Add an entity or value object to internal/core/domain.
    #[command(subcommand)]
    Domain(DomainCommands),

    /// Add an adapter under internal/adapters/<direction>/<type>/.
    Adapter {
        /// primary (driver) or secondary (driven)
        #[arg(value_name = "DIRECTION")]
        direction: AdapterDirection,

        /// Technology: http for primary, database for secondary
        #[arg(value_name = "TYPE")]
        adapter_type: String,

        name: String,
    },
}

/// Subcommands for `hexago add domain`.
#[derive(Debug, Subcommand)]
pub enum DomainCommands {
    /// Entity with an ID, a Validate method and a test.
    Entity {
        name: String,

        /// Comma-separated name:type pairs
        #[arg(short, long, value_name = "FIELDS")]
        fields: Option<String>,
    },

    /// Immutable value object with accessors.
    #[command(visible_alias = "valueobject")]
    ValueObject {
        name: String,

        /// Comma-separated name:type pairs
        #[arg(short, long, value_name = "FIELDS")]
        fields: Option<String>,
    },
}

// ── templates ─────────────────────────────────────────────────────────────────

/// Subcommands for `hexago templates`.
#[derive(Debug, Subcommand)]
pub enum TemplatesCommands {
    /// List every built-in template, marking active overrides.
    #[command(visible_alias = "ls")]
    List,

    /// Show which source provides a template.
    Which {
        /// Template name, e.g. `service/service.go.tmpl`.
        name: String,
    },

    /// Copy a template to an override location for customisation.
    #[command(after_help = "EXAMPLES:\n\
            \x20 hexago templates export service/service.go.tmpl\n\
            \x20 hexago templates export adapter/http.go.tmpl --global")]
    Export {
        /// Template name.
        name: String,

        #[arg(long = "global", help = "Export to ~/.hexago/templates/")]
        global: bool,
    },

    /// Copy every built-in template to an override location.
    ExportAll {
        #[arg(long = "global", help = "Export to ~/.hexago/templates/")]
        global: bool,

        #[arg(long = "force", help = "Overwrite templates that already have an override")]
        force: bool,
    },

    /// Check a template file for syntax errors.
    Validate {
        /// Path to the template file.
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Remove a template override, reverting to the next source.
    Reset {
        /// Template name.
        name: String,

        #[arg(long = "global", help = "Remove from ~/.hexago/templates/")]
        global: bool,
    },

    /// Render a template with sample data.
    #[command(after_help = "EXAMPLES:\n\
            \x20 hexago templates preview service/service.go.tmpl --subject CreateOrder\n\
            \x20 hexago templates preview domain/entity.go.tmpl --subject customer")]
    Preview {
        /// Template name.
        name: String,

        /// Service, entity or adapter name fed to the template.
        #[arg(long = "subject", value_name = "NAME", default_value = "example")]
        subject: String,
    },
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `hexago completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `hexago config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `output.format`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
