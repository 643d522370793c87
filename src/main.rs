//! sqlweave CLI - render SQL templates from the command line

use std::path::{Path, PathBuf};

use clap::{Args as ClapArgs, Parser, Subcommand};
use colored::Colorize;
use tracing::{info, Instrument};

use sqlweave::{
    join, parse_args, render_template, Args, FixSuggestion, RequestContext, Template, Value,
    WeaveError, JOIN_DELIMITER,
};

#[derive(Parser)]
#[command(name = "sqlweave")]
#[command(about = "sqlweave - SQL query templating with literal list joins")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a query template against an argument file
    Render {
        #[command(flatten)]
        input: QueryInput,

        /// YAML or JSON file mapping placeholder names to values
        #[arg(short, long)]
        args: Option<PathBuf>,
    },

    /// Join a JSON array into a SQL literal list
    Join {
        /// JSON array, e.g. '[1,2,3]' or '["a","b"]'
        list: String,

        /// Delimiter placed between elements
        #[arg(short, long, default_value = JOIN_DELIMITER)]
        delim: String,
    },

    /// List the placeholder names a query references
    Placeholders {
        #[command(flatten)]
        input: QueryInput,
    },
}

#[derive(ClapArgs)]
#[group(required = true, multiple = false)]
struct QueryInput {
    /// Inline query template
    #[arg(short, long)]
    query: Option<String>,

    /// File containing the query template
    #[arg(short, long)]
    file: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing (stderr, so stdout stays pipeable)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let (ctx, _) = RequestContext::background().with_new_request_id();
    let span = ctx.span();
    let result = ctx.scope(run(cli.command)).instrument(span).await;

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(suggestion) = e.fix_suggestion() {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> Result<(), WeaveError> {
    match command {
        Commands::Render { input, args } => {
            let query = input.load().await?;
            let args = load_args(args.as_deref()).await?;
            let rendered = render_template(&query, &args)?;
            info!(bound = args.len(), "Rendered query");
            println!("{}", rendered);
        }
        Commands::Join { list, delim } => {
            let value: Value = serde_json::from_str(&list)
                .map_err(|e| WeaveError::Args(format!("list must be a JSON array: {}", e)))?;
            println!("{}", join(&value, &delim)?);
        }
        Commands::Placeholders { input } => {
            let query = input.load().await?;
            for name in Template::parse(&query).names() {
                println!("{}", name);
            }
        }
    }
    Ok(())
}

impl QueryInput {
    async fn load(self) -> Result<String, WeaveError> {
        match (self.query, self.file) {
            (Some(query), _) => Ok(query),
            (None, Some(path)) => Ok(tokio::fs::read_to_string(path).await?),
            (None, None) => Err(WeaveError::Args("pass --query or --file".to_string())),
        }
    }
}

async fn load_args(path: Option<&Path>) -> Result<Args, WeaveError> {
    let Some(path) = path else {
        return Ok(Args::new());
    };
    // Read async to not block runtime
    let text = tokio::fs::read_to_string(path).await?;
    parse_args(&text)
}
