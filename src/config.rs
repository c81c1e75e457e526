// src/config.rs
use crate::constants::{
    CATALOG_API_URL_ENV, DEFAULT_CACHE_TTL_SECS, DEFAULT_CATALOG_API_URL,
    DEFAULT_RESULT_DISPLAY_LIMIT, DEFAULT_SEARCH_API_URL, MAX_DEBOUNCE_MS, MAX_MIN_QUERY_CHARS,
    MIN_SEARCH_QUERY_CHARS, SEARCH_API_URL_ENV, SEARCH_DEBOUNCE,
};
use crate::error::Result;
use crate::pipeline::PipelineSettings;
use crate::types::{BaseUrl, ProductId, ValidationError};
use clap::{Parser, Subcommand};
use std::time::Duration;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    #[command(subcommand)]
    pub command: Option<Mode>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false, global = true)]
    pub verbose: bool,

    /// Catalog backend serving the product list and lookups (env: CATALOG_API_URL)
    #[arg(long, global = true)]
    pub catalog_url: Option<String>,

    /// Backend serving text search (env: SEARCH_API_URL)
    #[arg(long, global = true)]
    pub search_url: Option<String>,

    /// Quiet period before typed text is searched, in milliseconds
    #[arg(long, default_value_t = SEARCH_DEBOUNCE.as_millis() as u64, global = true)]
    pub debounce_ms: u64,

    /// Queries shorter than this show the whole catalog instead of searching
    #[arg(long, default_value_t = MIN_SEARCH_QUERY_CHARS, global = true)]
    pub min_query_length: usize,

    /// Maximum number of products printed per result batch
    #[arg(long, default_value_t = DEFAULT_RESULT_DISPLAY_LIMIT, global = true)]
    pub limit: usize,

    /// Disable response caching (always fetch fresh data)
    #[arg(long, default_value_t = false, global = true)]
    pub no_cache: bool,

    /// Cache TTL in seconds (default: 300 = 5 minutes)
    #[arg(long, default_value_t = DEFAULT_CACHE_TTL_SECS, global = true)]
    pub cache_ttl: u64,
}

/// What the binary should do.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Search interactively: every stdin line is the current search text
    Search,
    /// Show a single product
    Show {
        /// Product ID (e.g. 7)
        id: String,
    },
}

/// What a resolved configuration asks the binary to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Search,
    Show(ProductId),
}

/// Resolved configuration — validated and ready to build the client and pipeline.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub action: Action,
    pub catalog_url: BaseUrl,
    pub search_url: BaseUrl,
    pub debounce: Duration,
    pub min_query_chars: usize,
    pub display_limit: usize,
    pub no_cache: bool,
    pub cache_ttl: Duration,
}

impl SearchConfig {
    /// Resolves a complete configuration from CLI input and environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self> {
        Self::resolve_with(cli, |key| std::env::var(key).ok())
    }

    /// Like [`resolve`](Self::resolve), reading the environment through `env`.
    pub fn resolve_with<E>(cli: CommandLineInput, env: E) -> Result<Self>
    where
        E: Fn(&str) -> Option<String>,
    {
        let catalog_url = pick_url(
            cli.catalog_url,
            &env,
            CATALOG_API_URL_ENV,
            DEFAULT_CATALOG_API_URL,
        )?;
        let search_url = pick_url(
            cli.search_url,
            &env,
            SEARCH_API_URL_ENV,
            DEFAULT_SEARCH_API_URL,
        )?;

        if cli.debounce_ms > MAX_DEBOUNCE_MS {
            return Err(ValidationError::OutOfBounds {
                field: "debounce-ms",
                value: cli.debounce_ms,
                min: 0,
                max: MAX_DEBOUNCE_MS,
            }
            .into());
        }

        if cli.min_query_length > MAX_MIN_QUERY_CHARS {
            return Err(ValidationError::OutOfBounds {
                field: "min-query-length",
                value: cli.min_query_length as u64,
                min: 0,
                max: MAX_MIN_QUERY_CHARS as u64,
            }
            .into());
        }

        let action = match cli.command.unwrap_or(Mode::Search) {
            Mode::Search => Action::Search,
            Mode::Show { id } => Action::Show(ProductId::parse(&id)?),
        };

        Ok(SearchConfig {
            action,
            catalog_url,
            search_url,
            debounce: Duration::from_millis(cli.debounce_ms),
            min_query_chars: cli.min_query_length,
            display_limit: cli.limit,
            no_cache: cli.no_cache,
            cache_ttl: Duration::from_secs(cli.cache_ttl),
        })
    }

    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            debounce: self.debounce,
            min_query_chars: self.min_query_chars,
        }
    }
}

/// Flag beats environment, environment beats the built-in default.
fn pick_url<E>(flag: Option<String>, env: &E, key: &str, fallback: &str) -> Result<BaseUrl>
where
    E: Fn(&str) -> Option<String>,
{
    let raw = flag
        .or_else(|| env(key).filter(|value| !value.trim().is_empty()))
        .unwrap_or_else(|| fallback.to_string());
    Ok(BaseUrl::parse(&raw)?)
}
