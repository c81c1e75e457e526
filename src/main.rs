// src/main.rs

use catalog_search::{
    write_block, Action, AppError, CachedCatalogClient, CatalogEndpoints, CatalogFetcher,
    CatalogHttpClient, CatalogRepository, CommandLineInput, ProductId, QueryPipeline,
    ResultRenderer, SearchConfig, RESPONSE_CACHE_CAPACITY,
};
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use std::fs;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Sets up logging configuration.
///
/// Console output goes to stderr; stdout carries search results only.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("catalog_search.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S%.3f)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let console_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S%.3f)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(console_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Builds the catalog repository, cached unless disabled.
fn build_repository(config: &SearchConfig) -> Result<Arc<dyn CatalogRepository>, AppError> {
    let endpoints = CatalogEndpoints::new(config.catalog_url.clone(), config.search_url.clone());
    let http_client = CatalogHttpClient::new(endpoints)?;

    if config.no_cache {
        log::info!("Cache disabled — all requests go to the catalog backends");
        Ok(Arc::new(http_client))
    } else {
        log::info!("Cache enabled (TTL: {}s)", config.cache_ttl.as_secs());
        Ok(Arc::new(CachedCatalogClient::new(
            http_client,
            RESPONSE_CACHE_CAPACITY,
            config.cache_ttl,
        )))
    }
}

/// Runs the interactive search: each stdin line is the current search text.
async fn run_search(
    config: &SearchConfig,
    repository: Arc<dyn CatalogRepository>,
    renderer: &ResultRenderer,
) -> Result<(), AppError> {
    let fetcher = Arc::new(CatalogFetcher::new(repository));
    let pipeline = QueryPipeline::new(fetcher, config.pipeline_settings());
    let (input, mut session) = pipeline.activate();

    let reader = tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if !input.submit(line) {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    log::error!("Failed to read stdin: {}", e);
                    break;
                }
            }
        }
        input.close();
    });

    let mut stdout = std::io::stdout();
    let mut batches = 0usize;
    while let Some(batch) = session.next_batch().await {
        batches += 1;
        write_block(&mut stdout, &renderer.render_batch(&batch)?)?;
    }

    reader.abort();
    log::info!("Search session ended after {} batches", batches);
    Ok(())
}

/// Prints a single product card.
async fn run_show(
    id: &ProductId,
    repository: Arc<dyn CatalogRepository>,
    renderer: &ResultRenderer,
) -> Result<(), AppError> {
    log::info!("Retrieving product {}", id);
    let product = repository.retrieve_product(id).await.map_err(|e| {
        if e.is_not_found() {
            AppError::ProductNotFound(id.to_string())
        } else {
            AppError::Fetch(e)
        }
    })?;
    write_block(&mut std::io::stdout(), &renderer.render_product(&product)?)
}

async fn execute(config: &SearchConfig) -> Result<(), AppError> {
    let repository = build_repository(config)?;
    let renderer = ResultRenderer::new(config.display_limit)?;

    match &config.action {
        Action::Search => run_search(config, repository, &renderer).await,
        Action::Show(id) => run_show(id, repository, &renderer).await,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = SearchConfig::resolve(cli)?;

    execute(&config).await?;

    Ok(())
}
