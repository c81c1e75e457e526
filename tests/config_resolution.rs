//! Command-line and environment precedence for `SearchConfig`.

use catalog_search::{Action, AppError, CommandLineInput, ProductId, SearchConfig};
use clap::Parser;
use std::collections::HashMap;
use std::time::Duration;

fn resolve(args: &[&str], env: &[(&str, &str)]) -> Result<SearchConfig, AppError> {
    let mut argv = vec!["catalog-search"];
    argv.extend_from_slice(args);
    let cli = CommandLineInput::try_parse_from(argv).expect("arguments should parse");
    let env: HashMap<String, String> = env
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    SearchConfig::resolve_with(cli, |key| env.get(key).cloned())
}

#[test]
fn defaults_without_arguments() {
    let config = resolve(&[], &[]).unwrap();
    assert_eq!(config.action, Action::Search);
    assert_eq!(config.catalog_url.as_str(), "https://fakestoreapi.com/");
    assert_eq!(config.search_url.as_str(), "https://dummyjson.com/");
    assert_eq!(config.debounce, Duration::from_millis(300));
    assert_eq!(config.min_query_chars, 2);
    assert_eq!(config.display_limit, 20);
    assert!(!config.no_cache);
    assert_eq!(config.cache_ttl, Duration::from_secs(300));
}

#[test]
fn flag_beats_environment_beats_default() {
    let config = resolve(
        &["--catalog-url", "http://localhost:8080"],
        &[
            ("CATALOG_API_URL", "https://catalog.internal"),
            ("SEARCH_API_URL", "https://search.internal/v2/"),
        ],
    )
    .unwrap();
    assert_eq!(config.catalog_url.as_str(), "http://localhost:8080/");
    assert_eq!(config.search_url.as_str(), "https://search.internal/v2/");
}

#[test]
fn blank_environment_value_is_ignored() {
    let config = resolve(&[], &[("SEARCH_API_URL", "  ")]).unwrap();
    assert_eq!(config.search_url.as_str(), "https://dummyjson.com/");
}

#[test]
fn pipeline_tuning_flags() {
    let config = resolve(&["--debounce-ms", "150", "--min-query-length", "3"], &[]).unwrap();
    let settings = config.pipeline_settings();
    assert_eq!(settings.debounce, Duration::from_millis(150));
    assert_eq!(settings.min_query_chars, 3);
}

#[test]
fn show_subcommand_parses_product_id() {
    let config = resolve(&["show", "7", "--no-cache"], &[]).unwrap();
    assert_eq!(config.action, Action::Show(ProductId::new(7)));
    assert!(config.no_cache);
}

#[test]
fn invalid_values_are_rejected() {
    assert!(matches!(
        resolve(&["show", "seven"], &[]),
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        resolve(&["--debounce-ms", "60000"], &[]),
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        resolve(&["--min-query-length", "500"], &[]),
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        resolve(&["--catalog-url", "ftp://files.example.com"], &[]),
        Err(AppError::Validation(_))
    ));
}
