// src/output/render.rs
//! Handlebars rendering of result batches and product cards.

use crate::error::{AppError, Result};
use crate::model::{FetchKind, Product, ResultBatch};
use handlebars::Handlebars;
use serde_json::{json, Value};

const SEARCH_RESULTS_TEMPLATE: &str = "search_results";
const PRODUCT_DETAIL_TEMPLATE: &str = "product_detail";

/// Renders pipeline output for the terminal.
pub struct ResultRenderer {
    handlebars: Handlebars<'static>,
    display_limit: usize,
}

impl ResultRenderer {
    /// Registers the embedded templates. At most `display_limit` rows are
    /// rendered per batch.
    pub fn new(display_limit: usize) -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);

        for (name, source) in [
            (
                SEARCH_RESULTS_TEMPLATE,
                include_str!("../../templates/search_results.hbs"),
            ),
            (
                PRODUCT_DETAIL_TEMPLATE,
                include_str!("../../templates/product_detail.hbs"),
            ),
        ] {
            handlebars
                .register_template_string(name, source)
                .map_err(|e| AppError::TemplateInvalid {
                    name: name.to_string(),
                    message: e.to_string(),
                })?;
        }

        Ok(Self {
            handlebars,
            display_limit,
        })
    }

    pub fn render_batch(&self, batch: &ResultBatch<Product>) -> Result<String> {
        let shown = batch.items.len().min(self.display_limit);
        let hidden = batch.items.len() - shown;

        let rows: Vec<Value> = batch
            .items
            .iter()
            .take(shown)
            .map(|product| {
                json!({
                    "id": product.id.value(),
                    "title": product.title,
                    "price": product.display_price(),
                    "category": product.category,
                })
            })
            .collect();

        let data = json!({
            "heading": batch_heading(batch),
            "rows": rows,
            "hidden": (hidden > 0).then_some(hidden),
            "notice": batch.recovered_from,
        });
        self.render(SEARCH_RESULTS_TEMPLATE, &data)
    }

    pub fn render_product(&self, product: &Product) -> Result<String> {
        let rating = product.rating.map(|rating| match rating.votes {
            Some(votes) => format!("{:.1} ({} votes)", rating.score, votes),
            None => format!("{:.1}", rating.score),
        });

        let data = json!({
            "id": product.id.value(),
            "title": product.title,
            "category": product.category,
            "price": product.display_price(),
            "rating": rating,
            "description": product.description,
            "image": product.image,
        });
        self.render(PRODUCT_DETAIL_TEMPLATE, &data)
    }

    fn render(&self, name: &str, data: &Value) -> Result<String> {
        self.handlebars
            .render(name, data)
            .map_err(|e| AppError::TemplateRender {
                name: name.to_string(),
                message: e.to_string(),
            })
    }
}

fn batch_heading(batch: &ResultBatch<Product>) -> String {
    let noun = if batch.len() == 1 { "product" } else { "products" };
    match batch.kind {
        FetchKind::Default => format!("{} | {} {}", batch.kind, batch.len(), noun),
        FetchKind::Search => format!(
            "{} \"{}\" | {} {}",
            batch.kind,
            batch.query,
            batch.len(),
            noun
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Rating;
    use crate::types::{ProductId, Query};

    fn product(id: u64, title: &str, price: f64) -> Product {
        Product {
            id: ProductId::new(id),
            title: title.to_string(),
            price,
            description: "Sturdy & <light>".to_string(),
            category: "bags".to_string(),
            image: None,
            rating: Some(Rating {
                score: 3.9,
                votes: Some(120),
            }),
        }
    }

    #[test]
    fn test_search_batch_rendering() {
        let renderer = ResultRenderer::new(10).unwrap();
        let batch = ResultBatch::fetched(
            Query::from("pack"),
            FetchKind::Search,
            vec![product(1, "Backpack", 109.95), product(2, "Fanny pack", 7.5)],
        );
        let text = renderer.render_batch(&batch).unwrap();
        assert!(text.starts_with("search \"pack\" | 2 products"));
        assert!(text.contains("#1  Backpack  $109.95  [bags]"));
        assert!(text.contains("#2  Fanny pack  $7.50  [bags]"));
        assert!(!text.contains("more"));
    }

    #[test]
    fn test_rows_beyond_limit_are_summarised() {
        let renderer = ResultRenderer::new(1).unwrap();
        let batch = ResultBatch::fetched(
            Query::empty(),
            FetchKind::Default,
            vec![product(1, "Backpack", 1.0), product(2, "Jacket", 2.0), product(3, "Ring", 3.0)],
        );
        let text = renderer.render_batch(&batch).unwrap();
        assert!(text.starts_with("catalog | 3 products"));
        assert!(text.contains("Backpack"));
        assert!(!text.contains("Jacket"));
        assert!(text.contains("... 2 more"));
    }

    #[test]
    fn test_recovered_batch_shows_notice() {
        let renderer = ResultRenderer::new(10).unwrap();
        let batch: ResultBatch<Product> =
            ResultBatch::recovered(Query::from("ab"), FetchKind::Search, "Network failure");
        let text = renderer.render_batch(&batch).unwrap();
        assert!(text.starts_with("search \"ab\" | 0 products"));
        assert!(text.contains("(showing nothing: Network failure)"));
    }

    #[test]
    fn test_product_card_is_not_html_escaped() {
        let renderer = ResultRenderer::new(10).unwrap();
        let text = renderer.render_product(&product(7, "Backpack", 109.95)).unwrap();
        assert!(text.starts_with("#7  Backpack"));
        assert!(text.contains("bags | $109.95 | rated 3.9 (120 votes)"));
        assert!(text.contains("Sturdy & <light>"));
    }
}
