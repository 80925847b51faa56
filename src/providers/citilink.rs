//! Citilink storefront engine

use super::traits::*;
use crate::products::Listing;
use anyhow::Result;
use scraper::{ElementRef, Html, Selector};

/// Scrapes the Citilink search results page
pub struct Citilink {
    search_url: String,
}

impl Citilink {
    pub fn new() -> Self {
        Self::with_base_url("https://www.citilink.ru")
    }

    /// Point the engine at another host, e.g. a mirror or a test server
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            search_url: format!("{}/search/", base_url.trim_end_matches('/')),
        }
    }

    fn parse_html_results(&self, html: &str) -> Result<Vec<Listing>> {
        let document = Html::parse_document(html);
        let mut listings = Vec::new();

        let card_selector = selector(r#"[data-meta-name="ProductVerticalSnippet"]"#)?;
        let title_selector = selector(r#"[data-meta-name="Snippet__title"]"#)?;
        let price_selector = selector(r#"[data-meta-name="Snippet__price"]"#)?;

        for card in document.select(&card_selector) {
            let name = match card.select(&title_selector).next() {
                Some(title) => text_of(title),
                None => continue,
            };
            if name.is_empty() {
                continue;
            }

            // Out-of-stock cards have no price block
            let price = card
                .select(&price_selector)
                .next()
                .and_then(|p| parse_price(&text_of(p)));
            let Some(price) = price else {
                continue;
            };

            listings.push(Listing::new(name, price));
        }

        Ok(listings)
    }
}

impl Default for Citilink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductEngine for Citilink {
    fn name(&self) -> &str {
        "citilink"
    }

    fn timeout(&self) -> f64 {
        15.0
    }

    fn request(&self, term: &str) -> Result<EngineRequest> {
        let request = EngineRequest::get(&self.search_url)
            .param("text", term)
            .header("Referer", "https://www.citilink.ru/");
        Ok(request)
    }

    fn response(&self, response: EngineResponse) -> Result<Vec<Listing>> {
        self.parse_html_results(&response.text)
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow::anyhow!("invalid selector {css}: {e:?}"))
}

fn text_of(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// "12 990 ₽" -> 12990. Only the first amount counts, so a block
/// showing "12 990 ₽ 10 990 ₽" yields the first price.
fn parse_price(text: &str) -> Option<i64> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let digits: String = text[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || c.is_whitespace())
        .filter(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}
