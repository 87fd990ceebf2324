//! Fixture builders for discovery tests.

use chrono::Utc;

use crate::normalize::{NormalizedOffer, StockStatus, CURRENCY_VND};
use crate::source::RawCandidate;
use crate::universe::{RetailerCatalog, RetailerEntry};

/// A raw candidate with no stock label.
pub fn candidate(title: &str, price_text: &str, url: &str) -> RawCandidate {
    RawCandidate {
        title: title.to_string(),
        price_text: price_text.to_string(),
        url: url.to_string(),
        retailer_hint: None,
        stock_text: None,
    }
}

/// A raw candidate labeled in stock.
pub fn in_stock_candidate(title: &str, price_text: &str, url: &str) -> RawCandidate {
    RawCandidate {
        stock_text: Some("in stock".to_string()),
        ..candidate(title, price_text, url)
    }
}

/// A raw candidate labeled out of stock.
pub fn out_of_stock_candidate(title: &str, price_text: &str, url: &str) -> RawCandidate {
    RawCandidate {
        stock_text: Some("out of stock".to_string()),
        ..candidate(title, price_text, url)
    }
}

/// A normalized offer, for registry/ranking/store tests.
pub fn offer(retailer: &str, model: &str, price_vnd: u64, stock: StockStatus) -> NormalizedOffer {
    NormalizedOffer {
        product_name: format!("Product {model}"),
        brand: None,
        model_or_sku: model.to_string(),
        price_vnd,
        currency: CURRENCY_VND.to_string(),
        retailer: retailer.to_string(),
        url: format!(
            "https://{}.example.vn/p/{}",
            retailer.to_lowercase().replace(' ', "-"),
            model.to_lowercase()
        ),
        stock_status: stock,
        scraped_at: Utc::now(),
    }
}

/// A small three-retailer catalog where every retailer supports direct
/// search, keeping fallback-phase assertions free of unsupported-retailer
/// noise.
pub fn test_catalog() -> RetailerCatalog {
    fn entry(name: &str, domain: &str) -> RetailerEntry {
        RetailerEntry {
            name: name.to_string(),
            domains: vec![domain.to_string()],
            priority_search: true,
            search_template: Some(format!("https://{domain}/search?q={{query}}")),
        }
    }

    RetailerCatalog {
        laptop: vec![entry("Alpha", "alpha.vn"), entry("Beta", "beta.vn")],
        server: vec![entry("Gamma", "gamma.vn")],
    }
}
