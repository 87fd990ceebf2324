//! Retailer universe selection.
//!
//! The universe is static configuration: per-category ordered retailer
//! lists, each entry carrying its discovery participation flag and an
//! optional direct-search locator template used only during fallback.
//! The catalog is immutable once loaded; selectors hand out snapshots.

use serde::{Deserialize, Serialize};

use crate::classify::Category;

/// One retailer in the configured universe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetailerEntry {
    /// Display identifier, e.g. "Phong Vũ".
    pub name: String,
    /// Domains attributing scraped URLs to this retailer.
    #[serde(default)]
    pub domains: Vec<String>,
    /// Whether the retailer participates in targeted discovery.
    #[serde(default = "default_priority_search")]
    pub priority_search: bool,
    /// Direct-search locator template with a `{query}` placeholder.
    /// Absent means the retailer cannot be searched directly and is
    /// skipped during fallback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_template: Option<String>,
}

fn default_priority_search() -> bool {
    true
}

impl RetailerEntry {
    /// Expand the direct-search template for a query, percent-encoding it.
    pub fn direct_search_url(&self, query: &str) -> Option<String> {
        self.search_template
            .as_ref()
            .map(|t| t.replace("{query}", &urlencoding::encode(query)))
    }
}

/// Category-keyed retailer lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetailerCatalog {
    pub laptop: Vec<RetailerEntry>,
    pub server: Vec<RetailerEntry>,
}

impl RetailerCatalog {
    /// Ordered universe for a category.
    ///
    /// For `Ambiguous` this is the laptop list followed by server entries
    /// not already present, order preserved. The returned list is a
    /// snapshot detached from the catalog.
    pub fn universe_for(&self, category: Category) -> Vec<RetailerEntry> {
        match category {
            Category::Laptop => self.laptop.clone(),
            Category::Server => self.server.clone(),
            Category::Ambiguous => {
                let mut combined = self.laptop.clone();
                for entry in &self.server {
                    if !combined.iter().any(|e| e.name == entry.name) {
                        combined.push(entry.clone());
                    }
                }
                combined
            }
        }
    }

    /// Every configured entry, laptop list first.
    pub fn entries(&self) -> impl Iterator<Item = &RetailerEntry> {
        self.laptop.iter().chain(self.server.iter())
    }

    /// Attribute a scraped URL to a retailer by domain.
    pub fn retailer_for_url(&self, url: &str) -> Option<&str> {
        let host = host_of(url)?;
        self.laptop
            .iter()
            .chain(self.server.iter())
            .find(|e| {
                e.domains
                    .iter()
                    .any(|d| host == *d || host.ends_with(&format!(".{d}")))
            })
            .map(|e| e.name.as_str())
    }
}

/// Lowercased host portion of an absolute URL, without port.
fn host_of(url: &str) -> Option<String> {
    let rest = url.split("://").nth(1)?;
    let host = rest.split(['/', '?', '#']).next()?;
    let host = host.split('@').next_back()?;
    let host = host.split(':').next()?;
    if host.is_empty() {
        None
    } else {
        Some(host.to_lowercase())
    }
}

impl Default for RetailerCatalog {
    fn default() -> Self {
        fn entry(
            name: &str,
            domains: &[&str],
            search_template: Option<&str>,
        ) -> RetailerEntry {
            RetailerEntry {
                name: name.to_string(),
                domains: domains.iter().map(|d| d.to_string()).collect(),
                priority_search: true,
                search_template: search_template.map(String::from),
            }
        }

        Self {
            laptop: vec![
                entry(
                    "FPT Shop",
                    &["fptshop.com.vn"],
                    Some("https://fptshop.com.vn/tim-kiem/{query}"),
                ),
                entry(
                    "Thế Giới Di Động",
                    &["thegioididong.com"],
                    Some("https://www.thegioididong.com/tim-kiem?key={query}"),
                ),
                entry(
                    "CellphoneS",
                    &["cellphones.com.vn"],
                    Some("https://cellphones.com.vn/tim-kiem?q={query}"),
                ),
                entry(
                    "Hoàng Hà Mobile",
                    &["hoanghamobile.com"],
                    Some("https://hoanghamobile.com/tim-kiem/{query}"),
                ),
                entry(
                    "Phong Vũ",
                    &["phongvu.vn"],
                    Some("https://phongvu.vn/search?q={query}"),
                ),
                entry(
                    "GearVN",
                    &["gearvn.com"],
                    Some("https://www.gearvn.com/search?type=product&q={query}"),
                ),
                entry(
                    "An Phát PC",
                    &["anphatpc.com.vn"],
                    Some("https://www.anphatpc.com.vn/tim-kiem?q={query}"),
                ),
                entry(
                    "Phúc Anh",
                    &["phucanh.vn"],
                    Some("https://www.phucanh.vn/tim-kiem?q={query}"),
                ),
                entry("Nguyễn Kim", &["nguyenkim.com"], None),
                entry("MediaMart", &["mediamart.vn"], None),
                entry("Điện Máy Xanh", &["dienmayxanh.com"], None),
                entry("Viettel Store", &["viettelstore.vn"], None),
            ],
            server: vec![
                entry(
                    "An Phát PC",
                    &["anphatpc.com.vn"],
                    Some("https://www.anphatpc.com.vn/tim-kiem?q={query}"),
                ),
                entry(
                    "Phúc Anh",
                    &["phucanh.vn"],
                    Some("https://www.phucanh.vn/tim-kiem?q={query}"),
                ),
                entry(
                    "Phong Vũ",
                    &["phongvu.vn"],
                    Some("https://phongvu.vn/search?q={query}"),
                ),
                entry("Máy Chủ Việt", &["maychuviet.vn"], None),
                entry("Thế Giới Máy Chủ", &["thegioimaychu.vn"], None),
                entry("Việt Nam Server", &["vietnamserver.vn"], None),
                entry(
                    "KDATA",
                    &["kdata.vn"],
                    Some("https://kdata.vn/tim-kiem?q={query}"),
                ),
                entry("Thành Nhân Computer", &["tncstore.vn"], None),
                entry("An Khang Computer", &["ankhang.vn"], None),
                entry("Hitech Pro", &["hitechpro.vn"], None),
                entry("Đỉnh Vàng Computer", &["dinhvangcomputer.vn"], None),
            ],
        }
    }
}
