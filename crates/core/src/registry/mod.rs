//! Offer deduplication registry.
//!
//! Accumulates normalized offers across every discovery phase of one run,
//! keeping the cheapest record per identity key. The registry is the only
//! state mutated by concurrent fetch workers; a single mutex guards the
//! insert-if-absent-else-keep-cheaper map so inserts are atomic per key.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::normalize::NormalizedOffer;

/// Identity under which offers deduplicate.
///
/// Keyed by `(retailer, model)` when a model code was extracted, else by
/// `(retailer, canonicalized URL)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OfferKey {
    retailer: String,
    ident: OfferIdent,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum OfferIdent {
    Model(String),
    Url(String),
}

impl OfferKey {
    pub fn for_offer(offer: &NormalizedOffer) -> Self {
        let ident = if offer.model_or_sku.is_empty() {
            OfferIdent::Url(canonicalize_url(&offer.url))
        } else {
            OfferIdent::Model(offer.model_or_sku.clone())
        };
        Self {
            retailer: offer.retailer.clone(),
            ident,
        }
    }
}

/// Canonical form of a URL for identity purposes: scheme and host
/// lowercased, fragment dropped, trailing slash trimmed. The query string
/// is kept because product ids often live there.
pub fn canonicalize_url(url: &str) -> String {
    let url = url.trim();
    let url = url.split('#').next().unwrap_or(url);
    let url = url.trim_end_matches('/');

    match url.split_once("://") {
        Some((scheme, rest)) => {
            let (host, path) = match rest.split_once('/') {
                Some((host, path)) => (host, Some(path)),
                None => (rest, None),
            };
            let mut canonical = format!("{}://{}", scheme.to_lowercase(), host.to_lowercase());
            if let Some(path) = path {
                canonical.push('/');
                canonical.push_str(path);
            }
            canonical
        }
        None => url.to_string(),
    }
}

/// What happened on an insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// New identity key.
    Inserted,
    /// Key existed; the new offer was cheaper and replaced it.
    ReplacedCheaper,
    /// Key existed with an equal or lower price; nothing changed.
    KeptExisting,
}

struct Slot {
    offer: NormalizedOffer,
    seq: u64,
}

#[derive(Default)]
struct Inner {
    slots: HashMap<OfferKey, Slot>,
    next_seq: u64,
}

/// Per-run offer accumulator. Discarded when the run completes.
#[derive(Default)]
pub struct OfferRegistry {
    inner: Mutex<Inner>,
}

impl OfferRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an offer, keeping the cheaper record on key collision.
    ///
    /// Price ties keep the earlier-inserted record. A replacement keeps
    /// the original insertion sequence so final tie-break ordering stays
    /// stable regardless of fetch arrival order.
    pub fn insert(&self, offer: NormalizedOffer) -> InsertOutcome {
        let key = OfferKey::for_offer(&offer);
        let mut inner = self.inner.lock().unwrap();
        let seq = inner.next_seq;

        let outcome = match inner.slots.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(Slot { offer, seq });
                InsertOutcome::Inserted
            }
            Entry::Occupied(mut slot) => {
                if offer.price_vnd < slot.get().offer.price_vnd {
                    slot.get_mut().offer = offer;
                    InsertOutcome::ReplacedCheaper
                } else {
                    InsertOutcome::KeptExisting
                }
            }
        };

        if outcome == InsertOutcome::Inserted {
            inner.next_seq += 1;
        }
        outcome
    }

    /// Number of distinct identity keys held.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All offers in insertion order. The registry itself is untouched.
    pub fn snapshot(&self) -> Vec<NormalizedOffer> {
        let inner = self.inner.lock().unwrap();
        let mut slots: Vec<_> = inner.slots.values().collect();
        slots.sort_by_key(|s| s.seq);
        slots.iter().map(|s| s.offer.clone()).collect()
    }
}
