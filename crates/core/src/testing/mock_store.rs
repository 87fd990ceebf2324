//! Mock offer store for testing.

use std::sync::Mutex;

use crate::normalize::NormalizedOffer;
use crate::store::{OfferStats, OfferStore, StoreError, StoredOffer};

/// Mock implementation of the `OfferStore` trait.
///
/// Records saved batches and can be made to reject the next batch.
#[derive(Default)]
pub struct MockOfferStore {
    batches: Mutex<Vec<(String, Vec<NormalizedOffer>)>>,
    next_error: Mutex<Option<StoreError>>,
}

impl MockOfferStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `save_batch` fail with the given error.
    pub fn set_next_error(&self, error: StoreError) {
        *self.next_error.lock().unwrap() = Some(error);
    }

    /// All batches saved so far, in order.
    pub fn saved_batches(&self) -> Vec<(String, Vec<NormalizedOffer>)> {
        self.batches.lock().unwrap().clone()
    }

    /// Number of batches saved.
    pub fn batch_count(&self) -> usize {
        self.batches.lock().unwrap().len()
    }
}

impl OfferStore for MockOfferStore {
    fn save_batch(&self, query: &str, offers: &[NormalizedOffer]) -> Result<u32, StoreError> {
        if let Some(err) = self.next_error.lock().unwrap().take() {
            return Err(err);
        }
        self.batches
            .lock()
            .unwrap()
            .push((query.to_string(), offers.to_vec()));
        Ok(offers.len() as u32)
    }

    fn list_recent(&self, limit: u32) -> Result<Vec<StoredOffer>, StoreError> {
        let batches = self.batches.lock().unwrap();
        let mut stored: Vec<StoredOffer> = batches
            .iter()
            .flat_map(|(query, offers)| {
                offers.iter().map(move |offer| (query.clone(), offer.clone()))
            })
            .enumerate()
            .map(|(i, (query, offer))| StoredOffer {
                id: i as i64 + 1,
                query,
                offer,
            })
            .collect();
        stored.reverse();
        stored.truncate(limit as usize);
        Ok(stored)
    }

    fn stats(&self) -> Result<OfferStats, StoreError> {
        let batches = self.batches.lock().unwrap();
        let total: usize = batches.iter().map(|(_, offers)| offers.len()).sum();
        let queries: std::collections::HashSet<_> =
            batches.iter().map(|(q, _)| q.clone()).collect();
        let retailers: std::collections::HashSet<_> = batches
            .iter()
            .flat_map(|(_, offers)| offers.iter().map(|o| o.retailer.clone()))
            .collect();

        Ok(OfferStats {
            total_offers: total as u64,
            distinct_queries: queries.len() as u64,
            distinct_retailers: retailers.len() as u64,
        })
    }
}
