#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use pushkind_catalog::domain::item::Item;
use pushkind_catalog::domain::types::ItemId;
use pushkind_catalog::source::{CatalogSource, SourceError, SourceResult};

const WORDS: [&str; 6] = ["Bolt", "anchor", "Cable", "bolt", "drill", "Anchor"];

/// Deterministic catalog with plenty of ties on every sort key.
pub fn sample_catalog(len: i32) -> Vec<Item> {
    (1..=len)
        .map(|i| {
            let title = WORDS[(i as usize) % WORDS.len()];
            Item::new(
                ItemId::new(i).unwrap(),
                title,
                f64::from((i * 37) % 200),
                f64::from((i * 7) % 11) / 2.0,
            )
            .with_tags([format!("tag-{}", i % 4)])
            .with_category(if i % 3 == 0 { "tools" } else { "hardware" })
        })
        .collect()
}

/// In-memory source that counts requests and can be switched to failing.
#[derive(Default)]
pub struct StaticSource {
    items: Mutex<Vec<Item>>,
    failure: Mutex<Option<SourceError>>,
    pub catalog_calls: AtomicUsize,
    pub item_calls: AtomicUsize,
}

impl StaticSource {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items: Mutex::new(items),
            ..Self::default()
        }
    }

    pub fn replace(&self, items: Vec<Item>) {
        *self.items.lock().unwrap() = items;
    }

    pub fn fail_with(&self, error: Option<SourceError>) {
        *self.failure.lock().unwrap() = error;
    }

    pub fn catalog_calls(&self) -> usize {
        self.catalog_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogSource for StaticSource {
    async fn fetch_catalog(&self) -> SourceResult<Vec<Item>> {
        self.catalog_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.failure.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self.items.lock().unwrap().clone())
    }

    async fn fetch_item(&self, id: ItemId) -> SourceResult<Item> {
        self.item_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.failure.lock().unwrap().clone() {
            return Err(err);
        }
        self.items
            .lock()
            .unwrap()
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or(SourceError::NotFound)
    }
}
