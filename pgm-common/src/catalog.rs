//! Catalog session: the state behind the presentation callbacks
//!
//! Each mutation runs validate → mutate → write-through, and returns the
//! recomputed view. The collection store is replaced wholesale on every
//! mutation; the in-memory copy stays authoritative when a write fails.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::feed::FeedSource;
use crate::normalize::{NormalizeMode, Normalizer};
use crate::persistence::{PersistenceGateway, STORAGE_KEY};
use crate::programme::{Programme, ProgrammeDraft, RawProgramme};
use crate::query::{self, SortKey, SortState};
use crate::store::{CollectionStore, Snapshot};
use crate::validate::{self, Validation};
use crate::{Error, Result};

/// What the presentation layer renders
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogView {
    pub programmes: Vec<Programme>,
    pub sort: SortState,
    pub filter: Option<String>,
    /// Size of the whole collection, before filtering
    pub total: usize,
}

pub struct Catalog {
    store: CollectionStore,
    sort: SortState,
    filter: Option<String>,
    gateway: Arc<dyn PersistenceGateway>,
    feed: FeedSource,
    normalizer: Normalizer,
}

impl Catalog {
    /// Empty catalog; call [`Catalog::load`] to seed it
    pub fn new(
        gateway: Arc<dyn PersistenceGateway>,
        feed: FeedSource,
        normalizer: Normalizer,
    ) -> Self {
        Self {
            store: CollectionStore::new(),
            sort: SortState::default(),
            filter: None,
            gateway,
            feed,
            normalizer,
        }
    }

    pub fn store(&self) -> &CollectionStore {
        &self.store
    }

    pub fn view(&self) -> CatalogView {
        let snapshot = self.store.values();
        let programmes = query::view(&snapshot, self.sort, self.filter.as_deref());
        debug!(
            shown = programmes.len(),
            total = snapshot.len(),
            sort = %self.sort.active_key,
            "Recomputed view"
        );
        CatalogView {
            programmes,
            sort: self.sort,
            filter: self.filter.clone(),
            total: snapshot.len(),
        }
    }

    /// Seed from storage, falling back to the feed when nothing is stored
    pub async fn load(&mut self) -> Result<CatalogView> {
        let records: Vec<Value> = match self.gateway.get(STORAGE_KEY).await? {
            Some(stored) => {
                let records: Vec<Value> = serde_json::from_value(stored)?;
                info!("Loaded {} programmes from local storage", records.len());
                records
            }
            None => {
                let feed = self.feed.fetch().await?;
                info!("Loaded {} programmes from feed {}", feed.results.len(), self.feed);
                feed.results
            }
        };

        self.store = self.seed(&records);
        Ok(self.view())
    }

    /// Decode each record on its own, normalize strictly, then validate.
    /// Records that fail to decode or validate are skipped.
    fn seed(&self, records: &[Value]) -> CollectionStore {
        let normalizer = self.normalizer.with_mode(NormalizeMode::Strict);
        let mut store = CollectionStore::new();

        for (index, record) in records.iter().enumerate() {
            let raw: RawProgramme = match RawProgramme::deserialize(record) {
                Ok(raw) => raw,
                Err(err) => {
                    warn!(index, "Skipping malformed programme record: {}", err);
                    continue;
                }
            };

            let draft = normalizer.normalize(&raw);
            match validate::check(&draft, &store, None) {
                Ok(programme) => store.put(programme),
                Err(err) => warn!(index, id = ?draft.id, "Skipping programme record: {}", err),
            }
        }

        store
    }

    pub fn on_sort(&mut self, key: SortKey) -> CatalogView {
        self.sort = self.sort.toggle(key);
        self.view()
    }

    /// Empty or absent text clears the filter
    pub fn on_filter(&mut self, text: Option<&str>) -> CatalogView {
        self.filter = text.filter(|t| !t.is_empty()).map(str::to_lowercase);
        self.view()
    }

    /// Validator outcome for a candidate, without touching the collection
    pub fn validate(&self, candidate: &ProgrammeDraft, editing: Option<i64>) -> Validation {
        validate::validate(candidate, &self.store, editing)
    }

    /// Form input is normalized permissively
    pub fn draft_from_form(&self, raw: &RawProgramme) -> ProgrammeDraft {
        self.normalizer.with_mode(NormalizeMode::Permissive).normalize(raw)
    }

    pub async fn on_add(&mut self, candidate: ProgrammeDraft) -> Result<CatalogView> {
        let programme = validate::check(&candidate, &self.store, None)?;
        info!(id = programme.id, "Adding programme '{}'", programme.name);

        let mut next = self.store.clone();
        next.put(programme);
        self.commit(next).await
    }

    pub async fn on_edit(&mut self, id: i64, candidate: ProgrammeDraft) -> Result<CatalogView> {
        let existing = self
            .store
            .get(id)
            .ok_or_else(|| Error::NotFound(format!("Programme {}", id)))?;

        let mut programme = validate::check(&candidate, &self.store, Some(id))?;
        if programme.image_url.is_none() {
            programme.image_url = existing.image_url.clone();
        }
        info!(old_id = id, new_id = programme.id, "Editing programme '{}'", programme.name);

        let mut next = self.store.clone();
        next.replace(id, programme);
        self.commit(next).await
    }

    /// Deleting an absent id completes normally
    pub async fn on_delete(&mut self, id: i64) -> Result<CatalogView> {
        let mut next = self.store.clone();
        match next.delete(id) {
            Some(removed) => info!(id, "Deleted programme '{}'", removed.name),
            None => debug!(id, "Delete of absent programme ignored"),
        }
        self.commit(next).await
    }

    /// Drop local storage and reload from the feed
    pub async fn reset(&mut self) -> Result<CatalogView> {
        self.gateway.remove(STORAGE_KEY).await?;
        info!("Removed local programme data");
        self.load().await
    }

    /// Swap in the new collection, then persist the full snapshot
    async fn commit(&mut self, next: CollectionStore) -> Result<CatalogView> {
        self.store = next;
        self.save(&self.store.values()).await?;
        Ok(self.view())
    }

    async fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let value: Value = serde_json::to_value(snapshot.to_sorted_vec())?;
        self.gateway.set(STORAGE_KEY, value).await?;
        debug!(count = snapshot.len(), "Wrote programme snapshot");
        Ok(())
    }
}
