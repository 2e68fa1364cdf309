//! JSON-backed stores for generated data.
//!
//! Each store is a single JSON file that is loaded whole, changed in memory
//! and written back whole. A missing file is an empty store; a file that
//! exists but does not parse is reported as [`Error::CorruptStore`] instead of
//! silently starting over.

use std::collections::{BTreeMap, HashMap};

use freqdeck::Meaning;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::PrettyFormatter;

use crate::storage::Storage;
use crate::{Error, Result};

/// File name of the meanings store.
pub const MEANINGS_FILE: &str = "meanings.json";

/// File name of the IPA store.
pub const IPAS_FILE: &str = "ipas.json";

/// Load a JSON value, or `T::default()` if the file does not exist.
pub fn load_json<T>(storage: &dyn Storage, name: &str) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    match storage.read(name)? {
        None => Ok(T::default()),
        Some(bytes) => serde_json::from_slice(&bytes).map_err(|source| Error::CorruptStore {
            name: name.to_string(),
            source,
        }),
    }
}

/// Write a JSON value, tab-indented, replacing the whole file.
pub fn save_json<T>(storage: &dyn Storage, name: &str, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
{
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));
    value.serialize(&mut serializer)?;
    storage.write(name, &buf)?;
    Ok(())
}

/// The generated meanings, unique by identity key.
///
/// Order is insertion order. When two meanings share a key, the one that
/// arrived first is kept.
#[derive(Debug, Clone, Default)]
pub struct MeaningStore {
    meanings: Vec<Meaning>,
    index: HashMap<String, usize>,
}

impl MeaningStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the store from [`MEANINGS_FILE`].
    ///
    /// Duplicate entries left by older runs are dropped.
    pub fn load(storage: &dyn Storage) -> Result<Self> {
        let stored: Vec<Meaning> = load_json(storage, MEANINGS_FILE)?;
        let mut store = Self::new();
        store.merge(stored);
        Ok(store)
    }

    /// Write the store to [`MEANINGS_FILE`].
    pub fn persist(&self, storage: &dyn Storage) -> Result<()> {
        save_json(storage, MEANINGS_FILE, &self.meanings)
    }

    /// Add meanings whose key is not stored yet. Returns how many were added.
    pub fn merge(&mut self, incoming: impl IntoIterator<Item = Meaning>) -> usize {
        let mut added = 0;
        for meaning in incoming {
            let id = meaning.id();
            if self.index.contains_key(&id) {
                continue;
            }
            self.index.insert(id, self.meanings.len());
            self.meanings.push(meaning);
            added += 1;
        }
        added
    }

    /// Whether a meaning with this identity key is stored.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// The meaning with this identity key.
    pub fn get(&self, id: &str) -> Option<&Meaning> {
        self.index.get(id).map(|&i| &self.meanings[i])
    }

    /// All meanings in store order.
    pub fn meanings(&self) -> &[Meaning] {
        &self.meanings
    }

    /// Number of stored meanings.
    pub fn len(&self) -> usize {
        self.meanings.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.meanings.is_empty()
    }
}

impl FromIterator<Meaning> for MeaningStore {
    fn from_iter<I: IntoIterator<Item = Meaning>>(iter: I) -> Self {
        let mut store = Self::new();
        store.merge(iter);
        store
    }
}

/// Phonetic transcriptions by identity key.
#[derive(Debug, Clone, Default)]
pub struct IpaStore {
    ipas: BTreeMap<String, String>,
}

impl IpaStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the store from [`IPAS_FILE`].
    pub fn load(storage: &dyn Storage) -> Result<Self> {
        Ok(Self {
            ipas: load_json(storage, IPAS_FILE)?,
        })
    }

    /// Write the store to [`IPAS_FILE`], keys in sorted order.
    pub fn persist(&self, storage: &dyn Storage) -> Result<()> {
        save_json(storage, IPAS_FILE, &self.ipas)
    }

    /// Whether a transcription (possibly empty) is stored for this key.
    pub fn contains(&self, id: &str) -> bool {
        self.ipas.contains_key(id)
    }

    /// The transcription for this key.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.ipas.get(id).map(String::as_str)
    }

    /// Store a transcription, replacing any previous one.
    pub fn insert(&mut self, id: impl Into<String>, ipa: impl Into<String>) {
        self.ipas.insert(id.into(), ipa.into());
    }

    /// Number of stored transcriptions.
    pub fn len(&self) -> usize {
        self.ipas.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.ipas.is_empty()
    }
}
