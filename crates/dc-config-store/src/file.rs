// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! JSON file backed document store

use crate::{DocumentStore, StoreError, StoreResult, SubtreeUpdate};
use async_trait::async_trait;
use dc_pricing_contract::defaults::{
    default_document, default_factors, default_scales, default_sections,
};
use dc_pricing_contract::{PricingDocument, Subtree};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

/// Top-level JSON object as stored on disk
type RawDocument = Map<String, Value>;

/// Stores the document as pretty-printed JSON at a fixed path, keeping the
/// previous version at `<path>.backup`.
///
/// Every load and every read-modify-write runs under one lock, so concurrent
/// requests never interleave a write with another write or a read.
///
/// Subtrees are decoded independently. A subtree that does not match the
/// typed model is served as its defaults, but `replace` writes it back
/// untouched so a bad value in one subtree never costs the others.
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backup_path(&self) -> PathBuf {
        sibling_with_suffix(&self.path, ".backup")
    }

    fn temp_path(&self) -> PathBuf {
        sibling_with_suffix(&self.path, ".tmp")
    }

    /// `None` when no document has been written yet
    async fn read_raw(&self) -> StoreResult<Option<RawDocument>> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source: err,
                })
            }
        };

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(raw)) => Ok(Some(raw)),
            Ok(_) => Err(self.unparsable("top level is not a JSON object".to_string())),
            Err(err) => Err(self.unparsable(err.to_string())),
        }
    }

    fn unparsable(&self, reason: String) -> StoreError {
        StoreError::Unparsable {
            path: self.path.clone(),
            reason,
        }
    }

    async fn read_document(&self) -> PricingDocument {
        match self.read_raw().await {
            Ok(Some(raw)) => self.decode(raw),
            Ok(None) => {
                debug!(path = %self.path.display(), "No pricing document on disk, using defaults");
                default_document()
            }
            Err(err) => {
                error!(path = %self.path.display(), error = %err, "Error loading pricing document, using defaults");
                default_document()
            }
        }
    }

    /// Typed view of a stored document. A missing `sections` is empty;
    /// missing `factors` / `scales` are backfilled from the defaults.
    fn decode(&self, mut raw: RawDocument) -> PricingDocument {
        let sections = match raw.remove(Subtree::Sections.key()) {
            Some(value) => self.decode_subtree(Subtree::Sections, value, default_sections),
            None => Vec::new(),
        };
        let factors = match raw.remove(Subtree::Factors.key()) {
            Some(value) => self.decode_subtree(Subtree::Factors, value, default_factors),
            None => {
                info!(path = %self.path.display(), "Pricing document has no factors, using defaults");
                default_factors()
            }
        };
        let scales = match raw.remove(Subtree::Scales.key()) {
            Some(value) => self.decode_subtree(Subtree::Scales, value, default_scales),
            None => {
                info!(path = %self.path.display(), "Pricing document has no scales, using defaults");
                default_scales()
            }
        };

        PricingDocument {
            sections,
            factors,
            scales,
        }
    }

    fn decode_subtree<T: DeserializeOwned>(
        &self,
        subtree: Subtree,
        value: Value,
        fallback: fn() -> T,
    ) -> T {
        serde_json::from_value(value).unwrap_or_else(|err| {
            error!(
                path = %self.path.display(),
                subtree = subtree.key(),
                error = %err,
                "Error loading pricing document subtree, using defaults"
            );
            fallback()
        })
    }

    /// Persisted form of `raw` after a load: absent `factors` / `scales`
    /// are filled with the defaults the load would have served.
    fn backfill_raw(&self, raw: &mut RawDocument) -> StoreResult<()> {
        if !raw.contains_key(Subtree::Factors.key()) {
            info!(path = %self.path.display(), "Pricing document has no factors, using defaults");
            raw.insert(
                Subtree::Factors.key().to_string(),
                serde_json::to_value(default_factors())?,
            );
        }
        if !raw.contains_key(Subtree::Scales.key()) {
            info!(path = %self.path.display(), "Pricing document has no scales, using defaults");
            raw.insert(
                Subtree::Scales.key().to_string(),
                serde_json::to_value(default_scales())?,
            );
        }
        Ok(())
    }

    async fn write_document<T: Serialize + ?Sized>(&self, document: &T) -> StoreResult<()> {
        self.write_backup().await;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|err| StoreError::io(parent, err))?;
        }

        let mut bytes = serde_json::to_vec_pretty(document)?;
        bytes.push(b'\n');

        let temp_path = self.temp_path();
        if let Err(err) = write_synced(&temp_path, &bytes).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(StoreError::io(&temp_path, err));
        }
        if let Err(err) = fs::rename(&temp_path, &self.path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(StoreError::io(&self.path, err));
        }

        set_shared_permissions(&self.path).await?;

        info!(path = %self.path.display(), bytes = bytes.len(), "Pricing document saved");
        Ok(())
    }

    /// Copy the current file aside. Failure is logged and does not abort the save.
    async fn write_backup(&self) {
        match fs::try_exists(&self.path).await {
            Ok(true) => {}
            Ok(false) => return,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "Could not check for existing pricing document before backup");
                return;
            }
        }

        let backup_path = self.backup_path();
        if let Err(err) = fs::copy(&self.path, &backup_path).await {
            warn!(backup = %backup_path.display(), error = %err, "Could not create backup of pricing document");
        }
    }
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn load(&self) -> PricingDocument {
        let _guard = self.lock.lock().await;
        self.read_document().await
    }

    async fn save(&self, document: &PricingDocument) -> StoreResult<()> {
        let _guard = self.lock.lock().await;
        self.write_document(document).await
    }

    async fn replace(&self, update: SubtreeUpdate) -> StoreResult<PricingDocument> {
        let _guard = self.lock.lock().await;
        let subtree = update.subtree();

        let mut raw = match self.read_raw().await? {
            Some(raw) => raw,
            None => default_raw()?,
        };
        raw.insert(subtree.key().to_string(), update.into_value()?);
        self.backfill_raw(&mut raw)?;
        self.write_document(&raw).await?;

        debug!(subtree = subtree.key(), "Replaced pricing document subtree");
        Ok(self.decode(raw))
    }
}

fn default_raw() -> StoreResult<RawDocument> {
    match serde_json::to_value(default_document())? {
        Value::Object(raw) => Ok(raw),
        _ => Ok(RawDocument::new()),
    }
}

async fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await
}

#[cfg(unix)]
async fn set_shared_permissions(path: &Path) -> StoreResult<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, std::fs::Permissions::from_mode(0o666))
        .await
        .map_err(|err| StoreError::io(path, err))
}

#[cfg(not(unix))]
async fn set_shared_permissions(_path: &Path) -> StoreResult<()> {
    Ok(())
}

fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}
