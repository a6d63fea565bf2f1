//=====================================================
// File: modules/mod.rs
//=====================================================
// Author: Taylan Contributors
// License: MIT
// Goal: Persisted package registry consumed by non-stdlib imports
// Objective: Read taylan_packages/registry.json and distinguish a missing
//            registry from a module that was never installed
//=====================================================

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

const PACKAGES_DIR: &str = "taylan_packages";
const REGISTRY_FILE: &str = "registry.json";

#[derive(Debug)]
pub enum ModuleError {
    RegistryMissing,
    NotInstalled { module: String },
    Io { path: PathBuf, error: std::io::Error },
    Malformed { path: PathBuf, error: String },
}

impl fmt::Display for ModuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleError::RegistryMissing => {
                f.write_str("Paket kaydi yok. Once kurulum yap.")
            }
            ModuleError::NotInstalled { module } => {
                write!(f, "Modul kurulu degil: {module}")
            }
            ModuleError::Io { path, error } => {
                write!(f, "Paket kaydi okunamadi '{}': {error}", path.display())
            }
            ModuleError::Malformed { path, error } => {
                write!(f, "Paket kaydi bozuk '{}': {error}", path.display())
            }
        }
    }
}

impl std::error::Error for ModuleError {}

/// One installed module: where its sources were copied from, and whether the
/// installer finished. The installer that writes these entries lives outside
/// the interpreter; the core only reads them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryEntry {
    pub source: String,
    #[serde(default)]
    pub installed: bool,
}

#[derive(Debug, Clone, Default)]
pub struct PackageRegistry {
    entries: HashMap<String, RegistryEntry>,
}

pub fn registry_path(base_dir: &Path) -> PathBuf {
    base_dir.join(PACKAGES_DIR).join(REGISTRY_FILE)
}

impl PackageRegistry {
    /// Loads the registry document under `base_dir`. A missing document is a
    /// distinct failure from a present document without the requested name.
    pub fn load(base_dir: &Path) -> Result<Self, ModuleError> {
        let path = registry_path(base_dir);
        if !path.exists() {
            return Err(ModuleError::RegistryMissing);
        }
        let text = fs::read_to_string(&path).map_err(|error| ModuleError::Io {
            path: path.clone(),
            error,
        })?;
        let entries: HashMap<String, RegistryEntry> =
            serde_json::from_str(&text).map_err(|error| ModuleError::Malformed {
                path: path.clone(),
                error: error.to_string(),
            })?;
        debug!(path = %path.display(), modules = entries.len(), "paket kaydi okundu");
        Ok(Self { entries })
    }

    pub fn resolve(&self, name: &str) -> Result<&RegistryEntry, ModuleError> {
        self.entries
            .get(name)
            .ok_or_else(|| ModuleError::NotInstalled {
                module: name.to_string(),
            })
    }

    pub fn module_names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}
