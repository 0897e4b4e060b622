use log::warn;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::address_codec::CryptoAlgorithm;
use crate::binary::DEFAULT_MAX_NESTING_DEPTH;
use crate::codec::DecodeOptions;
use crate::error::{CodecError, Result};

pub static GLOBAL_CONFIG: Lazy<Config> = Lazy::new(Config::new);

const KEY_ALGORITHM_KEY: &str = "XRPL_KEY_ALGORITHM";
const MAX_NESTING_DEPTH_KEY: &str = "XRPL_MAX_NESTING_DEPTH";
const NETWORK_ID_KEY: &str = "XRPL_NETWORK_ID";

/// Shape of a configuration file
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    keys: KeysSection,
    #[serde(default)]
    codec: CodecSection,
    #[serde(default)]
    network: NetworkSection,
}

#[derive(Debug, Default, Deserialize)]
struct KeysSection {
    algorithm: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct CodecSection {
    max_nesting_depth: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct NetworkSection {
    network_id: Option<u32>,
}

pub struct Config {
    inner: RwLock<HashMap<String, String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Settings from `XRPL_*` environment variables
    pub fn new() -> Config {
        let mut map = HashMap::new();
        for key in [KEY_ALGORITHM_KEY, MAX_NESTING_DEPTH_KEY, NETWORK_ID_KEY] {
            if let Ok(value) = env::var(key) {
                map.insert(String::from(key), value);
            }
        }
        Config {
            inner: RwLock::new(map),
        }
    }

    // Writers only insert whole entries, so a poisoned map is still consistent
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, String>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, String>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Merge a TOML file over the current settings. Every value is checked
    /// before any is applied, so a rejected file leaves the settings as they were.
    pub fn load_file(&self, path: &Path) -> Result<()> {
        let contents = fs::read_to_string(path)?;
        let file: ConfigFile = toml::from_str(&contents)?;

        let algorithm = file
            .keys
            .algorithm
            .as_deref()
            .map(str::parse::<CryptoAlgorithm>)
            .transpose()?;
        if file.codec.max_nesting_depth == Some(0) {
            return Err(CodecError::Config(
                "max_nesting_depth must be at least 1".to_string(),
            ));
        }

        let mut inner = self.write();
        if let Some(algorithm) = algorithm {
            inner.insert(String::from(KEY_ALGORITHM_KEY), algorithm.to_string());
        }
        if let Some(depth) = file.codec.max_nesting_depth {
            inner.insert(String::from(MAX_NESTING_DEPTH_KEY), depth.to_string());
        }
        if let Some(network_id) = file.network.network_id {
            inner.insert(String::from(NETWORK_ID_KEY), network_id.to_string());
        }
        Ok(())
    }

    /// Algorithm for newly generated seeds; ED25519 unless configured
    pub fn get_key_algorithm(&self) -> CryptoAlgorithm {
        match self.read().get(KEY_ALGORITHM_KEY) {
            Some(value) => value.parse().unwrap_or_else(|_| {
                warn!("Ignoring unknown key algorithm `{value}`, using ed25519");
                CryptoAlgorithm::Ed25519
            }),
            None => CryptoAlgorithm::Ed25519,
        }
    }

    pub fn get_max_nesting_depth(&self) -> usize {
        match self.read().get(MAX_NESTING_DEPTH_KEY) {
            Some(value) => match value.parse::<usize>() {
                Ok(depth) if depth > 0 => depth,
                _ => {
                    warn!("Ignoring invalid nesting depth `{value}`");
                    DEFAULT_MAX_NESTING_DEPTH
                }
            },
            None => DEFAULT_MAX_NESTING_DEPTH,
        }
    }

    pub fn set_max_nesting_depth(&self, depth: usize) {
        self.write()
            .insert(String::from(MAX_NESTING_DEPTH_KEY), depth.to_string());
    }

    pub fn get_network_id(&self) -> Option<u32> {
        let inner = self.read();
        let value = inner.get(NETWORK_ID_KEY)?;
        match value.parse::<u32>() {
            Ok(id) => Some(id),
            Err(_) => {
                warn!("Ignoring invalid network id `{value}`");
                None
            }
        }
    }

    pub fn set_network_id(&self, network_id: u32) {
        self.write()
            .insert(String::from(NETWORK_ID_KEY), network_id.to_string());
    }

    pub fn decode_options(&self, symbolic_names: bool) -> DecodeOptions {
        DecodeOptions {
            max_nesting_depth: self.get_max_nesting_depth(),
            symbolic_names,
        }
    }
}
