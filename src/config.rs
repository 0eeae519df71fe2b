//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment variables.

use std::env;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CacheError, Result};

/// Default number of entries a cache holds.
pub const DEFAULT_CAPACITY: usize = 1000;

// == Set Policy ==
/// How `set` treats a key that is already cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetPolicy {
    /// Always append a new tail entry; duplicates of a key may coexist.
    #[default]
    Append,
    /// Drop the existing entry for the key and insert the new one at the front.
    Replace,
}

impl FromStr for SetPolicy {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "append" => Ok(SetPolicy::Append),
            "replace" => Ok(SetPolicy::Replace),
            other => Err(CacheError::InvalidConfig(format!(
                "unknown set policy '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for SetPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetPolicy::Append => write!(f, "append"),
            SetPolicy::Replace => write!(f, "replace"),
        }
    }
}

// == Shrink Policy ==
/// When a lowered capacity takes effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShrinkPolicy {
    /// Trim on the next `set`.
    #[default]
    Deferred,
    /// Trim tail entries as soon as the capacity is lowered.
    Immediate,
}

impl FromStr for ShrinkPolicy {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deferred" => Ok(ShrinkPolicy::Deferred),
            "immediate" => Ok(ShrinkPolicy::Immediate),
            other => Err(CacheError::InvalidConfig(format!(
                "unknown shrink policy '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for ShrinkPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShrinkPolicy::Deferred => write!(f, "deferred"),
            ShrinkPolicy::Immediate => write!(f, "immediate"),
        }
    }
}

// == Cache Config ==
/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
    /// Behavior of `set` for an already cached key
    pub set_policy: SetPolicy,
    /// Behavior of `set_capacity` when lowering the bound
    pub shrink_policy: ShrinkPolicy,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// Absent or unparseable values fall back to the defaults.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 1000)
    /// - `CACHE_SET_POLICY` - `append` or `replace` (default: append)
    /// - `CACHE_SHRINK_POLICY` - `deferred` or `immediate` (default: deferred)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Like [`CacheConfig::from_env`], but reports the first bad value.
    pub fn try_from_env() -> Result<Self> {
        Self::try_from_lookup(|name| env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            capacity: lookup("CACHE_CAPACITY")
                .and_then(|v| v.trim().parse().ok())
                .filter(|&n: &usize| n > 0)
                .unwrap_or(defaults.capacity),
            set_policy: lookup("CACHE_SET_POLICY")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.set_policy),
            shrink_policy: lookup("CACHE_SHRINK_POLICY")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.shrink_policy),
        }
    }

    /// Strict variant of [`CacheConfig::from_lookup`].
    pub fn try_from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("CACHE_CAPACITY") {
            let capacity: usize = raw.trim().parse().map_err(|_| {
                CacheError::InvalidConfig(format!("CACHE_CAPACITY={}", raw))
            })?;
            if capacity == 0 {
                return Err(CacheError::InvalidCapacity(capacity));
            }
            config.capacity = capacity;
        }
        if let Some(raw) = lookup("CACHE_SET_POLICY") {
            config.set_policy = raw.parse()?;
        }
        if let Some(raw) = lookup("CACHE_SHRINK_POLICY") {
            config.shrink_policy = raw.parse()?;
        }

        Ok(config)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            set_policy: SetPolicy::Append,
            shrink_policy: ShrinkPolicy::Deferred,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.capacity, 1000);
        assert_eq!(config.set_policy, SetPolicy::Append);
        assert_eq!(config.shrink_policy, ShrinkPolicy::Deferred);
    }

    #[test]
    fn test_config_lookup_defaults() {
        let config = CacheConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, CacheConfig::default());
    }

    #[test]
    fn test_config_lookup_values() {
        let config = CacheConfig::from_lookup(lookup_from(&[
            ("CACHE_CAPACITY", "16"),
            ("CACHE_SET_POLICY", "Replace"),
            ("CACHE_SHRINK_POLICY", " immediate "),
        ]));
        assert_eq!(config.capacity, 16);
        assert_eq!(config.set_policy, SetPolicy::Replace);
        assert_eq!(config.shrink_policy, ShrinkPolicy::Immediate);
    }

    #[test]
    fn test_config_lookup_falls_back_on_garbage() {
        let config = CacheConfig::from_lookup(lookup_from(&[
            ("CACHE_CAPACITY", "0"),
            ("CACHE_SET_POLICY", "sometimes"),
        ]));
        assert_eq!(config, CacheConfig::default());
    }

    #[test]
    fn test_config_strict_lookup_rejects_garbage() {
        let err = CacheConfig::try_from_lookup(lookup_from(&[("CACHE_CAPACITY", "lots")]))
            .unwrap_err();
        assert_eq!(err, CacheError::InvalidConfig("CACHE_CAPACITY=lots".to_string()));

        let err = CacheConfig::try_from_lookup(lookup_from(&[("CACHE_CAPACITY", "0")]))
            .unwrap_err();
        assert_eq!(err, CacheError::InvalidCapacity(0));

        let err = CacheConfig::try_from_lookup(lookup_from(&[("CACHE_SHRINK_POLICY", "later")]))
            .unwrap_err();
        assert!(matches!(err, CacheError::InvalidConfig(_)));
    }

    #[test]
    fn test_policy_display_round_trips_through_from_str() {
        for policy in [SetPolicy::Append, SetPolicy::Replace] {
            assert_eq!(policy.to_string().parse::<SetPolicy>().unwrap(), policy);
        }
        for policy in [ShrinkPolicy::Deferred, ShrinkPolicy::Immediate] {
            assert_eq!(policy.to_string().parse::<ShrinkPolicy>().unwrap(), policy);
        }
    }
}
