//! Controller configuration loaded from environment variables

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const CONTROL_NAMESPACE_ENV: &str = "LOOKUP_CONTROL_NAMESPACE";
pub const FEATURE_NAME_ENV: &str = "LOOKUP_FEATURE_NAME";
pub const LOOKUP_TIMEOUT_ENV: &str = "LOOKUP_LOOKUP_TIMEOUT_SECS";
pub const ERROR_REQUEUE_ENV: &str = "LOOKUP_ERROR_REQUEUE_SECS";
pub const CONCURRENCY_ENV: &str = "LOOKUP_CONCURRENCY";
pub const PROBE_ADDR_ENV: &str = "LOOKUP_PROBE_ADDR";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {variable}: {reason}")]
    InvalidValue {
        variable: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Namespace whose FeatureGate decides whether the feature is active
    pub control_namespace: String,
    /// Feature gating reconciliation
    pub feature_name: String,
    /// Upper bound on a single feature lookup
    pub lookup_timeout: Duration,
    /// Requeue delay after a failed reconcile
    pub error_requeue: Duration,
    /// Maximum concurrent reconciles
    pub concurrency: u16,
    /// Address of the health and readiness probe server
    pub probe_addr: SocketAddr,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            control_namespace: "tkg-system".to_string(),
            feature_name: "tinycache".to_string(),
            lookup_timeout: Duration::from_secs(10),
            error_requeue: Duration::from_secs(60),
            concurrency: 4,
            probe_addr: ([0, 0, 0, 0], 8081).into(),
        }
    }
}

impl ControllerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup, falling back to defaults for
    /// missing or empty keys
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let concurrency = match get(CONCURRENCY_ENV) {
            Some(value) => parse::<u16>(CONCURRENCY_ENV, &value)?,
            None => defaults.concurrency,
        };
        if concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                variable: CONCURRENCY_ENV,
                value: "0".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            control_namespace: get(CONTROL_NAMESPACE_ENV).unwrap_or(defaults.control_namespace),
            feature_name: get(FEATURE_NAME_ENV).unwrap_or(defaults.feature_name),
            lookup_timeout: match get(LOOKUP_TIMEOUT_ENV) {
                Some(value) => Duration::from_secs(parse(LOOKUP_TIMEOUT_ENV, &value)?),
                None => defaults.lookup_timeout,
            },
            error_requeue: match get(ERROR_REQUEUE_ENV) {
                Some(value) => Duration::from_secs(parse(ERROR_REQUEUE_ENV, &value)?),
                None => defaults.error_requeue,
            },
            concurrency,
            probe_addr: match get(PROBE_ADDR_ENV) {
                Some(value) => parse(PROBE_ADDR_ENV, &value)?,
                None => defaults.probe_addr,
            },
        })
    }
}

fn parse<T>(variable: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        variable,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
