//! Registry of the resource kinds a process serves

use crate::{CoreError, Result};
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::core::GroupVersionKind;
use kube::{CustomResourceExt, Resource};
use std::collections::BTreeMap;
use tanzu_api::{
    ClusterBootstrap, ClusterBootstrapTemplate, FeatureGate, KappControllerConfig, Lookup,
    OSImage, TanzuKubernetesRelease,
};
use tracing::debug;

/// Scheme maps group/version/kind keys to the kinds registered during
/// process bootstrap. It is built once and passed around explicitly.
#[derive(Clone, Debug, Default)]
pub struct Scheme {
    // Keyed by "group/version/Kind"
    kinds: BTreeMap<String, RegisteredKind>,
}

/// A kind known to the scheme
#[derive(Clone, Debug)]
pub struct RegisteredKind {
    pub gvk: GroupVersionKind,
    pub plural: String,
    pub namespaced: bool,
    pub crd: CustomResourceDefinition,
}

impl Scheme {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a custom resource kind
    pub fn register<K>(&mut self) -> Result<()>
    where
        K: Resource<DynamicType = ()> + CustomResourceExt,
    {
        let key = Self::key::<K>();
        if self.kinds.contains_key(&key) {
            return Err(CoreError::DuplicateKind(key));
        }

        let crd = K::crd();
        let kind = RegisteredKind {
            gvk: GroupVersionKind::gvk(&K::group(&()), &K::version(&()), &K::kind(&())),
            plural: K::plural(&()).into_owned(),
            namespaced: crd.spec.scope == "Namespaced",
            crd,
        };
        self.kinds.insert(key.clone(), kind);

        debug!("Registered kind: {}", key);
        Ok(())
    }

    pub fn is_registered<K: Resource<DynamicType = ()>>(&self) -> bool {
        self.kinds.contains_key(&Self::key::<K>())
    }

    /// Fail unless the kind was registered
    pub fn require<K: Resource<DynamicType = ()>>(&self) -> Result<&RegisteredKind> {
        let key = Self::key::<K>();
        self.kinds.get(&key).ok_or(CoreError::UnregisteredKind(key))
    }

    /// Registered keys in sorted order
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.kinds.keys().map(String::as_str)
    }

    /// CRDs of every registered kind, sorted by key
    pub fn crds(&self) -> impl Iterator<Item = &CustomResourceDefinition> {
        self.kinds.values().map(|k| &k.crd)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    fn key<K: Resource<DynamicType = ()>>() -> String {
        format!("{}/{}/{}", K::group(&()), K::version(&()), K::kind(&()))
    }
}

/// Scheme holding every Tanzu kind
pub fn build() -> Result<Scheme> {
    let mut scheme = Scheme::new();
    scheme.register::<Lookup>()?;
    scheme.register::<FeatureGate>()?;
    scheme.register::<ClusterBootstrap>()?;
    scheme.register::<ClusterBootstrapTemplate>()?;
    scheme.register::<TanzuKubernetesRelease>()?;
    scheme.register::<OSImage>()?;
    scheme.register::<KappControllerConfig>()?;
    Ok(scheme)
}
