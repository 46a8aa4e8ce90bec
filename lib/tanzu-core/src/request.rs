//! Reconcile requests
use std::fmt;

use kube::Resource;
use kube_runtime::reflector::ObjectRef;

/// Identity of a primary resource to re-evaluate
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReconcileRequest {
    pub namespace: String,
    pub name: String,
}

impl ReconcileRequest {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Identity of an object. Cluster scoped objects get an empty namespace
    pub fn from_resource<K: Resource>(obj: &K) -> Self {
        let meta = obj.meta();
        Self {
            namespace: meta.namespace.clone().unwrap_or_default(),
            name: meta.name.clone().unwrap_or_default(),
        }
    }

    pub fn to_object_ref<K>(&self) -> ObjectRef<K>
    where
        K: Resource,
        K::DynamicType: Default,
    {
        let object_ref = ObjectRef::new(&self.name);
        if self.namespace.is_empty() {
            object_ref
        } else {
            object_ref.within(&self.namespace)
        }
    }
}

impl<K: Resource> From<&ObjectRef<K>> for ReconcileRequest {
    fn from(object_ref: &ObjectRef<K>) -> Self {
        Self {
            namespace: object_ref.namespace.clone().unwrap_or_default(),
            name: object_ref.name.clone(),
        }
    }
}

impl fmt::Display for ReconcileRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}
