//! A scripted in-memory mirror backend.

use jdi_mirror::{Method, MirrorError, ReferenceType, VirtualMachine};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::trace;

/// How a scripted type answers its `visible_methods` query.
#[derive(Debug, Clone)]
pub enum MethodsScript {
    /// The query succeeds with these methods, in order.
    Methods(Vec<MethodScript>),
    /// The query raises with this message.
    Raise(String),
}

impl MethodsScript {
    /// A query that succeeds with an empty method list.
    pub fn empty() -> Self {
        MethodsScript::Methods(vec![])
    }
}

/// A scripted method mirror.
#[derive(Debug, Clone)]
pub struct MethodScript {
    name: String,
    declaring: Option<String>,
}

impl MethodScript {
    /// A method whose declaring type resolves to the given name.
    pub fn new(name: impl Into<String>, declaring: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declaring: Some(declaring.into()),
        }
    }

    /// A method whose declaring type fails to resolve.
    pub fn undeclared(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declaring: None,
        }
    }
}

impl Method for MethodScript {
    type Type = ScriptedType;

    fn name(&self) -> &str {
        &self.name
    }

    async fn declaring_type(&self) -> Result<ScriptedType, MirrorError> {
        match &self.declaring {
            Some(name) => Ok(ScriptedType {
                name: name.clone(),
                methods: MethodsScript::empty(),
            }),
            None => Err(MirrorError::ObjectCollected),
        }
    }
}

/// A scripted reference type mirror.
#[derive(Debug, Clone)]
pub struct ScriptedType {
    name: String,
    methods: MethodsScript,
}

impl ReferenceType for ScriptedType {
    type Method = MethodScript;

    fn name(&self) -> &str {
        &self.name
    }

    async fn visible_methods(&self) -> Result<Vec<MethodScript>, MirrorError> {
        match &self.methods {
            MethodsScript::Methods(methods) => Ok(methods.clone()),
            MethodsScript::Raise(message) => Err(MirrorError::Query(message.clone())),
        }
    }
}

/// A scripted virtual machine mirror.
///
/// Cheaply cloneable; clones share the class table and the operation
/// counters, so a test can keep a handle and assert how the runner drove
/// the backend.
#[derive(Debug, Clone, Default)]
pub struct ScriptedVm {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    classes: Mutex<HashMap<String, MethodsScript>>,
    lookups: AtomicUsize,
    resumes: AtomicUsize,
}

impl ScriptedVm {
    /// Defines a loaded class and how it answers its method query.
    pub fn define_class(&self, name: impl Into<String>, methods: MethodsScript) -> &Self {
        self.inner
            .classes
            .lock()
            .expect("class table poisoned")
            .insert(name.into(), methods);
        self
    }

    /// How many class lookups this VM has served.
    pub fn lookup_count(&self) -> usize {
        self.inner.lookups.load(Ordering::SeqCst)
    }

    /// How many times this VM has been resumed.
    pub fn resume_count(&self) -> usize {
        self.inner.resumes.load(Ordering::SeqCst)
    }
}

impl VirtualMachine for ScriptedVm {
    type Type = ScriptedType;
    type Method = MethodScript;

    async fn resume(&self) -> Result<(), MirrorError> {
        self.inner.resumes.fetch_add(1, Ordering::SeqCst);
        trace!("scripted vm resumed");
        Ok(())
    }

    async fn class_by_name(&self, name: &str) -> Result<Option<ScriptedType>, MirrorError> {
        self.inner.lookups.fetch_add(1, Ordering::SeqCst);
        let classes = self.inner.classes.lock().expect("class table poisoned");
        Ok(classes.get(name).map(|methods| ScriptedType {
            name: name.to_owned(),
            methods: methods.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test(tokio::test)]
    async fn lookups_are_counted_and_missing_classes_are_none() {
        let vm = ScriptedVm::default();
        vm.define_class("tck.Known", MethodsScript::empty());

        assert!(vm.class_by_name("tck.Known").await.unwrap().is_some());
        assert!(vm.class_by_name("tck.Unknown").await.unwrap().is_none());
        assert_eq!(vm.lookup_count(), 2);
    }

    #[test_log::test(tokio::test)]
    async fn scripted_raise_surfaces_as_query_error() {
        let vm = ScriptedVm::default();
        vm.define_class(
            "tck.Raising",
            MethodsScript::Raise("ObjectCollectedException".into()),
        );

        let class = vm.class_by_name("tck.Raising").await.unwrap().unwrap();
        let err = class.visible_methods().await.unwrap_err();
        assert!(matches!(err, MirrorError::Query(_)));
    }

    #[test_log::test(tokio::test)]
    async fn undeclared_methods_fail_declaring_type_resolution() {
        let method = MethodScript::undeclared("foo");
        assert!(method.declaring_type().await.is_err());

        let method = MethodScript::new("foo", "tck.Bar");
        let declaring = method.declaring_type().await.unwrap();
        assert_eq!(declaring.name(), "tck.Bar");
    }
}
