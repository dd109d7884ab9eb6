//! # `jdi-mirror`
//!
//! Backend-agnostic mirror traits over a JDI-like debug interface.
//!
//! A *mirror* is a proxy used by a debugger to examine an entity in another
//! virtual machine. This crate only defines the capability set a conformance
//! runner needs (type lookup, visible-method enumeration, and declaring-type
//! resolution) so that any conforming debug backend can be substituted.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub use error::MirrorError;

mod error;

use std::fmt::Debug;

/// A virtual machine targeted by the debugger.
///
/// The target is usually another process, reached over some debug-interface
/// transport; implementations own whatever connection state that requires.
pub trait VirtualMachine: Debug + 'static {
    /// The reference type mirror handed out by this virtual machine.
    type Type: ReferenceType<Method = Self::Method>;
    /// The method mirror handed out by this virtual machine.
    type Method: Method<Type = Self::Type>;

    /// Resumes execution of the application running in the target VM.
    #[expect(async_fn_in_trait)]
    async fn resume(&self) -> Result<(), MirrorError>;

    /// Looks up a loaded reference type by its fully qualified name.
    ///
    /// Returns `None` when no type of that name is loaded in the target VM.
    #[expect(async_fn_in_trait)]
    async fn class_by_name(&self, name: &str) -> Result<Option<Self::Type>, MirrorError>;
}

/// The type of an object in a target VM.
pub trait ReferenceType: Debug {
    /// The method mirror for methods of this type.
    type Method;

    /// The fully qualified name of this type.
    fn name(&self) -> &str;

    /// Gets the methods of this type that are visible as callable, in the
    /// order the target VM reports them.
    #[expect(async_fn_in_trait)]
    async fn visible_methods(&self) -> Result<Vec<Self::Method>, MirrorError>;
}

/// A method of a reference type in a target VM.
pub trait Method: Debug {
    /// The reference type mirror for this method's declaring type.
    type Type;

    /// The name of this method.
    fn name(&self) -> &str;

    /// Resolves the type which declared this method.
    ///
    /// Resolution can fail, for instance when the declaring type has been
    /// unloaded or collected in the target VM.
    #[expect(async_fn_in_trait)]
    async fn declaring_type(&self) -> Result<Self::Type, MirrorError>;
}
