//! ivyc-modules - the Module & Stdlib Registry (§4.3).
//!
//! Resolves `import` directives to either a named bundled module (opaque
//! target-text payload + required headers) or a user-provided module file,
//! deferred to an injected [`FileReader`]. Translating a resolved user
//! module's AST into text is `ivyc-trans`'s job, not this crate's -- the
//! registry only resolves and parses, it never emits.

pub mod bundled;
pub mod registry;

pub use bundled::BundledModule;
pub use registry::{FileReader, ModuleRegistry, ResolvedImport};
