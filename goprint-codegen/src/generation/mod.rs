//! Header text, import handling and topic collection for generated files.
//!
//! - [`ImportSpec`] / [`dedup_imports`] - Import rendering and deduplication
//! - [`write_package_header`], [`write_import_header`], [`write_build_header`] - Fixed headers
//! - [`Topics`] - Shared declarations emitted ahead of generated bodies

mod headers;
mod imports;
mod topics;

pub use headers::{
    GENERATED_MARKER, write_build_header, write_import_header, write_package_header,
};
pub use imports::{ImportSpec, RUNTIME_IMPORT, TEST_BUILD_TAG, TEST_IMPORTS, dedup_imports};
pub use topics::Topics;
