//! Resource providers for the transform2pdf pipeline.
//!
//! - [`FilesystemResourceProvider`]: stylesheets and translation tables from a directory
//! - [`InMemoryResourceProvider`]: re-exported from `transform2pdf-traits`

mod filesystem;

pub use filesystem::FilesystemResourceProvider;

pub use transform2pdf_traits::InMemoryResourceProvider;
