//! partline: single-package entry point.
//! All components are embedded as local modules under `src/`.

pub mod prelude;

#[path = "common/lib.rs"]
pub mod common;
#[path = "errors/lib.rs"]
pub mod errors;
#[path = "processor/lib.rs"]
pub mod processor;
