/*
 * texfrag-system-runtime
 * Copyright (c) 2025 Posit, PBC
 *
 * Runtime abstraction layer for texfrag filesystem operations.
 *
 * The publishing pipeline performs all of its I/O (folder creation, fragment
 * writes, manifest appends, image copies) through the `SystemRuntime` trait.
 *
 * - NativeRuntime: Full system access using std (default)
 */

mod native;
mod traits;

// Re-export core types (API surface)
pub use traits::{PathKind, RuntimeError, RuntimeResult, SystemRuntime};

// Re-export runtime implementations
pub use native::NativeRuntime;

/// Create a default runtime for the current platform.
pub fn default_runtime() -> NativeRuntime {
    NativeRuntime::new()
}
