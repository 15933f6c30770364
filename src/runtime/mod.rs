//! Python runtime discovery, version parsing, and the command toolchain.

pub mod probe;
pub mod toolchain;
pub mod version;

pub use probe::{locate_interpreter, RuntimeInfo, DEFAULT_CANDIDATES};
pub use toolchain::PythonToolchain;
pub use version::RuntimeVersion;
