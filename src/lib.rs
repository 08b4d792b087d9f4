//! Crosswalk application manifest management
//!
//! This crate implements the manifest layer of the Crosswalk hybrid-app
//! packaging pipeline: loading and validating the JSON manifest that
//! describes an application, mutating the handful of fields that stay
//! settable after load, and creating fresh manifests for new projects.

pub mod diagnostics;
pub mod manifest;
pub mod package_id;
pub mod platforms;

pub use diagnostics::{ConsoleDiagnostics, Diagnostic, Diagnostics, RecordingDiagnostics, Severity};
pub use manifest::factory::CreateError;
pub use manifest::fields::DisplayMode;
pub use manifest::store::StoreError;
pub use manifest::{Manifest, ManifestError, PropertyError};
pub use platforms::{PlatformInfo, PlatformManager};
