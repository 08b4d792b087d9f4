//! Application manifest: load, validate, access, mutate
//!
//! The manifest is the JSON descriptor driving the packaging pipeline. A
//! `Manifest` is constructed by reading the document at a path and running
//! every recognized field through its validation rule; the result is a typed,
//! read-only view. Three fields stay settable after load (`name`,
//! `short_name`, `target_platforms`); every set re-validates its value and
//! re-persists through the merge-write store, so unrecognized keys in the
//! document survive untouched.
//!
//! Recoverable rule violations are reported to the diagnostics sink and
//! leave the field absent. The one exception is the package ID: a manifest
//! without a valid package ID cannot drive a build, a signing step, or an
//! update channel, so construction aborts.

pub mod factory;
pub mod fields;
pub mod store;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::diagnostics::Diagnostics;
use crate::package_id;
use crate::platforms::PlatformManager;

use fields::{DisplayMode, FieldState};
use store::StoreError;

/// On-disk key for the application version
pub const KEY_APP_VERSION: &str = "crosswalk_app_version";
/// On-disk key for the application name
pub const KEY_NAME: &str = "name";
/// On-disk key for the short application name
pub const KEY_SHORT_NAME: &str = "short_name";
/// On-disk key for the display mode
pub const KEY_DISPLAY: &str = "display";
/// On-disk key for the start URL
pub const KEY_START_URL: &str = "start_url";
/// On-disk key for the package identifier
pub const KEY_PACKAGE_ID: &str = "crosswalk_package_id";
/// On-disk key for the target platforms
pub const KEY_TARGET_PLATFORMS: &str = "crosswalk_target_platforms";
/// On-disk key for the Android animatable-view flag
pub const KEY_ANDROID_ANIMATABLE_VIEW: &str = "crosswalk_android_animatable_view";
/// On-disk key for the Android keep-screen-on flag
pub const KEY_ANDROID_KEEP_SCREEN_ON: &str = "crosswalk_android_keep_screen_on";
/// On-disk key for the Windows update identifier
pub const KEY_WINDOWS_UPDATE_ID: &str = "crosswalk_windows_update_id";
/// On-disk key for the Windows vendor name
pub const KEY_WINDOWS_VENDOR: &str = "crosswalk_windows_vendor";

/// Fatal configuration errors at load time
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("Failed to load manifest: {0}")]
    Document(#[from] StoreError),

    #[error("Missing or invalid package ID in manifest")]
    MissingPackageId,

    #[error("Package ID '{0}' in manifest was rejected")]
    InvalidPackageId(String),
}

/// Validation failures from the settable properties.
///
/// Distinct from [`ManifestError`]: a rejected set leaves both the in-memory
/// view and the backing document untouched.
#[derive(Debug, thiserror::Error)]
pub enum PropertyError {
    #[error("Value for '{field}' must be a string")]
    NotAString { field: &'static str },

    #[error("'{value}' is not a loadable target platform")]
    UnknownPlatform { value: String },
}

/// Validated view of a manifest document
pub struct Manifest {
    path: PathBuf,
    sink: Arc<dyn Diagnostics>,
    platforms: PlatformManager,
    app_version: Option<String>,
    name: Option<String>,
    short_name: Option<String>,
    display: DisplayMode,
    start_url: Option<String>,
    package_id: String,
    target_platforms: Option<String>,
    android_animatable_view: bool,
    android_keep_screen_on: bool,
    windows_update_id: Option<String>,
    windows_vendor: Option<String>,
}

impl Manifest {
    /// Load and validate the manifest at `path`.
    ///
    /// Every field rule runs even when earlier rules reject their value;
    /// findings go to `sink`. Only an unreadable document or a missing or
    /// invalid package ID aborts the load.
    pub fn load(
        path: impl Into<PathBuf>,
        sink: Arc<dyn Diagnostics>,
        platforms: PlatformManager,
    ) -> Result<Self, ManifestError> {
        let path = path.into();
        let document = store::read_document(&path)?;

        // App version: a rejected value warns, and having no accepted
        // version at all is an error either way (non-fatal)
        let raw_version = document.get(KEY_APP_VERSION);
        let version_state = fields::version(raw_version);
        if let (FieldState::Invalid, Some(raw)) = (&version_state, raw_version) {
            sink.warning(&format!(
                "Invalid application version '{}' in the manifest",
                value_text(raw)
            ));
        }
        let app_version = version_state.into_valid();
        if app_version.is_none() {
            sink.error("Missing or invalid 'crosswalk_app_version' in the manifest");
        }

        let name = fields::non_empty_string(document.get(KEY_NAME)).into_valid();
        if name.is_none() {
            sink.warning("Missing or invalid 'name' in the manifest");
        }

        let short_name = fields::non_empty_string(document.get(KEY_SHORT_NAME)).into_valid();

        // Display defaults silently when absent; only a present but
        // unrecognized value warns
        let raw_display = document.get(KEY_DISPLAY);
        let display_state = fields::display(raw_display);
        if let (FieldState::Invalid, Some(raw)) = (&display_state, raw_display) {
            sink.warning(&format!(
                "Unknown display mode '{}' in the manifest, using '{}'",
                value_text(raw),
                DisplayMode::default().as_str()
            ));
        }
        let display = display_state.into_valid().unwrap_or_default();

        let start_url = fields::string(document.get(KEY_START_URL)).into_valid();

        // The fatal field: everything downstream needs the package ID
        let package_id = match fields::non_empty_string(document.get(KEY_PACKAGE_ID)) {
            FieldState::Valid(id) if package_id::validate(&id, sink.as_ref()) => id,
            FieldState::Valid(id) => return Err(ManifestError::InvalidPackageId(id)),
            _ => {
                sink.error("Missing or invalid package ID in the manifest");
                return Err(ManifestError::MissingPackageId);
            }
        };

        let target_platforms =
            fields::non_empty_string(document.get(KEY_TARGET_PLATFORMS)).into_valid();
        if target_platforms.is_none() {
            sink.error("Missing or invalid 'crosswalk_target_platforms' in the manifest");
        }

        let android_animatable_view = fields::flag(document.get(KEY_ANDROID_ANIMATABLE_VIEW));
        let android_keep_screen_on = fields::flag(document.get(KEY_ANDROID_KEEP_SCREEN_ON));

        let raw_update_id = document.get(KEY_WINDOWS_UPDATE_ID);
        let update_state = fields::update_id(raw_update_id);
        if let (FieldState::Invalid, Some(raw)) = (&update_state, raw_update_id) {
            sink.error(&format!(
                "Invalid Windows update ID '{}' in the manifest",
                value_text(raw)
            ));
        }
        let windows_update_id = update_state.into_valid();

        let raw_vendor = document.get(KEY_WINDOWS_VENDOR);
        let vendor_state = fields::string(raw_vendor);
        if let (FieldState::Invalid, Some(raw)) = (&vendor_state, raw_vendor) {
            sink.error(&format!(
                "Invalid Windows vendor '{}' in the manifest",
                value_text(raw)
            ));
        }
        let windows_vendor = vendor_state.into_valid();

        Ok(Self {
            path,
            sink,
            platforms,
            app_version,
            name,
            short_name,
            display,
            start_url,
            package_id,
            target_platforms,
            android_animatable_view,
            android_keep_screen_on,
            windows_update_id,
            windows_vendor,
        })
    }

    /// Path of the backing document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Validated application version, if one was accepted
    pub fn app_version(&self) -> Option<&str> {
        self.app_version.as_deref()
    }

    /// Application name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Short application name
    pub fn short_name(&self) -> Option<&str> {
        self.short_name.as_deref()
    }

    /// Display mode; always one of the recognized modes
    pub fn display(&self) -> DisplayMode {
        self.display
    }

    /// Start URL, if present
    pub fn start_url(&self) -> Option<&str> {
        self.start_url.as_deref()
    }

    /// Package identifier; always present on a loaded manifest
    pub fn package_id(&self) -> &str {
        &self.package_id
    }

    /// Target platforms string, if present
    pub fn target_platforms(&self) -> Option<&str> {
        self.target_platforms.as_deref()
    }

    /// Android animatable-view flag
    pub fn android_animatable_view(&self) -> bool {
        self.android_animatable_view
    }

    /// Android keep-screen-on flag
    pub fn android_keep_screen_on(&self) -> bool {
        self.android_keep_screen_on
    }

    /// Windows update identifier, if a valid one is present
    pub fn windows_update_id(&self) -> Option<&str> {
        self.windows_update_id.as_deref()
    }

    /// Windows vendor name, if present
    pub fn windows_vendor(&self) -> Option<&str> {
        self.windows_vendor.as_deref()
    }

    /// Overlay `patch` onto the backing document and write it back.
    ///
    /// The document is re-read from disk first, so keys this instance never
    /// modeled are preserved. Read, parse, or write failures are reported to
    /// the sink and surfaced as `false`; `true` means the merged document is
    /// on disk.
    pub fn update(&self, patch: &Map<String, Value>) -> bool {
        match store::persist_partial(&self.path, patch) {
            Ok(()) => true,
            Err(err) => {
                self.sink.error(&format!(
                    "Failed to update manifest at {}: {}",
                    self.path.display(),
                    err
                ));
                false
            }
        }
    }

    /// Set the application name and persist it.
    ///
    /// The new value must be a JSON string; anything else is reported and
    /// rejected without touching state.
    pub fn set_name(&mut self, value: Value) -> Result<(), PropertyError> {
        let name = self.expect_string(KEY_NAME, value)?;
        self.name = Some(name.clone());
        self.update(&single_patch(KEY_NAME, Value::String(name)));
        Ok(())
    }

    /// Set the short application name and persist it.
    pub fn set_short_name(&mut self, value: Value) -> Result<(), PropertyError> {
        let short_name = self.expect_string(KEY_SHORT_NAME, value)?;
        self.short_name = Some(short_name.clone());
        self.update(&single_patch(KEY_SHORT_NAME, Value::String(short_name)));
        Ok(())
    }

    /// Set the target platforms and persist them.
    ///
    /// Unlike at load time, the value is re-validated against the platform
    /// registry; a string that does not name a loadable platform is rejected.
    pub fn set_target_platforms(&mut self, value: Value) -> Result<(), PropertyError> {
        let spec = self.expect_string(KEY_TARGET_PLATFORMS, value)?;
        if !self.platforms.load(&spec) {
            self.sink
                .error(&format!("'{}' is not a loadable target platform", spec));
            return Err(PropertyError::UnknownPlatform { value: spec });
        }

        self.target_platforms = Some(spec.clone());
        self.update(&single_patch(KEY_TARGET_PLATFORMS, Value::String(spec)));
        Ok(())
    }

    fn expect_string(&self, field: &'static str, value: Value) -> Result<String, PropertyError> {
        match value {
            Value::String(s) => Ok(s),
            other => {
                self.sink.error(&format!(
                    "Value for '{}' must be a string, got {}",
                    field, other
                ));
                Err(PropertyError::NotAString { field })
            }
        }
    }
}

/// Render a raw JSON value for a diagnostic message
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn single_patch(key: &str, value: Value) -> Map<String, Value> {
    let mut patch = Map::new();
    patch.insert(key.to_string(), value);
    patch
}
