//! First-use manifest creation
//!
//! Synthesizes a brand-new manifest document for a package identifier:
//! derived names, fixed defaults, the registry's default target platform,
//! and a freshly generated Windows update identifier. The document is
//! written as new file content, never merged with anything already on disk.

use std::path::Path;

use serde_json::{json, Map};

use crate::diagnostics::Diagnostics;
use crate::package_id;
use crate::platforms::PlatformManager;

use super::fields::{DisplayMode, UPDATE_ID_GROUP_LENGTHS};
use super::store::{self, StoreError};
use super::{
    KEY_ANDROID_ANIMATABLE_VIEW, KEY_ANDROID_KEEP_SCREEN_ON, KEY_APP_VERSION, KEY_DISPLAY,
    KEY_NAME, KEY_PACKAGE_ID, KEY_SHORT_NAME, KEY_START_URL, KEY_TARGET_PLATFORMS,
    KEY_WINDOWS_UPDATE_ID, KEY_WINDOWS_VENDOR,
};

/// Version given to brand-new manifests
const DEFAULT_APP_VERSION: &str = "1";

/// Entry point given to brand-new manifests
const DEFAULT_START_URL: &str = "index.html";

/// Vendor placeholder, meant to be replaced before store submission
const DEFAULT_WINDOWS_VENDOR: &str = "Vendor";

/// Errors from creating a new manifest
#[derive(Debug, thiserror::Error)]
pub enum CreateError {
    #[error("Package ID '{0}' was rejected")]
    InvalidPackageId(String),

    #[error("No platform backend is available to target")]
    NoDefaultPlatform,

    #[error("Failed to write manifest: {0}")]
    Store(#[from] StoreError),
}

/// Generate a Windows update identifier.
///
/// Concatenates pseudo-random draws until at least 32 decimal digits are on
/// hand, then slices them into the {8,4,4,4,12} hyphenated groups the loader
/// validates. Everything this produces, the loader accepts.
pub fn generate_update_id() -> String {
    let mut digits = String::new();
    while digits.len() < 32 {
        digits.push_str(&rand::random::<u32>().to_string());
    }

    let mut id = String::with_capacity(36);
    let mut offset = 0;
    for (i, len) in UPDATE_ID_GROUP_LENGTHS.iter().enumerate() {
        if i > 0 {
            id.push('-');
        }
        id.push_str(&digits[offset..offset + len]);
        offset += len;
    }
    id
}

/// Write a brand-new manifest for `package_id` at `path`.
///
/// The package identifier is validated with the same rules the loader
/// applies, so a created document always loads cleanly. Overwrites any
/// existing file at `path`.
pub fn create(
    path: &Path,
    package_id: &str,
    platforms: &PlatformManager,
    sink: &dyn Diagnostics,
) -> Result<(), CreateError> {
    if !package_id::validate(package_id, sink) {
        return Err(CreateError::InvalidPackageId(package_id.to_string()));
    }

    let default_platform = platforms
        .default_platform()
        .ok_or(CreateError::NoDefaultPlatform)?;

    // Short name is the last dot-delimited segment of the package ID
    let short_name = package_id.rsplit('.').next().unwrap_or(package_id);

    let mut document = Map::new();
    document.insert(KEY_NAME.to_string(), json!(package_id));
    document.insert(KEY_SHORT_NAME.to_string(), json!(short_name));
    document.insert(KEY_DISPLAY.to_string(), json!(DisplayMode::Standalone));
    document.insert(KEY_START_URL.to_string(), json!(DEFAULT_START_URL));
    document.insert(KEY_APP_VERSION.to_string(), json!(DEFAULT_APP_VERSION));
    document.insert(KEY_PACKAGE_ID.to_string(), json!(package_id));
    document.insert(
        KEY_TARGET_PLATFORMS.to_string(),
        json!(default_platform.id),
    );
    document.insert(KEY_ANDROID_ANIMATABLE_VIEW.to_string(), json!(false));
    document.insert(KEY_ANDROID_KEEP_SCREEN_ON.to_string(), json!(false));
    document.insert(
        KEY_WINDOWS_UPDATE_ID.to_string(),
        json!(generate_update_id()),
    );
    document.insert(
        KEY_WINDOWS_VENDOR.to_string(),
        json!(DEFAULT_WINDOWS_VENDOR),
    );

    store::write_document(path, &document)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::RecordingDiagnostics;
    use crate::manifest::fields::is_valid_update_id;
    use crate::platforms::PlatformInfo;
    use tempfile::tempdir;

    #[test]
    fn test_generated_ids_always_validate() {
        for _ in 0..200 {
            let id = generate_update_id();
            assert!(is_valid_update_id(&id), "rejected generated id: {}", id);
        }
    }

    #[test]
    fn test_generated_id_shape() {
        let id = generate_update_id();
        assert_eq!(id.len(), 36);
        assert_eq!(id.matches('-').count(), 4);
    }

    #[test]
    fn test_create_writes_expected_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        let sink = RecordingDiagnostics::new();

        create(&path, "com.example.myapp", &PlatformManager::default(), &sink).unwrap();

        let doc = store::read_document(&path).unwrap();
        assert_eq!(doc[KEY_NAME], json!("com.example.myapp"));
        assert_eq!(doc[KEY_SHORT_NAME], json!("myapp"));
        assert_eq!(doc[KEY_DISPLAY], json!("standalone"));
        assert_eq!(doc[KEY_START_URL], json!("index.html"));
        assert_eq!(doc[KEY_APP_VERSION], json!("1"));
        assert_eq!(doc[KEY_PACKAGE_ID], json!("com.example.myapp"));
        assert_eq!(doc[KEY_TARGET_PLATFORMS], json!("android"));
        assert_eq!(doc[KEY_ANDROID_ANIMATABLE_VIEW], json!(false));
        assert_eq!(doc[KEY_ANDROID_KEEP_SCREEN_ON], json!(false));
        assert_eq!(doc[KEY_WINDOWS_VENDOR], json!("Vendor"));

        let update_id = doc[KEY_WINDOWS_UPDATE_ID].as_str().unwrap();
        assert!(is_valid_update_id(update_id));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_create_rejects_invalid_package_id() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        let sink = RecordingDiagnostics::new();

        let result = create(&path, "nodots", &PlatformManager::default(), &sink);
        assert!(matches!(result, Err(CreateError::InvalidPackageId(_))));
        // Nothing gets written for a rejected ID
        assert!(!path.exists());
        assert_eq!(sink.errors().len(), 1);
    }

    #[test]
    fn test_create_requires_a_default_platform() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        let sink = RecordingDiagnostics::new();
        let platforms = PlatformManager::with_platforms(vec![PlatformInfo {
            id: "android".to_string(),
            available: false,
        }]);

        let result = create(&path, "com.example.myapp", &platforms, &sink);
        assert!(matches!(result, Err(CreateError::NoDefaultPlatform)));
        assert!(!path.exists());
    }

    #[test]
    fn test_create_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        let sink = RecordingDiagnostics::new();

        std::fs::write(&path, r#"{"stale_key": true}"#).unwrap();
        create(&path, "com.example.myapp", &PlatformManager::default(), &sink).unwrap();

        // Full overwrite, not a merge with the old content
        let doc = store::read_document(&path).unwrap();
        assert!(doc.get("stale_key").is_none());
        assert_eq!(doc[KEY_PACKAGE_ID], json!("com.example.myapp"));
    }
}
