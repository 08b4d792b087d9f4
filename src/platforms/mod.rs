//! Target-platform registry
//!
//! Tracks the platform backends the packaging pipeline can drive. The
//! manifest core consults the registry in two places: the factory asks for a
//! default platform when writing a fresh document, and the target-platforms
//! setter re-validates its value against the known platforms.

/// Platform identifier for the Android backend
pub const PLATFORM_ANDROID: &str = "android";

/// Platform identifier for the Windows backend
pub const PLATFORM_WINDOWS: &str = "windows";

/// A platform backend the pipeline knows about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformInfo {
    /// Platform identifier as it appears in the manifest (e.g. "android")
    pub id: String,

    /// Whether the backend is usable on this host
    pub available: bool,
}

impl PlatformInfo {
    /// Create an available platform entry
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            available: true,
        }
    }
}

/// Ordered registry of platform backends
///
/// Order matters: the first available entry is the default platform offered
/// to newly created manifests.
#[derive(Debug, Clone)]
pub struct PlatformManager {
    platforms: Vec<PlatformInfo>,
}

impl PlatformManager {
    /// Create a registry from an explicit platform list
    pub fn with_platforms(platforms: Vec<PlatformInfo>) -> Self {
        Self { platforms }
    }

    /// Look up a platform by identifier
    pub fn get(&self, id: &str) -> Option<&PlatformInfo> {
        self.platforms.iter().find(|p| p.id == id)
    }

    /// The first available platform, used as the default for new manifests
    pub fn default_platform(&self) -> Option<&PlatformInfo> {
        self.platforms.iter().find(|p| p.available)
    }

    /// Check that `spec` names a known, available platform
    pub fn load(&self, spec: &str) -> bool {
        match self.get(spec) {
            Some(platform) => platform.available,
            None => false,
        }
    }
}

impl Default for PlatformManager {
    /// Built-in registry: Android preferred, then Windows
    fn default() -> Self {
        Self::with_platforms(vec![
            PlatformInfo::new(PLATFORM_ANDROID),
            PlatformInfo::new(PLATFORM_WINDOWS),
        ])
    }
}
