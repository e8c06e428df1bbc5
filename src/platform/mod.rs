/// Runtime platform detection
///
/// The gallery behaves differently inside a native container ("hybrid") and
/// in a plain browser tab. Detection happens once; the result selects a
/// `PlatformStrategy` (strategy.rs) for the lifetime of the gallery.

use std::collections::BTreeSet;

pub mod strategy;

pub use strategy::{
    convert_file_src, select_strategy, BrowserStrategy, HybridStrategy, PlatformStrategy,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PlatformName {
    Android,
    Ios,
    Capacitor,
    /// Any native container
    Hybrid,
    Mobile,
    Desktop,
    /// A mobile browser without a native container
    MobileWeb,
}

impl PlatformName {
    pub fn as_str(self) -> &'static str {
        match self {
            PlatformName::Android => "android",
            PlatformName::Ios => "ios",
            PlatformName::Capacitor => "capacitor",
            PlatformName::Hybrid => "hybrid",
            PlatformName::Mobile => "mobile",
            PlatformName::Desktop => "desktop",
            PlatformName::MobileWeb => "mobileweb",
        }
    }
}

/// The set of platform names that apply to this process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platforms {
    names: BTreeSet<PlatformName>,
}

impl Platforms {
    pub fn from_names(names: impl IntoIterator<Item = PlatformName>) -> Self {
        Self {
            names: names.into_iter().collect(),
        }
    }

    /// Detect from the compilation target.
    pub fn detect() -> Self {
        if cfg!(target_os = "android") {
            Self::native(PlatformName::Android)
        } else if cfg!(target_os = "ios") {
            Self::native(PlatformName::Ios)
        } else {
            Self::browser()
        }
    }

    /// Detect, unless `hybrid` forces one side.
    pub fn detect_with_override(hybrid: Option<bool>) -> Self {
        match hybrid {
            Some(true) => Self::hybrid(),
            Some(false) => Self::browser(),
            None => Self::detect(),
        }
    }

    /// A generic native container
    pub fn hybrid() -> Self {
        Self::from_names([
            PlatformName::Capacitor,
            PlatformName::Hybrid,
            PlatformName::Mobile,
        ])
    }

    pub fn browser() -> Self {
        Self::from_names([PlatformName::Desktop])
    }

    fn native(os: PlatformName) -> Self {
        let mut platforms = Self::hybrid();
        platforms.names.insert(os);
        platforms
    }

    pub fn is(&self, name: PlatformName) -> bool {
        self.names.contains(&name)
    }

    pub fn names(&self) -> impl Iterator<Item = PlatformName> + '_ {
        self.names.iter().copied()
    }
}
