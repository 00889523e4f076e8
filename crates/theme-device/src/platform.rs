//! Platform classification
//!
//! The operating system family and the "pad-like" and TV capabilities are
//! static facts supplied by the host platform. They are probed once when a
//! tracker is created and then carried inside every snapshot.

use serde::{Deserialize, Serialize};

/// Operating system family reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlatformOs {
    /// Apple iOS / iPadOS
    Ios,
    /// Android
    Android,
    /// Web or any other host
    #[default]
    Other,
}

/// Capability probe for the host platform
///
/// Implemented by the embedding application; the theming layer only reads it.
#[cfg_attr(test, mockall::automock)]
pub trait PlatformProbe: Send + Sync {
    /// The operating system family
    fn os(&self) -> PlatformOs;

    /// Whether the device reports itself as a pad/tablet form factor
    fn is_pad(&self) -> bool;

    /// Whether the device is a TV
    fn is_tv(&self) -> bool;
}

/// Static platform facts resolved from a [`PlatformProbe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PlatformFacts {
    /// Operating system family
    pub os: PlatformOs,
    /// Pad/tablet form factor
    pub is_pad: bool,
    /// TV form factor
    pub is_tv: bool,
}

impl PlatformFacts {
    /// Resolve the facts by querying a probe once
    pub fn probe(probe: &dyn PlatformProbe) -> Self {
        Self {
            os: probe.os(),
            is_pad: probe.is_pad(),
            is_tv: probe.is_tv(),
        }
    }
}

/// A probe that reports fixed facts
///
/// Useful for hosts that know their platform at build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StaticPlatform(pub PlatformFacts);

impl StaticPlatform {
    /// A phone running iOS
    pub fn ios() -> Self {
        Self(PlatformFacts {
            os: PlatformOs::Ios,
            ..PlatformFacts::default()
        })
    }

    /// A phone running Android
    pub fn android() -> Self {
        Self(PlatformFacts {
            os: PlatformOs::Android,
            ..PlatformFacts::default()
        })
    }
}

impl PlatformProbe for StaticPlatform {
    fn os(&self) -> PlatformOs {
        self.0.os
    }

    fn is_pad(&self) -> bool {
        self.0.is_pad
    }

    fn is_tv(&self) -> bool {
        self.0.is_tv
    }
}
