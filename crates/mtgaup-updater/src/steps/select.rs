//! Choose between the patch and the installer.

use std::fmt;

use crate::config::BinaryPreference;
use crate::metadata::BinaryReference;

/// Kind of update artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryKind {
    /// Incremental `.msp` patch.
    Patch,
    /// Full `.msi` installer.
    Installer,
}

impl BinaryKind {
    /// msiexec switch for this kind (`p` applies a patch, `i` installs).
    #[must_use]
    pub const fn msiexec_flag(&self) -> &'static str {
        match self {
            Self::Patch => "p",
            Self::Installer => "i",
        }
    }

    /// Get a human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Patch => "patch",
            Self::Installer => "installer",
        }
    }
}

impl fmt::Display for BinaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The artifact picked for this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Patch or installer.
    pub kind: BinaryKind,
    /// Where to download it from.
    pub url: String,
}

/// Applies the selection policy.
///
/// A patch is used when one was found and the user did not ask for the
/// installer. Otherwise the installer is used if present, even when
/// `--patch` was requested. Returns `None` when nothing was found.
#[must_use]
pub fn select_binary(
    binaries: &BinaryReference,
    preference: BinaryPreference,
) -> Option<Selection> {
    match (&binaries.patch, &binaries.installer) {
        (Some(url), _) if preference.accepts_patch() => Some(Selection {
            kind: BinaryKind::Patch,
            url: url.clone(),
        }),
        (_, Some(url)) => Some(Selection {
            kind: BinaryKind::Installer,
            url: url.clone(),
        }),
        _ => None,
    }
}
