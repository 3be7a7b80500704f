//! Run configuration resolved once at startup.

use std::fmt;
use std::path::PathBuf;

use crate::error::{Result, UpdateError};
use crate::{SETUP_HELP, WINE_BINARY_VAR, WINE_PREFIX_VAR};

/// How far the pipeline goes. Levels are cumulative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Report discovered binaries only.
    Info,
    /// Report and download the preferred binary.
    Download,
    /// Report, download and install the preferred binary.
    #[default]
    Install,
}

impl RunMode {
    /// Resolves the mode from the `--info` and `--download` flags.
    ///
    /// `--download` wins when both are given.
    #[must_use]
    pub fn from_flags(info: bool, download: bool) -> Self {
        if download {
            Self::Download
        } else if info {
            Self::Info
        } else {
            Self::Install
        }
    }

    /// Whether the selected artifact is fetched to disk.
    #[must_use]
    pub fn should_download(self) -> bool {
        !matches!(self, Self::Info)
    }

    /// Whether the downloaded artifact is handed to msiexec.
    #[must_use]
    pub fn should_install(self) -> bool {
        matches!(self, Self::Install)
    }
}

/// Which artifact the user asked for when both are available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BinaryPreference {
    /// `--patch`: prefer the MSP patch.
    Patch,
    /// `--install`: prefer the full MSI installer.
    Installer,
    /// No flag given; behaves like [`BinaryPreference::Patch`].
    #[default]
    Unspecified,
}

impl BinaryPreference {
    /// Resolves the preference from the `--patch` and `--install` flags.
    ///
    /// `--patch` wins when both are given.
    #[must_use]
    pub fn from_flags(patch: bool, install: bool) -> Self {
        if patch {
            Self::Patch
        } else if install {
            Self::Installer
        } else {
            Self::Unspecified
        }
    }

    /// Whether a found patch should be used.
    #[must_use]
    pub fn accepts_patch(self) -> bool {
        matches!(self, Self::Patch | Self::Unspecified)
    }
}

/// Raw view of the two Wine variables, either of which may be unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WineEnvironment {
    /// Value of `MTGA_WINE_PREFIX`.
    pub prefix: Option<String>,
    /// Value of `MTGA_WINE_BINARY`.
    pub binary: Option<String>,
}

impl WineEnvironment {
    /// Reads the variables from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the variables through `lookup`. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.is_empty());
        Self {
            prefix: read(WINE_PREFIX_VAR),
            binary: read(WINE_BINARY_VAR),
        }
    }

    /// Converts into a complete [`WineConfig`], naming the first missing variable.
    pub fn require(self) -> Result<WineConfig> {
        let prefix = self.prefix.ok_or(UpdateError::MissingConfiguration {
            variable: WINE_PREFIX_VAR,
        })?;
        let binary = self.binary.ok_or(UpdateError::MissingConfiguration {
            variable: WINE_BINARY_VAR,
        })?;
        Ok(WineConfig { prefix, binary })
    }

    /// Renders the human-readable environment report.
    #[must_use]
    pub fn report(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for WineEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ENVIRONMENT VARIABLES")?;
        for (name, value) in [
            (WINE_PREFIX_VAR, &self.prefix),
            (WINE_BINARY_VAR, &self.binary),
        ] {
            match value {
                Some(value) => writeln!(f, "  {name} is set to \"{value}\"")?,
                None => writeln!(f, "WARNING: you must set {name}")?,
            }
        }
        if self.prefix.is_none() && self.binary.is_none() {
            writeln!(f, "{SETUP_HELP}")?;
        }
        Ok(())
    }
}

/// Complete Wine settings needed to run the installer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WineConfig {
    /// Wine prefix, exported to the child as `WINEPREFIX`.
    pub prefix: String,
    /// Path to the wine executable.
    pub binary: String,
}

/// Everything a run needs, built once and passed to each stage.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// How far the pipeline goes.
    pub mode: RunMode,
    /// Patch or installer preference.
    pub preference: BinaryPreference,
    /// Directory the artifact is written to.
    pub download_folder: PathBuf,
    /// Wine settings.
    pub wine: WineConfig,
}

impl RunConfig {
    /// Creates a configuration in full install mode with no preference.
    #[must_use]
    pub fn new(wine: WineConfig, download_folder: impl Into<PathBuf>) -> Self {
        Self {
            mode: RunMode::default(),
            preference: BinaryPreference::default(),
            download_folder: download_folder.into(),
            wine,
        }
    }

    /// Sets the run mode.
    #[must_use]
    pub fn with_mode(mut self, mode: RunMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the binary preference.
    #[must_use]
    pub fn with_preference(mut self, preference: BinaryPreference) -> Self {
        self.preference = preference;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(prefix: Option<&str>, binary: Option<&str>) -> WineEnvironment {
        WineEnvironment::from_lookup(|name| match name {
            WINE_PREFIX_VAR => prefix.map(String::from),
            WINE_BINARY_VAR => binary.map(String::from),
            _ => None,
        })
    }

    #[test]
    fn test_mode_levels() {
        assert_eq!(RunMode::from_flags(false, false), RunMode::Install);
        assert_eq!(RunMode::from_flags(true, false), RunMode::Info);
        assert_eq!(RunMode::from_flags(false, true), RunMode::Download);
        assert_eq!(RunMode::from_flags(true, true), RunMode::Download);

        assert!(!RunMode::Info.should_download());
        assert!(!RunMode::Info.should_install());
        assert!(RunMode::Download.should_download());
        assert!(!RunMode::Download.should_install());
        assert!(RunMode::Install.should_download());
        assert!(RunMode::Install.should_install());
    }

    #[test]
    fn test_preference_flags() {
        assert_eq!(
            BinaryPreference::from_flags(false, false),
            BinaryPreference::Unspecified
        );
        assert_eq!(
            BinaryPreference::from_flags(true, true),
            BinaryPreference::Patch
        );
        assert_eq!(
            BinaryPreference::from_flags(false, true),
            BinaryPreference::Installer
        );
        assert!(BinaryPreference::Unspecified.accepts_patch());
        assert!(!BinaryPreference::Installer.accepts_patch());
    }

    #[test]
    fn test_require_names_prefix_first() {
        let err = lookup(None, None).require().unwrap_err();
        assert!(matches!(
            err,
            UpdateError::MissingConfiguration {
                variable: WINE_PREFIX_VAR
            }
        ));

        let err = lookup(Some("/games/mtga"), Some("")).require().unwrap_err();
        assert!(matches!(
            err,
            UpdateError::MissingConfiguration {
                variable: WINE_BINARY_VAR
            }
        ));
    }

    #[test]
    fn test_require_complete() {
        let wine = lookup(Some("/games/mtga"), Some("/usr/bin/wine"))
            .require()
            .unwrap();
        assert_eq!(wine.prefix, "/games/mtga");
        assert_eq!(wine.binary, "/usr/bin/wine");
    }

    #[test]
    fn test_report_all_set() {
        let env = lookup(Some("/games/mtga"), Some("/usr/bin/wine"));
        insta::assert_snapshot!(env.report().trim_end(), @r#"
        ENVIRONMENT VARIABLES
          MTGA_WINE_PREFIX is set to "/games/mtga"
          MTGA_WINE_BINARY is set to "/usr/bin/wine"
        "#);
    }

    #[test]
    fn test_report_nothing_set() {
        let report = lookup(None, None).report();
        assert_eq!(
            report,
            "ENVIRONMENT VARIABLES\n\
             WARNING: you must set MTGA_WINE_PREFIX\n\
             WARNING: you must set MTGA_WINE_BINARY\n\
             FIND OUT HOW: https://github.com/jsamr/mtgaup/wiki/Setup\n"
        );
    }

    #[test]
    fn test_report_one_missing_has_no_hint() {
        let report = lookup(Some("/games/mtga"), None).report();
        assert!(report.contains("WARNING: you must set MTGA_WINE_BINARY"));
        assert!(!report.contains("FIND OUT HOW"));
    }
}
