//! Hand the downloaded artifact to `wine msiexec`.

use std::fmt;
use std::path::Path;
use std::process::Command;

use crate::config::WineConfig;
use crate::error::{Result, UpdateError};
use crate::steps::select::BinaryKind;

/// Environment variable Wine reads its prefix from.
pub const WINEPREFIX: &str = "WINEPREFIX";

/// A program, its arguments and the variables added to the inherited environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program to run.
    pub program: String,
    /// Arguments, passed without a shell.
    pub args: Vec<String>,
    /// Variables added on top of the parent environment.
    pub env: Vec<(String, String)>,
}

impl CommandSpec {
    /// Builds `<wine> msiexec /<flag> <path>` with `WINEPREFIX` set.
    #[must_use]
    pub fn msiexec(wine: &WineConfig, kind: BinaryKind, path: &Path) -> Self {
        Self {
            program: wine.binary.clone(),
            args: vec![
                "msiexec".to_string(),
                format!("/{}", kind.msiexec_flag()),
                path.display().to_string(),
            ],
            env: vec![(WINEPREFIX.to_string(), wine.prefix.clone())],
        }
    }
}

impl fmt::Display for CommandSpec {
    /// Shell-like form; the last argument (the package path) is quoted.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        let last = self.args.len().saturating_sub(1);
        for (i, arg) in self.args.iter().enumerate() {
            if i == last {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Runs an external command to completion with inherited stdio.
pub trait CommandRunner {
    /// Runs `spec` and returns its exit code (`None` when killed by a signal).
    fn run(&self, spec: &CommandSpec) -> std::io::Result<Option<i32>>;
}

/// Runs commands with [`std::process::Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> std::io::Result<Option<i32>> {
        let status = Command::new(&spec.program)
            .args(&spec.args)
            .envs(spec.env.iter().map(|(k, v)| (k, v)))
            .status()?;
        Ok(status.code())
    }
}

/// Installs the artifact at `path` and waits for msiexec to finish.
pub fn run_installer(
    runner: &dyn CommandRunner,
    wine: &WineConfig,
    kind: BinaryKind,
    path: &Path,
) -> Result<()> {
    let spec = CommandSpec::msiexec(wine, kind, path);
    let command = spec.to_string();

    tracing::info!("Running {}", command);
    tracing::debug!("{}={}", WINEPREFIX, wine.prefix);

    match runner.run(&spec) {
        Ok(Some(0)) => {
            tracing::info!("Run command {} finished.", command);
            Ok(())
        }
        Ok(Some(code)) => Err(UpdateError::install(
            command,
            format!("exited with status {code}"),
        )),
        Ok(None) => Err(UpdateError::install(command, "terminated by a signal")),
        Err(e) => Err(UpdateError::install(command, format!("failed to start: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct Recorder {
        result: Option<i32>,
        calls: RefCell<Vec<CommandSpec>>,
    }

    impl CommandRunner for Recorder {
        fn run(&self, spec: &CommandSpec) -> std::io::Result<Option<i32>> {
            self.calls.borrow_mut().push(spec.clone());
            Ok(self.result)
        }
    }

    struct Unstartable;

    impl CommandRunner for Unstartable {
        fn run(&self, _spec: &CommandSpec) -> std::io::Result<Option<i32>> {
            Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no such file",
            ))
        }
    }

    fn wine() -> WineConfig {
        WineConfig {
            prefix: "/games/mtga".to_string(),
            binary: "/usr/bin/wine".to_string(),
        }
    }

    #[test]
    fn test_msiexec_command() {
        let spec = CommandSpec::msiexec(
            &wine(),
            BinaryKind::Patch,
            Path::new("/home/me/My Downloads/a.msp"),
        );
        assert_eq!(spec.program, "/usr/bin/wine");
        assert_eq!(
            spec.args,
            vec!["msiexec", "/p", "/home/me/My Downloads/a.msp"]
        );
        assert_eq!(
            spec.env,
            vec![("WINEPREFIX".to_string(), "/games/mtga".to_string())]
        );
        assert_eq!(
            spec.to_string(),
            "/usr/bin/wine msiexec /p \"/home/me/My Downloads/a.msp\""
        );
    }

    #[test]
    fn test_run_installer_success() {
        let runner = Recorder {
            result: Some(0),
            calls: RefCell::new(Vec::new()),
        };
        run_installer(&runner, &wine(), BinaryKind::Installer, Path::new("/tmp/b.msi")).unwrap();

        let calls = runner.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].args[1], "/i");
    }

    #[test]
    fn test_run_installer_failure_names_command() {
        let runner = Recorder {
            result: Some(1603),
            calls: RefCell::new(Vec::new()),
        };
        let err = run_installer(&runner, &wine(), BinaryKind::Patch, Path::new("/tmp/a.msp"))
            .unwrap_err();

        assert!(matches!(err, UpdateError::Install { .. }));
        let message = err.user_message();
        assert!(message.contains("/usr/bin/wine msiexec /p \"/tmp/a.msp\""));
        assert!(message.contains("1603"));
    }

    #[test]
    fn test_run_installer_signal_names_command() {
        let runner = Recorder {
            result: None,
            calls: RefCell::new(Vec::new()),
        };
        let err = run_installer(&runner, &wine(), BinaryKind::Installer, Path::new("/tmp/b.msi"))
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "command /usr/bin/wine msiexec /i \"/tmp/b.msi\" failed: terminated by a signal"
        );
    }

    #[test]
    fn test_run_installer_spawn_failure() {
        let err = run_installer(&Unstartable, &wine(), BinaryKind::Patch, Path::new("/tmp/a.msp"))
            .unwrap_err();
        assert!(err.to_string().contains("failed to start"));
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_overlays_environment() {
        let spec = CommandSpec {
            program: "sh".to_string(),
            args: vec![
                "-c".to_string(),
                "test \"$WINEPREFIX\" = /games/mtga && test -n \"$PATH\"".to_string(),
            ],
            env: vec![(WINEPREFIX.to_string(), "/games/mtga".to_string())],
        };
        assert_eq!(SystemRunner.run(&spec).unwrap(), Some(0));
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_reports_exit_code() {
        let spec = CommandSpec {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), "exit 3".to_string()],
            env: Vec::new(),
        };
        assert_eq!(SystemRunner.run(&spec).unwrap(), Some(3));
    }
}
