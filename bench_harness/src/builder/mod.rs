//!
//! The build trigger for the native benchmark executables.
//!

use std::path::PathBuf;

use colored::Colorize;

///
/// The build trigger. Runs the external build command with clean-then-build
/// semantics, so a previously built executable is always replaced.
///
pub struct Builder {
    /// The build command, such as `make`.
    command: String,
    /// The directory the build runs in.
    directory: PathBuf,
}

impl Builder {
    /// The clean target passed to the build command.
    const CLEAN_TARGET: &'static str = "clean";

    ///
    /// A shortcut constructor.
    ///
    pub fn new(command: String, directory: PathBuf) -> anyhow::Result<Self> {
        if let Err(error) = which::which(command.as_str()) {
            anyhow::bail!("The `{command}` executable not found in ${{PATH}}: {error}");
        }
        Ok(Self { command, directory })
    }

    ///
    /// Cleans and rebuilds the native executables.
    ///
    /// A nonzero exit status from the build step aborts the entire run with
    /// the captured stderr. The clean step's status is ignored: a missing
    /// clean target must not prevent a first build.
    ///
    pub fn build(&self) -> anyhow::Result<()> {
        println!(
            "    {} native executables in {:?}",
            "Building".bright_green().bold(),
            self.directory,
        );

        let _ = std::process::Command::new(self.command.as_str())
            .arg(Self::CLEAN_TARGET)
            .current_dir(self.directory.as_path())
            .output();

        let output = std::process::Command::new(self.command.as_str())
            .current_dir(self.directory.as_path())
            .output()
            .map_err(|error| {
                anyhow::anyhow!("{} subprocess spawning error: {:?}", self.command, error)
            })?;
        if !output.status.success() {
            anyhow::bail!(
                "{} error: {}",
                self.command,
                String::from_utf8_lossy(output.stderr.as_slice())
            );
        }

        Ok(())
    }
}
