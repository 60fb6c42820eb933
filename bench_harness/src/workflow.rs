//!
//! Benchmark harness workflows.
//!

use std::str::FromStr;

///
/// Describes sets of actions the harness is able to perform.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Workflow {
    /// Only build the native executables but not run them.
    Build,
    /// Build the native executables and run the experiment matrix.
    #[default]
    BuildAndRun,
    /// Run the experiment matrix against pre-built executables.
    RunOnly,
}

impl FromStr for Workflow {
    type Err = anyhow::Error;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        match string {
            "build" => Ok(Workflow::Build),
            "build-and-run" => Ok(Workflow::BuildAndRun),
            "run" => Ok(Workflow::RunOnly),
            string => anyhow::bail!(
                "Unknown workflow `{string}`. Supported workflows: build, build-and-run, run."
            ),
        }
    }
}

impl std::fmt::Display for Workflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Workflow::Build => write!(f, "build"),
            Workflow::BuildAndRun => write!(f, "build-and-run"),
            Workflow::RunOnly => write!(f, "run"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::Workflow;

    #[test]
    fn parses_known_workflows() {
        assert_eq!(
            Workflow::from_str("build").expect("Known workflow"),
            Workflow::Build
        );
        assert_eq!(
            Workflow::from_str("run").expect("Known workflow"),
            Workflow::RunOnly
        );
    }

    #[test]
    fn rejects_unknown_workflows() {
        assert!(Workflow::from_str("rebuild").is_err());
    }
}
