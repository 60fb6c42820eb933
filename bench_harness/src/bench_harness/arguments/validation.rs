//!
//! Validate the arguments passed from user, checking invariants that are not
//! expressed in the type system.
//!

use super::Arguments;

///
/// Validate the arguments passed from user, checking invariants that are not
/// expressed in the type system.
///
pub fn validate_arguments(arguments: Arguments) -> anyhow::Result<Arguments> {
    if arguments.verbose && arguments.quiet {
        anyhow::bail!("The arguments `--verbose` and `--quiet` cannot be combined.");
    }
    if arguments.timeout == Some(0) {
        anyhow::bail!("The argument `--timeout` must be a positive number of seconds.");
    }
    if arguments.cores == Some(0) {
        anyhow::bail!("The argument `--cores` must be a positive parallelism degree.");
    }

    Ok(arguments)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::super::Arguments;
    use super::validate_arguments;

    fn parse(arguments: &[&str]) -> Arguments {
        Arguments::try_parse_from(
            std::iter::once("bench-harness").chain(arguments.iter().copied()),
        )
        .expect("Valid arguments")
    }

    #[test]
    fn accepts_defaults() {
        assert!(validate_arguments(parse(&[])).is_ok());
    }

    #[test]
    fn rejects_verbose_with_quiet() {
        assert!(validate_arguments(parse(&["--verbose", "--quiet"])).is_err());
    }

    #[test]
    fn rejects_zero_timeout() {
        assert!(validate_arguments(parse(&["--timeout", "0"])).is_err());
    }

    #[test]
    fn rejects_zero_cores() {
        assert!(validate_arguments(parse(&["--cores", "0"])).is_err());
    }
}
