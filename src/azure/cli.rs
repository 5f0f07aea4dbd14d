//! Azure CLI command execution.
//!
//! Runs `az` commands and parses their JSON output.

use crate::config;
use colored::Colorize;
use regex::Regex;
use serde::de::DeserializeOwned;
use std::error::Error;
use std::process::Command;
use std::sync::OnceLock;

/// Regex for splitting command strings while preserving quoted substrings.
static COMMAND_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_command_regex() -> &'static Regex {
    COMMAND_REGEX.get_or_init(|| {
        Regex::new(r#"'([^']*)'\s*|\"([^\"]*)\"\s*|([^'\s]*)\s*"#).expect("Invalid Regex")
    })
}

/// Run a shell command and return its stdout.
///
/// The command string is split on spaces, with quoted substrings preserved.
/// Fails on a non-zero exit status or when stdout exceeds
/// [`config::MAX_CLI_OUTPUT_BYTES`].
pub fn run(cmd: &str) -> Result<String, Box<dyn Error>> {
    log::debug!("run({cmd})", cmd = cmd.on_blue());

    let cmds: Vec<&str> = split_and_strip(cmd)
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
    log::trace!("split cmds={:?}", cmds);

    let (program, args) = cmds.split_first().ok_or("Empty command")?;
    let output = Command::new(program).args(args).output().map_err(|e| {
        log::error!("Command execution failed: {}", e);
        format!("Failed to execute command '{program}': {e}")
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        log::trace!(
            "code={code:?}, status={status}\n┎######\nstderr=\n{stderr}\n┖######",
            code = output.status.code(),
            status = output.status,
            stderr = stderr.red()
        );
        log::warn!(
            "{failed} to run {cmd}",
            failed = "failed".on_red(),
            cmd = cmd.on_blue()
        );
        return Err(format!("ERROR running: {stderr}").into());
    }

    log::debug!(
        "Success cmd: {cmd} stdout.len()={len}",
        len = output.stdout.len()
    );
    if output.stdout.len() > config::MAX_CLI_OUTPUT_BYTES {
        return Err(format!(
            "Response too large: {} bytes for command: {:?}",
            output.stdout.len(),
            cmds
        )
        .into());
    }

    let stdout = String::from_utf8(output.stdout).map_err(|e| format!("Invalid UTF-8: {}", e))?;
    Ok(stdout)
}

/// Run a command and parse its stdout as JSON into `T`.
pub fn run_json<T: DeserializeOwned>(cmd: &str) -> Result<T, Box<dyn Error>> {
    let output = run(cmd)?;
    parse_json(&output).map_err(|e| format!("{e} (command: {cmd})").into())
}

/// Parse JSON, reporting the path of the first mismatch.
pub fn parse_json<T: DeserializeOwned>(json: &str) -> Result<T, String> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        log::debug!("OUTPUT START:\n\n{}\n\nOUTPUT END\n", json);
        format!("Error parsing JSON: path={} error={}", e.path(), e)
    })
}

/// Single-quote an argument so it survives [`split_and_strip`].
pub fn quote(arg: &str) -> String {
    format!("'{arg}'")
}

/// Split a command string on spaces, preserving quoted substrings.
fn split_and_strip(input: &str) -> Vec<&str> {
    get_command_regex()
        .find_iter(input)
        .map(|m| m.as_str().trim().trim_matches('\'').trim_matches('"'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawRule;

    #[test]
    fn test_split_and_strip_complex() {
        let input = "Hello 'World War'  'fail' Rust";
        let expected = vec!["Hello", "World War", "fail", "Rust"];
        assert_eq!(split_and_strip(input), expected);
    }

    #[test]
    fn test_split_and_strip_empty_quotes() {
        let input = "Empty '' Single Quotes";
        let expected = vec!["Empty", "", "Single", "Quotes"];
        assert_eq!(split_and_strip(input), expected);
    }

    #[test]
    fn test_split_quoted_az_args() {
        let cmd = format!(
            "az network nsg show --resource-group {} --name {} --output json",
            quote("My RG"),
            quote("nsg-web")
        );
        let parts: Vec<&str> = split_and_strip(&cmd)
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect();
        assert_eq!(
            parts,
            vec![
                "az",
                "network",
                "nsg",
                "show",
                "--resource-group",
                "My RG",
                "--name",
                "nsg-web",
                "--output",
                "json"
            ]
        );
    }

    #[test]
    fn test_parse_json_reports_path() {
        let err = parse_json::<Vec<RawRule>>(
            r#"[{"name":"a","direction":"Inbound","access":"Allow"},{"name":"b","direction":"Inbound","access":7}]"#,
        )
        .unwrap_err();
        assert!(err.contains("[1].access"), "unexpected error: {err}");
    }

    #[test]
    fn test_run_empty_command() {
        assert!(run("   ").is_err());
    }
}
