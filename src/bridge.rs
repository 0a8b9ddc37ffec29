//! Execution bridge
//!
//! Resolved code is judged outside this crate. An [`ExecutionBridge`] deploys
//! the code at a fixed address, calls it once and reports whether the call
//! completed without reverting. [`CommandBridge`] does this by running an
//! external EVM tool such as geth's `evm`.

use crate::config::BridgeSettings;
use crate::error::BridgeError;
use crate::template::ResolvedCode;
use log::{debug, info, warn};
use std::process::Command;

/// Base of the evm.codes playground link shown after every attempt
pub const PLAYGROUND_URL: &str = "https://www.evm.codes/playground";

/// Default call data, a single zero byte
pub const DEFAULT_CALL_DATA: &str = "00";

pub trait ExecutionBridge {
    /// Run the code. `Ok(true)` means the call completed without reverting.
    fn execute(&mut self, code: &ResolvedCode) -> Result<bool, BridgeError>;

    /// Link for inspecting the run in a browser
    fn playground_url(&self, code: &ResolvedCode) -> String {
        playground_url(code, DEFAULT_CALL_DATA)
    }
}

/// evm.codes playground link for `code` called with `call_data` (hex, no prefix)
pub fn playground_url(code: &ResolvedCode, call_data: &str) -> String {
    format!(
        "{}?callValue=0&unit=Wei&callData=0x{}&codeType=Bytecode&code=%27{}%27_",
        PLAYGROUND_URL,
        call_data,
        code.to_hex()
    )
}

/// Runs an external program per verdict.
///
/// Argument templates may contain `{code}`, `{calldata}`, `{gas}` and
/// `{address}`. The run passes when the program exits successfully and its
/// output carries none of the configured failure markers.
pub struct CommandBridge {
    settings: BridgeSettings,
}

impl CommandBridge {
    pub fn new(settings: BridgeSettings) -> Self {
        CommandBridge { settings }
    }

    /// Arguments with placeholders filled in for `code`
    pub fn arguments(&self, code: &ResolvedCode) -> Vec<String> {
        let hex = code.to_hex();
        let gas = self.settings.gas_limit.to_string();
        self.settings
            .args
            .iter()
            .map(|arg| {
                arg.replace("{code}", &hex)
                    .replace("{calldata}", &self.settings.call_data)
                    .replace("{gas}", &gas)
                    .replace("{address}", &self.settings.address)
            })
            .collect()
    }

    /// First output line containing one of the failure markers
    fn failure_line<'a>(&self, output: &'a str) -> Option<&'a str> {
        output.lines().find(|line| {
            let line = line.to_ascii_lowercase();
            self.settings
                .failure_markers
                .iter()
                .any(|marker| line.contains(&marker.to_ascii_lowercase()))
        })
    }
}

impl ExecutionBridge for CommandBridge {
    fn execute(&mut self, code: &ResolvedCode) -> Result<bool, BridgeError> {
        let args = self.arguments(code);
        debug!("Running {} {:?}", self.settings.program, args);

        let output = Command::new(&self.settings.program)
            .args(&args)
            .output()
            .map_err(|source| BridgeError::Launch {
                program: self.settings.program.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        debug!("Runner stdout: {}", stdout.trim());
        debug!("Runner stderr: {}", stderr.trim());

        if !output.status.success() {
            warn!("Runner exited with {}", output.status);
            return Err(BridgeError::Runner(stderr.trim().to_string()));
        }

        if let Some(line) = self
            .failure_line(&stderr)
            .or_else(|| self.failure_line(&stdout))
        {
            info!("Execution reverted: {}", line.trim());
            return Ok(false);
        }

        Ok(true)
    }

    fn playground_url(&self, code: &ResolvedCode) -> String {
        playground_url(code, &self.settings.call_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::parse_hex_code;
    use test_log::test;

    fn resolved(text: &str) -> ResolvedCode {
        ResolvedCode::from_bytes(parse_hex_code(text).unwrap())
    }

    #[test]
    fn test_playground_url() {
        let code = resolved("600a00");
        assert_eq!(
            playground_url(&code, "00"),
            "https://www.evm.codes/playground?callValue=0&unit=Wei&callData=0x00&codeType=Bytecode&code=%27600a00%27_"
        );
    }

    #[test]
    fn test_arguments_are_filled() {
        let bridge = CommandBridge::new(BridgeSettings::default());
        let args = bridge.arguments(&resolved("6001"));
        assert!(args.contains(&"6001".to_string()));
        assert!(args.contains(&"1000000".to_string()));
        assert!(args.contains(&"0xffffffffffffffffffffffffffffffffffffffff".to_string()));
        assert!(!args.iter().any(|a| a.contains('{')));
    }

    #[test]
    fn test_missing_program_is_a_launch_error() {
        let settings = BridgeSettings {
            program: "fourten-no-such-runner".to_string(),
            ..BridgeSettings::default()
        };
        let mut bridge = CommandBridge::new(settings);
        assert!(matches!(
            bridge.execute(&resolved("00")),
            Err(BridgeError::Launch { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_verdict_from_exit_status_and_markers() {
        let passing = BridgeSettings {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), "echo 0x".to_string()],
            ..BridgeSettings::default()
        };
        assert!(CommandBridge::new(passing).execute(&resolved("00")).unwrap());

        let reverting = BridgeSettings {
            program: "sh".to_string(),
            args: vec![
                "-c".to_string(),
                "echo 'error: execution reverted' >&2".to_string(),
            ],
            ..BridgeSettings::default()
        };
        assert!(!CommandBridge::new(reverting).execute(&resolved("00")).unwrap());

        let crashing = BridgeSettings {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), "exit 3".to_string()],
            ..BridgeSettings::default()
        };
        assert!(matches!(
            CommandBridge::new(crashing).execute(&resolved("00")),
            Err(BridgeError::Runner(_))
        ));
    }
}
