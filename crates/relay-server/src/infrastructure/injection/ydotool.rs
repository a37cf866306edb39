//! `ydotool` injection gateway.
//!
//! `ydotool` is a client for the `ydotoold` daemon, which owns a uinput
//! virtual device.  Events injected through it look like real hardware input
//! to the kernel, so they work under X11, Wayland and on the console alike.
//!
//! # Primitive → invocation
//!
//! | Primitive              | Invocation                           |
//! |------------------------|--------------------------------------|
//! | `Key` (down)           | `ydotool key 29:1`                   |
//! | `Key` (up)             | `ydotool key 29:0`                   |
//! | `Type('!')`            | `ydotool type -- !`                  |
//! | `PointerMove(10, -5)`  | `ydotool mousemove -x 10 -y -5`      |
//! | `PointerClick(left)`   | `ydotool click 0xC0`                 |
//! | `ProcessExec(line)`    | `<shell> -c <line>` with `DISPLAY`   |
//!
//! Click codes are `0xC0 | button`: bit 0x40 is "press", bit 0x80 is
//! "release", low nibble 0 = left, 1 = right, 2 = middle.
//!
//! Each `ydotool` call is awaited before the next one starts, so the host
//! sees events in exactly the order they were built.  `ProcessExec` is
//! spawned and left running; its exit is logged in the background.

use std::io;
use std::process::Stdio;

use async_trait::async_trait;
use relay_core::{
    domain::primitive::{KeyDirection, PointerButton},
    InjectionError, Primitive,
};
use tokio::process::Command;
use tracing::{debug, warn};

use crate::application::injection::InjectionGateway;
use crate::domain::{ExecConfig, YdotoolConfig};

/// Injects primitives by running the `ydotool` client.
#[derive(Debug, Clone)]
pub struct YdotoolGateway {
    ydotool: YdotoolConfig,
    exec: ExecConfig,
}

impl YdotoolGateway {
    pub fn new(ydotool: YdotoolConfig, exec: ExecConfig) -> Self {
        Self { ydotool, exec }
    }

    /// Arguments passed to `ydotool` for `primitive`.
    ///
    /// Returns `None` for `ProcessExec`, which does not go through `ydotool`.
    pub fn ydotool_args(primitive: &Primitive) -> Option<Vec<String>> {
        let args = match primitive {
            Primitive::Key(transition) => {
                let state = match transition.direction {
                    KeyDirection::Down => 1,
                    KeyDirection::Up => 0,
                };
                vec!["key".to_string(), format!("{}:{state}", transition.code)]
            }
            Primitive::Type(ch) => vec!["type".to_string(), "--".to_string(), ch.to_string()],
            Primitive::PointerMove { dx, dy } => vec![
                "mousemove".to_string(),
                "-x".to_string(),
                dx.to_string(),
                "-y".to_string(),
                dy.to_string(),
            ],
            Primitive::PointerClick(button) => {
                vec!["click".to_string(), click_code(*button).to_string()]
            }
            Primitive::ProcessExec(_) => return None,
        };
        Some(args)
    }

    /// Program and arguments used to launch an `exec` command line.
    pub fn exec_argv(&self, command_line: &str) -> (String, Vec<String>) {
        let shell_args = vec![
            self.exec.shell.clone(),
            "-c".to_string(),
            command_line.to_string(),
        ];
        match &self.exec.terminal {
            Some(terminal) => {
                let mut args = vec!["-e".to_string()];
                args.extend(shell_args);
                (terminal.clone(), args)
            }
            None => {
                let mut parts = shell_args.into_iter();
                let program = parts.next().unwrap_or_default();
                (program, parts.collect())
            }
        }
    }

    async fn run_ydotool(&self, args: Vec<String>) -> Result<(), InjectionError> {
        let program = &self.ydotool.program;
        let mut command = Command::new(program);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        if let Some(socket) = &self.ydotool.socket {
            command.env("YDOTOOL_SOCKET", socket);
        }

        let output = command
            .output()
            .await
            .map_err(|e| launch_error(program, e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!("{program} {} failed: {stderr}", args[0]);
            return Err(InjectionError::CommandFailed {
                program: program.clone(),
                status: output.status.to_string(),
                stderr,
            });
        }
        Ok(())
    }

    fn spawn_exec(&self, command_line: &str) -> Result<(), InjectionError> {
        let (program, args) = self.exec_argv(command_line);
        let mut child = Command::new(&program)
            .args(&args)
            .env("DISPLAY", &self.exec.display)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| launch_error(&program, e))?;

        debug!("launched {program} (pid {:?})", child.id());

        // Reap the child so it does not linger as a zombie.
        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) => debug!("{program} exited with {status}"),
                Err(e) => warn!("failed to wait for {program}: {e}"),
            }
        });
        Ok(())
    }
}

#[async_trait]
impl InjectionGateway for YdotoolGateway {
    async fn inject(&self, primitive: &Primitive) -> Result<(), InjectionError> {
        match primitive {
            Primitive::ProcessExec(command_line) => self.spawn_exec(command_line),
            other => match Self::ydotool_args(other) {
                Some(args) => self.run_ydotool(args).await,
                None => Ok(()),
            },
        }
    }
}

fn click_code(button: PointerButton) -> &'static str {
    match button {
        PointerButton::Left => "0xC0",
        PointerButton::Right => "0xC1",
        PointerButton::Middle => "0xC2",
    }
}

fn launch_error(program: &str, e: io::Error) -> InjectionError {
    if e.kind() == io::ErrorKind::NotFound {
        InjectionError::ToolNotFound {
            program: program.to_string(),
        }
    } else {
        InjectionError::Spawn {
            program: program.to_string(),
            source: e,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use relay_core::KeyCode;

    fn args(primitive: Primitive) -> Vec<String> {
        YdotoolGateway::ydotool_args(&primitive).unwrap()
    }

    #[test]
    fn test_key_down_uses_state_one() {
        assert_eq!(args(Primitive::key_down(KeyCode::LEFT_CTRL)), ["key", "29:1"]);
    }

    #[test]
    fn test_key_up_uses_state_zero() {
        assert_eq!(args(Primitive::key_up(KeyCode(30))), ["key", "30:0"]);
    }

    #[test]
    fn test_type_guards_leading_dash() {
        assert_eq!(args(Primitive::Type('-')), ["type", "--", "-"]);
    }

    #[test]
    fn test_mousemove_passes_negative_offsets() {
        assert_eq!(
            args(Primitive::PointerMove { dx: 10, dy: -5 }),
            ["mousemove", "-x", "10", "-y", "-5"]
        );
    }

    #[test]
    fn test_click_codes() {
        assert_eq!(args(Primitive::PointerClick(PointerButton::Left)), ["click", "0xC0"]);
        assert_eq!(args(Primitive::PointerClick(PointerButton::Right)), ["click", "0xC1"]);
        assert_eq!(args(Primitive::PointerClick(PointerButton::Middle)), ["click", "0xC2"]);
    }

    #[test]
    fn test_process_exec_has_no_ydotool_args() {
        assert!(YdotoolGateway::ydotool_args(&Primitive::ProcessExec("ls".into())).is_none());
    }

    #[test]
    fn test_exec_argv_without_terminal_runs_shell() {
        let gateway = YdotoolGateway::new(YdotoolConfig::default(), ExecConfig::default());
        let (program, argv) = gateway.exec_argv("ls -la | head");
        assert_eq!(program, "/bin/sh");
        assert_eq!(argv, ["-c", "ls -la | head"]);
    }

    #[test]
    fn test_exec_argv_with_terminal_wraps_shell() {
        let exec = ExecConfig {
            terminal: Some("xterm".into()),
            ..ExecConfig::default()
        };
        let gateway = YdotoolGateway::new(YdotoolConfig::default(), exec);
        let (program, argv) = gateway.exec_argv("top");
        assert_eq!(program, "xterm");
        assert_eq!(argv, ["-e", "/bin/sh", "-c", "top"]);
    }

    #[tokio::test]
    async fn test_missing_ydotool_binary_is_tool_not_found() {
        let ydotool = YdotoolConfig {
            program: "/nonexistent/ydotool-for-tests".into(),
            socket: None,
        };
        let gateway = YdotoolGateway::new(ydotool, ExecConfig::default());

        let err = gateway.inject(&Primitive::Type('a')).await.unwrap_err();

        assert!(matches!(err, InjectionError::ToolNotFound { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_is_command_failed() {
        // `false` ignores its arguments and exits 1.
        let ydotool = YdotoolConfig {
            program: "false".into(),
            socket: None,
        };
        let gateway = YdotoolGateway::new(ydotool, ExecConfig::default());

        let err = gateway.inject(&Primitive::Type('a')).await.unwrap_err();

        assert!(matches!(err, InjectionError::CommandFailed { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_zero_exit_is_success() {
        let ydotool = YdotoolConfig {
            program: "true".into(),
            socket: None,
        };
        let gateway = YdotoolGateway::new(ydotool, ExecConfig::default());

        assert!(gateway.inject(&Primitive::key_down(KeyCode(30))).await.is_ok());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_exec_spawns_without_waiting() {
        let gateway = YdotoolGateway::new(YdotoolConfig::default(), ExecConfig::default());
        let result = gateway.inject(&Primitive::ProcessExec("exit 0".into())).await;
        assert!(result.is_ok());
    }
}
