//! 外部命令执行：
//! - 捕获退出码、stdout、stderr
//! - 非零退出码不视为错误，由调用方决定其含义；只有无法启动进程才返回 Err

use std::{
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::{Context, Result};

use crate::error::FiddleError;

/// 输出模式：静默仅捕获；Loud 同时回显到控制台
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    Silent,
    Loud,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ShellOutput {
    pub(crate) status: i32,
    pub(crate) stdout: String,
    pub(crate) stderr: String,
}

impl ShellOutput {
    pub(crate) fn success(&self) -> bool {
        self.status == 0
    }

    /// 非零退出码转换为 `CommandFailed`
    pub(crate) fn ensure_success(self, command: &str) -> Result<Self, FiddleError> {
        if self.success() {
            return Ok(self);
        }
        Err(FiddleError::CommandFailed {
            command: command.to_string(),
            status: self.status,
            stderr: self.stderr.trim().to_string(),
        })
    }
}

/// 外部命令执行接口，便于在测试中替换为记录调用的实现
pub(crate) trait Shell {
    fn run(&self, program: &str, args: &[&str], mode: Mode) -> Result<ShellOutput>;

    /// 可执行文件是否能在 PATH 中找到
    fn has_program(&self, program: &str) -> bool;
}

/// 在指定工作目录中启动真实子进程
#[derive(Debug, Clone)]
pub(crate) struct SystemShell {
    cwd: PathBuf,
}

impl SystemShell {
    pub(crate) fn new(cwd: &Path) -> Self {
        Self {
            cwd: cwd.to_path_buf(),
        }
    }
}

impl Shell for SystemShell {
    fn run(&self, program: &str, args: &[&str], mode: Mode) -> Result<ShellOutput> {
        let line = display_command(program, args);
        tracing::debug!(command = %line, cwd = %self.cwd.display(), "执行外部命令");

        let output = Command::new(program)
            .args(args)
            .current_dir(&self.cwd)
            .output()
            .with_context(|| format!("无法启动命令: {}", line))?;

        // 被信号终止时没有退出码
        let status = output.status.code().unwrap_or(-1);
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if mode == Mode::Loud {
            print!("{}", stdout);
            eprint!("{}", stderr);
        }
        tracing::debug!(command = %line, status, "命令结束");

        Ok(ShellOutput {
            status,
            stdout,
            stderr,
        })
    }

    fn has_program(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}

/// 拼接为可读的命令行（仅用于日志与错误信息）
pub(crate) fn display_command(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}


#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn nonzero_exit_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let shell = SystemShell::new(dir.path());
        let out = shell
            .run("sh", &["-c", "echo oops >&2; exit 3"], Mode::Silent)
            .unwrap();
        assert_eq!(out.status, 3);
        assert!(!out.success());
        assert_eq!(out.stderr.trim(), "oops");
    }

    #[test]
    fn captures_stdout_in_working_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "x").unwrap();
        let shell = SystemShell::new(dir.path());
        let out = shell.run("ls", &[], Mode::Silent).unwrap();
        assert!(out.success());
        assert!(out.stdout.contains("marker.txt"));
    }

    #[test]
    fn spawn_failure_is_an_error() {
        let dir = TempDir::new().unwrap();
        let shell = SystemShell::new(dir.path());
        assert!(shell
            .run("definitely-not-a-real-program-xyz", &[], Mode::Silent)
            .is_err());
        assert!(!shell.has_program("definitely-not-a-real-program-xyz"));
    }

    #[test]
    fn ensure_success_reports_command_and_stderr() {
        let out = ShellOutput {
            status: 128,
            stdout: String::new(),
            stderr: "fatal: not a git repository\n".into(),
        };
        let err = out.ensure_success("git push").unwrap_err();
        match err {
            FiddleError::CommandFailed {
                command,
                status,
                stderr,
            } => {
                assert_eq!(command, "git push");
                assert_eq!(status, 128);
                assert_eq!(stderr, "fatal: not a git repository");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn display_command_joins_arguments() {
        assert_eq!(display_command("git", &["remote", "-v"]), "git remote -v");
        assert_eq!(display_command("gist", &[]), "gist");
    }
}
