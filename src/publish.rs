//! 将 fiddle 文件发布为 Gist：
//! - 没有 git 仓库时先 `git init`
//! - 已经是 Gist 仓库时直接返回，绝不重复创建 Gist
//! - 否则调用 gist 命令上传 fiddle.*，把返回的地址设为 origin 并推送

use std::path::Path;

use anyhow::{Context, Result};

use crate::{
    config::Settings,
    error::FiddleError,
    gist::{find_gist_url, GistLocator},
    shell::{display_command, Mode, Shell},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PublishOutcome {
    /// 新建了 Gist
    Created { url: String },
    /// 工作副本已经指向 Gist，什么都没做
    AlreadyGist { url: String },
}

pub(crate) fn publish(shell: &dyn Shell, settings: &Settings) -> Result<PublishOutcome> {
    if !shell.has_program("git") {
        return Err(FiddleError::tool_missing("git", "请先安装 git").into());
    }

    if shell.run("git", &["status"], Mode::Silent)?.success() {
        if let Some(url) = GistLocator::new(shell).remote_url() {
            return Ok(PublishOutcome::AlreadyGist { url });
        }
        // origin 已被占用时 remote add 必然失败，新建的 Gist 会无处登记
        let origin = shell.run("git", &["remote", "get-url", "origin"], Mode::Silent)?;
        if origin.success() {
            return Err(FiddleError::OriginTaken(origin.stdout.trim().to_string()).into());
        }
    } else {
        println!("[>] 初始化 git 仓库");
        git(shell, &["init"], Mode::Silent)?;
    }

    if !shell.has_program(&settings.gist_bin) {
        return Err(FiddleError::tool_missing(
            &settings.gist_bin,
            "请先安装 gist（http://defunkt.io/gist/）",
        )
        .into());
    }

    let files = fiddle_files(&settings.root)?;
    if files.is_empty() {
        return Err(FiddleError::NoFiddleFiles.into());
    }

    println!("[ok] 正在创建 gist...");
    let args: Vec<&str> = files.iter().map(String::as_str).collect();
    let out = shell.run(&settings.gist_bin, &args, Mode::Silent)?;
    let url = find_gist_url(&out.stdout).ok_or_else(|| {
        FiddleError::PublishFailed(format!("{}{}", out.stdout, out.stderr).trim().to_string())
    })?;
    tracing::debug!(%url, "gist 已创建");

    git(shell, &["remote", "add", "origin", &url], Mode::Silent)?;

    let branch = settings.gist_branch.as_str();
    // 新仓库还没有提交：先对齐 Gist 的初始提交，推送才能快进
    if !has_commits(shell)? {
        git(shell, &["fetch", "origin", branch], Mode::Silent)?;
        git(shell, &["reset", "FETCH_HEAD"], Mode::Silent)?;
    }
    let refspec = format!("HEAD:{}", branch);
    git(shell, &["push", "-u", "origin", &refspec], Mode::Loud)?;

    Ok(PublishOutcome::Created { url })
}

/// 工作目录下匹配 `fiddle.*` 的文件名，按名称排序
pub(crate) fn fiddle_files(root: &Path) -> Result<Vec<String>> {
    let root_str = root.to_string_lossy();
    let pattern = format!("{}/fiddle.*", glob::Pattern::escape(&root_str));
    let mut names = Vec::new();
    for entry in glob::glob(&pattern).with_context(|| format!("无效的匹配模式: {}", pattern))? {
        let path = entry?;
        if !path.is_file() {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}

fn has_commits(shell: &dyn Shell) -> Result<bool> {
    Ok(shell
        .run("git", &["rev-parse", "--verify", "HEAD"], Mode::Silent)?
        .success())
}

fn git(shell: &dyn Shell, args: &[&str], mode: Mode) -> Result<()> {
    shell
        .run("git", args, mode)?
        .ensure_success(&display_command("git", args))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::testing::FakeShell;
    use std::fs;
    use tempfile::TempDir;

    const GIST_URL: &str = "https://gist.github.com/abc123";

    fn workspace(files: &[&str]) -> (TempDir, Settings) {
        let tmp = TempDir::new().unwrap();
        for f in files {
            fs::write(tmp.path().join(f), "x").unwrap();
        }
        let settings = Settings::new(tmp.path().to_path_buf());
        (tmp, settings)
    }

    /// 已有 git 仓库，且没有 origin
    fn repo_without_origin() -> FakeShell {
        FakeShell::new().respond("git remote get-url origin", 2, "")
    }

    #[test]
    fn fresh_directory_is_initialized_published_and_pushed() {
        let (_tmp, settings) = workspace(&["fiddle.js", "fiddle.html", "fiddle.css", "notes.txt"]);
        let shell = FakeShell::new()
            .respond("git status", 128, "")
            .respond("gist fiddle.css fiddle.html fiddle.js", 0, &format!("{}\n", GIST_URL))
            .respond("git rev-parse --verify HEAD", 128, "");

        let outcome = publish(&shell, &settings).unwrap();
        assert_eq!(
            outcome,
            PublishOutcome::Created {
                url: GIST_URL.to_string()
            }
        );
        assert_eq!(
            shell.calls(),
            vec![
                "git status",
                "git init",
                "gist fiddle.css fiddle.html fiddle.js",
                "git remote add origin https://gist.github.com/abc123",
                "git rev-parse --verify HEAD",
                "git fetch origin master",
                "git reset FETCH_HEAD",
                "git push -u origin HEAD:master",
            ]
        );
    }

    #[test]
    fn existing_repo_with_commits_pushes_directly() {
        let (_tmp, settings) = workspace(&["fiddle.js"]);
        let shell = repo_without_origin()
            .respond("git remote -v", 0, "upstream\thttps://github.com/a/b.git (fetch)\n")
            .respond("gist fiddle.js", 0, GIST_URL);

        publish(&shell, &settings).unwrap();
        let calls = shell.calls();
        assert!(!calls.contains(&"git init".to_string()));
        assert!(!calls.iter().any(|c| c.starts_with("git fetch")));
        assert_eq!(calls.last().unwrap(), "git push -u origin HEAD:master");
    }

    #[test]
    fn existing_gist_never_invokes_gist_tool() {
        let (_tmp, settings) = workspace(&["fiddle.js"]);
        let shell = FakeShell::new().respond(
            "git remote -v",
            0,
            "origin\thttps://gist.github.com/abc123 (fetch)\n",
        );

        let outcome = publish(&shell, &settings).unwrap();
        assert_eq!(
            outcome,
            PublishOutcome::AlreadyGist {
                url: GIST_URL.to_string()
            }
        );
        assert!(!shell.invoked("gist"));
        assert_eq!(shell.calls(), vec!["git status", "git remote -v"]);
    }

    #[test]
    fn taken_origin_fails_before_gist_tool() {
        let (_tmp, settings) = workspace(&["fiddle.js"]);
        let shell = FakeShell::new()
            .respond("git remote -v", 0, "origin\thttps://github.com/a/b.git (fetch)\n")
            .respond("git remote get-url origin", 0, "https://github.com/a/b.git\n")
            .respond("gist fiddle.js", 0, GIST_URL);

        for _ in 0..2 {
            let err = publish(&shell, &settings).unwrap_err();
            assert!(matches!(
                err.downcast_ref::<FiddleError>(),
                Some(FiddleError::OriginTaken(url)) if url == "https://github.com/a/b.git"
            ));
        }
        assert!(!shell.invoked("gist"));
        assert!(!shell.invoked("git remote add"));
    }

    #[test]
    fn missing_gist_tool_is_reported() {
        let (_tmp, settings) = workspace(&["fiddle.js"]);
        let shell = repo_without_origin().without("gist");
        let err = publish(&shell, &settings).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FiddleError>(),
            Some(FiddleError::ToolMissing { tool, .. }) if tool == "gist"
        ));
    }

    #[test]
    fn missing_git_is_reported() {
        let (_tmp, settings) = workspace(&["fiddle.js"]);
        let shell = FakeShell::new().without("git");
        let err = publish(&shell, &settings).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FiddleError>(),
            Some(FiddleError::ToolMissing { tool, .. }) if tool == "git"
        ));
        assert!(shell.calls().is_empty());
    }

    #[test]
    fn unexpected_gist_output_fails() {
        let (_tmp, settings) = workspace(&["fiddle.js"]);
        let shell = repo_without_origin().respond("gist fiddle.js", 1, "Error: Bad credentials");
        let err = publish(&shell, &settings).unwrap_err();
        match err.downcast_ref::<FiddleError>() {
            Some(FiddleError::PublishFailed(out)) => assert!(out.contains("Bad credentials")),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!shell.invoked("git remote add origin"));
    }

    #[test]
    fn no_fiddle_files_fails_before_gist() {
        let (_tmp, settings) = workspace(&["README.md"]);
        let shell = repo_without_origin();
        let err = publish(&shell, &settings).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FiddleError>(),
            Some(FiddleError::NoFiddleFiles)
        ));
        assert!(!shell.invoked("gist"));
    }

    #[test]
    fn failed_push_stops_with_command_error() {
        let (_tmp, settings) = workspace(&["fiddle.js"]);
        let shell = repo_without_origin()
            .respond("gist fiddle.js", 0, GIST_URL)
            .respond("git push -u origin HEAD:master", 1, "");
        let err = publish(&shell, &settings).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FiddleError>(),
            Some(FiddleError::CommandFailed { command, .. }) if command == "git push -u origin HEAD:master"
        ));
    }

    #[test]
    fn custom_branch_is_used_for_push() {
        let (_tmp, mut settings) = workspace(&["fiddle.js"]);
        settings.gist_branch = "main".into();
        let shell = repo_without_origin().respond("gist fiddle.js", 0, GIST_URL);
        publish(&shell, &settings).unwrap();
        assert_eq!(shell.calls().last().unwrap(), "git push -u origin HEAD:main");
    }

    #[test]
    fn fiddle_files_lists_matching_files_sorted() {
        let (tmp, _settings) = workspace(&["fiddle.manifest", "fiddle.js", "other.js", "fiddle"]);
        fs::create_dir(tmp.path().join("fiddle.d")).unwrap();
        assert_eq!(
            fiddle_files(tmp.path()).unwrap(),
            vec!["fiddle.js", "fiddle.manifest"]
        );
    }
}
