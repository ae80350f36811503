//! 命令调度模块：
//! - 接收解析好的 CLI 参数，与环境变量合并为 `Settings`（CLI > 环境变量 > 默认值）
//! - 调用脚手架、克隆、发布、打开等模块

use anyhow::Result;
use std::path::PathBuf;

use crate::{
    cli::{Cli, Command},
    clone::clone_fiddle,
    config::Settings,
    manifest::{self, Manifest},
    open::{open_gist, run_fiddle},
    publish::{publish, PublishOutcome},
    scaffold::{scaffold, Template},
    shell::SystemShell,
    utils::env_opt_path,
};

/// 运行指定的子命令
pub(crate) fn run(cli: Cli) -> Result<()> {
    let root = cli
        .dir
        .or_else(|| env_opt_path("FIDDLE_DIR"))
        .unwrap_or_else(|| PathBuf::from("."));
    let mut settings = Settings::from_env(root);
    tracing::debug!(?settings, "有效配置");

    match cli.command {
        Command::Init { subs, prompt } => init(&settings, &subs, prompt),
        Command::Clone { link, browser } => {
            if let Some(b) = browser {
                settings.browser_bin = b;
            }
            let shell = SystemShell::new(&settings.root);
            let bundle = clone_fiddle(&shell, &settings.browser_bin, &link)?;
            let files = bundle.write_to(&settings.root)?;
            println!("[ok] 已克隆 {} 个 fiddle 文件: {}", files.len(), files.join(","));
            Ok(())
        }
        Command::Publish { gist_bin, branch } => {
            if let Some(g) = gist_bin {
                settings.gist_bin = g;
            }
            if let Some(b) = branch {
                settings.gist_branch = b;
            }
            let shell = SystemShell::new(&settings.root);
            match publish(&shell, &settings)? {
                PublishOutcome::Created { url } => println!("[ok] 已创建公开 Gist: {}", url),
                PublishOutcome::AlreadyGist { url } => println!(
                    "[>] 工作副本已经是 Gist 仓库（{}），直接提交并推送即可",
                    url
                ),
            }
            Ok(())
        }
        Command::Open { print } => {
            settings.print_only |= print;
            let shell = SystemShell::new(&settings.root);
            open_gist(&shell, &settings)?;
            Ok(())
        }
        Command::Run { print, runner_host } => {
            settings.print_only |= print;
            if let Some(h) = runner_host {
                settings.runner_host = h;
            }
            let shell = SystemShell::new(&settings.root);
            run_fiddle(&shell, &settings)?;
            Ok(())
        }
    }
}

/// 依次处理每个模板名，未知名称只提示不中断
fn init(settings: &Settings, subs: &[String], prompt: bool) -> Result<()> {
    for sub in subs {
        let Some(template) = Template::from_sub(sub) else {
            eprintln!("[error] {}", unknown_sub_message(sub));
            continue;
        };
        let created = scaffold(template, &settings.root)?;
        println!("[ok] 已为 {} 生成文件（新增 {} 个）", sub, created.len());

        if prompt && template == Template::Jsfiddle {
            let defaults = Manifest::load(&settings.root)?.unwrap_or_default();
            let path = manifest::prompt(&defaults)?.save(&settings.root)?;
            println!("[ok] 写入 {}", path.display());
        }
    }
    Ok(())
}

fn unknown_sub_message(sub: &str) -> String {
    format!("unknown sub: {}", sub)
}
