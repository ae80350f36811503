//! CLI 定义模块：仅负责命令行参数结构体与解析
//! 将 clap 的声明与业务逻辑解耦，参数在 commands 中合并为 `Settings`。

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// 顶层 CLI 入口
#[derive(Parser, Debug)]
#[command(name = "fiddle", about = "本地 JSFiddle 项目：模板、克隆、发布为 Gist", version)]
pub(crate) struct Cli {
    /// 工作目录，默认当前目录（环境变量 FIDDLE_DIR）
    #[arg(short = 'C', long = "dir", value_name = "DIR", global = true)]
    pub(crate) dir: Option<PathBuf>,
    /// 输出调试日志
    #[arg(short, long, global = true)]
    pub(crate) verbose: bool,
    #[command(subcommand)]
    pub(crate) command: Command,
}

/// 子命令定义
#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// 用模板生成本地 fiddle 文件（jsfiddle | babel | babel_sass）
    Init {
        #[arg(value_name = "SUB", required = true)]
        subs: Vec<String>,
        /// （仅 jsfiddle）交互式填写 fiddle.manifest
        #[arg(short, long)]
        prompt: bool,
    },
    /// 从公开的 JSFiddle 链接克隆，例如 http://jsfiddle.net/garryyao/bT4Lc/
    Clone {
        #[arg(value_name = "LINK")]
        link: String,
        /// 无头浏览器命令，默认 casperjs（环境变量 FIDDLE_BROWSER）
        #[arg(long, value_name = "BIN")]
        browser: Option<String>,
    },
    /// 在 GitHub 账号下为当前 fiddle 创建公开 Gist
    Publish {
        /// gist 命令，默认 gist（环境变量 FIDDLE_GIST_BIN）
        #[arg(long, value_name = "BIN")]
        gist_bin: Option<String>,
        /// 推送的分支，默认 master（环境变量 FIDDLE_GIST_BRANCH）
        #[arg(long, value_name = "BRANCH")]
        branch: Option<String>,
    },
    /// 在浏览器中打开当前 Gist
    Open {
        /// 只打印地址，不打开浏览器
        #[arg(long)]
        print: bool,
    },
    /// 在 JSFiddle 上运行当前 Gist
    Run {
        /// 只打印地址，不打开浏览器
        #[arg(long)]
        print: bool,
        /// JSFiddle 地址，默认 http://jsfiddle.net（环境变量 FIDDLE_RUNNER_HOST）
        #[arg(long, value_name = "URL")]
        runner_host: Option<String>,
    },
}
