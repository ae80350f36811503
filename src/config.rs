//! 运行配置：
//! - `Settings` 显式传给每个子命令，不依赖全局状态
//! - 默认值与环境变量覆盖（CLI 参数在 commands 中再覆盖一层）

use std::path::PathBuf;

use crate::utils::{env_bool_truthy, env_opt_string};

pub(crate) const DEFAULT_BROWSER: &str = "casperjs";
pub(crate) const DEFAULT_GIST_BIN: &str = "gist";
pub(crate) const DEFAULT_RUNNER_HOST: &str = "http://jsfiddle.net";
pub(crate) const DEFAULT_GIST_BRANCH: &str = "master";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Settings {
    /// 工作目录（fiddle 文件与 git 仓库所在目录）
    pub(crate) root: PathBuf,
    /// 无头浏览器命令，用于抓取 JSFiddle 页面
    pub(crate) browser_bin: String,
    /// 创建 Gist 的命令行工具
    pub(crate) gist_bin: String,
    /// JSFiddle 运行地址，`run` 在其后拼接 `/gh/gist/library/pure/<id>/`
    pub(crate) runner_host: String,
    /// 推送到 Gist 的分支
    pub(crate) gist_branch: String,
    /// 只打印 URL，不打开浏览器
    pub(crate) print_only: bool,
}

impl Settings {
    /// 内置默认值
    pub(crate) fn new(root: PathBuf) -> Self {
        Self {
            root,
            browser_bin: DEFAULT_BROWSER.to_string(),
            gist_bin: DEFAULT_GIST_BIN.to_string(),
            runner_host: DEFAULT_RUNNER_HOST.to_string(),
            gist_branch: DEFAULT_GIST_BRANCH.to_string(),
            print_only: false,
        }
    }

    /// 默认值 + 环境变量覆盖：
    /// FIDDLE_BROWSER / FIDDLE_GIST_BIN / FIDDLE_RUNNER_HOST / FIDDLE_GIST_BRANCH / FIDDLE_PRINT_ONLY
    pub(crate) fn from_env(root: PathBuf) -> Self {
        let mut s = Self::new(root);
        if let Some(v) = env_opt_string("FIDDLE_BROWSER") {
            s.browser_bin = v;
        }
        if let Some(v) = env_opt_string("FIDDLE_GIST_BIN") {
            s.gist_bin = v;
        }
        if let Some(v) = env_opt_string("FIDDLE_RUNNER_HOST") {
            s.runner_host = v;
        }
        if let Some(v) = env_opt_string("FIDDLE_GIST_BRANCH") {
            s.gist_branch = v;
        }
        s.print_only = env_bool_truthy("FIDDLE_PRINT_ONLY").unwrap_or(false);
        s
    }
}
