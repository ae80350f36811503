//! Gist 远程仓库识别：
//! - 从 `git remote -v` 输出中查找 Gist 地址
//! - 从 Gist 地址中提取 Gist ID
//!
//! 匹配规则与进程执行分离，纯函数部分可单独测试。

use once_cell::sync::Lazy;
use regex::Regex;

use crate::shell::{Mode, Shell};

// https://gist.github.com/<id> 或 https://gist.github.com/<user>/<id>
static GIST_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"https://gist\.github\.com/(?:[\w-]+/)?([0-9A-Za-z]+)")
        .expect("valid gist url pattern")
});

/// 在任意文本中查找第一个 Gist 地址
pub(crate) fn find_gist_url(text: &str) -> Option<String> {
    GIST_URL_RE.find(text).map(|m| m.as_str().to_string())
}

/// 提取 Gist 地址末尾的 ID
pub(crate) fn gist_id_from_url(url: &str) -> Option<String> {
    GIST_URL_RE
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// 基于当前工作副本的 git remote 配置判断是否为 Gist 仓库。
/// 每次调用都重新查询，不做缓存。
pub(crate) struct GistLocator<'a> {
    shell: &'a dyn Shell,
}

impl<'a> GistLocator<'a> {
    pub(crate) fn new(shell: &'a dyn Shell) -> Self {
        Self { shell }
    }

    pub(crate) fn remote_url(&self) -> Option<String> {
        let out = match self.shell.run("git", &["remote", "-v"], Mode::Silent) {
            Ok(out) => out,
            Err(e) => {
                tracing::debug!(error = %e, "无法读取 git remote");
                return None;
            }
        };
        if !out.success() {
            return None;
        }
        find_gist_url(&out.stdout)
    }

    pub(crate) fn gist_id(&self) -> Option<String> {
        let url = self.remote_url()?;
        gist_id_from_url(&url)
    }
}
