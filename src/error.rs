//! 领域错误：各子命令中断执行时的错误分类

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum FiddleError {
    /// 链接不是 `jsfiddle.net/<user>/<id>` 形式
    #[error("无效的 JSFiddle 链接: {0}（示例: http://jsfiddle.net/garryyao/bT4Lc/）")]
    InvalidLink(String),

    /// 依赖的外部命令不在 PATH 中
    #[error("缺少外部命令 `{tool}`，{hint}")]
    ToolMissing { tool: String, hint: &'static str },

    /// gist 命令执行了，但输出中没有 Gist 地址
    #[error("创建 Gist 失败，gist 输出:\n{0}")]
    PublishFailed(String),

    #[error("当前目录还不是 Gist 仓库，请先运行 \"fiddle publish\"")]
    NotPublished,

    /// 抓取到的页面缺少预期的脚本/样式/正文结构
    #[error("无法从页面提取 fiddle: {0}")]
    Extraction(String),

    /// 已有非 Gist 的 origin，无法登记新建的 Gist
    #[error("remote `origin` 已指向 {0}，请先移除或重命名该 remote 再发布")]
    OriginTaken(String),

    #[error("当前目录没有可发布的 fiddle.* 文件")]
    NoFiddleFiles,

    #[error("命令 `{command}` 执行失败（退出码 {status}）: {stderr}")]
    CommandFailed {
        command: String,
        status: i32,
        stderr: String,
    },
}

impl FiddleError {
    pub(crate) fn tool_missing(tool: &str, hint: &'static str) -> Self {
        FiddleError::ToolMissing {
            tool: tool.to_string(),
            hint,
        }
    }
}
