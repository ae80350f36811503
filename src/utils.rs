//! 通用辅助函数：
//! - 环境变量读取与解析
//! - 文本到布尔值的解析工具

use std::{env, path::PathBuf};

/// 可选读取 PATH 环境变量为 PathBuf（空值视为未设置）。
pub(crate) fn env_opt_path(key: &str) -> Option<PathBuf> {
    env_opt_string(key).map(PathBuf::from)
}

/// 可选读取 String 环境变量。
pub(crate) fn env_opt_string(key: &str) -> Option<String> {
    env::var(key).ok().map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// 读取布尔环境变量的真值（1/true/on/yes/y），无法识别时为 None。
pub(crate) fn env_bool_truthy(key: &str) -> Option<bool> {
    env::var(key).ok().and_then(|v| parse_truthy(&v))
}

pub(crate) fn parse_truthy(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" | "y" => Some(true),
        "0" | "false" | "off" | "no" | "n" => Some(false),
        _ => None,
    }
}

/// 去掉末尾的一个 `/`
pub(crate) fn strip_trailing_slash(s: &str) -> &str {
    s.strip_suffix('/').unwrap_or(s)
}
