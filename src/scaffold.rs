//! 模板脚手架：
//! - 模板集合在编译期内置（include_dir）
//! - 只补齐缺失的文件，已存在的本地文件保持不动

use anyhow::{anyhow, Context, Result};
use include_dir::{include_dir, Dir};
use std::{
    fs,
    path::{Path, PathBuf},
};

static TEMPLATES_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// 可用的模板集合（`fiddle init <sub>`）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Template {
    /// 普通 JSFiddle 项目
    Jsfiddle,
    /// ES6（Babel + Webpack）
    Babel,
    /// ES6（Babel + Webpack）+ SASS
    BabelSass,
}

impl Template {
    pub(crate) fn from_sub(name: &str) -> Option<Self> {
        match name.trim() {
            "jsfiddle" => Some(Template::Jsfiddle),
            "babel" => Some(Template::Babel),
            "babel_sass" => Some(Template::BabelSass),
            _ => None,
        }
    }

    fn dir_name(self) -> &'static str {
        match self {
            Template::Jsfiddle => "jsfiddle",
            Template::Babel => "babel_webpack",
            Template::BabelSass => "babel_sass_webpack",
        }
    }
}

/// 将模板写入 `root`，返回新建文件的相对路径
pub(crate) fn scaffold(template: Template, root: &Path) -> Result<Vec<PathBuf>> {
    let dir = TEMPLATES_DIR
        .get_dir(template.dir_name())
        .ok_or_else(|| anyhow!("内置模板缺失: {}", template.dir_name()))?;
    if !root.exists() {
        fs::create_dir_all(root).with_context(|| format!("创建目录失败: {}", root.display()))?;
    }
    let mut created = Vec::new();
    copy_missing(dir, dir.path(), root, &mut created)?;
    Ok(created)
}

fn copy_missing(dir: &Dir, base: &Path, root: &Path, created: &mut Vec<PathBuf>) -> Result<()> {
    for f in dir.files() {
        let rel = f.path().strip_prefix(base)?;
        let out_path = root.join(rel);
        if out_path.exists() {
            tracing::debug!(path = %rel.display(), "已存在，跳过");
            continue;
        }
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&out_path, f.contents())
            .with_context(|| format!("写出模板文件失败: {}", out_path.display()))?;
        println!("[>] 添加 {}", rel.display());
        created.push(rel.to_path_buf());
    }
    for sub in dir.dirs() {
        copy_missing(sub, base, root, created)?;
    }
    Ok(())
}
