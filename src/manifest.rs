//! fiddle.manifest：JSFiddle 读取的 YAML 元数据
//! - 数据结构与默认值
//! - 交互式收集字段（`fiddle init jsfiddle --prompt`）
//! - 读写文件

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use dialoguer::{Input, Select};
use serde::{Deserialize, Serialize};

pub(crate) const MANIFEST_FILE: &str = "fiddle.manifest";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Manifest {
    /// fiddle 标题
    pub(crate) name: String,
    /// 单行描述
    pub(crate) description: String,
    #[serde(default)]
    pub(crate) authors: Vec<String>,
    /// 外部资源 URL 列表
    #[serde(default)]
    pub(crate) resources: Vec<String>,
    /// 是否在所有样式前加载 normalize.css
    #[serde(default)]
    pub(crate) normalize_css: NormalizeCss,
    /// JS 代码的包裹方式
    #[serde(default)]
    pub(crate) wrap: Wrap,
    #[serde(default)]
    pub(crate) panel_js: PanelJs,
    #[serde(default)]
    pub(crate) panel_css: PanelCss,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            name: "my-fiddle-name".to_string(),
            description: "Some description, please keep it in one line".to_string(),
            authors: Vec::new(),
            resources: Vec::new(),
            normalize_css: NormalizeCss::default(),
            wrap: Wrap::default(),
            panel_js: PanelJs::default(),
            panel_css: PanelCss::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum NormalizeCss {
    Yes,
    #[default]
    No,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub(crate) enum Wrap {
    #[serde(rename = "l")]
    OnLoad,
    #[serde(rename = "d")]
    DomReady,
    #[serde(rename = "h")]
    NoWrapHead,
    #[serde(rename = "b")]
    #[default]
    NoWrapBody,
}

/// JS 面板语言，文件中以数字表示
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub(crate) enum PanelJs {
    #[default]
    Vanilla,
    CoffeeScript,
    JavaScript17,
}

/// CSS 面板语言，文件中以数字表示
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub(crate) enum PanelCss {
    #[default]
    Css,
    Scss,
}

impl NormalizeCss {
    const ALL: [NormalizeCss; 2] = [NormalizeCss::Yes, NormalizeCss::No];

    fn label(self) -> &'static str {
        match self {
            NormalizeCss::Yes => "yes",
            NormalizeCss::No => "no",
        }
    }
}

impl Wrap {
    const ALL: [Wrap; 4] = [Wrap::OnLoad, Wrap::DomReady, Wrap::NoWrapHead, Wrap::NoWrapBody];

    fn label(self) -> &'static str {
        match self {
            Wrap::OnLoad => "l - onLoad",
            Wrap::DomReady => "d - domReady",
            Wrap::NoWrapHead => "h - no wrap, in <head>",
            Wrap::NoWrapBody => "b - no wrap, in <body>",
        }
    }
}

impl PanelJs {
    const ALL: [PanelJs; 3] = [PanelJs::Vanilla, PanelJs::CoffeeScript, PanelJs::JavaScript17];

    fn label(self) -> &'static str {
        match self {
            PanelJs::Vanilla => "0 - Vanilla",
            PanelJs::CoffeeScript => "1 - CoffeeScript",
            PanelJs::JavaScript17 => "2 - JavaScript 1.7",
        }
    }
}

impl PanelCss {
    const ALL: [PanelCss; 2] = [PanelCss::Css, PanelCss::Scss];

    fn label(self) -> &'static str {
        match self {
            PanelCss::Css => "0 - CSS",
            PanelCss::Scss => "1 - SCSS",
        }
    }
}

impl From<PanelJs> for u8 {
    fn from(p: PanelJs) -> u8 {
        match p {
            PanelJs::Vanilla => 0,
            PanelJs::CoffeeScript => 1,
            PanelJs::JavaScript17 => 2,
        }
    }
}

impl TryFrom<u8> for PanelJs {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(PanelJs::Vanilla),
            1 => Ok(PanelJs::CoffeeScript),
            2 => Ok(PanelJs::JavaScript17),
            other => Err(format!("panel_js 只能是 0/1/2，实际为 {}", other)),
        }
    }
}

impl From<PanelCss> for u8 {
    fn from(p: PanelCss) -> u8 {
        match p {
            PanelCss::Css => 0,
            PanelCss::Scss => 1,
        }
    }
}

impl TryFrom<u8> for PanelCss {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(PanelCss::Css),
            1 => Ok(PanelCss::Scss),
            other => Err(format!("panel_css 只能是 0/1，实际为 {}", other)),
        }
    }
}

impl Manifest {
    /// 必填字段不能为空
    pub(crate) fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            bail!("manifest 缺少 name");
        }
        if self.description.trim().is_empty() {
            bail!("manifest 缺少 description");
        }
        Ok(())
    }

    pub(crate) fn from_yaml(text: &str) -> Result<Self> {
        let m: Manifest = serde_yaml::from_str(text).context("解析 fiddle.manifest 失败")?;
        m.validate()?;
        Ok(m)
    }

    pub(crate) fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// 读取 `root/fiddle.manifest`，不存在时返回 None
    pub(crate) fn load(root: &Path) -> Result<Option<Self>> {
        let path = root.join(MANIFEST_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&path)
            .with_context(|| format!("读取 manifest 失败: {}", path.display()))?;
        Self::from_yaml(&text).map(Some)
    }

    pub(crate) fn save(&self, root: &Path) -> Result<PathBuf> {
        self.validate()?;
        let path = root.join(MANIFEST_FILE);
        fs::write(&path, self.to_yaml()?)
            .with_context(|| format!("写入 manifest 失败: {}", path.display()))?;
        Ok(path)
    }
}

/// 逐项询问 manifest 字段，以 `defaults` 作为默认值
pub(crate) fn prompt(defaults: &Manifest) -> Result<Manifest> {
    let name: String = Input::new()
        .with_prompt("title of the fiddle")
        .default(defaults.name.clone())
        .interact_text()?;
    let description: String = Input::new()
        .with_prompt("description of the fiddle")
        .default(defaults.description.clone())
        .interact_text()?;
    let authors: String = Input::new()
        .with_prompt("authors (comma separated)")
        .default(defaults.authors.join(", "))
        .allow_empty(true)
        .interact_text()?;
    let resources: String = Input::new()
        .with_prompt("external resources linked into this fiddle (comma separated)")
        .default(defaults.resources.join(", "))
        .allow_empty(true)
        .interact_text()?;

    let normalize_css = select(
        "load normalize.css before any CSS declarations?",
        &NormalizeCss::ALL,
        defaults.normalize_css,
        |v| v.label(),
    )?;
    let wrap = select("JS code wrap", &Wrap::ALL, defaults.wrap, |v| v.label())?;
    let panel_js = select("language of the javascript panel", &PanelJs::ALL, defaults.panel_js, |v| {
        v.label()
    })?;
    let panel_css = select("language of the css panel", &PanelCss::ALL, defaults.panel_css, |v| {
        v.label()
    })?;

    let manifest = Manifest {
        name: name.trim().to_string(),
        description: description.trim().to_string(),
        authors: split_list(&authors),
        resources: split_list(&resources),
        normalize_css,
        wrap,
        panel_js,
        panel_css,
    };
    manifest.validate()?;
    Ok(manifest)
}

fn select<T: Copy + PartialEq>(
    prompt: &str,
    options: &[T],
    current: T,
    label: impl Fn(T) -> &'static str,
) -> Result<T> {
    let labels: Vec<&str> = options.iter().map(|o| label(*o)).collect();
    let default = options.iter().position(|o| *o == current).unwrap_or(0);
    let idx = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(default)
        .interact()?;
    Ok(options[idx])
}

/// 逗号分隔的输入转为列表，忽略空项
pub(crate) fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
