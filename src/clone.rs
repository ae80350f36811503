//! 克隆公开的 JSFiddle：
//! - 校验链接形如 `jsfiddle.net/<user>/<id>[/]`
//! - 通过无头浏览器抓取 `/show` 页面中第一个 iframe 的渲染结果
//! - 从 HTML 中拆出脚本、正文、样式，写为 fiddle.js / fiddle.html / fiddle.css

use std::{fs, io::Write, path::Path};

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

use crate::{
    error::FiddleError,
    shell::{Mode, Shell},
    utils::strip_trailing_slash,
};

// 输出第一个 iframe HTML 的 casperjs 脚本
const FETCH_FRAME_SCRIPT: &str = include_str!("assets/fetch_frame.js");

static FIDDLE_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"jsfiddle\.net/[^/]+?/[^/]+?/?$").expect("valid fiddle link pattern"));

// JSFiddle 把用户脚本包在 //<![CDATA[ ... //]]> 中
static CDATA_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)//<!\[CDATA\[(.+)//\]\]>").expect("valid cdata pattern"));

/// 校验过的 JSFiddle 链接
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FiddleLink(String);

impl FiddleLink {
    pub(crate) fn parse(link: &str) -> Result<Self, FiddleError> {
        let link = link.trim();
        if !FIDDLE_LINK_RE.is_match(link) {
            return Err(FiddleError::InvalidLink(link.to_string()));
        }
        Ok(Self(link.to_string()))
    }

    /// 结果页地址：去掉末尾 `/` 后追加 `/show`
    pub(crate) fn show_url(&self) -> String {
        format!("{}/show", strip_trailing_slash(&self.0))
    }
}

/// 从页面拆出的三部分，空字符串表示该部分不存在
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct FiddleBundle {
    pub(crate) html: String,
    pub(crate) css: String,
    pub(crate) js: String,
}

impl FiddleBundle {
    pub(crate) fn extract(page: &str) -> Result<Self, FiddleError> {
        let doc = Html::parse_document(page);
        let script_sel = selector("script")?;
        let body_sel = selector("body")?;
        let style_sel = selector("style")?;

        // 只认包含 CDATA 载荷的 <script>，外链脚本没有文本
        let mut payloads = doc.select(&script_sel).filter_map(|el| {
            let text: String = el.text().collect();
            CDATA_RE
                .captures(&text)
                .map(|c| (el, c[1].trim().to_string()))
        });
        let (script_el, js) = payloads
            .next()
            .ok_or_else(|| FiddleError::Extraction("未找到 CDATA 包裹的脚本".into()))?;
        if payloads.next().is_some() {
            return Err(FiddleError::Extraction("页面中有多个脚本载荷".into()));
        }

        let body = doc
            .select(&body_sel)
            .next()
            .ok_or_else(|| FiddleError::Extraction("未找到 <body>".into()))?;
        let html = body
            .inner_html()
            .replace(&script_el.html(), "")
            .trim()
            .to_string();

        let mut styles = doc.select(&style_sel);
        let css = match (styles.next(), styles.next()) {
            (None, _) => String::new(),
            (Some(el), None) => el.text().collect::<String>().trim().to_string(),
            (Some(_), Some(_)) => {
                return Err(FiddleError::Extraction("页面中有多个 <style>".into()));
            }
        };

        Ok(Self { html, css, js })
    }

    /// 写出非空部分，返回写出的文件名
    pub(crate) fn write_to(&self, root: &Path) -> Result<Vec<&'static str>> {
        let mut files = Vec::new();
        for (name, content) in [
            ("fiddle.html", &self.html),
            ("fiddle.css", &self.css),
            ("fiddle.js", &self.js),
        ] {
            if content.is_empty() {
                continue;
            }
            let path = root.join(name);
            fs::write(&path, content).with_context(|| format!("写入失败: {}", path.display()))?;
            files.push(name);
        }
        Ok(files)
    }
}

fn selector(css: &'static str) -> Result<Selector, FiddleError> {
    Selector::parse(css).map_err(|e| FiddleError::Extraction(format!("选择器 {}: {:?}", css, e)))
}

/// 运行无头浏览器脚本，返回 iframe 的 HTML
pub(crate) fn fetch_rendered(shell: &dyn Shell, browser: &str, show_url: &str) -> Result<String> {
    if !shell.has_program(browser) {
        return Err(FiddleError::tool_missing(browser, "请先安装 casperjs（http://casperjs.org/）").into());
    }

    let mut script = tempfile::Builder::new()
        .prefix("fiddle-frame-")
        .suffix(".js")
        .tempfile()
        .context("创建浏览器脚本临时文件失败")?;
    script.write_all(FETCH_FRAME_SCRIPT.as_bytes())?;
    script.flush()?;
    let script_path = script.path().to_string_lossy().into_owned();

    let out = shell.run(browser, &[script_path.as_str(), show_url], Mode::Silent)?;
    if !out.success() {
        return Err(FiddleError::Extraction(format!(
            "{} 退出码 {}: {}",
            browser,
            out.status,
            out.stderr.trim()
        ))
        .into());
    }
    if out.stdout.trim().is_empty() {
        return Err(FiddleError::Extraction("未获取到 iframe 内容".into()).into());
    }
    Ok(out.stdout)
}

/// 校验链接、抓取并拆分页面。链接无效时不会启动任何进程。
pub(crate) fn clone_fiddle(shell: &dyn Shell, browser: &str, link: &str) -> Result<FiddleBundle> {
    let link = FiddleLink::parse(link)?;
    let url = link.show_url();
    println!("[>] 抓取 {}", url);
    let page = fetch_rendered(shell, browser, &url)?;
    Ok(FiddleBundle::extract(&page)?)
}
