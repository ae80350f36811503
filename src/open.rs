//! 打开 Gist 页面或 JSFiddle 运行页

use anyhow::{Context, Result};
use url::Url;

use crate::{config::Settings, error::FiddleError, gist::GistLocator, shell::Shell};

/// 当前工作副本对应的 Gist 页面
pub(crate) fn gist_page_url(shell: &dyn Shell) -> Result<String, FiddleError> {
    GistLocator::new(shell)
        .remote_url()
        .ok_or(FiddleError::NotPublished)
}

/// JSFiddle 加载 Gist 的地址：`<host>/gh/gist/library/pure/<id>/`，保留 host 中的路径前缀
pub(crate) fn runner_url(host: &str, gist_id: &str) -> Result<Url> {
    let mut base = host.trim().to_string();
    // 以 `/` 结尾，相对 join 才不会替换掉最后一段路径
    if !base.ends_with('/') {
        base.push('/');
    }
    let base = Url::parse(&base).with_context(|| format!("无效的运行地址: {}", host))?;
    let url = base.join(&format!("gh/gist/library/pure/{}/", gist_id))?;
    Ok(url)
}

pub(crate) fn open_gist(shell: &dyn Shell, settings: &Settings) -> Result<String> {
    let url = gist_page_url(shell)?;
    launch(&url, settings.print_only)?;
    Ok(url)
}

pub(crate) fn run_fiddle(shell: &dyn Shell, settings: &Settings) -> Result<String> {
    let id = GistLocator::new(shell)
        .gist_id()
        .ok_or(FiddleError::NotPublished)?;
    let url = runner_url(&settings.runner_host, &id)?.to_string();
    launch(&url, settings.print_only)?;
    Ok(url)
}

fn launch(url: &str, print_only: bool) -> Result<()> {
    if print_only {
        println!("{}", url);
        return Ok(());
    }
    println!("[>] 打开 {}", url);
    webbrowser::open(url).with_context(|| format!("无法打开浏览器: {}", url))?;
    Ok(())
}
