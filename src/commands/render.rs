use anyhow::Result;

use crate::commands::CommandReport;
use crate::tweets::index::load_index;
use crate::tweets::paths::HarvestPaths;
use crate::tweets::present::{render_post, tweet_info};

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub post_id: String,
}

pub fn run(paths: &HarvestPaths, opts: &RenderOptions) -> Result<CommandReport> {
    let mut report = CommandReport::new("render");
    let index = load_index(&paths.index_file)?;

    let Some(record) = tweet_info(&index, &opts.post_id) else {
        report.issue(format!(
            "post {} is not in {}",
            opts.post_id,
            paths.index_file.display()
        ));
        return Ok(report);
    };

    let post = render_post(record)?;
    report.detail(format!("href={}", post.record.permalink));
    report.detail(format!("content={}", post.content));
    report.detail(format!("created={}", post.created.content));
    report.detail(format!("captured={}", post.captured.content));
    report.detail(format!("actions.like={}", post.actions.like_href));
    report.detail(format!("actions.retweet={}", post.actions.retweet_href));
    report.detail(format!("actions.reply={}", post.actions.reply_href));
    Ok(report)
}
