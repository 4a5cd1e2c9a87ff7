use log::{debug, error, info, warn};
use tokio::time::sleep;

use crate::core::catalog::{Catalog, CatalogLookup};
use crate::core::forum::Forum;
use crate::core::matcher::{Matcher, MentionScan};
use crate::core::store::ServicedStore;
use crate::error::coursebot::CourseBotError;
use crate::model::config::BotSettings;
use crate::model::course::{CourseCode, CourseDescription};
use crate::model::item::MonitoredItem;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NoMention,
    Ambiguous(usize),
    Suppressed,
    OwnPost,
}

/// What [`CourseBot::check_item`] decided for one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Skipped(SkipReason),
    AlreadyServiced,
    Replied(CourseCode),
    /// Nothing to post; the item is still marked serviced.
    NoDescription(CourseCode),
    /// Not marked, so a later cycle tries again.
    ReplyFailed(CourseCode),
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub checked: usize,
    pub replied: usize,
    pub failed: usize,
}

pub fn format_reply(code: &CourseCode, description: &CourseDescription, source_link: &str) -> String {
    format!(
        "###{} - {}:\n\n{}\n\n[Source Code]({})",
        code.upper(),
        description.title,
        description.body,
        source_link
    )
}

/// Everything the bot needs between cycles, built once at startup.
pub struct CourseBot<F: Forum, S: ServicedStore> {
    matcher: Matcher,
    catalog: Catalog,
    forum: F,
    store: S,
    settings: BotSettings,
}

impl<F: Forum, S: ServicedStore> CourseBot<F, S> {
    pub fn new(catalog: Catalog, forum: F, store: S, settings: BotSettings) -> Self {
        CourseBot {
            matcher: Matcher::new(),
            catalog,
            forum,
            store,
            settings,
        }
    }

    pub fn forum(&self) -> &F {
        &self.forum
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn settings(&self) -> &BotSettings {
        &self.settings
    }

    /// Runs one item through the gates and replies if they all pass.
    ///
    /// Cheap local gates go first so the store is only queried for items that
    /// would otherwise get a reply.
    pub async fn check_item(&self, item: &MonitoredItem) -> Result<Dispatch, CourseBotError> {
        let code = match self.matcher.scan(item) {
            MentionScan::Single(code) => code,
            MentionScan::None => return Ok(Dispatch::Skipped(SkipReason::NoMention)),
            MentionScan::Ambiguous(count) => {
                debug!("{} mentions {} courses, skipping", item.id, count);
                return Ok(Dispatch::Skipped(SkipReason::Ambiguous(count)));
            }
            MentionScan::Suppressed => {
                debug!("{} looks like a grade discussion, skipping", item.id);
                return Ok(Dispatch::Skipped(SkipReason::Suppressed));
            }
        };

        if item.author.eq_ignore_ascii_case(&self.settings.name) {
            return Ok(Dispatch::Skipped(SkipReason::OwnPost));
        }

        if self.store.is_serviced(&item.id).await? {
            debug!("{} already serviced", item.id);
            return Ok(Dispatch::AlreadyServiced);
        }

        let dispatch = match self.catalog.lookup(&code).await {
            CatalogLookup::Found(description) => {
                let reply = format_reply(&code, &description, &self.settings.source_link);
                if let Err(err) = self.forum.reply(item, &reply).await {
                    error!("Replying to {} failed: {}", item.fullname, err);
                    sleep(self.settings.reply_pause()).await;
                    return Ok(Dispatch::ReplyFailed(code));
                }
                info!("Replied to {}:\n{}", item.fullname, reply);
                Dispatch::Replied(code)
            }
            CatalogLookup::NotListed => {
                info!("No catalog entry for {} ({})", code.upper(), item.id);
                Dispatch::NoDescription(code)
            }
            CatalogLookup::Unreachable(reason) => {
                warn!("Catalog unreachable for {} ({}): {}", code.upper(), item.id, reason);
                Dispatch::NoDescription(code)
            }
        };

        self.store.mark_serviced(&item.id).await?;
        sleep(self.settings.reply_pause()).await;
        Ok(dispatch)
    }

    async fn check_batch(&self, items: &[MonitoredItem], report: &mut CycleReport) {
        for item in items {
            report.checked += 1;
            match self.check_item(item).await {
                Ok(Dispatch::Replied(_)) => report.replied += 1,
                Ok(Dispatch::ReplyFailed(_)) => report.failed += 1,
                Ok(_) => {}
                Err(err) => {
                    report.failed += 1;
                    warn!("Checking {} failed: {}", item.id, err);
                }
            }
        }
    }

    /// One poll: newest comments, then the newest submissions.
    ///
    /// A failing item is logged and skipped; a failing listing ends the cycle.
    pub async fn run_cycle(&self) -> Result<CycleReport, CourseBotError> {
        let mut report = CycleReport::default();

        let comments = self.forum.newest_comments().await?;
        self.check_batch(&comments, &mut report).await;

        let submissions = self
            .forum
            .newest_submissions(self.settings.submission_limit)
            .await?;
        self.check_batch(&submissions, &mut report).await;

        Ok(report)
    }

    /// Polls forever. Cycle failures are logged and retried after the usual
    /// interval, including bad credentials.
    pub async fn run(&self) {
        loop {
            match self.run_cycle().await {
                Ok(report) => info!(
                    "Cycle done: {} checked, {} replied, {} failed",
                    report.checked, report.replied, report.failed
                ),
                Err(err) => error!("Cycle failed: {}", err),
            }
            sleep(self.settings.poll_interval()).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_layout() {
        let description = CourseDescription {
            title: "Introduction to Computer Science I".to_string(),
            body: "Programming in Python.".to_string(),
        };
        let reply = format_reply(&CourseCode::new("csc108h1"), &description, "https://example.org/src");
        assert_eq!(
            reply,
            "###CSC108H1 - Introduction to Computer Science I:\n\nProgramming in Python.\n\n[Source Code](https://example.org/src)"
        );
    }
}
