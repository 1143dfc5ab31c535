// bases/tapeshelf/src/walker.rs
use crate::config::Config;
use crate::error::Result;
use crate::fs_ops;
use crate::modes::{Dispatcher, Outcome};
use dir_catalog::{DirListing, DirectoryContext};
use external_tools::ToolRunner;
use std::fmt;
use std::path::{Path, PathBuf};

/// Counts reported when a walk finishes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub visited: usize,
    pub matched: usize,
    pub skipped: usize,
    pub deleted: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} directories visited, {} processed, {} skipped, {} deleted",
            self.visited, self.matched, self.skipped, self.deleted
        )
    }
}

/// Depth-first, pre-order walk from the configured root.
///
/// Each directory is listed before its pipeline runs, so directories a
/// pipeline creates are not visited in the same run. Deletions wait until
/// the whole tree has been walked.
pub struct Walker<'a> {
    dispatcher: Dispatcher<'a>,
    pending_deletions: Vec<PathBuf>,
    summary: Summary,
}

impl<'a> Walker<'a> {
    pub fn new(config: &'a Config, runner: &'a dyn ToolRunner) -> Self {
        Self {
            dispatcher: Dispatcher::new(config, runner),
            pending_deletions: Vec::new(),
            summary: Summary::default(),
        }
    }

    pub fn run(mut self) -> Result<Summary> {
        let mut stack = vec![self.dispatcher.config.root.clone()];

        while let Some(dir) = stack.pop() {
            let listing = DirListing::read(&dir)?;
            self.visit(&dir, &listing)?;
            stack.extend(listing.subdirs.into_iter().rev());
        }

        self.flush_deletions()?;
        tracing::info!("{}", self.summary);
        Ok(self.summary)
    }

    fn visit(&mut self, dir: &Path, listing: &DirListing) -> Result<()> {
        self.summary.visited += 1;

        let mut ctx = DirectoryContext::new(dir);
        if !ctx.is_audio() {
            return Ok(());
        }

        match self.dispatcher.run(&mut ctx, listing)? {
            Outcome::NotSelected => {}
            Outcome::Skipped(reason) => {
                self.summary.skipped += 1;
                tracing::info!("Skipping {}: {}", dir.display(), reason);
            }
            Outcome::Done => self.summary.matched += 1,
            Outcome::Delete(path) => {
                self.summary.matched += 1;
                self.pending_deletions.push(path);
            }
        }
        Ok(())
    }

    fn flush_deletions(&mut self) -> Result<()> {
        let dry_run = self.dispatcher.config.dry_run;
        for path in std::mem::take(&mut self.pending_deletions) {
            if dry_run {
                tracing::info!("Would delete {}", path.display());
                continue;
            }
            if !path.exists() {
                continue;
            }
            tracing::info!("Deleting {}", path.display());
            fs_ops::remove_dir(&path)?;
            self.summary.deleted += 1;
        }
        Ok(())
    }
}
