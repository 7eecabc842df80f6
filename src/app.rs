//! The report pipeline.
//!
//! check git → load projects → choose project → resolve address →
//! clone lifecycle { remember project → list pages → choose page →
//! history → aggregate → write report → open report }.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::Settings;
use crate::error::{AppError, Result};
use crate::git::pages::page_file;
use crate::git::{CloneLifecycle, CommandRunner, RepoLocation, RunContext, WikiRepository};
use crate::projects::{ProjectEntry, ProjectStore};
use crate::prompt::Prompter;
use crate::report;

const VCS_TOOL: &str = "git";
const NO_PROJECT_CHOICE: &str = "(none)";

pub struct WikiDiff<'a, R: CommandRunner + ?Sized, I, O> {
    runner: &'a R,
    settings: &'a Settings,
    prompter: Prompter<I, O>,
    context: RunContext,
}

impl<'a, R, I, O> WikiDiff<'a, R, I, O>
where
    R: CommandRunner + ?Sized,
    I: BufRead,
    O: Write,
{
    pub fn new(
        runner: &'a R,
        settings: &'a Settings,
        prompter: Prompter<I, O>,
        context: RunContext,
    ) -> Self {
        Self {
            runner,
            settings,
            prompter,
            context,
        }
    }

    /// Run the whole pipeline and return the path of the written report.
    pub fn run(&mut self) -> Result<PathBuf> {
        self.runner.assert_available(VCS_TOOL)?;

        let mut store = ProjectStore::open(&self.settings.config_dir)?;
        let identifier = choose_project(&mut self.prompter, store.entries())?;
        let location = RepoLocation::resolve(&identifier, &self.settings.base_url)?;
        info!(
            "using wiki of {} (source {})",
            location.web_address(),
            location.source_address()
        );

        let runner = self.runner;
        let settings = self.settings;
        let prompter = &mut self.prompter;
        let mut lifecycle = CloneLifecycle::new(runner, self.context.clone(), &settings.work_dir);

        let result = lifecycle.run(&location.wiki_address(), |clone_dir| {
            store.remember(&identifier)?;

            let wiki = WikiRepository::open(runner, clone_dir);
            let pages = wiki.list_pages()?;
            if pages.is_empty() {
                return Err(AppError::NoWikiPages(location.wiki_address()));
            }
            let choice = prompter.select("Choose a wiki page:", &pages)?;
            let file_path = page_file(&pages[choice]);

            let commits = wiki.history(&file_path, settings.history_limit)?;
            let diff_report = wiki.aggregate(&commits, &file_path)?;
            debug!("report has {} segments", diff_report.segments().len());

            let report_path = report::write_report(&diff_report, &settings.config_dir)?;
            if settings.open_report {
                report::open_report(runner, &report_path)?;
            }
            Ok(report_path)
        });
        debug!(state = ?lifecycle.state(), "clone lifecycle finished");
        result
    }
}

fn choose_project<I: BufRead, O: Write>(
    prompter: &mut Prompter<I, O>,
    known: &[ProjectEntry],
) -> Result<String> {
    const ENTER_PROJECT: &str = "Enter your GitLab project name/address:";

    let identifier = if known.is_empty() {
        prompter.ask(ENTER_PROJECT)?
    } else {
        let choices: Vec<String> = std::iter::once(NO_PROJECT_CHOICE.to_string())
            .chain(known.iter().map(|e| e.name.clone()))
            .collect();
        match prompter.select("Choose your GitLab project name/address:", &choices)? {
            0 => prompter.ask(ENTER_PROJECT)?,
            n => known[n - 1].value.clone(),
        }
    };

    let identifier = identifier.trim().to_string();
    if identifier.is_empty() {
        return Err(AppError::NoProjectSelected);
    }
    Ok(identifier)
}
