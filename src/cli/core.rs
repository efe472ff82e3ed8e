//! Shell context, screen state and command dispatch.

use std::{fmt, io, path::PathBuf, str::FromStr};

use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use once_cell::sync::Lazy;
use rustyline::error::ReadlineError;
use strsim::levenshtein;
use thiserror::Error;
use tracing::debug;

use crate::api::{ApiError, MemoryApi};
use crate::config::{Config, ConfigManager};
use crate::core::services::{
    CategoryService, PersonService, Report, ReportKind, ReportService, ServiceError,
    TransactionService,
};
use crate::currency::{format_currency, LocaleFormat};
use crate::domain::{Category, Displayable, Person, RecordId, ReportField, Transaction};
use crate::errors::FinanceError;
use crate::listing::{
    CategoryCriteria, Filterable, ListView, PersonCriteria, Predicate, TransactionCriteria,
};

use super::commands;
use super::output;
use super::registry::CommandRegistry;
use super::render::{render_snapshot, TableColumn};

static REGISTRY: Lazy<CommandRegistry> = Lazy::new(|| {
    let mut registry = CommandRegistry::new();
    commands::register_all(&mut registry);
    registry
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Readline(#[from] ReadlineError),
    #[error(transparent)]
    Core(#[from] FinanceError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("No list is open. Use `open <categories|people|transactions|reports>` first.")]
    NoScreen,
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Core(#[from] FinanceError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<ApiError> for CommandError {
    fn from(err: ApiError) -> Self {
        CommandError::Service(ServiceError::Api(err))
    }
}

/// The list a command operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Categories,
    People,
    Transactions,
    Reports,
}

impl Screen {
    pub fn title(self) -> &'static str {
        match self {
            Screen::Categories => "Categories",
            Screen::People => "People",
            Screen::Transactions => "Transactions",
            Screen::Reports => "Reports",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title().to_lowercase())
    }
}

impl FromStr for Screen {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "categories" | "category" | "categorias" => Ok(Screen::Categories),
            "people" | "person" | "pessoas" => Ok(Screen::People),
            "transactions" | "transaction" | "transacoes" | "transações" => {
                Ok(Screen::Transactions)
            }
            "reports" | "report" | "relatorios" | "relatórios" => Ok(Screen::Reports),
            other => Err(format!(
                "unknown list `{other}` (expected categories, people, transactions or reports)"
            )),
        }
    }
}

/// A mounted record list together with the filter form that drives it.
pub(crate) struct ListScreen<R: Filterable, C> {
    pub view: ListView<R>,
    pub criteria: C,
}

impl<R: Filterable, C: Default> ListScreen<R, C> {
    fn mount(view: ListView<R>) -> Self {
        Self {
            view,
            criteria: C::default(),
        }
    }
}

/// Paging operations shared by every screen, independent of record type.
pub(crate) trait PagedList {
    fn go_to_page(&mut self, page: usize);
    fn next_page(&mut self) -> bool;
    fn previous_page(&mut self) -> bool;
}

impl<T: Filterable> PagedList for ListView<T> {
    fn go_to_page(&mut self, page: usize) {
        ListView::go_to_page(self, page);
    }

    fn next_page(&mut self) -> bool {
        ListView::next_page(self)
    }

    fn previous_page(&mut self) -> bool {
        ListView::previous_page(self)
    }
}

pub struct ShellContext {
    pub(crate) mode: CliMode,
    pub(crate) registry: &'static CommandRegistry,
    pub(crate) theme: ColorfulTheme,
    pub(crate) api: MemoryApi,
    pub(crate) config_manager: ConfigManager,
    pub(crate) config: Config,
    pub(crate) screen: Option<Screen>,
    pub(crate) categories: Option<ListScreen<Category, CategoryCriteria>>,
    pub(crate) people: Option<ListScreen<Person, PersonCriteria>>,
    pub(crate) transactions: Option<ListScreen<Transaction, TransactionCriteria>>,
    pub(crate) report: Option<Report>,
    pub(crate) running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_config_manager(mode, ConfigManager::new()?)
    }

    pub fn with_base_dir(mode: CliMode, base: PathBuf) -> Result<Self, CliError> {
        Self::with_config_manager(mode, ConfigManager::with_base_dir(base)?)
    }

    fn with_config_manager(mode: CliMode, config_manager: ConfigManager) -> Result<Self, CliError> {
        let config = config_manager.load()?;
        let data_file = config_manager.data_file(&config);
        debug!(path = %data_file.display(), "opening record snapshot");
        let api = MemoryApi::open(data_file)?;
        Ok(Self {
            mode,
            registry: &REGISTRY,
            theme: ColorfulTheme::default(),
            api,
            config_manager,
            config,
            screen: None,
            categories: None,
            people: None,
            transactions: None,
            report: None,
            running: true,
        })
    }

    pub(crate) fn mode(&self) -> CliMode {
        self.mode
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn prompt(&self) -> String {
        match self.screen {
            Some(screen) => format!("finance[{screen}]> "),
            None => "finance> ".to_string(),
        }
    }

    pub(crate) fn require_screen(&self) -> Result<Screen, CommandError> {
        self.screen.ok_or(CommandError::NoScreen)
    }

    /// Mounts `screen` with a fresh fetch: page 1 and empty filters.
    pub(crate) fn open(&mut self, screen: Screen) -> CommandResult {
        match screen {
            Screen::Categories => {
                self.categories = Some(ListScreen::mount(CategoryService::load(&self.api)?));
            }
            Screen::People => {
                self.people = Some(ListScreen::mount(PersonService::load(&self.api)?));
            }
            Screen::Transactions => {
                self.transactions = Some(ListScreen::mount(TransactionService::load(&self.api)?));
            }
            Screen::Reports => {
                let kind = self.report.as_ref().map(Report::kind).unwrap_or_default();
                self.report = Some(ReportService::load(&self.api, kind)?);
            }
        }
        self.screen = Some(screen);
        Ok(())
    }

    pub(crate) fn categories_mut(
        &mut self,
    ) -> Result<&mut ListScreen<Category, CategoryCriteria>, CommandError> {
        self.categories.as_mut().ok_or(CommandError::NoScreen)
    }

    pub(crate) fn people_mut(
        &mut self,
    ) -> Result<&mut ListScreen<Person, PersonCriteria>, CommandError> {
        self.people.as_mut().ok_or(CommandError::NoScreen)
    }

    pub(crate) fn transactions_mut(
        &mut self,
    ) -> Result<&mut ListScreen<Transaction, TransactionCriteria>, CommandError> {
        self.transactions.as_mut().ok_or(CommandError::NoScreen)
    }

    pub(crate) fn report_mut(&mut self) -> Result<&mut Report, CommandError> {
        self.report.as_mut().ok_or(CommandError::NoScreen)
    }

    pub(crate) fn active_list(&mut self) -> Result<&mut dyn PagedList, CommandError> {
        let list: &mut dyn PagedList = match self.require_screen()? {
            Screen::Categories => &mut self.categories_mut()?.view,
            Screen::People => &mut self.people_mut()?.view,
            Screen::Transactions => &mut self.transactions_mut()?.view,
            Screen::Reports => self.report_mut()?.rows_mut(),
        };
        Ok(list)
    }

    /// Drops every filter on the open screen, including the form values.
    pub(crate) fn clear_filters(&mut self) -> Result<bool, CommandError> {
        Ok(match self.require_screen()? {
            Screen::Categories => {
                let screen = self.categories_mut()?;
                screen.criteria = CategoryCriteria::default();
                screen.view.clear_filters()
            }
            Screen::People => {
                let screen = self.people_mut()?;
                screen.criteria = PersonCriteria::default();
                screen.view.clear_filters()
            }
            Screen::Transactions => {
                let screen = self.transactions_mut()?;
                screen.criteria = TransactionCriteria::default();
                screen.view.clear_filters()
            }
            Screen::Reports => self.report_mut()?.rows_mut().clear_filters(),
        })
    }

    pub(crate) fn set_report_name_filter(&mut self, query: String) -> Result<bool, CommandError> {
        Ok(self
            .report_mut()?
            .rows_mut()
            .set_filter(ReportField::Name, Predicate::text(query)))
    }

    pub(crate) fn switch_report(&mut self, kind: Option<ReportKind>) -> CommandResult {
        if self.screen != Some(Screen::Reports) || self.report.is_none() {
            self.report = Some(ReportService::load(&self.api, kind.unwrap_or_default())?);
            self.screen = Some(Screen::Reports);
            return Ok(());
        }
        let report = self.report_mut()?;
        match kind {
            Some(kind) => report.switch(kind),
            None => report.toggle(),
        }
        Ok(())
    }

    /// Display label of a record in the open list, if it is loaded.
    pub(crate) fn record_label(&self, screen: Screen, id: RecordId) -> Option<String> {
        match screen {
            Screen::Categories => self
                .categories
                .as_ref()
                .and_then(|state| CategoryService::find(&state.view, id))
                .map(Displayable::display_label),
            Screen::People => self
                .people
                .as_ref()
                .and_then(|state| PersonService::find(&state.view, id))
                .map(Displayable::display_label),
            Screen::Transactions => self
                .transactions
                .as_ref()
                .and_then(|state| TransactionService::find(&state.view, id))
                .map(Displayable::display_label),
            Screen::Reports => None,
        }
    }

    pub(crate) fn money(&self, amount: f64) -> String {
        format_currency(amount, &self.config.currency, &self.config.locale)
    }

    pub(crate) fn locale_format(&self) -> LocaleFormat {
        LocaleFormat::for_tag(&self.config.locale)
    }

    /// Prints the open screen: title, table or empty-state line, and pager.
    pub(crate) fn render(&self) -> CommandResult {
        let screen = self.require_screen()?;
        output::section(screen.title());
        let body = match screen {
            Screen::Categories => {
                let state = self.categories.as_ref().ok_or(CommandError::NoScreen)?;
                render_snapshot(
                    &state.view.snapshot(),
                    vec![
                        TableColumn::right("ID"),
                        TableColumn::left("Description"),
                        TableColumn::left("Purpose"),
                    ],
                    |category| {
                        vec![
                            category.id.to_string(),
                            category.description.clone(),
                            category.purpose.to_string(),
                        ]
                    },
                )
            }
            Screen::People => {
                let state = self.people.as_ref().ok_or(CommandError::NoScreen)?;
                output::info(format!("Age filter mode: {}", state.criteria.age.mode()));
                render_snapshot(
                    &state.view.snapshot(),
                    vec![
                        TableColumn::right("ID"),
                        TableColumn::left("Name"),
                        TableColumn::right("Age"),
                    ],
                    |person| {
                        vec![
                            person.id.to_string(),
                            person.name.clone(),
                            person.age.to_string(),
                        ]
                    },
                )
            }
            Screen::Transactions => {
                let state = self.transactions.as_ref().ok_or(CommandError::NoScreen)?;
                render_snapshot(
                    &state.view.snapshot(),
                    vec![
                        TableColumn::right("ID"),
                        TableColumn::left("Description"),
                        TableColumn::right("Amount"),
                        TableColumn::left("Kind"),
                        TableColumn::left("Person"),
                        TableColumn::left("Category"),
                    ],
                    |txn| {
                        vec![
                            txn.id.to_string(),
                            txn.description.clone(),
                            self.money(txn.amount),
                            txn.kind.to_string(),
                            txn.person_name.clone(),
                            txn.category_name.clone(),
                        ]
                    },
                )
            }
            Screen::Reports => {
                let report = self.report.as_ref().ok_or(CommandError::NoScreen)?;
                output::info(format!("Grouped by: {}", report.kind()));
                let mut body = render_snapshot(
                    &report.rows().snapshot(),
                    vec![
                        TableColumn::right("ID"),
                        TableColumn::left("Name"),
                        TableColumn::right("Income"),
                        TableColumn::right("Expense"),
                        TableColumn::right("Balance"),
                    ],
                    |row| {
                        vec![
                            row.id.to_string(),
                            row.name.clone(),
                            self.money(row.total_income),
                            self.money(row.total_expense),
                            self.money(row.balance),
                        ]
                    },
                );
                let overall = report.overall();
                body.push_str(&format!(
                    "\nOverall: income {}, expense {}, balance {}",
                    self.money(overall.total_income),
                    self.money(overall.total_expense),
                    self.money(overall.balance)
                ));
                body
            }
        };
        output::raw(body);
        Ok(())
    }

    /// Fields for `add`/`edit`: taken from the arguments, or prompted for in
    /// interactive mode when none were given.
    pub(crate) fn collect_fields(
        &self,
        args: &[&str],
        labels: &[&str],
        usage: &str,
    ) -> Result<Vec<String>, CommandError> {
        if args.len() == labels.len() {
            return Ok(args.iter().map(|arg| arg.to_string()).collect());
        }
        if args.is_empty() && self.mode == CliMode::Interactive {
            return labels
                .iter()
                .map(|label| self.prompt_text(label))
                .collect();
        }
        Err(CommandError::InvalidArguments(format!("usage: {usage}")))
    }

    pub(crate) fn prompt_text(&self, label: &str) -> Result<String, CommandError> {
        Ok(Input::<String>::with_theme(&self.theme)
            .with_prompt(label)
            .interact_text()?)
    }

    /// Asks before destructive actions; script mode never blocks.
    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(false)
            .interact()?)
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt("Exit shell?")
            .default(true)
            .interact()?)
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = crate::cli::shell::parse_command_line(line)
            .map_err(|err| CommandError::InvalidArguments(err.to_string()))?;
        let Some((first, rest)) = tokens.split_first() else {
            return Ok(LoopControl::Continue);
        };
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();
        self.dispatch(&first.to_lowercase(), first, &args)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));

        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &input.to_lowercase()), name))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                output::info(format!("Suggestion: `{name}`?"));
            }
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            CommandError::Service(service) => output::error(service.user_message()),
            CommandError::Io(io) => return Err(CliError::Io(io)),
            other => output::error(other),
        }
        Ok(())
    }
}

/// Parses a select-style filter value; empty, `any` and `all` clear it.
pub(crate) fn parse_optional<T>(value: &str) -> Result<Option<T>, CommandError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let trimmed = value.trim();
    let clears = matches!(
        trimmed.to_lowercase().as_str(),
        "" | "any" | "all" | "todos" | "todas"
    );
    if clears {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|err: T::Err| CommandError::InvalidArguments(err.to_string()))
}

pub(crate) fn parse_required<T>(value: &str, what: &str) -> Result<T, CommandError>
where
    T: FromStr,
{
    value
        .trim()
        .parse()
        .map_err(|_| CommandError::InvalidArguments(format!("invalid {what} `{value}`")))
}

/// Reads an amount typed with the locale's separators. When both `.` and `,`
/// appear the last one is the decimal mark; a lone mark is grouping only when
/// it is the locale's grouping separator followed by three-digit groups.
pub(crate) fn parse_amount(value: &str, locale: &LocaleFormat) -> Result<f64, CommandError> {
    let trimmed = value.trim();
    let has_dot = trimmed.contains('.');
    let has_comma = trimmed.contains(',');
    let decimal = if has_dot && has_comma {
        trimmed.chars().rev().find(|ch| matches!(ch, '.' | ','))
    } else if has_dot || has_comma {
        let mark = if has_dot { '.' } else { ',' };
        if mark == locale.grouping_separator && is_digit_grouped(trimmed, mark) {
            None
        } else {
            Some(mark)
        }
    } else {
        None
    };
    let normalized: String = trimmed
        .chars()
        .filter_map(|ch| match ch {
            '.' | ',' if Some(ch) == decimal => Some('.'),
            '.' | ',' | ' ' => None,
            other => Some(other),
        })
        .collect();
    parse_required(&normalized, "amount")
}

fn is_digit_grouped(value: &str, mark: char) -> bool {
    let mut groups = value.split(mark);
    let head = groups.next().unwrap_or_default();
    !head.is_empty()
        && head.len() <= 3
        && groups.all(|group| group.len() == 3 && group.chars().all(|ch| ch.is_ascii_digit()))
}
