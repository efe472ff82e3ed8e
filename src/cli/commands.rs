//! Command handlers and their registration.

use tracing::info;

use crate::core::services::{CategoryService, PersonService, ReportKind, TransactionService};
use crate::domain::{
    CategoryRequest, PersonRequest, Purpose, RecordId, TransactionKind, TransactionRequest,
};
use crate::listing::AgeFilterMode;
use crate::utils::build_info;

use super::core::{
    parse_amount, parse_optional, parse_required, CommandError, CommandResult, Screen,
    ShellContext,
};
use super::output;
use super::registry::{CommandEntry, CommandRegistry};

const CATEGORY_FIELDS: &[&str] = &["description", "purpose (expense/income/both)"];
const PERSON_FIELDS: &[&str] = &["name", "age"];
const TRANSACTION_FIELDS: &[&str] = &[
    "description",
    "amount",
    "kind (expense/income)",
    "person id",
    "category id",
];

pub fn register_all(registry: &mut CommandRegistry) {
    registry.register(CommandEntry::new(
        "help",
        "Show available commands",
        "help [command]",
        cmd_help,
    ));
    registry.register(CommandEntry::new(
        "open",
        "Open a list with fresh records, page 1 and no filters",
        "open <categories|people|transactions|reports>",
        cmd_open,
    ));
    registry.register(CommandEntry::new(
        "show",
        "Print the open list again",
        "show",
        cmd_show,
    ));
    registry.register(CommandEntry::new(
        "filter",
        "Set one filter on the open list (empty or `any` clears it)",
        "filter <field> [value]",
        cmd_filter,
    ));
    registry.register(CommandEntry::new(
        "age-mode",
        "Switch the people age filter between exact and range, clearing its values",
        "age-mode <exact|range>",
        cmd_age_mode,
    ));
    registry.register(CommandEntry::new(
        "clear",
        "Remove every filter on the open list",
        "clear",
        cmd_clear,
    ));
    registry.register(CommandEntry::new(
        "page",
        "Jump to a page of the open list",
        "page <number>",
        cmd_page,
    ));
    registry.register(CommandEntry::new(
        "next",
        "Go to the next page",
        "next",
        cmd_next,
    ));
    registry.register(CommandEntry::new(
        "prev",
        "Go to the previous page",
        "prev",
        cmd_prev,
    ));
    registry.register(CommandEntry::new(
        "add",
        "Create a record in the open list",
        "add <fields...>  (categories: description purpose; people: name age; transactions: description amount kind person-id category-id)",
        cmd_add,
    ));
    registry.register(CommandEntry::new(
        "edit",
        "Replace a record in the open list",
        "edit <id> <fields...>",
        cmd_edit,
    ));
    registry.register(CommandEntry::new(
        "delete",
        "Delete a record from the open list",
        "delete <id>",
        cmd_delete,
    ));
    registry.register(CommandEntry::new(
        "report",
        "Open the totals report, or switch its grouping",
        "report [people|categories|toggle]",
        cmd_report,
    ));
    registry.register(CommandEntry::new(
        "config",
        "Show or change preferences",
        "config [show | set <locale|currency|data_file> <value>]",
        cmd_config,
    ));
    registry.register(CommandEntry::new(
        "version",
        "Show build information",
        "version",
        cmd_version,
    ));
    registry.register(CommandEntry::new(
        "exit",
        "Leave the shell",
        "exit",
        cmd_exit,
    ));

    registry.alias("quit", "exit");
    registry.alias("list", "show");
    registry.alias("previous", "prev");
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        let entry = context.registry.get(&name.to_lowercase()).ok_or_else(|| {
            CommandError::InvalidArguments(format!("unknown command `{name}`"))
        })?;
        output::info(format!("{}: {}", entry.name, entry.description));
        output::info(format!("usage: {}", entry.usage));
        return Ok(());
    }
    output::section("Commands");
    let width = context
        .registry
        .list()
        .iter()
        .map(|entry| entry.name.len())
        .max()
        .unwrap_or(0);
    for entry in context.registry.list() {
        output::raw(format!("  {:<width$}  {}", entry.name, entry.description));
    }
    Ok(())
}

fn cmd_open(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [name] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: open <categories|people|transactions|reports>".into(),
        ));
    };
    let screen: Screen = name.parse().map_err(CommandError::InvalidArguments)?;
    context.open(screen)?;
    context.render()
}

fn cmd_show(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.render()
}

fn cmd_filter(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((field, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: filter <field> [value]".into(),
        ));
    };
    let field = field.to_lowercase();
    let value = rest.join(" ");

    let changed = match context.require_screen()? {
        Screen::Categories => {
            let screen = context.categories_mut()?;
            match field.as_str() {
                "description" | "descricao" | "name" => screen.criteria.description = value,
                "purpose" | "finalidade" => {
                    screen.criteria.purpose = parse_optional::<Purpose>(&value)?
                }
                other => return Err(unknown_field(other, "description, purpose")),
            }
            CategoryService::apply_criteria(&mut screen.view, &screen.criteria)
        }
        Screen::People => {
            let screen = context.people_mut()?;
            let mode = screen.criteria.age.mode();
            let age = &mut screen.criteria.age;
            match (field.as_str(), mode) {
                ("name" | "nome", _) => screen.criteria.name = value,
                ("age" | "idade", AgeFilterMode::Exact) => {
                    age.exact = parse_optional(&value)?
                }
                ("min", AgeFilterMode::Range) => age.min = parse_optional(&value)?,
                ("max", AgeFilterMode::Range) => age.max = parse_optional(&value)?,
                ("age" | "idade", AgeFilterMode::Range) => {
                    return Err(CommandError::InvalidArguments(
                        "age filter is in range mode; use `filter min`, `filter max` \
                         or `age-mode exact`"
                            .into(),
                    ))
                }
                ("min" | "max", AgeFilterMode::Exact) => {
                    return Err(CommandError::InvalidArguments(
                        "age filter is in exact mode; use `filter age` or `age-mode range`".into(),
                    ))
                }
                (other, _) => return Err(unknown_field(other, "name, age, min, max")),
            }
            PersonService::apply_criteria(&mut screen.view, &screen.criteria)
        }
        Screen::Transactions => {
            let screen = context.transactions_mut()?;
            match field.as_str() {
                "description" | "descricao" => screen.criteria.description = value,
                "kind" | "tipo" => {
                    screen.criteria.kind = parse_optional::<TransactionKind>(&value)?
                }
                "person" | "pessoa" => screen.criteria.person_id = parse_optional(&value)?,
                "category" | "categoria" => {
                    screen.criteria.category_id = parse_optional(&value)?
                }
                other => {
                    return Err(unknown_field(other, "description, kind, person, category"))
                }
            }
            TransactionService::apply_criteria(&mut screen.view, &screen.criteria)
        }
        Screen::Reports => match field.as_str() {
            "name" | "nome" => context.set_report_name_filter(value)?,
            other => return Err(unknown_field(other, "name")),
        },
    };

    if changed {
        info!(field = %field, "filter applied");
    }
    context.render()
}

fn unknown_field(field: &str, expected: &str) -> CommandError {
    CommandError::InvalidArguments(format!(
        "unknown filter field `{field}` (expected {expected})"
    ))
}

fn cmd_age_mode(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [mode] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: age-mode <exact|range>".into(),
        ));
    };
    let mode: AgeFilterMode = mode.parse().map_err(CommandError::InvalidArguments)?;
    if context.require_screen()? != Screen::People {
        return Err(CommandError::InvalidArguments(
            "age-mode only applies to the people list".into(),
        ));
    }
    let screen = context.people_mut()?;
    PersonService::switch_age_mode(&mut screen.view, &mut screen.criteria, mode);
    context.render()
}

fn cmd_clear(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.clear_filters()?;
    context.render()
}

fn cmd_page(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [number] = args else {
        return Err(CommandError::InvalidArguments("usage: page <number>".into()));
    };
    let number: usize = parse_required(number, "page number")?;
    context.active_list()?.go_to_page(number);
    context.render()
}

fn cmd_next(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.active_list()?.next_page() {
        output::warning("Already on the last page.");
    }
    context.render()
}

fn cmd_prev(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.active_list()?.previous_page() {
        output::warning("Already on the first page.");
    }
    context.render()
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let created = save_record(context, None, args)?;
    output::success(format!("Created {created}."));
    context.render()
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((id, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: edit <id> <fields...>".into(),
        ));
    };
    let id: RecordId = parse_required(id, "id")?;
    let updated = save_record(context, Some(id), rest)?;
    output::success(format!("Updated {updated}."));
    context.render()
}

/// Creates (`id == None`) or replaces a record on the open screen and
/// returns a short label for it.
fn save_record(
    context: &mut ShellContext,
    id: Option<RecordId>,
    args: &[&str],
) -> Result<String, CommandError> {
    let usage = if id.is_some() {
        "edit <id> <fields...>"
    } else {
        "add <fields...>"
    };
    match context.require_screen()? {
        Screen::Categories => {
            let fields = context.collect_fields(args, CATEGORY_FIELDS, usage)?;
            let request = CategoryRequest::new(
                fields[0].clone(),
                parse_required::<Purpose>(&fields[1], "purpose")?,
            );
            let screen = context.categories.as_mut().ok_or(CommandError::NoScreen)?;
            let api = &mut context.api;
            let category = match id {
                Some(id) => CategoryService::update(api, &mut screen.view, id, request)?,
                None => CategoryService::create(api, &mut screen.view, request)?,
            };
            Ok(format!("category {} `{}`", category.id, category.description))
        }
        Screen::People => {
            let fields = context.collect_fields(args, PERSON_FIELDS, usage)?;
            let request =
                PersonRequest::new(fields[0].clone(), parse_required(&fields[1], "age")?);
            let screen = context.people.as_mut().ok_or(CommandError::NoScreen)?;
            let api = &mut context.api;
            let person = match id {
                Some(id) => PersonService::update(api, &mut screen.view, id, request)?,
                None => PersonService::create(api, &mut screen.view, request)?,
            };
            Ok(format!("person {} `{}`", person.id, person.name))
        }
        Screen::Transactions => {
            let fields = context.collect_fields(args, TRANSACTION_FIELDS, usage)?;
            let request = TransactionRequest {
                description: fields[0].clone(),
                amount: parse_amount(&fields[1], &context.locale_format())?,
                kind: parse_required(&fields[2], "kind")?,
                person_id: parse_required(&fields[3], "person id")?,
                category_id: parse_required(&fields[4], "category id")?,
            };
            let screen = context
                .transactions
                .as_mut()
                .ok_or(CommandError::NoScreen)?;
            let api = &mut context.api;
            let transaction = match id {
                Some(id) => TransactionService::update(api, &mut screen.view, id, request)?,
                None => TransactionService::create(api, &mut screen.view, request)?,
            };
            Ok(format!(
                "transaction {} `{}`",
                transaction.id, transaction.description
            ))
        }
        Screen::Reports => Err(read_only_reports()),
    }
}

fn read_only_reports() -> CommandError {
    CommandError::InvalidArguments("reports are read-only".into())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [id] = args else {
        return Err(CommandError::InvalidArguments("usage: delete <id>".into()));
    };
    let id: RecordId = parse_required(id, "id")?;
    let screen = context.require_screen()?;
    if screen == Screen::Reports {
        return Err(read_only_reports());
    }
    let label = context
        .record_label(screen, id)
        .unwrap_or_else(|| format!("record {id}"));
    if !context.confirm(&format!("Delete {label} from {screen}?"))? {
        output::info("Delete cancelled.");
        return Ok(());
    }
    match screen {
        Screen::Categories => {
            let state = context.categories.as_mut().ok_or(CommandError::NoScreen)?;
            CategoryService::delete(&mut context.api, &mut state.view, id)?;
        }
        Screen::People => {
            let state = context.people.as_mut().ok_or(CommandError::NoScreen)?;
            PersonService::delete(&mut context.api, &mut state.view, id)?;
        }
        Screen::Transactions => {
            let state = context
                .transactions
                .as_mut()
                .ok_or(CommandError::NoScreen)?;
            TransactionService::delete(&mut context.api, &mut state.view, id)?;
        }
        Screen::Reports => return Err(read_only_reports()),
    }
    output::success(format!("Deleted record {id}."));
    context.render()
}

fn cmd_report(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let kind = match args {
        [] => None,
        [arg] if arg.eq_ignore_ascii_case("toggle") => None,
        [arg] => Some(
            arg.parse::<ReportKind>()
                .map_err(CommandError::InvalidArguments)?,
        ),
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: report [people|categories|toggle]".into(),
            ))
        }
    };
    context.switch_report(kind)?;
    context.render()
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["show"] => {
            output::section("Configuration");
            output::info(format!("Locale: {}", context.config.locale));
            output::info(format!("Currency: {}", context.config.currency));
            output::info(format!(
                "Data file: {}",
                context
                    .config_manager
                    .data_file(&context.config)
                    .display()
            ));
            Ok(())
        }
        ["set", key, value @ ..] => {
            let key = key.to_lowercase();
            context.config.set(&key, &value.join(" "))?;
            context.persist_config()?;
            output::success("Configuration updated.");
            if key.starts_with("data") {
                output::hint("The new data file is used the next time the shell starts.");
            }
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(
            "usage: config [show | set <key> <value>]".into(),
        )),
    }
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let build = build_info::current();
    output::info(build.summary());
    output::info(format!("rustc: {}", build.rustc));
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
