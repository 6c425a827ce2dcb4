use std::io::Write;
use std::path::PathBuf;

use crate::cli::args::{Command, ListOptions, ListTable};
use crate::cli::core::{CliError, CliResult};
use crate::cli::output::{balance_cell, styled, MessageKind};
use crate::cli::views;
use crate::config::{Config, ConfigManager};
use crate::core::services::BalanceService;
use crate::core::{opening_balance, run_pipeline, DealRow, TableDefinition, Tabular};
use crate::currency::{format_amount, AmountFormat};
use crate::domain::{Book, Car, Deal, Order};
use crate::errors::BookError;
use crate::storage::{JsonStorage, StorageBackend};
use crate::utils::{build_info, PathResolver};

/// Everything a command needs: preferences and the book store.
pub struct CliContext {
    pub config: Config,
    pub storage: JsonStorage,
    pub color: bool,
}

impl CliContext {
    pub fn new() -> CliResult<Self> {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> CliResult<Self> {
        let config = ConfigManager::with_base_dir(base.clone())?.load()?;
        let data_root = config.data_root.clone().unwrap_or(base);
        let storage = JsonStorage::new(Some(data_root), None)?;
        Ok(Self {
            color: config.color_enabled,
            config,
            storage,
        })
    }

    pub fn amount_format(&self) -> AmountFormat {
        self.config.amount_format()
    }

    /// Loads a stored book; a name never saved reads as an empty book.
    pub fn load_book(&self, name: &str) -> CliResult<Book> {
        if self.storage.book_path(name).exists() {
            Ok(self.storage.load(name)?)
        } else {
            tracing::debug!(book = %name, "book not stored yet, using an empty one");
            Ok(Book::new(name))
        }
    }
}

pub fn execute(context: &CliContext, command: Command, out: &mut dyn Write) -> CliResult<()> {
    match command {
        Command::List {
            table,
            book,
            options,
        } => list(context, table, &book, &options, out),
        Command::Balance { book, deal } => balance(context, &book, &deal, out),
        Command::Books => books(context, out),
        Command::Version => {
            writeln!(out, "{}", build_info::current().summary())?;
            Ok(())
        }
        Command::Help => {
            writeln!(out, "{}", HELP)?;
            Ok(())
        }
    }
}

fn list(
    context: &CliContext,
    table: ListTable,
    book_name: &str,
    options: &ListOptions,
    out: &mut dyn Write,
) -> CliResult<()> {
    let book = context.load_book(book_name)?;
    let query = options.to_query(context.config.page_size);
    let format = context.amount_format();

    let (rendered, footer) = match table {
        ListTable::Deals => {
            let definition = DealRow::table_definition();
            check_names(&definition, options)?;
            let rows = BalanceService::rows(&book);
            let page = run_pipeline(&rows, &definition, &query);
            (
                views::deals_table(&page, &format, context.color).render(),
                views::page_footer(&page),
            )
        }
        ListTable::Cars => {
            let definition = Car::table_definition();
            check_names(&definition, options)?;
            let page = run_pipeline(&book.cars, &definition, &query);
            (
                views::cars_table(&page, &format).render(),
                views::page_footer(&page),
            )
        }
        ListTable::Orders => {
            let definition = Order::table_definition();
            check_names(&definition, options)?;
            let page = run_pipeline(&book.orders, &definition, &query);
            (
                views::orders_table(&page, &format).render(),
                views::page_footer(&page),
            )
        }
    };

    writeln!(
        out,
        "{}",
        styled(MessageKind::Section, table.title(), context.color)
    )?;
    writeln!(out, "{}", rendered)?;
    writeln!(out, "{}", footer)?;
    Ok(())
}

/// The pipeline skips unknown names quietly; on the command line a typo
/// deserves an answer.
fn check_names<T>(definition: &TableDefinition<T>, options: &ListOptions) -> CliResult<()> {
    for (name, _) in &options.filters {
        if !definition.filter_names().any(|known| known == name) {
            let known: Vec<&str> = definition.filter_names().collect();
            return Err(CliError::usage(format!(
                "unknown filter `{}` (available: {})",
                name,
                known.join(", ")
            )));
        }
    }
    if let Some(column) = &options.sort {
        if !definition.sort_names().any(|known| known == column) {
            let known: Vec<&str> = definition.sort_names().collect();
            return Err(CliError::usage(format!(
                "unknown sort column `{}` (available: {})",
                column,
                known.join(", ")
            )));
        }
    }
    Ok(())
}

fn balance(context: &CliContext, book_name: &str, needle: &str, out: &mut dyn Write) -> CliResult<()> {
    let book = context.load_book(book_name)?;
    let deal = find_deal(&book, needle)?;
    let bills = book.bills_for_deal(deal.id);
    let format = context.amount_format();
    let balance = BalanceService::deal_balance(deal, &bills);

    let title = format!("Deal {}", deal.id);
    writeln!(out, "{}", styled(MessageKind::Section, title, context.color))?;
    if let Some(customer) = &deal.customer_name {
        writeln!(out, "Customer: {}", customer)?;
    }
    writeln!(out, "Type: {}  Status: {}", deal.deal_type, deal.status)?;
    writeln!(
        out,
        "Opening balance: {}",
        format_amount(opening_balance(deal), &format)
    )?;
    if !bills.is_empty() {
        writeln!(out, "{}", views::bills_table(&bills, &format).render())?;
    }
    writeln!(
        out,
        "Balance: {}",
        balance_cell(balance, &format, context.color)
    )?;
    tracing::debug!(deal = %deal.id, %balance, "balance reported");
    Ok(())
}

/// Matches a full id or an unambiguous id prefix as printed in lists.
fn find_deal<'a>(book: &'a Book, needle: &str) -> CliResult<&'a Deal> {
    if let Ok(id) = needle.parse::<uuid::Uuid>() {
        return book
            .deal(id)
            .ok_or_else(|| BookError::deal_not_found(id).into());
    }
    let needle = needle.to_lowercase();
    let matches: Vec<&Deal> = book
        .deals
        .iter()
        .filter(|deal| deal.id.to_string().starts_with(&needle))
        .collect();
    match matches.as_slice() {
        [deal] => Ok(*deal),
        [] => Err(CliError::usage(format!("no deal id starts with `{}`", needle))),
        _ => Err(CliError::usage(format!(
            "`{}` matches {} deals; use more characters",
            needle,
            matches.len()
        ))),
    }
}

fn books(context: &CliContext, out: &mut dyn Write) -> CliResult<()> {
    let names = context.storage.list_books()?;
    if names.is_empty() {
        writeln!(out, "{}", styled(MessageKind::Info, "no books stored", context.color))?;
    }
    for name in names {
        writeln!(out, "{}", name)?;
    }
    Ok(())
}

const HELP: &str = "\
dealbook_cli <command> [options]

Commands:
  deals | cars | orders   list a table page
      --book NAME           book to read (default: default)
      --page N              1-based page number
      --page-size N         rows per page
      --sort COLUMN         sort column, ascending
      --desc                sort descending
      --filter NAME=VALUE   text, exact, min..max, or YYYY-MM-DD..YYYY-MM-DD
  balance <deal-id>       show how a deal balance is made up
  books                   list stored books
  version                 print build information
  help                    show this message";
