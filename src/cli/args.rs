use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::cli::core::{CliError, CliResult};
use crate::core::{FilterValue, SortSpec, TableQuery};

pub const DEFAULT_BOOK: &str = "default";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListTable {
    Deals,
    Cars,
    Orders,
}

impl ListTable {
    pub fn title(self) -> &'static str {
        match self {
            ListTable::Deals => "Deals",
            ListTable::Cars => "Cars",
            ListTable::Orders => "Orders",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListOptions {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    pub sort: Option<String>,
    pub descending: bool,
    pub filters: Vec<(String, FilterValue)>,
}

impl ListOptions {
    /// Builds the query in the order a user would click through it, so the
    /// requested page survives the page resets caused by filters and sort.
    pub fn to_query(&self, default_page_size: usize) -> TableQuery {
        let mut query = TableQuery::new(self.page_size.unwrap_or(default_page_size));
        for (name, value) in &self.filters {
            query.set_filter(name.clone(), value.clone());
        }
        if let Some(column) = &self.sort {
            let spec = if self.descending {
                SortSpec::descending(column.clone())
            } else {
                SortSpec::ascending(column.clone())
            };
            query.set_sort(Some(spec));
        }
        if let Some(page) = self.page {
            query.set_page(page);
        }
        query
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    List {
        table: ListTable,
        book: String,
        options: ListOptions,
    },
    Balance {
        book: String,
        deal: String,
    },
    Books,
    Version,
    Help,
}

pub fn parse_args(tokens: &[String]) -> CliResult<Command> {
    let Some((head, rest)) = tokens.split_first() else {
        return Ok(Command::Help);
    };
    match head.to_lowercase().as_str() {
        "deals" => parse_list(ListTable::Deals, rest),
        "cars" => parse_list(ListTable::Cars, rest),
        "orders" => parse_list(ListTable::Orders, rest),
        "balance" => parse_balance(rest),
        "books" => no_arguments(Command::Books, rest),
        "version" | "--version" | "-V" => no_arguments(Command::Version, rest),
        "help" | "--help" | "-h" => Ok(Command::Help),
        other => Err(CliError::usage(format!(
            "unknown command `{}`; try `help`",
            other
        ))),
    }
}

fn no_arguments(command: Command, rest: &[String]) -> CliResult<Command> {
    match rest.first() {
        Some(extra) => Err(CliError::usage(format!("unexpected argument `{}`", extra))),
        None => Ok(command),
    }
}

fn parse_list(table: ListTable, rest: &[String]) -> CliResult<Command> {
    let mut options = ListOptions::default();
    let mut book = DEFAULT_BOOK.to_string();
    let mut iter = rest.iter();
    while let Some(flag) = iter.next() {
        match flag.as_str() {
            "--book" => book = take_value(flag, iter.next())?.to_string(),
            "--page" => options.page = Some(parse_count(flag, iter.next())?),
            "--page-size" => options.page_size = Some(parse_count(flag, iter.next())?),
            "--sort" => options.sort = Some(take_value(flag, iter.next())?.to_lowercase()),
            "--desc" => options.descending = true,
            "--filter" => {
                let raw = take_value(flag, iter.next())?;
                let (name, value) = raw.split_once('=').ok_or_else(|| {
                    CliError::usage(format!("--filter expects name=value, got `{}`", raw))
                })?;
                options
                    .filters
                    .push((name.trim().to_lowercase(), parse_filter_value(value)?));
            }
            other => {
                return Err(CliError::usage(format!("unknown option `{}`", other)));
            }
        }
    }
    Ok(Command::List {
        table,
        book,
        options,
    })
}

fn parse_balance(rest: &[String]) -> CliResult<Command> {
    let mut book = DEFAULT_BOOK.to_string();
    let mut deal = None;
    let mut iter = rest.iter();
    while let Some(token) = iter.next() {
        match token.as_str() {
            "--book" => book = take_value(token, iter.next())?.to_string(),
            flag if flag.starts_with("--") => {
                return Err(CliError::usage(format!("unknown option `{}`", flag)));
            }
            id if deal.is_none() => deal = Some(id.to_string()),
            extra => return Err(CliError::usage(format!("unexpected argument `{}`", extra))),
        }
    }
    let deal = deal.ok_or_else(|| CliError::usage("usage: balance <deal-id> [--book NAME]"))?;
    Ok(Command::Balance { book, deal })
}

fn take_value<'a>(flag: &str, value: Option<&'a String>) -> CliResult<&'a str> {
    value
        .map(String::as_str)
        .ok_or_else(|| CliError::usage(format!("{} expects a value", flag)))
}

fn parse_count(flag: &str, value: Option<&String>) -> CliResult<usize> {
    let raw = take_value(flag, value)?;
    raw.parse::<usize>()
        .map_err(|_| CliError::usage(format!("{} expects a whole number, got `{}`", flag, raw)))
}

/// `min..max` becomes a date range when both ends look like dates, otherwise a
/// number range. Anything else is matched as text.
pub fn parse_filter_value(raw: &str) -> CliResult<FilterValue> {
    let raw = raw.trim();
    let Some((low, high)) = raw.split_once("..") else {
        return Ok(if raw.is_empty() {
            FilterValue::Empty
        } else {
            FilterValue::Text(raw.to_string())
        });
    };
    let (low, high) = (low.trim(), high.trim());
    let (from, to) = (parse_date(low), parse_date(high));
    let ends_fit_dates =
        (low.is_empty() || from.is_some()) && (high.is_empty() || to.is_some());
    if ends_fit_dates && (from.is_some() || to.is_some()) {
        return Ok(FilterValue::DateRange { from, to });
    }
    let bound = |text: &str| -> CliResult<Option<Decimal>> {
        if text.is_empty() {
            return Ok(None);
        }
        Decimal::from_str(text)
            .map(Some)
            .map_err(|_| CliError::usage(format!("`{}` is not a number or a YYYY-MM-DD date", text)))
    };
    Ok(FilterValue::Range {
        min: bound(low)?,
        max: bound(high)?,
    })
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn tokens(line: &str) -> Vec<String> {
        shell_words::split(line).unwrap()
    }

    #[test]
    fn list_flags_are_collected() {
        let command = parse_args(&tokens(
            "deals --book north --page 2 --page-size 5 --sort Balance --desc --filter 'customer=dana levi'",
        ))
        .unwrap();
        let Command::List { table, book, options } = command else {
            panic!("expected list command");
        };
        assert_eq!(table, ListTable::Deals);
        assert_eq!(book, "north");
        assert_eq!(options.page, Some(2));
        assert_eq!(options.page_size, Some(5));
        assert_eq!(options.sort.as_deref(), Some("balance"));
        assert!(options.descending);
        assert_eq!(
            options.filters,
            vec![("customer".to_string(), FilterValue::Text("dana levi".into()))]
        );
    }

    #[test]
    fn requested_page_survives_filter_resets() {
        let options = ListOptions {
            page: Some(3),
            sort: Some("price".into()),
            filters: vec![("status".into(), FilterValue::Text("active".into()))],
            ..ListOptions::default()
        };
        let query = options.to_query(10);
        assert_eq!(query.page(), 3);
        assert_eq!(query.page_size(), 10);
        assert_eq!(query.sort(), Some(&SortSpec::ascending("price")));
    }

    #[test]
    fn filter_values_pick_a_kind() {
        assert_eq!(
            parse_filter_value("1000..2500.5").unwrap(),
            FilterValue::Range {
                min: Some(dec!(1000)),
                max: Some(dec!(2500.5))
            }
        );
        assert_eq!(
            parse_filter_value("..0").unwrap(),
            FilterValue::Range {
                min: None,
                max: Some(dec!(0))
            }
        );
        assert_eq!(
            parse_filter_value("2024-01-01..").unwrap(),
            FilterValue::DateRange {
                from: NaiveDate::from_ymd_opt(2024, 1, 1),
                to: None
            }
        );
        assert_eq!(parse_filter_value(" ").unwrap(), FilterValue::Empty);
        assert!(parse_filter_value("cheap..dear").is_err());
    }

    #[test]
    fn balance_needs_a_deal() {
        assert!(matches!(parse_args(&tokens("balance")), Err(CliError::Usage(_))));
        assert_eq!(
            parse_args(&tokens("balance 1a2b --book lot")).unwrap(),
            Command::Balance {
                book: "lot".into(),
                deal: "1a2b".into()
            }
        );
    }

    #[test]
    fn unknown_commands_are_usage_errors() {
        assert!(matches!(parse_args(&tokens("refund")), Err(CliError::Usage(_))));
        assert_eq!(parse_args(&[]).unwrap(), Command::Help);
    }
}
