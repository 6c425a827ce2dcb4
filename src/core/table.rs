//! Filter, sort, and paginate pipeline shared by every list view.
//!
//! Records are fetched in full; this module narrows them down in memory.
//! Filters are opt-in (an empty value always passes) and conjunctive. The
//! sort is stable ascending, reversed for descending. Pages are 1-based.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// A sortable, filterable projection of one record field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Missing,
    Number(Decimal),
    Date(NaiveDate),
    Text(String),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn optional_text(value: Option<&str>) -> Self {
        value.map_or(FieldValue::Missing, FieldValue::text)
    }

    fn rank(&self) -> u8 {
        match self {
            FieldValue::Missing => 0,
            FieldValue::Number(_) => 1,
            FieldValue::Date(_) => 2,
            FieldValue::Text(_) => 3,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Missing => Ok(()),
            FieldValue::Number(value) => write!(f, "{}", value),
            FieldValue::Date(value) => write!(f, "{}", value),
            FieldValue::Text(value) => f.write_str(value),
        }
    }
}

impl Ord for FieldValue {
    /// `Missing` sorts before everything else; text compares case-insensitively.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (FieldValue::Number(a), FieldValue::Number(b)) => a.cmp(b),
            (FieldValue::Date(a), FieldValue::Date(b)) => a.cmp(b),
            (FieldValue::Text(a), FieldValue::Text(b)) => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for FieldValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The value a user typed into one filter control.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterValue {
    #[default]
    Empty,
    Text(String),
    Exact(String),
    Range {
        min: Option<Decimal>,
        max: Option<Decimal>,
    },
    DateRange {
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },
}

impl FilterValue {
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Empty => true,
            FilterValue::Text(text) | FilterValue::Exact(text) => text.trim().is_empty(),
            FilterValue::Range { min, max } => min.is_none() && max.is_none(),
            FilterValue::DateRange { from, to } => from.is_none() && to.is_none(),
        }
    }

    fn as_text(&self) -> Option<&str> {
        match self {
            FilterValue::Text(text) | FilterValue::Exact(text) => Some(text.trim()),
            _ => None,
        }
    }
}

type Accessor<T> = Box<dyn Fn(&T) -> FieldValue + Send + Sync>;
type Predicate<T> = Box<dyn Fn(&T, &FilterValue) -> bool + Send + Sync>;

/// A named predicate over records of type `T`.
pub struct TableFilter<T> {
    name: String,
    predicate: Predicate<T>,
}

impl<T> TableFilter<T> {
    /// Wraps an arbitrary predicate. It is only consulted for non-empty values.
    pub fn custom<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&T, &FilterValue) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            predicate: Box::new(predicate),
        }
    }

    /// Case-insensitive substring match on the field's text.
    pub fn text<F>(name: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> FieldValue + Send + Sync + 'static,
    {
        Self::custom(name, move |record, value| match value.as_text() {
            Some(needle) => accessor(record)
                .to_string()
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            None => true,
        })
    }

    /// Exact match on the field's text, used for enum and id columns.
    pub fn exact<F>(name: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> FieldValue + Send + Sync + 'static,
    {
        Self::custom(name, move |record, value| match value.as_text() {
            Some(expected) => accessor(record).to_string() == expected,
            None => true,
        })
    }

    /// Inclusive numeric range. Records without a number never match.
    pub fn range<F>(name: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> FieldValue + Send + Sync + 'static,
    {
        Self::custom(name, move |record, value| match value {
            FilterValue::Range { min, max } => match accessor(record) {
                FieldValue::Number(number) => {
                    min.map_or(true, |min| number >= min) && max.map_or(true, |max| number <= max)
                }
                _ => false,
            },
            _ => true,
        })
    }

    /// Inclusive date range. Records without a date never match.
    pub fn date_range<F>(name: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> FieldValue + Send + Sync + 'static,
    {
        Self::custom(name, move |record, value| match value {
            FilterValue::DateRange { from, to } => match accessor(record) {
                FieldValue::Date(date) => {
                    from.map_or(true, |from| date >= from) && to.map_or(true, |to| date <= to)
                }
                _ => false,
            },
            _ => true,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn matches(&self, record: &T, value: &FilterValue) -> bool {
        value.is_empty() || (self.predicate)(record, value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub column: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// The filters and sort accessors a list view offers.
pub struct TableDefinition<T> {
    filters: Vec<TableFilter<T>>,
    sorts: Vec<(String, Accessor<T>)>,
}

impl<T> Default for TableDefinition<T> {
    fn default() -> Self {
        Self {
            filters: Vec::new(),
            sorts: Vec::new(),
        }
    }
}

impl<T> TableDefinition<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: TableFilter<T>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn sort_by<F>(mut self, name: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> FieldValue + Send + Sync + 'static,
    {
        self.sorts.push((name.into(), Box::new(accessor)));
        self
    }

    pub fn filter_names(&self) -> impl Iterator<Item = &str> {
        self.filters.iter().map(TableFilter::name)
    }

    pub fn sort_names(&self) -> impl Iterator<Item = &str> {
        self.sorts.iter().map(|(name, _)| name.as_str())
    }

    fn find_filter(&self, name: &str) -> Option<&TableFilter<T>> {
        self.filters.iter().find(|filter| filter.name == name)
    }

    fn find_sort(&self, name: &str) -> Option<&Accessor<T>> {
        self.sorts
            .iter()
            .find(|(sort_name, _)| sort_name == name)
            .map(|(_, accessor)| accessor)
    }
}

/// View state of one list page.
///
/// Changing filters, sort, or page size re-anchors to page 1; changing only
/// the page number does not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableQuery {
    filters: BTreeMap<String, FilterValue>,
    sort: Option<SortSpec>,
    page: usize,
    page_size: usize,
}

impl Default for TableQuery {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl TableQuery {
    pub fn new(page_size: usize) -> Self {
        Self {
            filters: BTreeMap::new(),
            sort: None,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    pub fn filters(&self) -> &BTreeMap<String, FilterValue> {
        &self.filters
    }

    pub fn set_filter(&mut self, name: impl Into<String>, value: FilterValue) {
        let name = name.into();
        if value.is_empty() {
            self.filters.remove(&name);
        } else {
            self.filters.insert(name, value);
        }
        self.page = 1;
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: Option<SortSpec>) {
        self.sort = sort;
        self.page = 1;
    }

    /// Sorts by `column` ascending, or flips the direction if it is already
    /// the active column.
    pub fn toggle_sort(&mut self, column: &str) {
        let next = match self.sort.take() {
            Some(current) if current.column == column => SortSpec {
                column: current.column,
                direction: current.direction.flipped(),
            },
            _ => SortSpec::ascending(column),
        };
        self.set_sort(Some(next));
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }
}

/// One visible page plus the filtered total used by pagination controls.
#[derive(Debug)]
pub struct TablePage<'a, T> {
    pub rows: Vec<&'a T>,
    pub total_records: usize,
    pub page: usize,
    pub page_size: usize,
}

impl<T> TablePage<'_, T> {
    pub fn page_count(&self) -> usize {
        self.total_records.div_ceil(self.page_size.max(1))
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1 && self.total_records > 0
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Runs filter, sort, and paginate over `records`.
pub fn run_pipeline<'a, T>(
    records: &'a [T],
    definition: &TableDefinition<T>,
    query: &TableQuery,
) -> TablePage<'a, T> {
    let active: Vec<(&TableFilter<T>, &FilterValue)> = query
        .filters
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .filter_map(|(name, value)| match definition.find_filter(name) {
            Some(filter) => Some((filter, value)),
            None => {
                tracing::debug!(filter = %name, "ignoring unknown table filter");
                None
            }
        })
        .collect();

    let mut filtered: Vec<&'a T> = records
        .iter()
        .filter(|record| active.iter().all(|(filter, value)| filter.matches(record, value)))
        .collect();

    if let Some(spec) = &query.sort {
        match definition.find_sort(&spec.column) {
            Some(accessor) => {
                let mut keyed: Vec<(FieldValue, &'a T)> =
                    filtered.into_iter().map(|record| (accessor(record), record)).collect();
                keyed.sort_by(|a, b| a.0.cmp(&b.0));
                if spec.direction == SortDirection::Descending {
                    keyed.reverse();
                }
                filtered = keyed.into_iter().map(|(_, record)| record).collect();
            }
            None => tracing::debug!(column = %spec.column, "ignoring unknown sort column"),
        }
    }

    let total_records = filtered.len();
    let page = query.page.max(1);
    let page_size = query.page_size.max(1);
    let start = (page - 1).saturating_mul(page_size);
    let rows = filtered.into_iter().skip(start).take(page_size).collect();

    TablePage {
        rows,
        total_records,
        page,
        page_size,
    }
}
