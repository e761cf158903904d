//! Table model: filtering, sorting, pagination, column visibility and
//! row selection over a [`Dataset`].
//!
//! The state never copies records. Every derived view is a list of
//! [`RowId`]s computed on demand from the dataset it is handed, so the
//! presenter always sees filter, then sort, then pagination applied in
//! that order.

use super::models::{Dataset, RowId, RowRecord};
use super::schema::{self, Schema, BASE_COLUMNS};
use std::cmp::Ordering;
use std::collections::BTreeSet;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Column the free-text filter applies to.
pub const FILTER_COLUMN: &str = schema::NAME;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSort {
    pub column: String,
    pub direction: SortDirection,
}

/// How the filter text is compared with the name column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMatch {
    #[default]
    CaseSensitive,
    CaseInsensitive,
}

impl FilterMatch {
    fn matches(self, value: &str, needle: &str) -> bool {
        match self {
            FilterMatch::CaseSensitive => value.contains(needle),
            FilterMatch::CaseInsensitive => value.to_lowercase().contains(&needle.to_lowercase()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableColumn {
    /// Row selection checkbox.
    Select,
    /// A dataset column, by name.
    Field(String),
    /// Per-row action menu.
    Actions,
}

impl TableColumn {
    /// Stable identifier: `select`, `actions` or the dataset column name.
    pub fn id(&self) -> &str {
        match self {
            TableColumn::Select => "select",
            TableColumn::Field(name) => name,
            TableColumn::Actions => "actions",
        }
    }

    /// Dataset column name, `None` for the fixed columns.
    pub fn field(&self) -> Option<&str> {
        match self {
            TableColumn::Field(name) => Some(name),
            _ => None,
        }
    }

    /// Only dataset columns can be hidden.
    pub fn can_hide(&self) -> bool {
        matches!(self, TableColumn::Field(_))
    }

    pub fn can_sort(&self) -> bool {
        matches!(self, TableColumn::Field(_))
    }
}

/// Columns of the table for a schema: selection, the base columns, the
/// remaining schema columns in header order, then actions.
pub fn table_columns(schema: &Schema) -> Vec<TableColumn> {
    let mut columns = vec![TableColumn::Select];
    columns.extend(BASE_COLUMNS.iter().map(|c| TableColumn::Field(c.to_string())));
    columns.extend(schema.extra_table_columns().map(|c| TableColumn::Field(c.to_string())));
    columns.push(TableColumn::Actions);
    columns
}

fn default_visible() -> BTreeSet<String> {
    BASE_COLUMNS.iter().map(|c| c.to_string()).collect()
}

/// Rows produced by the current filter, sort and page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowModel {
    /// Every row passing the filter, in sorted order.
    pub filtered: Vec<RowId>,
    /// Rows of the current page.
    pub page: Vec<RowId>,
    pub page_index: usize,
    pub page_count: usize,
}

/// What the table body shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableBody {
    Rows(Vec<RowId>),
    /// A single "no results" row spanning `span` columns.
    NoResults { span: usize },
}

/// Sort, filter, pagination, column visibility and selection of the
/// company table.
///
/// Selection is keyed by [`RowId`], so it survives filtering, sorting and
/// paging, and duplicate company names never share a checkbox.
///
/// # Examples
///
/// ```
/// use portage_list::domain::{DatasetParser, FilterMatch, TableState};
///
/// let dataset = DatasetParser::parse("Nom de l'entreprise\nBeta\nalpha\n").unwrap();
/// let mut state = TableState::new(dataset.schema(), 10, FilterMatch::CaseSensitive);
/// state.toggle_sort("Nom de l'entreprise");
/// let first = state.page_rows(&dataset)[0];
/// assert_eq!(dataset.get(first).unwrap().name(), "alpha");
/// ```
#[derive(Debug, Clone)]
pub struct TableState {
    columns: Vec<TableColumn>,
    sorting: Option<ColumnSort>,
    filter: String,
    matcher: FilterMatch,
    visible: BTreeSet<String>,
    selected: BTreeSet<RowId>,
    page_index: usize,
    page_size: usize,
}

impl Default for TableState {
    fn default() -> Self {
        Self::new(&Schema::default(), DEFAULT_PAGE_SIZE, FilterMatch::default())
    }
}

impl TableState {
    /// Creates the state for a dataset with `schema`.
    ///
    /// Nothing is sorted, filtered or selected, the first page is shown and
    /// only the base columns are visible.
    ///
    /// # Arguments
    ///
    /// * `schema` - Header schema the column set is derived from
    /// * `page_size` - Rows per page, clamped to at least 1
    /// * `matcher` - How the name filter compares text
    pub fn new(schema: &Schema, page_size: usize, matcher: FilterMatch) -> Self {
        Self {
            columns: table_columns(schema),
            sorting: None,
            filter: String::new(),
            matcher,
            visible: default_visible(),
            selected: BTreeSet::new(),
            page_index: 0,
            page_size: page_size.max(1),
        }
    }

    /// Every column in display order, hidden ones included.
    pub fn columns(&self) -> &[TableColumn] {
        &self.columns
    }

    /// Columns currently shown, in display order.
    pub fn visible_columns(&self) -> Vec<&TableColumn> {
        self.columns.iter().filter(|c| self.is_column_visible(c)).collect()
    }

    /// Columns listed in the visibility menu.
    pub fn hideable_columns(&self) -> impl Iterator<Item = &TableColumn> {
        self.columns.iter().filter(|c| c.can_hide())
    }

    pub fn is_column_visible(&self, column: &TableColumn) -> bool {
        match column {
            TableColumn::Field(name) => self.visible.contains(name),
            TableColumn::Select | TableColumn::Actions => true,
        }
    }

    /// Flips the visibility of a dataset column. Fixed columns are ignored.
    pub fn toggle_column_visibility(&mut self, column: &str) {
        if !self.columns.iter().any(|c| c.can_hide() && c.id() == column) {
            return;
        }
        if !self.visible.remove(column) {
            self.visible.insert(column.to_string());
        }
    }

    /// Restores the default visible set: the base columns only.
    pub fn reset_columns(&mut self) {
        self.visible = default_visible();
    }

    /// Current name filter; empty means every row passes.
    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn matcher(&self) -> FilterMatch {
        self.matcher
    }

    /// Replaces the name filter and goes back to the first page.
    ///
    /// # Arguments
    ///
    /// * `value` - Substring looked up in the company name column
    pub fn set_filter(&mut self, value: impl Into<String>) {
        self.filter = value.into();
        self.page_index = 0;
    }

    /// Active sort, if any.
    pub fn sorting(&self) -> Option<&ColumnSort> {
        self.sorting.as_ref()
    }

    /// Cycles the sort on `column`: ascending, descending, unsorted.
    ///
    /// Sorting another column starts again at ascending, and any change
    /// goes back to the first page. Values compare as case-folded text:
    /// `"10"` sorts before `"9"`. Fixed and unknown columns are ignored.
    ///
    /// # Arguments
    ///
    /// * `column` - Name of a dataset column
    pub fn toggle_sort(&mut self, column: &str) {
        if !self.columns.iter().any(|c| c.can_sort() && c.id() == column) {
            return;
        }
        self.sorting = match self.sorting.take() {
            Some(sort) if sort.column == column => match sort.direction {
                SortDirection::Ascending => Some(ColumnSort {
                    column: sort.column,
                    direction: SortDirection::Descending,
                }),
                SortDirection::Descending => None,
            },
            _ => Some(ColumnSort {
                column: column.to_string(),
                direction: SortDirection::Ascending,
            }),
        };
        self.page_index = 0;
    }

    /// Zero-based index of the current page.
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    fn matches(&self, record: &RowRecord) -> bool {
        self.filter.is_empty() || self.matcher.matches(record.value(FILTER_COLUMN), &self.filter)
    }

    fn filtered_sorted(&self, dataset: &Dataset) -> Vec<RowId> {
        let mut rows: Vec<RowId> = dataset
            .iter()
            .filter(|(_, record)| self.matches(record))
            .map(|(id, _)| id)
            .collect();

        if let Some(sort) = &self.sorting {
            // case folded, no numeric coercion
            let key = |id: &RowId| {
                dataset
                    .get(*id)
                    .map(|r| r.value(&sort.column).to_lowercase())
                    .unwrap_or_default()
            };
            rows.sort_by(|a, b| {
                let ordering: Ordering = key(a).cmp(&key(b));
                match sort.direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }
        rows
    }

    /// Applies filter, sort and pagination to `dataset`, in that order.
    ///
    /// The page count is `ceil(filtered / page_size)`, so an empty result
    /// has no pages at all.
    pub fn row_model(&self, dataset: &Dataset) -> RowModel {
        let filtered = self.filtered_sorted(dataset);
        let page_count = filtered.len().div_ceil(self.page_size);
        let page = filtered
            .iter()
            .skip(self.page_index * self.page_size)
            .take(self.page_size)
            .copied()
            .collect();
        RowModel {
            filtered,
            page,
            page_index: self.page_index,
            page_count,
        }
    }

    /// Rows of the current page.
    pub fn page_rows(&self, dataset: &Dataset) -> Vec<RowId> {
        self.row_model(dataset).page
    }

    /// What the table body shows: the page rows, or a single "no results"
    /// row spanning every column when the page is empty.
    pub fn body(&self, dataset: &Dataset) -> TableBody {
        let page = self.page_rows(dataset);
        if page.is_empty() {
            TableBody::NoResults { span: self.columns.len() }
        } else {
            TableBody::Rows(page)
        }
    }

    /// False on the first page.
    pub fn can_previous_page(&self) -> bool {
        self.page_index > 0
    }

    /// False on the last page, and when there is no page at all.
    pub fn can_next_page(&self, dataset: &Dataset) -> bool {
        self.page_index + 1 < self.row_model(dataset).page_count
    }

    /// Moves back one page; does nothing on the first page.
    pub fn previous_page(&mut self) {
        if self.can_previous_page() {
            self.page_index -= 1;
        }
    }

    /// Moves forward one page; does nothing on the last page.
    pub fn next_page(&mut self, dataset: &Dataset) {
        if self.can_next_page(dataset) {
            self.page_index += 1;
        }
    }

    pub fn is_row_selected(&self, id: RowId) -> bool {
        self.selected.contains(&id)
    }

    /// Selects `id` if it is unselected, deselects it otherwise.
    pub fn toggle_row_selected(&mut self, id: RowId) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    /// Selected rows in source order, whether or not they pass the filter.
    pub fn selected_rows(&self) -> impl Iterator<Item = RowId> + '_ {
        self.selected.iter().copied()
    }

    /// True when the current page has rows and all of them are selected.
    pub fn is_all_page_rows_selected(&self, dataset: &Dataset) -> bool {
        let page = self.page_rows(dataset);
        !page.is_empty() && page.iter().all(|id| self.selected.contains(id))
    }

    /// Selects or deselects every row of the current page, and only those.
    ///
    /// # Arguments
    ///
    /// * `dataset` - Dataset the page is computed from
    /// * `value` - `true` to select, `false` to deselect
    pub fn toggle_all_page_rows_selected(&mut self, dataset: &Dataset, value: bool) {
        for id in self.page_rows(dataset) {
            if value {
                self.selected.insert(id);
            } else {
                self.selected.remove(&id);
            }
        }
    }

    /// Number of selected rows that pass the current filter.
    pub fn filtered_selected_count(&self, dataset: &Dataset) -> usize {
        dataset
            .iter()
            .filter(|(id, record)| self.selected.contains(id) && self.matches(record))
            .count()
    }

    /// Number of rows passing the current filter.
    pub fn filtered_count(&self, dataset: &Dataset) -> usize {
        dataset.iter().filter(|(_, record)| self.matches(record)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DatasetParser;
    use crate::domain::schema::{CREATION, MANAGEMENT_FEES, NAME, NET_REVENUE, NET_SHARE, TJM, WEBSITE};

    fn companies(count: usize) -> Dataset {
        let mut csv = format!("{},{},{},{},{},{},{}\n", NAME, CREATION, WEBSITE, TJM, MANAGEMENT_FEES, NET_SHARE, NET_REVENUE);
        for i in 0..count {
            csv.push_str(&format!("Societe {:02},{},https://s{}.example,{},{},40,3900\n", i, 2000 + i, i, 400 + i, i));
        }
        DatasetParser::parse(&csv).unwrap()
    }

    fn names(dataset: &Dataset, ids: &[RowId]) -> Vec<String> {
        ids.iter().map(|id| dataset.get(*id).unwrap().name().to_string()).collect()
    }

    #[test]
    fn test_column_order() {
        let dataset = companies(1);
        let state = TableState::new(dataset.schema(), DEFAULT_PAGE_SIZE, FilterMatch::CaseSensitive);
        let ids: Vec<&str> = state.columns().iter().map(TableColumn::id).collect();
        assert_eq!(
            ids,
            vec!["select", NAME, CREATION, MANAGEMENT_FEES, NET_SHARE, NET_REVENUE, TJM, "actions"]
        );
    }

    #[test]
    fn test_default_visibility() {
        let dataset = companies(1);
        let state = TableState::new(dataset.schema(), DEFAULT_PAGE_SIZE, FilterMatch::CaseSensitive);
        let visible: Vec<&str> = state.visible_columns().into_iter().map(TableColumn::id).collect();
        assert_eq!(
            visible,
            vec!["select", NAME, CREATION, MANAGEMENT_FEES, NET_SHARE, NET_REVENUE, "actions"]
        );
    }

    #[test]
    fn test_reset_columns_restores_base_set() {
        let dataset = companies(1);
        let mut state = TableState::new(dataset.schema(), DEFAULT_PAGE_SIZE, FilterMatch::CaseSensitive);
        state.toggle_column_visibility(TJM);
        state.toggle_column_visibility(NAME);
        state.toggle_column_visibility(NET_REVENUE);
        state.toggle_column_visibility("select");
        assert!(state.is_column_visible(&TableColumn::Field(TJM.to_string())));
        assert!(!state.is_column_visible(&TableColumn::Field(NAME.to_string())));
        assert!(state.is_column_visible(&TableColumn::Select));

        state.reset_columns();
        let visible_fields: Vec<&str> = state
            .visible_columns()
            .into_iter()
            .filter_map(TableColumn::field)
            .collect();
        assert_eq!(visible_fields, BASE_COLUMNS.to_vec());
    }

    #[test]
    fn test_unknown_column_toggle_is_ignored() {
        let dataset = companies(1);
        let mut state = TableState::new(dataset.schema(), DEFAULT_PAGE_SIZE, FilterMatch::CaseSensitive);
        state.toggle_column_visibility("nope");
        state.toggle_sort("nope");
        state.toggle_sort("select");
        assert!(state.sorting().is_none());
        assert_eq!(state.visible_columns().len(), 7);
    }

    #[test]
    fn test_sort_cycle() {
        let dataset = companies(3);
        let mut state = TableState::new(dataset.schema(), DEFAULT_PAGE_SIZE, FilterMatch::CaseSensitive);

        state.toggle_sort(NAME);
        assert_eq!(state.sorting().unwrap().direction, SortDirection::Ascending);
        state.toggle_sort(NAME);
        assert_eq!(state.sorting().unwrap().direction, SortDirection::Descending);
        let model = state.row_model(&dataset);
        assert_eq!(names(&dataset, &model.page), vec!["Societe 02", "Societe 01", "Societe 00"]);
        state.toggle_sort(NAME);
        assert!(state.sorting().is_none());

        state.toggle_sort(NAME);
        state.toggle_sort(TJM);
        let sort = state.sorting().unwrap();
        assert_eq!(sort.column, TJM);
        assert_eq!(sort.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_sort_is_lexicographic() {
        let dataset = DatasetParser::parse(&format!("{},{}\nA,9\nB,10\nC,100\nD,2\n", NAME, TJM)).unwrap();
        let mut state = TableState::new(dataset.schema(), DEFAULT_PAGE_SIZE, FilterMatch::CaseSensitive);
        state.toggle_sort(TJM);
        let model = state.row_model(&dataset);
        let values: Vec<&str> = model
            .page
            .iter()
            .map(|id| dataset.get(*id).unwrap().value(TJM))
            .collect();
        assert_eq!(values, vec!["10", "100", "2", "9"]);
    }

    #[test]
    fn test_sort_ignores_case() {
        let dataset = DatasetParser::parse(&format!("{}\nBeta\nalpha\nGamma\n", NAME)).unwrap();
        let mut state = TableState::new(dataset.schema(), DEFAULT_PAGE_SIZE, FilterMatch::CaseSensitive);
        state.toggle_sort(NAME);
        assert_eq!(names(&dataset, &state.page_rows(&dataset)), vec!["alpha", "Beta", "Gamma"]);
        state.toggle_sort(NAME);
        assert_eq!(names(&dataset, &state.page_rows(&dataset)), vec!["Gamma", "Beta", "alpha"]);
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let dataset = DatasetParser::parse(&format!("{},{}\nA,1\nB,1\nC,0\n", NAME, TJM)).unwrap();
        let mut state = TableState::new(dataset.schema(), DEFAULT_PAGE_SIZE, FilterMatch::CaseSensitive);
        state.toggle_sort(TJM);
        assert_eq!(names(&dataset, &state.page_rows(&dataset)), vec!["C", "A", "B"]);
        state.toggle_sort(TJM);
        assert_eq!(names(&dataset, &state.page_rows(&dataset)), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_filter_is_substring_on_name() {
        let dataset = companies(12);
        let mut state = TableState::new(dataset.schema(), DEFAULT_PAGE_SIZE, FilterMatch::CaseSensitive);
        state.set_filter("e 1");
        assert_eq!(
            names(&dataset, &state.page_rows(&dataset)),
            vec!["Societe 10", "Societe 11"]
        );
        // the website column is never searched
        state.set_filter("example");
        assert!(state.page_rows(&dataset).is_empty());
    }

    #[test]
    fn test_filter_case_handling() {
        let dataset = companies(2);
        let mut sensitive = TableState::new(dataset.schema(), DEFAULT_PAGE_SIZE, FilterMatch::CaseSensitive);
        sensitive.set_filter("societe");
        assert_eq!(sensitive.filtered_count(&dataset), 0);

        let mut insensitive = TableState::new(dataset.schema(), DEFAULT_PAGE_SIZE, FilterMatch::CaseInsensitive);
        insensitive.set_filter("societe");
        assert_eq!(insensitive.filtered_count(&dataset), 2);
    }

    #[test]
    fn test_no_match_gives_single_spanning_row() {
        let dataset = companies(3);
        let mut state = TableState::new(dataset.schema(), DEFAULT_PAGE_SIZE, FilterMatch::CaseSensitive);
        state.set_filter("zzz");
        assert_eq!(
            state.body(&dataset),
            TableBody::NoResults { span: state.columns().len() }
        );
    }

    #[test]
    fn test_pagination_boundaries() {
        let dataset = companies(23);
        let mut state = TableState::new(dataset.schema(), DEFAULT_PAGE_SIZE, FilterMatch::CaseSensitive);
        assert!(!state.can_previous_page());
        assert!(state.can_next_page(&dataset));
        assert_eq!(state.row_model(&dataset).page_count, 3);

        state.next_page(&dataset);
        state.next_page(&dataset);
        assert_eq!(state.page_index(), 2);
        assert!(!state.can_next_page(&dataset));
        assert_eq!(state.page_rows(&dataset).len(), 3);

        state.next_page(&dataset);
        assert_eq!(state.page_index(), 2);

        state.previous_page();
        state.previous_page();
        state.previous_page();
        assert_eq!(state.page_index(), 0);
    }

    #[test]
    fn test_empty_dataset_has_no_pages() {
        let dataset = companies(0);
        let state = TableState::new(dataset.schema(), DEFAULT_PAGE_SIZE, FilterMatch::CaseSensitive);
        let model = state.row_model(&dataset);
        assert_eq!(model.page_count, 0);
        assert!(!state.can_next_page(&dataset));
        assert!(!state.can_previous_page());
        assert!(!state.is_all_page_rows_selected(&dataset));
    }

    #[test]
    fn test_filter_and_sort_reset_page() {
        let dataset = companies(15);
        let mut state = TableState::new(dataset.schema(), DEFAULT_PAGE_SIZE, FilterMatch::CaseSensitive);
        state.next_page(&dataset);
        state.set_filter("Societe");
        assert_eq!(state.page_index(), 0);
        state.next_page(&dataset);
        state.toggle_sort(CREATION);
        assert_eq!(state.page_index(), 0);
    }

    #[test]
    fn test_select_all_only_touches_current_page() {
        let dataset = companies(15);
        let mut state = TableState::new(dataset.schema(), DEFAULT_PAGE_SIZE, FilterMatch::CaseSensitive);
        state.next_page(&dataset);

        state.toggle_all_page_rows_selected(&dataset, true);
        let selected: Vec<RowId> = state.selected_rows().collect();
        assert_eq!(selected, (10..15).map(RowId).collect::<Vec<_>>());
        assert!(state.is_all_page_rows_selected(&dataset));

        state.previous_page();
        assert!(!state.is_all_page_rows_selected(&dataset));

        state.next_page(&dataset);
        state.toggle_all_page_rows_selected(&dataset, false);
        assert_eq!(state.selected_rows().count(), 0);
    }

    #[test]
    fn test_row_selection_and_filtered_count() {
        let dataset = companies(5);
        let mut state = TableState::new(dataset.schema(), DEFAULT_PAGE_SIZE, FilterMatch::CaseSensitive);
        state.toggle_row_selected(RowId(0));
        state.toggle_row_selected(RowId(3));
        state.toggle_row_selected(RowId(4));
        state.toggle_row_selected(RowId(4));
        assert!(state.is_row_selected(RowId(3)));
        assert!(!state.is_row_selected(RowId(4)));

        state.set_filter("03");
        assert_eq!(state.filtered_selected_count(&dataset), 1);
        assert_eq!(state.filtered_count(&dataset), 1);
        // selection survives filtering
        assert!(state.is_row_selected(RowId(0)));
    }

    #[test]
    fn test_zero_page_size_is_clamped() {
        let dataset = companies(2);
        let state = TableState::new(dataset.schema(), 0, FilterMatch::CaseSensitive);
        assert_eq!(state.page_size(), 1);
        assert_eq!(state.row_model(&dataset).page_count, 2);
    }
}
