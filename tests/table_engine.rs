use aidboard::table::{
    Badge, Column, ColumnType, EmptyState, FilterOption, FilterType, Record, SortDirection, Value,
    ViewConfig, ViewState, compute_view, process, render_cell,
};

// ============================================================================
// Helper Functions
// ============================================================================

#[derive(Debug, Clone)]
struct FamilyRow {
    id: i64,
    family_name: String,
    status: String,
    members: i64,
}

impl Record for FamilyRow {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }

    fn field(&self, key: &str) -> Value {
        match key {
            "id" => self.id.into(),
            "family_name" => self.family_name.as_str().into(),
            "status" => self.status.as_str().into(),
            "members" => self.members.into(),
            _ => Value::Null,
        }
    }
}

fn row(id: i64, family_name: &str, status: &str, members: i64) -> FamilyRow {
    FamilyRow {
        id,
        family_name: family_name.to_string(),
        status: status.to_string(),
        members,
    }
}

fn columns() -> Vec<Column<FamilyRow>> {
    vec![
        Column::new("family_name", "Family").filter(FilterType::Text),
        Column::new("status", "Status")
            .kind(ColumnType::Status)
            .filter(FilterType::Select)
            .options(vec![
                FilterOption::new("active", "Active"),
                FilterOption::new("inactive", "Inactive"),
            ]),
        Column::new("members", "Members"),
    ]
}

fn config() -> ViewConfig {
    ViewConfig {
        searchable: true,
        filterable: true,
        sortable: true,
        ..ViewConfig::default()
    }
}

/// 25 families: ids 1..=15 active, 16..=25 inactive.
fn twenty_five() -> Vec<FamilyRow> {
    (1..=25)
        .map(|i| {
            let status = if i <= 15 { "active" } else { "inactive" };
            row(i, &format!("Family {i:02}"), status, i % 4)
        })
        .collect()
}

fn ids(rows: &[&FamilyRow]) -> Vec<i64> {
    rows.iter().map(|r| r.id).collect()
}

// ============================================================================
// Pipeline Scenarios
// ============================================================================

#[test]
fn test_status_filter_paginates_active_families() {
    let records = twenty_five();
    let cols = columns();
    let mut state = ViewState::new();
    state.set_filter("status", "active");

    let page_one = compute_view(&records, &cols, &config(), &state);
    assert_eq!(page_one.total_filtered_count, 15);
    assert_eq!(page_one.total_pages, 2);
    assert_eq!(ids(&page_one.visible_rows), (1..=10).collect::<Vec<_>>());

    state.set_page(2, page_one.total_pages);
    let page_two = compute_view(&records, &cols, &config(), &state);
    assert_eq!(ids(&page_two.visible_rows), (11..=15).collect::<Vec<_>>());
}

#[test]
fn test_narrowing_resets_to_first_page() {
    let records = twenty_five();
    let cols = columns();
    let mut state = ViewState::new();
    state.set_page(3, 3);
    assert_eq!(state.current_page, 3);

    state.set_search("family 0");
    let view = compute_view(&records, &cols, &config(), &state);
    assert_eq!(view.current_page, 1);
    assert_eq!(view.total_filtered_count, 9);
    assert!(view.total_filtered_count < 2 * config().page_size());
}

#[test]
fn test_search_and_filter_intersect() {
    let records = twenty_five();
    let cols = columns();
    let mut state = ViewState::new();
    state.set_search("family 1");
    let searched: Vec<i64> = ids(&process(&records, &cols, &config(), &state));

    state.set_filter("status", "inactive");
    let both: Vec<i64> = ids(&process(&records, &cols, &config(), &state));

    let mut filter_only = ViewState::new();
    filter_only.set_filter("status", "inactive");
    let filtered: Vec<i64> = ids(&process(&records, &cols, &config(), &filter_only));

    let expected: Vec<i64> = searched.into_iter().filter(|id| filtered.contains(id)).collect();
    assert_eq!(both, expected);
    assert_eq!(both, vec![16, 17, 18, 19]);
}

#[test]
fn test_search_matches_any_column() {
    let records = vec![row(1, "Qureshi", "active", 3), row(2, "Ansari", "pending", 5)];
    let mut state = ViewState::new();
    state.set_search("PEND");
    let view = compute_view(&records, &columns(), &config(), &state);
    assert_eq!(ids(&view.visible_rows), vec![2]);
}

// ============================================================================
// Sorting
// ============================================================================

#[test]
fn test_sort_asc_then_desc_reverses_without_ties() {
    let records = vec![
        row(1, "Memon", "active", 1),
        row(2, "Ansari", "active", 2),
        row(3, "Qureshi", "active", 3),
        row(4, "Bukhari", "active", 4),
    ];
    let cols = columns();
    let mut state = ViewState::new();
    state.sort_by("family_name");
    assert_eq!(state.sort.direction, SortDirection::Asc);
    let asc = ids(&process(&records, &cols, &config(), &state));
    assert_eq!(asc, vec![2, 4, 1, 3]);

    state.sort_by("family_name");
    assert_eq!(state.sort.direction, SortDirection::Desc);
    let desc = ids(&process(&records, &cols, &config(), &state));
    let mut reversed = asc.clone();
    reversed.reverse();
    assert_eq!(desc, reversed);
}

#[test]
fn test_sort_ties_keep_input_order_both_ways() {
    let records = vec![
        row(1, "A", "active", 2),
        row(2, "B", "active", 1),
        row(3, "C", "active", 2),
        row(4, "D", "active", 1),
    ];
    let cols = columns();
    let mut state = ViewState::new();
    state.sort_by("members");
    assert_eq!(ids(&process(&records, &cols, &config(), &state)), vec![2, 4, 1, 3]);
    state.sort_by("members");
    assert_eq!(ids(&process(&records, &cols, &config(), &state)), vec![1, 3, 2, 4]);
}

#[test]
fn test_repeated_sort_is_idempotent() {
    let records = twenty_five();
    let cols = columns();
    let mut state = ViewState::new();
    state.sort_by("members");
    let first = ids(&process(&records, &cols, &config(), &state));
    let second = ids(&process(&records, &cols, &config(), &state));
    assert_eq!(first, second);
}

#[test]
fn test_custom_sort_fn_controls_direction() {
    // Sorts by string length, longest first regardless of direction
    let cols = vec![Column::<FamilyRow>::new("family_name", "Family").sort_with(
        |a: &Value, b: &Value, _direction| b.to_string().len().cmp(&a.to_string().len()),
    )];
    let records = vec![row(1, "Li", "active", 0), row(2, "Qureshi", "active", 0)];
    let mut state = ViewState::new();
    state.sort_by("family_name");
    assert_eq!(ids(&process(&records, &cols, &config(), &state)), vec![2, 1]);
    state.sort_by("family_name");
    assert_eq!(ids(&process(&records, &cols, &config(), &state)), vec![2, 1]);
}

// ============================================================================
// Pagination
// ============================================================================

#[test]
fn test_pages_cover_every_row_exactly_once() {
    let records = twenty_five();
    let cols = columns();
    let mut state = ViewState::new();
    let total_pages = compute_view(&records, &cols, &config(), &state).total_pages;
    assert_eq!(total_pages, 3);

    let mut seen = Vec::new();
    for page in 1..=total_pages {
        state.set_page(page, total_pages);
        let view = compute_view(&records, &cols, &config(), &state);
        assert!(view.visible_rows.len() <= config().page_size());
        seen.extend(ids(&view.visible_rows));
    }
    assert_eq!(seen, (1..=25).collect::<Vec<_>>());
}

#[test]
fn test_page_navigation_stops_at_bounds() {
    let mut state = ViewState::<i64>::new();
    assert!(!state.prev_page());
    assert!(state.next_page(2));
    assert!(!state.next_page(2));
    assert_eq!(state.current_page, 2);
    state.set_page(9, 2);
    assert_eq!(state.current_page, 2);
    state.set_page(0, 0);
    assert_eq!(state.current_page, 1);
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn test_select_all_with_partial_page_selection() {
    let records = twenty_five();
    let cols = columns();
    let mut state = ViewState::new();
    let page_ids = compute_view(&records, &cols, &config(), &state).page_ids();
    assert_eq!(page_ids.len(), 10);

    for id in &page_ids[..3] {
        state.toggle_select_row(*id);
    }
    state.toggle_select_all(&page_ids);
    assert_eq!(state.selected.len(), 10);
    assert!(page_ids.iter().all(|id| state.selected.contains(id)));

    state.toggle_select_all(&page_ids);
    assert!(state.selected.is_empty());
}

#[test]
fn test_select_all_keeps_other_pages() {
    let records = twenty_five();
    let cols = columns();
    let mut state = ViewState::new();
    state.toggle_select_row(25);
    let page_ids = compute_view(&records, &cols, &config(), &state).page_ids();
    state.toggle_select_all(&page_ids);
    state.toggle_select_all(&page_ids);
    assert_eq!(state.selected.len(), 1);
    assert!(state.selected.contains(&25));
}

// ============================================================================
// Empty States and Formatting
// ============================================================================

#[test]
fn test_empty_records_show_no_data() {
    let records: Vec<FamilyRow> = Vec::new();
    let view = compute_view(&records, &columns(), &config(), &ViewState::new());
    assert_eq!(view.empty_state, Some(EmptyState::NoData));
    assert!(!EmptyState::NoData.offers_clear_filters());
}

#[test]
fn test_unmatched_search_shows_no_matches() {
    let records = twenty_five();
    let mut state = ViewState::new();
    state.set_search("xyz");
    let view = compute_view(&records, &columns(), &config(), &state);
    assert_eq!(view.empty_state, Some(EmptyState::NoMatches));
    assert!(view.visible_rows.is_empty());
    assert!(EmptyState::NoMatches.offers_clear_filters());

    state.clear_filters();
    let cleared = compute_view(&records, &columns(), &config(), &state);
    assert_eq!(cleared.empty_state, None);
    assert_eq!(cleared.total_filtered_count, 25);
}

#[test]
fn test_unknown_status_renders_default_badge() {
    let cols = columns();
    let status = &cols[1];
    let known = render_cell(&row(1, "Memon", "inactive", 0), status);
    assert_eq!(known.text, "Inactive");
    assert_eq!(known.badge, Some(Badge::Inactive));

    let unknown = render_cell(&row(2, "Memon", "suspended", 0), status);
    assert_eq!(unknown.text, "Suspended");
    assert_eq!(unknown.badge, Some(Badge::Default));
}

#[test]
fn test_search_over_no_records_is_still_no_data() {
    let records: Vec<FamilyRow> = Vec::new();
    let mut state = ViewState::new();
    state.set_search("xyz");
    let view = compute_view(&records, &columns(), &config(), &state);
    assert_eq!(view.empty_state, Some(EmptyState::NoData));
}

#[test]
fn test_search_term_ignored_when_search_is_off() {
    let unsearchable = ViewConfig {
        searchable: false,
        ..config()
    };
    let mut state = ViewState::new();
    state.set_search("xyz");

    let empty: Vec<FamilyRow> = Vec::new();
    let view = compute_view(&empty, &columns(), &unsearchable, &state);
    assert_eq!(view.empty_state, Some(EmptyState::NoData));

    let records = twenty_five();
    let view = compute_view(&records, &columns(), &unsearchable, &state);
    assert_eq!(view.total_filtered_count, 25);
    assert_eq!(view.empty_state, None);
}
