use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;
use portal_core::{
    pledge_totals, project, update, Category, CategorySortField, CategoryStatus, FilterState,
    ListScreen, ListStatus, Msg, NamedRef, Pledge, PledgeSortField, Projection, SortKey,
};

fn init_logging() {
    portal_logging::initialize_for_tests();
}

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 8, 30, 12, 0, 0).unwrap()
}

fn categories() -> Vec<Category> {
    vec![
        Category {
            id: "1".to_string(),
            name: "Category 1".to_string(),
            description: Some("First".to_string()),
            is_disabled: false,
            created_at: t0(),
        },
        Category {
            id: "2".to_string(),
            name: "Category 2".to_string(),
            description: None,
            is_disabled: true,
            created_at: t0() - Duration::days(1),
        },
    ]
}

fn names(rows: &[portal_core::ViewRow<Category>]) -> Vec<&str> {
    rows.iter().map(|row| row.item.name.as_str()).collect()
}

fn loaded_screen() -> ListScreen<Category> {
    let (state, _) = update(ListScreen::new(), Msg::ScopeSelected("org-1".to_string()));
    let (state, _) = update(state, Msg::CollectionLoaded(categories()));
    state
}

#[test]
fn disabled_filter_keeps_only_disabled_categories() {
    let filter = FilterState::<Category> {
        status: Some(CategoryStatus::Disabled),
        ..FilterState::default()
    };
    let rows = project(
        &categories(),
        &filter,
        SortKey::desc(CategorySortField::CreatedAt),
    );
    assert_eq!(names(&rows), vec!["Category 2"]);
    assert_eq!(rows[0].serial_number, 1);
}

#[test]
fn creation_time_sorting_in_both_directions() {
    let filter = FilterState::default();
    let asc = project(&categories(), &filter, SortKey::asc(CategorySortField::CreatedAt));
    assert_eq!(names(&asc), vec!["Category 2", "Category 1"]);

    let desc = project(&categories(), &filter, SortKey::desc(CategorySortField::CreatedAt));
    assert_eq!(names(&desc), vec!["Category 1", "Category 2"]);
}

#[test]
fn projection_is_deterministic_and_serially_numbered() {
    let filter = FilterState::default();
    let sort = SortKey::asc(CategorySortField::CreatedAt);
    let first = project(&categories(), &filter, sort);
    let second = project(&categories(), &filter, sort);
    assert_eq!(first, second);
    for (index, row) in first.iter().enumerate() {
        assert_eq!(row.serial_number, index + 1);
    }
}

#[test]
fn empty_source_projects_to_no_rows() {
    let rows = project::<Category>(&[], &FilterState::default(), SortKey::Unsorted);
    assert!(rows.is_empty());
}

#[test]
fn projection_recomputes_only_when_inputs_change() {
    let source: Arc<[Category]> = Arc::from(categories());
    let mut filter = FilterState::default();
    let sort = SortKey::desc(CategorySortField::CreatedAt);
    let mut projection = Projection::new();

    assert!(projection.refresh(Some(&source), &filter, sort));
    assert!(!projection.refresh(Some(&source), &filter, sort));

    // Same contents, new snapshot.
    let refetched: Arc<[Category]> = Arc::from(categories());
    assert!(projection.refresh(Some(&refetched), &filter, sort));

    filter.search_term = "2".to_string();
    assert!(projection.refresh(Some(&refetched), &filter, sort));
    assert_eq!(names(&projection.rows()), vec!["Category 2"]);

    assert!(projection.refresh(Some(&refetched), &filter, SortKey::Unsorted));
    assert!(!projection.refresh(Some(&refetched), &filter, SortKey::Unsorted));
}

#[test]
fn submitted_search_narrows_screen_rows() {
    init_logging();
    let state = loaded_screen();
    let (state, _) = update(state, Msg::SearchInputChanged("Category 1".to_string()));
    assert_eq!(state.view().rows.len(), 2, "draft alone does not filter");

    let (state, effects) = update(state, Msg::SearchSubmitted);
    let view = state.view();
    assert!(effects.is_empty());
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].item.name, "Category 1");
    assert_eq!(view.rows[0].serial_number, 1);
    assert_eq!(view.filter.search_term, "Category 1");
}

#[test]
fn screen_reapplies_filter_and_sort_changes() {
    init_logging();
    let state = loaded_screen();
    assert_eq!(names(&state.view().rows), vec!["Category 1", "Category 2"]);

    let (state, _) = update(
        state,
        Msg::SortChanged(SortKey::asc(CategorySortField::CreatedAt)),
    );
    assert_eq!(names(&state.view().rows), vec!["Category 2", "Category 1"]);

    let (state, _) = update(
        state,
        Msg::StatusFilterChanged(Some(CategoryStatus::Active)),
    );
    assert_eq!(names(&state.view().rows), vec!["Category 1"]);

    let (state, _) = update(state, Msg::SearchChanged("nothing".to_string()));
    let view = state.view();
    assert_eq!(view.status, ListStatus::Ready);
    assert!(view.rows.is_empty());
    assert_eq!(view.total_count, 2);
}

#[test]
fn loading_is_distinct_from_empty() {
    init_logging();
    let (state, effects) = update(
        ListScreen::<Category>::new(),
        Msg::ScopeSelected("org-1".to_string()),
    );
    assert_eq!(effects.len(), 1);
    assert_eq!(state.view().status, ListStatus::Loading);
    assert!(state.view().rows.is_empty());

    let (state, _) = update(state, Msg::CollectionLoaded(Vec::new()));
    assert_eq!(state.view().status, ListStatus::Ready);
    assert!(state.view().rows.is_empty());
}

#[test]
fn pledge_totals_ignore_the_search_filter() {
    let pledges = vec![
        Pledge {
            id: "p1".to_string(),
            amount: 100.0,
            currency: "USD".to_string(),
            end_date: t0(),
            users: vec![NamedRef {
                id: "u1".to_string(),
                name: Some("John Doe".to_string()),
            }],
            created_at: t0(),
        },
        Pledge {
            id: "p2".to_string(),
            amount: 200.0,
            currency: "USD".to_string(),
            end_date: t0(),
            users: vec![NamedRef {
                id: "u2".to_string(),
                name: Some("Jane Roe".to_string()),
            }],
            created_at: t0(),
        },
    ];
    let filter = FilterState::<Pledge> {
        search_term: "jane".to_string(),
        ..FilterState::default()
    };
    let rows = project(&pledges, &filter, SortKey::desc(PledgeSortField::Amount));
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].item.id, "p2");

    let totals = pledge_totals(&pledges);
    assert_eq!(totals.count, 2);
    assert_eq!(totals.pledged, 300.0);
    assert_eq!(totals.currency.as_deref(), Some("USD"));
}
