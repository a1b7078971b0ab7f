use std::cmp::Ordering;

use chrono::{DateTime, Duration, TimeZone, Utc};
use portal_core::{
    compare, matches, ActionItem, ActionItemSearchField, ActionItemSortField, Category,
    CategorySearchField, CategorySortField, CategoryStatus, FilterState, ItemStatus, NamedRef,
    Pledge, PledgeSortField, SortKey,
};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 8, 30, 12, 0, 0).unwrap()
}

fn category(name: &str, description: Option<&str>, is_disabled: bool, age_days: i64) -> Category {
    Category {
        id: name.to_lowercase().replace(' ', "-"),
        name: name.to_string(),
        description: description.map(str::to_string),
        is_disabled,
        created_at: t0() - Duration::days(age_days),
    }
}

fn action_item(id: &str, assignee: Option<&str>, category: Option<&str>) -> ActionItem {
    ActionItem {
        id: id.to_string(),
        assignee: assignee.map(|name| NamedRef {
            id: format!("user-{id}"),
            name: Some(name.to_string()),
        }),
        category: category.map(|name| NamedRef {
            id: format!("cat-{id}"),
            name: Some(name.to_string()),
        }),
        assigned_at: None,
        is_completed: false,
        pre_completion_notes: String::new(),
        post_completion_notes: String::new(),
        created_at: t0(),
    }
}

fn pledge(id: &str, amount: f64) -> Pledge {
    Pledge {
        id: id.to_string(),
        amount,
        currency: "USD".to_string(),
        end_date: t0(),
        users: Vec::new(),
        created_at: t0(),
    }
}

#[test]
fn unrestricted_filter_matches_everything() {
    let filter = FilterState::<Category>::default();
    assert!(filter.is_unrestricted());
    for item in [
        category("Category 1", None, false, 0),
        category("", Some(""), true, 3),
    ] {
        assert!(matches(&item, &filter));
    }
}

#[test]
fn search_is_case_insensitive_across_default_fields() {
    let item = category("Outreach", Some("Door to door visits"), false, 0);
    let mut filter = FilterState::<Category>::default();

    filter.search_term = "OUTREACH".to_string();
    assert!(matches(&item, &filter));

    filter.search_term = "door".to_string();
    assert!(matches(&item, &filter));

    filter.search_term = "missing".to_string();
    assert!(!matches(&item, &filter));
}

#[test]
fn missing_text_field_is_non_matching_only_for_that_field() {
    let item = category("Logistics", None, false, 0);
    let mut filter = FilterState::<Category>::default();
    filter.search_term = "logi".to_string();
    assert!(matches(&item, &filter));

    filter.search_by = Some(CategorySearchField::Description);
    assert!(!matches(&item, &filter));
}

#[test]
fn text_and_status_are_and_composed() {
    let disabled = category("Category 2", None, true, 1);
    let mut filter = FilterState::<Category>::default();

    filter.search_term = "Category 2".to_string();
    filter.status = Some(CategoryStatus::Active);
    assert!(!matches(&disabled, &filter), "status mismatch must reject");

    filter.search_term = "nope".to_string();
    filter.status = Some(CategoryStatus::Disabled);
    assert!(!matches(&disabled, &filter), "text mismatch must reject");

    filter.search_term = "category".to_string();
    assert!(matches(&disabled, &filter));
}

#[test]
fn action_item_search_by_selects_the_field() {
    let item = action_item("1", Some("John Doe"), Some("Setup"));
    let mut filter = FilterState::<ActionItem>::default();

    filter.search_term = "setup".to_string();
    assert!(!matches(&item, &filter), "defaults to the assignee");

    filter.search_by = Some(ActionItemSearchField::Category);
    assert!(matches(&item, &filter));

    let unassigned = action_item("2", None, None);
    filter.search_by = Some(ActionItemSearchField::Assignee);
    filter.search_term = "john".to_string();
    assert!(!matches(&unassigned, &filter));

    filter.search_term.clear();
    filter.status = Some(ItemStatus::Pending);
    assert!(matches(&unassigned, &filter));
}

#[test]
fn descending_is_the_reverse_of_ascending() {
    let items = [
        category("a", None, false, 0),
        category("b", None, false, 1),
        category("c", None, false, 1),
    ];
    let asc = SortKey::asc(CategorySortField::CreatedAt);
    let desc = SortKey::desc(CategorySortField::CreatedAt);
    for a in &items {
        for b in &items {
            assert_eq!(compare(a, b, desc), compare(a, b, asc).reverse());
        }
    }

    let pledges = [pledge("p1", 10.0), pledge("p2", 250.5)];
    for a in &pledges {
        for b in &pledges {
            assert_eq!(
                compare(a, b, SortKey::desc(PledgeSortField::Amount)),
                compare(a, b, SortKey::asc(PledgeSortField::Amount)).reverse()
            );
        }
    }
}

#[test]
fn unsorted_key_compares_everything_equal() {
    let a = action_item("1", Some("A"), None);
    let mut b = action_item("2", Some("B"), None);
    b.created_at = t0() - Duration::days(5);
    assert_eq!(compare(&a, &b, SortKey::Unsorted), Ordering::Equal);
    assert_eq!(compare(&b, &a, SortKey::Unsorted), Ordering::Equal);
}

#[test]
fn missing_assigned_at_orders_first_ascending() {
    let mut assigned = action_item("1", None, None);
    assigned.assigned_at = Some(t0());
    let unassigned = action_item("2", None, None);

    let key = SortKey::asc(ActionItemSortField::AssignedAt);
    assert_eq!(compare(&unassigned, &assigned, key), Ordering::Less);
}

#[test]
fn sort_keys_have_a_stable_text_form() {
    let key: SortKey<CategorySortField> = "createdAt_DESC".parse().unwrap();
    assert_eq!(key, SortKey::desc(CategorySortField::CreatedAt));
    assert_eq!(key.to_string(), "createdAt_DESC");

    let key: SortKey<PledgeSortField> = "amount_ASC".parse().unwrap();
    assert_eq!(key, SortKey::asc(PledgeSortField::Amount));

    let key: SortKey<ActionItemSortField> = "none".parse().unwrap();
    assert_eq!(key, SortKey::Unsorted);

    assert!("createdAt_UP".parse::<SortKey<CategorySortField>>().is_err());
    assert!("name_ASC".parse::<SortKey<CategorySortField>>().is_err());
    assert_eq!("disabled".parse::<CategoryStatus>(), Ok(CategoryStatus::Disabled));
}
