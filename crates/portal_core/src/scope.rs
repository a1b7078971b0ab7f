use chrono::{DateTime, Utc};

/// Warning shown when a create is attempted outside the scope's open window.
pub(crate) const SCOPE_NOT_ACTIVE: &str = "campaignNotActive";

/// Details of the selected scope served alongside its collection, such as a
/// fund campaign's dates and goal. Scopes without such details never send one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScopeHeader {
    pub name: Option<String>,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub goal: Option<f64>,
    pub currency: Option<String>,
}

impl ScopeHeader {
    /// Whether new records may be added at `at`. Both bounds are inclusive;
    /// a missing bound leaves that side open.
    pub fn accepts_new_at(&self, at: DateTime<Utc>) -> bool {
        self.start_at.map_or(true, |start| start <= at) && self.end_at.map_or(true, |end| at <= end)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn window() -> ScopeHeader {
        ScopeHeader {
            start_at: Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()),
            end_at: Some(Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap()),
            ..ScopeHeader::default()
        }
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let header = window();
        assert!(header.accepts_new_at(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()));
        assert!(header.accepts_new_at(Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap()));
        assert!(!header.accepts_new_at(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()));
        assert!(!header.accepts_new_at(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()));
    }

    #[test]
    fn missing_bounds_are_open() {
        let at = Utc.with_ymd_and_hms(1999, 1, 1, 0, 0, 0).unwrap();
        assert!(ScopeHeader::default().accepts_new_at(at));
    }
}
