//! Pledges made towards a fund campaign.
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{changed, NamedRef};
use crate::item::text_keys;
use crate::{Changeset, Editable, ListItem, ScreenMessages, SortKey, SortValue};

#[derive(Debug, Clone, PartialEq)]
pub struct Pledge {
    pub id: String,
    pub amount: f64,
    pub currency: String,
    /// Campaign end date; every pledge of a campaign shares it.
    pub end_date: DateTime<Utc>,
    pub users: Vec<NamedRef>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PledgeSearchField {
    Pledger,
}

text_keys!(PledgeSearchField {
    Pledger => "pledger",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PledgeSortField {
    Amount,
    EndDate,
    CreatedAt,
}

text_keys!(PledgeSortField {
    Amount => "amount",
    EndDate => "endDate",
    CreatedAt => "createdAt",
});

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PledgeDraft {
    pub amount: f64,
    pub pledger_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PledgePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    /// `Some(None)` clears the pledger; validation rejects that.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pledger_id: Option<Option<String>>,
}

impl Changeset for PledgePatch {
    fn is_empty(&self) -> bool {
        self.amount.is_none() && self.pledger_id.is_none()
    }
}

impl ListItem for Pledge {
    type SearchField = PledgeSearchField;
    /// Pledges have no status filter.
    type Status = ();
    type SortField = PledgeSortField;

    const DEFAULT_SEARCH_FIELDS: &'static [PledgeSearchField] = &[PledgeSearchField::Pledger];
    const DEFAULT_SORT: SortKey<PledgeSortField> = SortKey::desc(PledgeSortField::EndDate);

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn search_texts(&self, field: PledgeSearchField) -> Vec<&str> {
        match field {
            PledgeSearchField::Pledger => self
                .users
                .iter()
                .filter_map(|user| user.name.as_deref())
                .collect(),
        }
    }

    fn status(&self) {}

    fn sort_value(&self, field: PledgeSortField) -> SortValue {
        match field {
            PledgeSortField::Amount => SortValue::Number(self.amount),
            PledgeSortField::EndDate => SortValue::Time(Some(self.end_date)),
            PledgeSortField::CreatedAt => SortValue::Time(Some(self.created_at)),
        }
    }
}

impl Editable for Pledge {
    type Draft = PledgeDraft;
    type Patch = PledgePatch;

    const MESSAGES: ScreenMessages = ScreenMessages {
        created: "pledgeCreated",
        updated: "pledgeUpdated",
        deleted: "pledgeDeleted",
        nothing_changed: "noneUpdated",
    };

    fn draft(&self) -> PledgeDraft {
        PledgeDraft {
            amount: self.amount,
            pledger_id: self.users.first().map(|user| user.id.clone()),
        }
    }

    fn diff(&self, draft: &PledgeDraft) -> PledgePatch {
        let current = self.draft();
        PledgePatch {
            amount: changed(&current.amount, &draft.amount),
            pledger_id: changed(&current.pledger_id, &draft.pledger_id),
        }
    }

    fn validate(draft: &PledgeDraft) -> Result<(), &'static str> {
        if draft.amount.is_nan() || draft.amount <= 0.0 {
            return Err("invalidAmount");
        }
        if draft.pledger_id.is_none() {
            return Err("pledgerRequired");
        }
        Ok(())
    }
}

/// Campaign-level figures, computed over every fetched pledge regardless of
/// the active search.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PledgeTotals {
    pub count: usize,
    pub pledged: f64,
    pub currency: Option<String>,
}

pub fn pledge_totals(pledges: &[Pledge]) -> PledgeTotals {
    PledgeTotals {
        count: pledges.len(),
        pledged: pledges.iter().map(|pledge| pledge.amount).sum(),
        currency: pledges.first().map(|pledge| pledge.currency.clone()),
    }
}
