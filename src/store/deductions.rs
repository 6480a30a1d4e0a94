//! The in-memory deduction list.

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use crate::config::ConfigLoader;
use crate::error::{AdminError, AdminResult};
use crate::models::{Deduction, DeductionStatus, ExtractedDeduction};

use super::merge::{MergeOutcome, merge_candidates};

/// Holds every deduction, newest first.
///
/// Payroll codes are unique across the list. Uniqueness is checked with a
/// linear scan whenever a deduction is saved or a batch is merged.
#[derive(Debug, Default)]
pub struct DeductionStore {
    deductions: RwLock<Vec<Deduction>>,
}

impl DeductionStore {
    /// Creates a store holding `deductions` in the given order.
    pub fn new(deductions: Vec<Deduction>) -> Self {
        Self {
            deductions: RwLock::new(deductions),
        }
    }

    /// Creates a store from the seed deductions in the catalog.
    ///
    /// Seed deductions are filed under their category's catalog title and
    /// stamped with `now` as their creation time.
    pub fn from_config(config: &ConfigLoader, now: DateTime<Utc>) -> AdminResult<Self> {
        let deductions = config
            .config()
            .deductions()
            .iter()
            .map(|seed| {
                let title = config.get_category(seed.category)?.title.clone();
                Ok(Deduction {
                    id: seed.id.clone(),
                    plan_name: seed.plan_name.clone(),
                    provider_name: seed.provider_name.clone(),
                    category: title,
                    subtype: seed.subtype.clone(),
                    payroll_code: seed.payroll_code.clone(),
                    status: seed.status,
                    is_pre_tax: seed.is_pre_tax,
                    created_at: now,
                    employee_count: seed.employee_count,
                })
            })
            .collect::<AdminResult<Vec<_>>>()?;

        Ok(Self::new(deductions))
    }

    /// Lists deductions whose plan name, provider name or payroll code
    /// contains `query` (case-insensitive). An empty query lists all.
    pub async fn list(&self, query: &str) -> Vec<Deduction> {
        let deductions = self.deductions.read().await;
        deductions
            .iter()
            .filter(|d| d.matches_query(query))
            .cloned()
            .collect()
    }

    /// Returns the number of deductions.
    pub async fn len(&self) -> usize {
        self.deductions.read().await.len()
    }

    /// Gets a deduction by id.
    pub async fn get(&self, id: &str) -> AdminResult<Deduction> {
        let deductions = self.deductions.read().await;
        deductions
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    /// Adds a new deduction at the top of the list.
    ///
    /// The saved deduction is `Active` with no enrolled employees.
    pub async fn create(&self, deduction: Deduction) -> AdminResult<Deduction> {
        let mut deductions = self.deductions.write().await;
        ensure_unique_code(&deductions, &deduction)?;

        let saved = Deduction {
            status: DeductionStatus::Active,
            employee_count: 0,
            ..deduction
        };
        deductions.insert(0, saved.clone());
        debug!(id = %saved.id, code = %saved.payroll_code, "Deduction created");
        Ok(saved)
    }

    /// Replaces the deduction with the same id.
    ///
    /// Like a new deduction, the saved one is `Active` and its enrolled
    /// employee count starts over at zero.
    pub async fn update(&self, deduction: Deduction) -> AdminResult<Deduction> {
        let mut deductions = self.deductions.write().await;
        ensure_unique_code(&deductions, &deduction)?;

        let slot = deductions
            .iter_mut()
            .find(|d| d.id == deduction.id)
            .ok_or_else(|| not_found(&deduction.id))?;
        *slot = Deduction {
            status: DeductionStatus::Active,
            employee_count: 0,
            ..deduction
        };
        debug!(id = %slot.id, "Deduction updated");
        Ok(slot.clone())
    }

    /// Flips a deduction between active and inactive.
    pub async fn toggle_status(&self, id: &str) -> AdminResult<Deduction> {
        let mut deductions = self.deductions.write().await;
        let slot = deductions
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| not_found(id))?;
        slot.status = slot.status.toggled();
        debug!(id = %slot.id, status = %slot.status, "Deduction status toggled");
        Ok(slot.clone())
    }

    /// Merges extracted candidates, skipping payroll codes already in use.
    ///
    /// Added deductions go to the top of the list in extraction order.
    pub async fn merge_extracted(
        &self,
        candidates: &[ExtractedDeduction],
        config: &ConfigLoader,
        now: DateTime<Utc>,
    ) -> MergeOutcome {
        let mut deductions = self.deductions.write().await;
        let outcome = merge_candidates(&deductions, candidates, config, now);
        deductions.splice(0..0, outcome.added.iter().cloned());
        outcome
    }
}

fn ensure_unique_code(deductions: &[Deduction], candidate: &Deduction) -> AdminResult<()> {
    let duplicate = deductions
        .iter()
        .any(|d| d.payroll_code == candidate.payroll_code && d.id != candidate.id);
    if duplicate {
        Err(AdminError::DuplicatePayrollCode {
            code: candidate.payroll_code.clone(),
        })
    } else {
        Ok(())
    }
}

fn not_found(id: &str) -> AdminError {
    AdminError::DeductionNotFound { id: id.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_store() -> DeductionStore {
        let config = ConfigLoader::load("./config/catalog").expect("Failed to load config");
        DeductionStore::from_config(&config, Utc::now()).unwrap()
    }

    fn new_deduction(id: &str, code: &str) -> Deduction {
        Deduction {
            id: id.to_string(),
            plan_name: "Gold HMO".to_string(),
            provider_name: "Kaiser".to_string(),
            category: "Medical".to_string(),
            subtype: "HMO Plan".to_string(),
            payroll_code: code.to_string(),
            status: DeductionStatus::Pending,
            is_pre_tax: true,
            created_at: Utc::now(),
            employee_count: 5,
        }
    }

    #[tokio::test]
    async fn test_seed_order_and_titles() {
        let store = create_store();
        let all = store.list("").await;
        let ids: Vec<_> = all.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
        assert_eq!(all[1].category, "Retirement Contribution");
    }

    #[tokio::test]
    async fn test_list_filters_case_insensitively() {
        let store = create_store();
        let hits = store.list("DELTA").await;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].payroll_code, "DEN-DEL-01");

        assert!(store.list("no such plan").await.is_empty());
    }

    #[tokio::test]
    async fn test_create_prepends_active_with_zero_count() {
        let store = create_store();
        let saved = store
            .create(new_deduction("new", "MED-KAI-01"))
            .await
            .unwrap();
        assert_eq!(saved.status, DeductionStatus::Active);
        assert_eq!(saved.employee_count, 0);
        assert_eq!(store.list("").await[0].id, "new");
        assert_eq!(store.len().await, 5);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_code() {
        let store = create_store();
        let result = store.create(new_deduction("new", "RET-FID-01")).await;
        match result {
            Err(AdminError::DuplicatePayrollCode { code }) => assert_eq!(code, "RET-FID-01"),
            other => panic!("Expected DuplicatePayrollCode, got {:?}", other),
        }
        assert_eq!(store.len().await, 4);
    }

    #[tokio::test]
    async fn test_update_keeps_position_activates_and_resets_count() {
        let store = create_store();
        let mut vision = store.get("4").await.unwrap();
        assert_eq!(vision.employee_count, 7);
        vision.plan_name = "Vision Platinum".to_string();

        let saved = store.update(vision).await.unwrap();
        assert_eq!(saved.status, DeductionStatus::Active);
        assert_eq!(saved.employee_count, 0);
        assert_eq!(store.list("").await[3].plan_name, "Vision Platinum");
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let store = create_store();
        assert!(matches!(
            store.update(new_deduction("missing", "X-1")).await,
            Err(AdminError::DeductionNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_toggle_status_round_trip() {
        let store = create_store();
        assert_eq!(
            store.toggle_status("1").await.unwrap().status,
            DeductionStatus::Inactive
        );
        assert_eq!(
            store.toggle_status("1").await.unwrap().status,
            DeductionStatus::Active
        );
        assert!(store.toggle_status("nope").await.is_err());
    }

    #[tokio::test]
    async fn test_merge_prepends_in_extraction_order() {
        let store = create_store();
        let candidates = vec![
            ExtractedDeduction {
                plan_name: "Commuter".to_string(),
                provider_name: "Wex".to_string(),
                category: "Tax-Advantaged Benefits".to_string(),
                suggested_code: "BEN-WEX-01".to_string(),
            },
            ExtractedDeduction {
                plan_name: "Basic PPO".to_string(),
                provider_name: "BlueCross".to_string(),
                category: "Medical".to_string(),
                suggested_code: "MED-BCBS-01".to_string(),
            },
            ExtractedDeduction {
                plan_name: "Term Life".to_string(),
                provider_name: "MetLife".to_string(),
                category: "Generic / Other".to_string(),
                suggested_code: "OTH-MET-01".to_string(),
            },
        ];

        let config = ConfigLoader::load("./config/catalog").expect("Failed to load config");
        let outcome = store
            .merge_extracted(&candidates, &config, Utc::now())
            .await;
        assert_eq!(outcome.added.len(), 2);
        assert_eq!(outcome.skipped(), 1);

        let codes: Vec<_> = store
            .list("")
            .await
            .into_iter()
            .map(|d| d.payroll_code)
            .take(3)
            .collect();
        assert_eq!(codes, vec!["BEN-WEX-01", "OTH-MET-01", "MED-BCBS-01"]);
    }
}
