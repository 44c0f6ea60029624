//! In-memory implementation of the storage ports.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::error::EngineResult;
use crate::models::{
    ContributionRule, Employee, NewPayrollRecord, PayrollRecord, PayrollStatus, PeriodKey,
};

use super::ports::{EmployeeDirectory, InsertOutcome, PayrollLedger, StatusTransition};

#[derive(Debug, Default)]
struct Ledger {
    last_id: u64,
    records: BTreeMap<u64, PayrollRecord>,
    // Unique index on the period key.
    by_period: HashMap<PeriodKey, u64>,
}

/// A thread-safe in-memory store for employees, contribution rules and
/// payroll records.
///
/// Cloning is cheap and clones share the same data. The period-key index
/// and the record map live behind a single lock, so
/// [`insert_if_absent`](PayrollLedger::insert_if_absent) is atomic.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    employees: Arc<RwLock<HashMap<u64, Employee>>>,
    rules: Arc<RwLock<Vec<ContributionRule>>>,
    ledger: Arc<RwLock<Ledger>>,
}

impl InMemoryStore {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with employees and contribution rules.
    pub fn from_seed(employees: Vec<Employee>, rules: Vec<ContributionRule>) -> Self {
        let employees = employees.into_iter().map(|e| (e.id, e)).collect();
        Self {
            employees: Arc::new(RwLock::new(employees)),
            rules: Arc::new(RwLock::new(rules)),
            ledger: Arc::default(),
        }
    }

    /// Adds or replaces an employee.
    pub async fn put_employee(&self, employee: Employee) {
        self.employees.write().await.insert(employee.id, employee);
    }

    /// Adds a contribution rule.
    pub async fn put_rule(&self, rule: ContributionRule) {
        let mut rules = self.rules.write().await;
        rules.retain(|r| r.id != rule.id);
        rules.push(rule);
    }

    /// Returns the number of stored payroll records.
    pub async fn payroll_count(&self) -> usize {
        self.ledger.read().await.records.len()
    }
}

#[async_trait]
impl EmployeeDirectory for InMemoryStore {
    async fn find_employee(&self, employee_id: u64, company_id: u64) -> EngineResult<Option<Employee>> {
        let employees = self.employees.read().await;
        Ok(employees
            .get(&employee_id)
            .filter(|e| e.company_id == company_id)
            .cloned())
    }

    async fn active_rules(&self, company_id: u64) -> EngineResult<Vec<ContributionRule>> {
        let rules = self.rules.read().await;
        let mut active: Vec<ContributionRule> = rules
            .iter()
            .filter(|r| r.company_id == company_id && r.is_active)
            .cloned()
            .collect();
        active.sort_by_key(|r| r.id);
        Ok(active)
    }
}

#[async_trait]
impl PayrollLedger for InMemoryStore {
    async fn insert_if_absent(&self, record: NewPayrollRecord) -> EngineResult<InsertOutcome> {
        let mut ledger = self.ledger.write().await;

        if let Some(&existing_id) = ledger.by_period.get(&record.period) {
            return Ok(InsertOutcome::Conflict { existing_id });
        }

        ledger.last_id += 1;
        let id = ledger.last_id;
        let period = record.period;
        let stored = PayrollRecord::from_new(id, record);

        ledger.by_period.insert(period, id);
        ledger.records.insert(id, stored.clone());

        Ok(InsertOutcome::Inserted(stored))
    }

    async fn find_payroll(&self, payroll_id: u64, company_id: u64) -> EngineResult<Option<PayrollRecord>> {
        let ledger = self.ledger.read().await;
        Ok(ledger
            .records
            .get(&payroll_id)
            .filter(|r| r.company_id == company_id)
            .cloned())
    }

    async fn transition_status(
        &self,
        payroll_id: u64,
        company_id: u64,
        from: PayrollStatus,
        to: PayrollStatus,
        at: DateTime<Utc>,
    ) -> EngineResult<StatusTransition> {
        let mut ledger = self.ledger.write().await;

        let Some(record) = ledger
            .records
            .get_mut(&payroll_id)
            .filter(|r| r.company_id == company_id)
        else {
            return Ok(StatusTransition::NotFound);
        };

        if record.status != from {
            return Ok(StatusTransition::Mismatch(record.status));
        }

        record.status = to;
        record.updated_at = at;
        Ok(StatusTransition::Updated(record.clone()))
    }

    async fn list_payrolls(
        &self,
        company_id: u64,
        year: Option<i32>,
        month: Option<u32>,
    ) -> EngineResult<Vec<PayrollRecord>> {
        let ledger = self.ledger.read().await;
        let mut records: Vec<PayrollRecord> = ledger
            .records
            .values()
            .filter(|r| r.company_id == company_id)
            .filter(|r| year.is_none_or(|y| r.period_year == y))
            .filter(|r| month.is_none_or(|m| r.period_month == m))
            .cloned()
            .collect();
        records.sort_by_key(|r| (Reverse(r.period_year), Reverse(r.period_month), r.employee_id));
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContributionKind, sample_new_record};
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn key(company_id: u64, employee_id: u64, year: i32, month: u32) -> PeriodKey {
        PeriodKey {
            company_id,
            employee_id,
            year,
            month,
        }
    }

    fn rule(id: u64, company_id: u64, is_active: bool) -> ContributionRule {
        ContributionRule {
            id,
            company_id,
            name: format!("rule {}", id),
            kind: ContributionKind::SocialSecurity,
            employee_rate: dec!(0.0267),
            employer_rate: dec!(0.0533),
            max_amount: None,
            min_amount: None,
            is_active,
        }
    }

    fn employee(id: u64, company_id: u64) -> Employee {
        Employee {
            id,
            company_id,
            employee_number: format!("EMP{:03}", id),
            base_salary: dec!(8000),
            is_active: true,
        }
    }

    #[tokio::test]
    async fn test_find_employee_is_company_scoped() {
        let store = InMemoryStore::from_seed(vec![employee(5, 1)], vec![]);

        assert!(store.find_employee(5, 1).await.unwrap().is_some());
        assert!(store.find_employee(5, 2).await.unwrap().is_none());
        assert!(store.find_employee(6, 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_active_rules_filters_and_sorts() {
        let store = InMemoryStore::from_seed(
            vec![],
            vec![rule(7, 1, true), rule(3, 1, true), rule(4, 1, false), rule(1, 2, true)],
        );

        let rules = store.active_rules(1).await.unwrap();
        let ids: Vec<u64> = rules.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 7]);
    }

    #[tokio::test]
    async fn test_put_rule_replaces_same_id() {
        let store = InMemoryStore::new();
        store.put_rule(rule(1, 1, true)).await;
        store.put_rule(rule(1, 1, false)).await;

        assert!(store.active_rules(1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let store = InMemoryStore::new();

        let first = store.insert_if_absent(sample_new_record(key(1, 5, 2025, 3))).await.unwrap();
        let second = store.insert_if_absent(sample_new_record(key(1, 5, 2025, 4))).await.unwrap();

        match (first, second) {
            (InsertOutcome::Inserted(a), InsertOutcome::Inserted(b)) => {
                assert_eq!(a.id, 1);
                assert_eq!(b.id, 2);
            }
            other => panic!("Expected two inserts, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_insert_conflict_on_same_period() {
        let store = InMemoryStore::new();

        store.insert_if_absent(sample_new_record(key(1, 5, 2025, 3))).await.unwrap();
        let outcome = store.insert_if_absent(sample_new_record(key(1, 5, 2025, 3))).await.unwrap();

        assert_eq!(outcome, InsertOutcome::Conflict { existing_id: 1 });
        assert_eq!(store.payroll_count().await, 1);
    }

    #[tokio::test]
    async fn test_same_period_different_company_is_not_a_conflict() {
        let store = InMemoryStore::new();

        store.insert_if_absent(sample_new_record(key(1, 5, 2025, 3))).await.unwrap();
        let outcome = store.insert_if_absent(sample_new_record(key(2, 5, 2025, 3))).await.unwrap();

        assert!(matches!(outcome, InsertOutcome::Inserted(_)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_inserts_store_exactly_one_record() {
        let store = InMemoryStore::new();

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .insert_if_absent(sample_new_record(key(1, 5, 2025, 3)))
                        .await
                        .unwrap()
                })
            })
            .collect();

        let mut inserted = 0;
        for handle in handles {
            if matches!(handle.await.unwrap(), InsertOutcome::Inserted(_)) {
                inserted += 1;
            }
        }

        assert_eq!(inserted, 1);
        assert_eq!(store.payroll_count().await, 1);
    }

    #[tokio::test]
    async fn test_transition_status_compare_and_set() {
        let store = InMemoryStore::new();
        store.insert_if_absent(sample_new_record(key(1, 5, 2025, 3))).await.unwrap();
        let at = Utc.with_ymd_and_hms(2025, 3, 30, 12, 0, 0).unwrap();

        let updated = store
            .transition_status(1, 1, PayrollStatus::Draft, PayrollStatus::Approved, at)
            .await
            .unwrap();
        match updated {
            StatusTransition::Updated(record) => {
                assert_eq!(record.status, PayrollStatus::Approved);
                assert_eq!(record.updated_at, at);
            }
            other => panic!("Expected Updated, got {:?}", other),
        }

        let again = store
            .transition_status(1, 1, PayrollStatus::Draft, PayrollStatus::Approved, at)
            .await
            .unwrap();
        assert_eq!(again, StatusTransition::Mismatch(PayrollStatus::Approved));
    }

    #[tokio::test]
    async fn test_transition_status_is_company_scoped() {
        let store = InMemoryStore::new();
        store.insert_if_absent(sample_new_record(key(1, 5, 2025, 3))).await.unwrap();

        let outcome = store
            .transition_status(1, 2, PayrollStatus::Draft, PayrollStatus::Approved, Utc::now())
            .await
            .unwrap();
        assert_eq!(outcome, StatusTransition::NotFound);

        let record = store.find_payroll(1, 1).await.unwrap().unwrap();
        assert_eq!(record.status, PayrollStatus::Draft);
    }

    #[tokio::test]
    async fn test_list_payrolls_filters_and_orders() {
        let store = InMemoryStore::new();
        for period in [
            key(1, 6, 2025, 2),
            key(1, 5, 2025, 3),
            key(1, 4, 2025, 3),
            key(1, 5, 2024, 12),
            key(2, 5, 2025, 3),
        ] {
            store.insert_if_absent(sample_new_record(period)).await.unwrap();
        }

        let all = store.list_payrolls(1, None, None).await.unwrap();
        let periods: Vec<(i32, u32, u64)> = all
            .iter()
            .map(|r| (r.period_year, r.period_month, r.employee_id))
            .collect();
        assert_eq!(
            periods,
            vec![(2025, 3, 4), (2025, 3, 5), (2025, 2, 6), (2024, 12, 5)]
        );

        let march = store.list_payrolls(1, Some(2025), Some(3)).await.unwrap();
        assert_eq!(march.len(), 2);

        let december = store.list_payrolls(1, None, Some(12)).await.unwrap();
        assert_eq!(december.len(), 1);
        assert_eq!(december[0].period_year, 2024);
    }
}
