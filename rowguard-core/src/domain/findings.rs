// rowguard-core/src/domain/findings.rs

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::error::DomainError;
use crate::domain::quality::{
    DuplicateDetector, QualityConfig, QualityRule, Violations, is_valid_email, is_valid_name,
};
use crate::domain::record::{Record, RecordId};

/// Rules applied to one record. Non-empty `violations` means problematic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub identity: RecordId,
    pub violations: Violations,
}

impl ValidationOutcome {
    pub fn is_problematic(&self) -> bool {
        !self.violations.is_empty()
    }
}

/// A problematic record, with the field values the report carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    #[serde(flatten)]
    pub outcome: ValidationOutcome,
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleCounts {
    pub invalid_email: usize,
    pub invalid_name: usize,
    pub duplicate: usize,
}

impl RuleCounts {
    fn record(&mut self, violations: &Violations) {
        for rule in violations.iter() {
            match rule {
                QualityRule::InvalidEmail => self.invalid_email += 1,
                QualityRule::InvalidName => self.invalid_name += 1,
                QualityRule::Duplicate => self.duplicate += 1,
            }
        }
    }

    pub fn get(&self, rule: QualityRule) -> usize {
        match rule {
            QualityRule::InvalidEmail => self.invalid_email,
            QualityRule::InvalidName => self.invalid_name,
            QualityRule::Duplicate => self.duplicate,
        }
    }
}

/// Findings of one run, in fetch order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindingsReport {
    pub records_checked: usize,
    pub counts: RuleCounts,
    pub findings: Vec<Finding>,
}

impl FindingsReport {
    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Applies every rule to `records` and keeps the records with at least one violation.
pub fn evaluate(records: &[Record], config: &QualityConfig) -> Result<FindingsReport, DomainError> {
    check_identities(records)?;

    let duplicates = DuplicateDetector::detect(records, config.duplicates);
    let mut report = FindingsReport {
        records_checked: records.len(),
        ..Default::default()
    };

    for (position, record) in records.iter().enumerate() {
        let outcome = assess(record, duplicates.is_duplicate(position), config);
        if !outcome.is_problematic() {
            continue;
        }
        report.counts.record(&outcome.violations);
        report.findings.push(Finding {
            outcome,
            name: record.name.clone(),
            email: record.email.clone(),
        });
    }

    Ok(report)
}

fn assess(record: &Record, is_duplicate: bool, config: &QualityConfig) -> ValidationOutcome {
    let mut violations = Violations::default();

    if !is_valid_email(record.email.as_deref()) {
        violations.insert(QualityRule::InvalidEmail);
    }

    let name_ok = is_valid_name(record.name.as_deref(), &config.name);
    // A NULL last name means none was recorded; only populated values are checked.
    let last_name_ok = match record.last_name.as_deref() {
        Some(last_name) => is_valid_name(Some(last_name), &config.name),
        None => true,
    };
    if !name_ok || !last_name_ok {
        violations.insert(QualityRule::InvalidName);
    }

    if is_duplicate {
        violations.insert(QualityRule::Duplicate);
    }

    ValidationOutcome {
        identity: record.identity.clone(),
        violations,
    }
}

fn check_identities(records: &[Record]) -> Result<(), DomainError> {
    let mut seen = HashSet::with_capacity(records.len());
    for (position, record) in records.iter().enumerate() {
        if record.identity.is_blank() {
            return Err(DomainError::MissingIdentity {
                position: position + 1,
            });
        }
        if !seen.insert(&record.identity) {
            return Err(DomainError::DuplicateIdentity {
                identity: record.identity.to_string(),
            });
        }
    }
    Ok(())
}
