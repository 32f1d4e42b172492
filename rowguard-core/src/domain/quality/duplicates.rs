// rowguard-core/src/domain/quality/duplicates.rs

use std::collections::HashMap;

use crate::domain::quality::configuration::{DuplicateKeep, DuplicateKeyKind, DuplicatePolicy};
use crate::domain::record::Record;

/// Normalized grouping value. Components are trimmed and case-folded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DuplicateKey(Vec<String>);

impl DuplicateKey {
    /// `None` when the name or email is blank: unknowns never form a group.
    /// The last name is optional in a `name_email` key. NULL and blank both
    /// stand for "no last name" and compare equal.
    pub fn derive(record: &Record, kind: DuplicateKeyKind) -> Option<Self> {
        let email = normalize(record.email.as_deref())?;
        match kind {
            DuplicateKeyKind::Email => Some(Self(vec![email])),
            DuplicateKeyKind::NameEmail => {
                let name = normalize(record.name.as_deref())?;
                let last_name = normalize(record.last_name.as_deref()).unwrap_or_default();
                Some(Self(vec![name, last_name, email]))
            }
        }
    }
}

fn normalize(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Two-pass detector: `observe` every record in fetch order, then `finish`.
#[derive(Debug)]
pub struct DuplicateDetector {
    policy: DuplicatePolicy,
    groups: HashMap<DuplicateKey, Vec<usize>>,
    observed: usize,
}

/// Per-position duplicate classification of one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateFlags {
    flags: Vec<bool>,
    groups: usize,
}

impl DuplicateDetector {
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self {
            policy,
            groups: HashMap::new(),
            observed: 0,
        }
    }

    pub fn observe(&mut self, record: &Record) {
        let position = self.observed;
        self.observed += 1;
        if let Some(key) = DuplicateKey::derive(record, self.policy.key) {
            self.groups.entry(key).or_default().push(position);
        }
    }

    pub fn finish(self) -> DuplicateFlags {
        let mut flags = vec![false; self.observed];
        let mut groups = 0;

        for members in self.groups.values().filter(|m| m.len() >= 2) {
            groups += 1;
            // Positions were pushed in fetch order, so members[0] is the first seen.
            let flagged = match self.policy.keep {
                DuplicateKeep::All => &members[..],
                DuplicateKeep::First => &members[1..],
            };
            for &position in flagged {
                flags[position] = true;
            }
        }

        DuplicateFlags { flags, groups }
    }

    pub fn detect(records: &[Record], policy: DuplicatePolicy) -> DuplicateFlags {
        let mut detector = Self::new(policy);
        for record in records {
            detector.observe(record);
        }
        detector.finish()
    }
}

impl DuplicateFlags {
    pub fn is_duplicate(&self, position: usize) -> bool {
        self.flags.get(position).copied().unwrap_or(false)
    }

    pub fn flagged(&self) -> usize {
        self.flags.iter().filter(|f| **f).count()
    }

    /// Number of keys shared by two or more records.
    pub fn groups(&self) -> usize {
        self.groups
    }
}
