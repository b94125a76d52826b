//! Application version value object
//!
//! Versions are dotted numeric strings ("2.10.1"). Components compare
//! numerically, so "2.10" is newer than "2.9", and missing trailing
//! components count as zero ("2.1" == "2.1.0").

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

#[derive(Debug, Clone, Eq)]
pub struct AppVersion {
    components: Vec<u64>,
}

impl AppVersion {
    pub fn components(&self) -> &[u64] {
        &self.components
    }

    fn component(&self, index: usize) -> u64 {
        self.components.get(index).copied().unwrap_or(0)
    }
}

impl FromStr for AppVersion {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::parse("Version string is empty"));
        }

        let components = trimmed
            .split('.')
            .map(|part| {
                part.parse::<u64>().map_err(|_| {
                    DomainError::parse(format!("Invalid version component '{part}' in '{s}'"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { components })
    }
}

impl PartialEq for AppVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Ord for AppVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        (0..len)
            .map(|i| self.component(i).cmp(&other.component(i)))
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for AppVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for AppVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.components.iter().map(u64::to_string).collect();
        write!(f, "{}", parts.join("."))
    }
}
