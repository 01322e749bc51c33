//! Interface capabilities reported by a provider

/// Link type as reported by a provider's `--extcap-dlts` output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTypeRecord {
    /// Numeric DLT value
    pub number: i32,
    /// Short name (e.g., "EN10MB")
    pub name: String,
    /// Human-readable description
    pub display: String,
}

impl LinkTypeRecord {
    pub fn new<N: Into<String>, D: Into<String>>(number: i32, name: N, display: D) -> Self {
        Self {
            number,
            name: name.into(),
            display: display.into(),
        }
    }
}

/// Data link type supported by an interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLinkInfo {
    /// Numeric DLT value
    pub dlt: i32,
    /// Short name
    pub name: String,
    /// Human-readable description
    pub description: String,
}

impl From<&LinkTypeRecord> for DataLinkInfo {
    fn from(record: &LinkTypeRecord) -> Self {
        Self {
            dlt: record.number,
            name: record.name.clone(),
            description: record.display.clone(),
        }
    }
}

/// Capabilities of a capture interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capabilities {
    /// Whether monitor mode can be toggled; never true for extcap interfaces
    pub can_set_monitor_mode: bool,
    /// Supported link types in provider output order, duplicates kept
    pub link_types: Vec<DataLinkInfo>,
}

impl Capabilities {
    /// Build capabilities for an extcap interface from parsed link type records
    ///
    /// Returns `None` when no link types were reported.
    pub fn from_link_types(records: &[LinkTypeRecord]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }

        Some(Self {
            can_set_monitor_mode: false,
            link_types: records.iter().map(DataLinkInfo::from).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capabilities_keep_order_and_duplicates() {
        let records = vec![
            LinkTypeRecord::new(147, "USER0", "User 0"),
            LinkTypeRecord::new(1, "EN10MB", "Ethernet"),
            LinkTypeRecord::new(147, "USER0", "User 0"),
        ];

        let caps = Capabilities::from_link_types(&records).unwrap();
        assert!(!caps.can_set_monitor_mode);
        let dlts: Vec<i32> = caps.link_types.iter().map(|l| l.dlt).collect();
        assert_eq!(dlts, vec![147, 1, 147]);
        assert_eq!(caps.link_types[1].description, "Ethernet");
    }

    #[test]
    fn test_capabilities_empty() {
        assert!(Capabilities::from_link_types(&[]).is_none());
    }
}
