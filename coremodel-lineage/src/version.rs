//! Schema version numbering.

use std::{fmt, str::FromStr};

/// Identifies one schema within a lineage: the sequence it belongs to and its
/// position inside that sequence.
///
/// Schemas within a sequence are backwards compatible with each other; a new
/// sequence starts whenever a breaking change is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SchemaVersion {
    seq: u32,
    schema: u32,
}

impl SchemaVersion {
    pub const fn new(seq: u32, schema: u32) -> Self {
        Self { seq, schema }
    }

    pub const fn seq(&self) -> u32 {
        self.seq
    }

    pub const fn schema(&self) -> u32 {
        self.schema
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.seq, self.schema)
    }
}

impl FromStr for SchemaVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (seq, schema) = s
            .split_once('.')
            .ok_or_else(|| format!("invalid schema version '{s}', expected 'seq.schema'"))?;
        let seq = seq
            .parse()
            .map_err(|_| format!("invalid sequence number in '{s}'"))?;
        let schema = schema
            .parse()
            .map_err(|_| format!("invalid schema number in '{s}'"))?;
        Ok(Self { seq, schema })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(SchemaVersion::new(0, 2).to_string(), "0.2");
        assert_eq!(SchemaVersion::new(3, 0).to_string(), "3.0");
    }

    #[test]
    fn test_ordering() {
        assert!(SchemaVersion::new(0, 2) < SchemaVersion::new(1, 0));
        assert!(SchemaVersion::new(1, 0) < SchemaVersion::new(1, 1));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("0.2".parse::<SchemaVersion>(), Ok(SchemaVersion::new(0, 2)));
        assert!("0".parse::<SchemaVersion>().is_err());
        assert!("a.1".parse::<SchemaVersion>().is_err());
        assert!("1.b".parse::<SchemaVersion>().is_err());
    }
}
