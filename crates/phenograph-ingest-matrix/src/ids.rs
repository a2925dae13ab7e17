//! Opaque instance ids for structural records.
//!
//! Datasets, OTUs, characters, states, cells and specimens are records, not
//! semantic descriptions, so they never get content-derived ids.

use crate::config::InstanceIdScheme;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstanceKind {
    Dataset,
    Otu,
    Specimen,
    Character,
    State,
    Cell,
}

impl InstanceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            InstanceKind::Dataset => "dataset",
            InstanceKind::Otu => "otu",
            InstanceKind::Specimen => "specimen",
            InstanceKind::Character => "character",
            InstanceKind::State => "state",
            InstanceKind::Cell => "cell",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Per-call id source. Counters start over for every minter.
#[derive(Debug, Clone)]
pub struct IdMinter {
    scheme: InstanceIdScheme,
    counters: [u64; 6],
}

impl IdMinter {
    pub fn new(scheme: InstanceIdScheme) -> Self {
        Self {
            scheme,
            counters: [0; 6],
        }
    }

    pub fn mint(&mut self, kind: InstanceKind) -> String {
        match &self.scheme {
            InstanceIdScheme::Random => Uuid::new_v4().to_string(),
            InstanceIdScheme::Sequential { prefix } => {
                let counter = &mut self.counters[kind.index()];
                *counter += 1;
                format!("{prefix}{}-{}", kind.as_str(), counter)
            }
        }
    }
}
