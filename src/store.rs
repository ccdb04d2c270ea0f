// The loaded dataset. It is installed at most once per process and never
// mutated afterwards; every view is recomputed from it per selector change.
use crate::error::AlreadyLoaded;
use crate::types::InstitutionRecord;
use once_cell::sync::OnceCell;

static STORE: OnceCell<DatasetStore> = OnceCell::new();

#[derive(Debug, Clone, Default)]
pub struct DatasetStore {
    records: Vec<InstitutionRecord>,
}

impl DatasetStore {
    pub fn new(records: Vec<InstitutionRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[InstitutionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Install the process-wide dataset. Fails if one is already installed.
pub fn install(store: DatasetStore) -> Result<&'static DatasetStore, AlreadyLoaded> {
    STORE.set(store).map_err(|_| AlreadyLoaded {
        records: STORE.get().map_or(0, DatasetStore::len),
    })?;
    STORE.get().ok_or(AlreadyLoaded { records: 0 })
}

pub fn global() -> Option<&'static DatasetStore> {
    STORE.get()
}
