use card_normaliser_core::Resolution;

/// Tally of one normalisation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub total: usize,
    pub unchanged: usize,
    pub cosmetic: usize,
    pub renamed: usize,
    pub rows_updated: u64,
    /// Names left untouched because no canonical form could be fetched.
    pub skipped_names: Vec<String>,
}

impl MigrationReport {
    pub(crate) fn new(total: usize) -> Self {
        Self { total, ..Self::default() }
    }

    pub(crate) fn record(&mut self, resolution: Resolution, rows: u64) {
        match resolution {
            Resolution::Unchanged => self.unchanged += 1,
            Resolution::Cosmetic => self.cosmetic += 1,
            Resolution::Renamed => self.renamed += 1,
        }
        self.rows_updated += rows;
    }

    pub(crate) fn skip(&mut self, name: &str) {
        self.skipped_names.push(name.to_owned());
    }

    #[must_use]
    pub fn resolved(&self) -> usize {
        self.unchanged + self.cosmetic + self.renamed
    }

    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped_names.len()
    }
}

impl std::fmt::Display for MigrationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} names: {} unchanged, {} cosmetic, {} renamed, {} skipped ({} rows updated)",
            self.total,
            self.unchanged,
            self.cosmetic,
            self.renamed,
            self.skipped(),
            self.rows_updated
        )
    }
}
