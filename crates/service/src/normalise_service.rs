use std::sync::Arc;

use card_normaliser_core::{NormaliserConfig, Resolution};
use card_normaliser_scryfall::ScryfallClient;
use card_normaliser_storage::{CardStore, PgCardStore};

use crate::error::ServiceError;
use crate::report::MigrationReport;

pub struct NormaliseService {
    store: Arc<dyn CardStore>,
    scryfall: ScryfallClient,
    dry_run: bool,
}

impl NormaliseService {
    #[must_use]
    pub fn new(store: Arc<dyn CardStore>, scryfall: ScryfallClient) -> Self {
        Self { store, scryfall, dry_run: false }
    }

    /// Resolve and report only; the table is neither altered nor updated.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Adds `normalised_name` unless it is already there. Returns `true` if added.
    pub async fn prepare_schema(&self) -> Result<bool, ServiceError> {
        let added = self.store.ensure_normalised_column().await?;
        if added {
            tracing::info!("Added normalised_name column to cards");
        } else {
            tracing::info!("normalised_name column already present");
        }
        Ok(added)
    }

    /// Runs the whole migration sequentially.
    ///
    /// A name whose lookup fails is skipped and left untouched; any storage
    /// failure aborts the run.
    pub async fn run(&self) -> Result<MigrationReport, ServiceError> {
        if self.dry_run {
            tracing::info!("Dry run: schema and rows will not be modified");
        } else {
            self.prepare_schema().await?;
        }

        let names = self.store.distinct_names().await?;
        let total = names.len();
        tracing::info!("Found {total} distinct card names");

        let mut report = MigrationReport::new(total);
        for (index, name) in names.iter().enumerate() {
            tracing::info!("[{}/{total}] {name}", index + 1);
            self.normalise_one(name, &mut report).await?;
        }

        tracing::info!("Normalisation finished: {report}");
        if !report.skipped_names.is_empty() {
            tracing::warn!(skipped = ?report.skipped_names, "Some names could not be resolved");
        }
        Ok(report)
    }

    async fn normalise_one(
        &self,
        name: &str,
        report: &mut MigrationReport,
    ) -> Result<(), ServiceError> {
        let canonical = match self.scryfall.search_canonical_name(name).await {
            Ok(canonical) => canonical,
            Err(e) => {
                tracing::warn!(card = name, "Skipping, no canonical name: {e}");
                report.skip(name);
                return Ok(());
            },
        };

        let resolution = Resolution::classify(name, &canonical.name);
        if resolution != Resolution::Unchanged {
            tracing::info!(
                card = name,
                canonical = %canonical.name,
                kind = %resolution,
                backoffs = canonical.backoffs(),
                "Resolved"
            );
        }

        let rows = if self.dry_run {
            0
        } else {
            self.store.apply_canonical_name(name, &canonical.name).await?
        };
        report.record(resolution, rows);
        Ok(())
    }
}

/// Opens the database pool and the HTTP client, runs the migration and closes
/// the pool again, whether the run succeeded or not.
pub async fn run_with_config(config: &NormaliserConfig) -> Result<MigrationReport, ServiceError> {
    let scryfall = ScryfallClient::from_config(config)?;
    let store = Arc::new(PgCardStore::connect(&config.database_url).await?);

    let service = NormaliseService::new(store.clone(), scryfall).with_dry_run(config.dry_run);
    let result = service.run().await;

    store.close().await;
    result
}
