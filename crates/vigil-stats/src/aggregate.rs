//! Aggregation engine: concurrent fetch fan-out, reduction, bucket folding.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, Local, Utc};

use vigil_config::{MixerConfig, MixerFamily, ReportingConfig, SitesConfig, VigilConfig};
use vigil_core::entities::{fold_type_tag, Equipment, InspectionRecord};
use vigil_core::enums::Cadence;
use vigil_core::stats::{StatisticsResponse, StatsBucket, StatsData, TypeStats};

use crate::error::StatsError;
use crate::index::EquipmentIndex;
use crate::mixer;
use crate::reduce::{latest_per_asset, AssetKey, DatedRecord};
use crate::source::RecordSource;
use crate::window::in_window;

/// One aggregation request.
#[derive(Debug, Clone)]
pub struct AggregateRequest {
    pub business_unit: String,
    /// Restrict the request to one site.
    pub site: Option<String>,
    /// Reporting cadence; `None` runs the daily report.
    pub cadence: Option<Cadence>,
    /// Retain the latest records inside each site bucket.
    pub include_records: bool,
    /// Evaluation instant; `None` uses the local clock. The offset defines
    /// "today" for the daily window.
    pub now: Option<DateTime<FixedOffset>>,
}

impl AggregateRequest {
    #[must_use]
    pub fn new(bu: &str) -> Self {
        Self {
            business_unit: bu.to_string(),
            site: None,
            cadence: None,
            include_records: false,
            now: None,
        }
    }
}

/// Request-scoped statistics engine over a read-only record source.
///
/// Holds no mutable state: every aggregation builds its own index and
/// result structure, so arbitrarily many requests may run concurrently
/// against the same store with no coordination.
pub struct StatsEngine<S> {
    source: S,
    reporting: ReportingConfig,
    mixer: MixerConfig,
    sites: SitesConfig,
}

impl<S: RecordSource> StatsEngine<S> {
    /// Build an engine from a source and the deployment configuration.
    #[must_use]
    pub fn new(source: S, config: &VigilConfig) -> Self {
        Self {
            source,
            reporting: config.reporting.clone(),
            mixer: config.mixer.clone(),
            sites: config.sites.clone(),
        }
    }

    /// Aggregate with defaults: cadence `daily` unless given, "now" taken
    /// from the local clock.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError`] when either primary fetch fails; see
    /// [`Self::respond`] for the degraded-response variant.
    pub async fn aggregate(
        &self,
        bu: &str,
        site: Option<&str>,
        cadence: Option<Cadence>,
    ) -> Result<StatisticsResponse, StatsError> {
        let mut request = AggregateRequest::new(bu);
        request.site = site.map(String::from);
        request.cadence = cadence;
        self.aggregate_with(&request).await
    }

    /// Aggregate with full request control (explicit "now", record
    /// retention).
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::Registry`] when the equipment fetch fails and
    /// [`StatsError::Inspections`] when the transaction fetch fails. Both
    /// are fatal: a response with made-up totals would be worse than none.
    pub async fn aggregate_with(
        &self,
        request: &AggregateRequest,
    ) -> Result<StatisticsResponse, StatsError> {
        let bu = request.business_unit.as_str();
        let site = request.site.as_deref();
        let cadence = request.cadence.unwrap_or(Cadence::Daily);
        let now = request.now.unwrap_or_else(|| Local::now().fixed_offset());

        // The request's only suspension points: both primary fetches,
        // issued concurrently. Dropping the returned future cancels them.
        let (equipment, inspections) = tokio::join!(
            self.source.equipment(bu, site),
            self.source.inspections(bu, site, None),
        );
        let equipment = equipment.map_err(StatsError::Registry)?;
        let inspections = inspections.map_err(StatsError::Inspections)?;

        tracing::debug!(
            bu,
            site = site.unwrap_or("-"),
            frequency = %cadence,
            equipment = equipment.len(),
            inspections = inspections.len(),
            "aggregation inputs fetched"
        );

        let equipment: Vec<Equipment> = equipment
            .into_iter()
            .map(|item| self.canonicalize_equipment(item))
            .filter(|item| self.reporting.in_scope(bu, &item.equipment_type, cadence))
            .collect();
        let index = EquipmentIndex::build(&equipment);

        let mut dated: Vec<DatedRecord> = Vec::new();
        for record in inspections {
            let record = self.canonicalize_record(record);
            if !self.reporting.in_scope(bu, &record.equipment_type, cadence) {
                continue;
            }
            let Some(at) = record.timestamp.normalize() else {
                tracing::debug!(
                    bu,
                    equipment_type = %record.equipment_type,
                    equipment_id = %record.equipment_id,
                    "record with unparsable timestamp excluded"
                );
                continue;
            };
            if in_window(cadence, &now, at) {
                dated.push(DatedRecord { record, at });
            }
        }

        let latest = latest_per_asset(bu, dated, &index);
        let data = self.fold(bu, site, &index, latest, request.include_records);

        Ok(StatisticsResponse::ok(
            bu,
            site,
            cadence,
            data,
            now.with_timezone(&Utc),
        ))
    }

    /// Aggregate, degrading any fatal error to the `success:false` empty
    /// response. Consumers get a complete structure or an explicit failure
    /// flag, never silently wrong totals.
    pub async fn respond(&self, request: &AggregateRequest) -> StatisticsResponse {
        match self.aggregate_with(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(bu = %request.business_unit, %e, "aggregation failed");
                let cadence = request.cadence.unwrap_or(Cadence::Daily);
                let now = request.now.unwrap_or_else(|| Local::now().fixed_offset());
                StatisticsResponse::failure(
                    &request.business_unit,
                    request.site.as_deref(),
                    cadence,
                    now.with_timezone(&Utc),
                )
            }
        }
    }

    /// Merged inspection history for one asset, newest first.
    ///
    /// When `tag` belongs to a configured mixer family the history spans
    /// every variant tag of that family; otherwise it is the single-type
    /// history. `equipment_id` is compared after percent-decoding.
    pub async fn merged_history(
        &self,
        bu: &str,
        equipment_id: &str,
        tag: &str,
    ) -> Vec<InspectionRecord> {
        let folded = fold_type_tag(tag);
        let single;
        let family = match self.mixer.family_of(&folded) {
            Some(family) => family,
            None => {
                single = MixerFamily {
                    canonical: folded,
                    members: Vec::new(),
                };
                &single
            }
        };
        mixer::merged_history(&self.source, bu, equipment_id, family).await
    }

    fn canonicalize_equipment(&self, item: Equipment) -> Equipment {
        let mut item = item.normalized();
        item.equipment_type = self.mixer.canonical_type(&item.equipment_type).to_string();
        item
    }

    fn canonicalize_record(&self, record: InspectionRecord) -> InspectionRecord {
        let mut record = record.normalized();
        record.equipment_type = self.mixer.canonical_type(&record.equipment_type).to_string();
        record
    }

    /// Fold the latest-record map into the nested statistics structure.
    fn fold(
        &self,
        bu: &str,
        site_filter: Option<&str>,
        index: &EquipmentIndex,
        latest: BTreeMap<AssetKey, DatedRecord>,
        include_records: bool,
    ) -> StatsData {
        // Sites shown even with zero registered equipment: the configured
        // enumeration for BU-wide requests, the requested site otherwise.
        let seed_sites: Vec<String> = site_filter.map_or_else(
            || self.sites.sites_for(bu).to_vec(),
            |s| vec![s.to_string()],
        );

        // Every (type, site) bucket present in the registry, pre-seeded.
        let mut by_type: BTreeMap<String, TypeStats> = BTreeMap::new();
        for equipment_type in index.types() {
            let mut sites: BTreeMap<String, StatsBucket> = BTreeMap::new();
            for seed in &seed_sites {
                sites.insert(seed.clone(), StatsBucket::default());
            }
            if let Some(totals) = index.site_totals(equipment_type) {
                for (site, total) in totals {
                    sites.insert(site.clone(), StatsBucket::with_total(*total));
                }
            }
            let overall_total =
                sites.values().map(|b| b.total).sum::<u32>() + index.unsited_total(equipment_type);
            let stats = TypeStats {
                overall: StatsBucket::with_total(overall_total),
                by_site: Some(sites),
            };
            by_type.insert(equipment_type.to_string(), stats);
        }

        for (key, dated) in latest {
            let Some(stats) = by_type.get_mut(&key.equipment_type) else {
                continue;
            };
            let defective = dated.record.has_defect();
            stats.overall.inspected += 1;
            if defective {
                stats.overall.defected += 1;
            }
            match &key.site {
                Some(site) => {
                    if let Some(bucket) = stats.by_site.as_mut().and_then(|m| m.get_mut(site)) {
                        bucket.inspected += 1;
                        if defective {
                            bucket.defected += 1;
                        }
                        if include_records {
                            bucket
                                .inspection_records
                                .get_or_insert_with(Vec::new)
                                .push(dated.record);
                        }
                    }
                }
                None => {
                    tracing::debug!(
                        bu,
                        equipment_type = %key.equipment_type,
                        equipment_id = %key.equipment_id,
                        "asset without site counted business-unit-wide only"
                    );
                }
            }
        }

        // Synthesize the per-site rows (summed across types) and the grand
        // total row; refresh every derived percentage.
        let mut by_site: BTreeMap<String, StatsBucket> = BTreeMap::new();
        for seed in &seed_sites {
            by_site.insert(seed.clone(), StatsBucket::default());
        }
        let mut grand = StatsBucket::default();
        for stats in by_type.values_mut() {
            if let Some(sites) = stats.by_site.as_mut() {
                for (site, bucket) in sites.iter_mut() {
                    bucket.refresh_percentages();
                    by_site.entry(site.clone()).or_default().absorb(bucket);
                }
            }
            stats.overall.refresh_percentages();
            grand.absorb(&stats.overall);
        }
        for bucket in by_site.values_mut() {
            bucket.refresh_percentages();
        }
        grand.refresh_percentages();

        StatsData {
            by_type,
            by_site,
            total: grand,
        }
    }
}
