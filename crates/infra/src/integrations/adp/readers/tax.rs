//! Tax profile readers
//!
//! All three start from the same per-worker call:
//!
//! ```text
//!   worker ──► us-tax-profiles ──┬──► federal record
//!                                ├──► usLocalTaxInstructions[] ──► local records
//!                                └──► .../{profileId}/state ──► state records
//! ```
//!
//! A worker without a usable OID, or a profile without an id, is a failed
//! parent. An empty state list is not.

use std::sync::Arc;

use async_trait::async_trait;
use hrsync_core::mapping::{map_federal_profile, map_local_profile, map_state_profile};
use hrsync_core::{
    DependentFetch, EntityReader, ExpanderConfig, HierarchicalRecordExpander, LevelFailure,
    LevelResultExt, PassContext, RecordStream,
};
use hrsync_domain::constants::{
    ENTITY_FEDERAL_TAX_PROFILES, ENTITY_LOCAL_TAX_PROFILES, ENTITY_STATE_TAX_PROFILES,
};
use hrsync_domain::wire::{UsTaxProfileDto, WorkerDto};
use hrsync_domain::{FederalTaxProfileRecord, LocalTaxProfileRecord, StateTaxProfileRecord};
use tokio_util::sync::CancellationToken;

use super::expand_roster;
use crate::integrations::adp::client::AdpClient;
use crate::integrations::adp::roster::WorkerRoster;

const LEVEL_WORKER: &str = "associate_oid";
const LEVEL_PROFILE: &str = "us_tax_profile";
const LEVEL_STATE: &str = "state_tax_profile";

/// A worker's profile together with the keys every tax record joins on
struct ProfileLevel {
    associate_oid: String,
    profile_id: String,
    profile: UsTaxProfileDto,
}

async fn profile_level(
    client: &AdpClient,
    worker: &WorkerDto,
    cancel: &CancellationToken,
) -> Result<ProfileLevel, LevelFailure> {
    let associate_oid = worker.usable_oid().ok_or(LevelFailure::absent(LEVEL_WORKER))?;
    let profile = client.us_tax_profile(associate_oid, cancel).await.at_level(LEVEL_PROFILE)?;
    let profile_id =
        profile.usable_id().ok_or(LevelFailure::absent(LEVEL_PROFILE))?.to_string();

    Ok(ProfileLevel { associate_oid: associate_oid.to_string(), profile_id, profile })
}

fn worker_key(worker: &WorkerDto) -> String {
    worker.usable_oid().unwrap_or("<missing associateOID>").to_string()
}

/* ---------------- federal ---------------- */

pub struct FederalProfileFetch {
    client: Arc<AdpClient>,
}

#[async_trait]
impl DependentFetch for FederalProfileFetch {
    type Parent = WorkerDto;
    type Record = FederalTaxProfileRecord;

    fn parent_key(&self, worker: &WorkerDto) -> String {
        worker_key(worker)
    }

    async fn fetch(
        &self,
        worker: &WorkerDto,
        cancel: &CancellationToken,
    ) -> Result<Vec<FederalTaxProfileRecord>, LevelFailure> {
        let level = profile_level(&self.client, worker, cancel).await?;
        Ok(vec![map_federal_profile(&level.associate_oid, level.profile)])
    }
}

/// One federal profile per worker.
pub struct FederalTaxProfilesReader {
    roster: Arc<WorkerRoster>,
    expander: Arc<HierarchicalRecordExpander<FederalProfileFetch>>,
}

impl FederalTaxProfilesReader {
    pub fn new(roster: Arc<WorkerRoster>, config: ExpanderConfig) -> Self {
        let fetch = FederalProfileFetch { client: Arc::clone(roster.client()) };
        let expander =
            HierarchicalRecordExpander::new(ENTITY_FEDERAL_TAX_PROFILES, Arc::new(fetch), config);
        Self { roster, expander: Arc::new(expander) }
    }
}

impl EntityReader for FederalTaxProfilesReader {
    type Record = FederalTaxProfileRecord;

    fn read(&self, ctx: PassContext) -> RecordStream<FederalTaxProfileRecord> {
        expand_roster(Arc::clone(&self.roster), Arc::clone(&self.expander), ctx)
    }
}

/* ---------------- state ---------------- */

pub struct StateProfileFetch {
    client: Arc<AdpClient>,
}

#[async_trait]
impl DependentFetch for StateProfileFetch {
    type Parent = WorkerDto;
    type Record = StateTaxProfileRecord;

    fn parent_key(&self, worker: &WorkerDto) -> String {
        worker_key(worker)
    }

    async fn fetch(
        &self,
        worker: &WorkerDto,
        cancel: &CancellationToken,
    ) -> Result<Vec<StateTaxProfileRecord>, LevelFailure> {
        let level = profile_level(&self.client, worker, cancel).await?;
        let withholdings = self
            .client
            .state_tax_withholdings(&level.associate_oid, &level.profile_id, cancel)
            .await
            .map_err(|err| LevelFailure::failed(LEVEL_STATE, err))?;

        Ok(withholdings
            .into_iter()
            .map(|dto| map_state_profile(&level.associate_oid, &level.profile_id, dto))
            .collect())
    }
}

/// State withholdings, fetched per federal profile.
pub struct StateTaxProfilesReader {
    roster: Arc<WorkerRoster>,
    expander: Arc<HierarchicalRecordExpander<StateProfileFetch>>,
}

impl StateTaxProfilesReader {
    pub fn new(roster: Arc<WorkerRoster>, config: ExpanderConfig) -> Self {
        let fetch = StateProfileFetch { client: Arc::clone(roster.client()) };
        let expander =
            HierarchicalRecordExpander::new(ENTITY_STATE_TAX_PROFILES, Arc::new(fetch), config);
        Self { roster, expander: Arc::new(expander) }
    }
}

impl EntityReader for StateTaxProfilesReader {
    type Record = StateTaxProfileRecord;

    fn read(&self, ctx: PassContext) -> RecordStream<StateTaxProfileRecord> {
        expand_roster(Arc::clone(&self.roster), Arc::clone(&self.expander), ctx)
    }
}

/* ---------------- local ---------------- */

pub struct LocalProfileFetch {
    client: Arc<AdpClient>,
}

#[async_trait]
impl DependentFetch for LocalProfileFetch {
    type Parent = WorkerDto;
    type Record = LocalTaxProfileRecord;

    fn parent_key(&self, worker: &WorkerDto) -> String {
        worker_key(worker)
    }

    async fn fetch(
        &self,
        worker: &WorkerDto,
        cancel: &CancellationToken,
    ) -> Result<Vec<LocalTaxProfileRecord>, LevelFailure> {
        let ProfileLevel { associate_oid, profile_id, profile } =
            profile_level(&self.client, worker, cancel).await?;

        Ok(profile
            .us_local_tax_instructions
            .into_iter()
            .map(|dto| map_local_profile(&associate_oid, &profile_id, dto))
            .collect())
    }
}

/// Local instructions carried inside each worker's federal profile.
pub struct LocalTaxProfilesReader {
    roster: Arc<WorkerRoster>,
    expander: Arc<HierarchicalRecordExpander<LocalProfileFetch>>,
}

impl LocalTaxProfilesReader {
    pub fn new(roster: Arc<WorkerRoster>, config: ExpanderConfig) -> Self {
        let fetch = LocalProfileFetch { client: Arc::clone(roster.client()) };
        let expander =
            HierarchicalRecordExpander::new(ENTITY_LOCAL_TAX_PROFILES, Arc::new(fetch), config);
        Self { roster, expander: Arc::new(expander) }
    }
}

impl EntityReader for LocalTaxProfilesReader {
    type Record = LocalTaxProfileRecord;

    fn read(&self, ctx: PassContext) -> RecordStream<LocalTaxProfileRecord> {
        expand_roster(Arc::clone(&self.roster), Arc::clone(&self.expander), ctx)
    }
}
