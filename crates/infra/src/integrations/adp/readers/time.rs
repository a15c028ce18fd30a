use std::sync::Arc;

use hrsync_core::mapping::{map_labor_charge_code, map_time_card};
use hrsync_core::{EntityReader, PassContext, RecordStream};
use hrsync_domain::{LaborChargeCodeRecord, Result, TimeCardRecord};

use super::flat_stream;
use crate::integrations::adp::client::AdpClient;

pub struct TimeCardsReader {
    client: Arc<AdpClient>,
}

impl TimeCardsReader {
    pub fn new(client: Arc<AdpClient>) -> Self {
        Self { client }
    }
}

impl EntityReader for TimeCardsReader {
    type Record = TimeCardRecord;

    fn read(&self, ctx: PassContext) -> RecordStream<TimeCardRecord> {
        flat_stream(read_time_cards(Arc::clone(&self.client), ctx))
    }
}

pub struct LaborChargeCodesReader {
    client: Arc<AdpClient>,
}

impl LaborChargeCodesReader {
    pub fn new(client: Arc<AdpClient>) -> Self {
        Self { client }
    }
}

impl EntityReader for LaborChargeCodesReader {
    type Record = LaborChargeCodeRecord;

    fn read(&self, ctx: PassContext) -> RecordStream<LaborChargeCodeRecord> {
        flat_stream(read_labor_charge_codes(Arc::clone(&self.client), ctx))
    }
}

async fn read_time_cards(client: Arc<AdpClient>, ctx: PassContext) -> Result<Vec<TimeCardRecord>> {
    let pages = client.time_cards(ctx.cancel.clone());
    let cards = client.fetcher().fetch_all(&pages, &ctx.cancel).await?;
    ctx.stats.record_flat(cards.len() as u64);
    Ok(cards.into_iter().map(map_time_card).collect())
}

async fn read_labor_charge_codes(
    client: Arc<AdpClient>,
    ctx: PassContext,
) -> Result<Vec<LaborChargeCodeRecord>> {
    let pages = client.labor_charge_codes(ctx.cancel.clone());
    let codes = client.fetcher().fetch_all(&pages, &ctx.cancel).await?;
    ctx.stats.record_flat(codes.len() as u64);
    Ok(codes.into_iter().map(map_labor_charge_code).collect())
}
