use anyhow::{Context, Result};
use kiwa_core::Table;
use tracing::info;

use crate::config::KiwaConfig;
use crate::error::SourceError;
use crate::source::{load_proposal, load_table, open_source, TextSource};
use crate::state::{AppState, ReloadOutcome, ReloadTicket};

/// Load the proposal document and build the initial state. The annex is
/// not fetched here.
pub async fn init_state(config: KiwaConfig) -> Result<AppState> {
    let source = open_source(&config.data_url, config.fetch_timeout())?;
    let proposal = load_proposal(source.as_ref(), config.force_year)
        .await
        .with_context(|| format!("load proposal from {}", config.data_url))?;
    Ok(AppState::new(config, proposal))
}

/// An annex fetch that has a ticket but has not run yet.
///
/// Running it does not touch the state, so several fetches can be in flight
/// at once. Each result goes back through
/// [`AppState::complete_annex_reload`], where only the latest ticket lands.
pub struct AnnexFetch {
    pub ticket: ReloadTicket,
    source: Result<Box<dyn TextSource>, SourceError>,
}

impl AnnexFetch {
    pub async fn run(self) -> (ReloadTicket, Result<Table, SourceError>) {
        let result = match self.source {
            Ok(src) => load_table(src.as_ref()).await,
            Err(e) => Err(e),
        };
        (self.ticket, result)
    }
}

/// Take a reload ticket for the current annex location.
///
/// Fails only when no annex location is configured.
pub fn begin_annex_fetch(state: &mut AppState) -> Result<AnnexFetch> {
    let url = state
        .annex_url()
        .context("no annex configured (anexos.tsv_horario_url or KIWA_TSV_URL)")?
        .to_string();
    let source = open_source(&url, state.config.fetch_timeout());
    let ticket = state.begin_annex_reload();
    Ok(AnnexFetch { ticket, source })
}

/// Fetch the annex and publish it into `state`. Fetch errors are reported
/// through the outcome and the status line.
pub async fn reload_annex(state: &mut AppState) -> Result<ReloadOutcome> {
    let (ticket, result) = begin_annex_fetch(state)?.run().await;
    let outcome = state.complete_annex_reload(ticket, result);
    info!(?outcome, "annex reload finished");
    Ok(outcome)
}
