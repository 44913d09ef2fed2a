use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use kiwa_core::{
    directory_chips, filter_directory, filter_rows, DirectoryEntry, Facet, FilterState, Grouped,
    Row, SectionCollator, Table,
};
use tracing::{debug, warn};

use crate::config::KiwaConfig;
use crate::error::SourceError;
use crate::proposal::Proposal;

/// Navigable views of the proposal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum View {
    #[default]
    Resumen,
    Cobertura,
    Metodologia,
    Horas,
    Equipo,
    Finanzas,
    Monitoreo,
    Anexos,
    Aplicativos,
    Artes,
}

impl View {
    pub const ALL: [View; 10] = [
        View::Resumen,
        View::Cobertura,
        View::Metodologia,
        View::Horas,
        View::Equipo,
        View::Finanzas,
        View::Monitoreo,
        View::Anexos,
        View::Aplicativos,
        View::Artes,
    ];

    pub fn key(self) -> &'static str {
        match self {
            View::Resumen => "resumen",
            View::Cobertura => "cobertura",
            View::Metodologia => "metodologia",
            View::Horas => "horas",
            View::Equipo => "equipo",
            View::Finanzas => "finanzas",
            View::Monitoreo => "monitoreo",
            View::Anexos => "anexos",
            View::Aplicativos => "aplicativos",
            View::Artes => "artes",
        }
    }

    /// Nav key lookup; unknown keys land on the summary.
    pub fn from_key(key: &str) -> View {
        key.parse().unwrap_or_default()
    }
}

impl FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        View::ALL
            .into_iter()
            .find(|v| v.key() == key)
            .ok_or_else(|| format!("unknown view: {s}"))
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Handle for one annex fetch. Only the latest ticket may publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadTicket(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReloadOutcome {
    Applied { rows: usize },
    /// A newer reload started after this one; the result was dropped.
    Stale,
    /// The fetch failed; the previous table is kept.
    Failed { reason: String },
}

#[derive(Debug, Default)]
pub struct AnnexState {
    pub table: Arc<Table>,
    pub loaded: bool,
    pub query: String,
    pub last_error: Option<String>,
    latest: u64,
}

/// Everything the UI layer owns. The core functions borrow from it.
#[derive(Debug)]
pub struct AppState {
    pub config: KiwaConfig,
    pub proposal: Proposal,
    pub view: View,
    pub annex: AnnexState,
    pub apps: FilterState,
    collator: SectionCollator,
}

impl AppState {
    pub fn new(config: KiwaConfig, proposal: Proposal) -> Self {
        let collator = SectionCollator::new(&config.locale);
        Self {
            config,
            proposal,
            view: View::default(),
            annex: AnnexState::default(),
            apps: FilterState::default(),
            collator,
        }
    }

    pub fn collator(&self) -> &SectionCollator {
        &self.collator
    }

    pub fn navigate(&mut self, key: &str) -> View {
        self.view = View::from_key(key);
        self.view
    }

    /// Config override first, then the document.
    pub fn annex_url(&self) -> Option<&str> {
        self.config.tsv_url.as_deref().or_else(|| self.proposal.tsv_url())
    }

    pub fn begin_annex_reload(&mut self) -> ReloadTicket {
        self.annex.latest += 1;
        debug!(ticket = self.annex.latest, "annex reload started");
        ReloadTicket(self.annex.latest)
    }

    /// Publish a fetch result. Last fetch wins: results from superseded
    /// tickets are dropped, failures keep whatever table was there.
    pub fn complete_annex_reload(
        &mut self,
        ticket: ReloadTicket,
        result: Result<Table, SourceError>,
    ) -> ReloadOutcome {
        if ticket.0 != self.annex.latest {
            warn!(ticket = ticket.0, latest = self.annex.latest, "stale annex reload dropped");
            return ReloadOutcome::Stale;
        }
        match result {
            Ok(table) => {
                let rows = table.len();
                self.annex.table = Arc::new(table);
                self.annex.loaded = true;
                self.annex.last_error = None;
                ReloadOutcome::Applied { rows }
            }
            Err(err) => {
                warn!(error = %err, "annex reload failed");
                let reason = err.to_string();
                self.annex.last_error = Some(reason.clone());
                ReloadOutcome::Failed { reason }
            }
        }
    }

    pub fn set_annex_query(&mut self, query: impl Into<String>) {
        self.annex.query = query.into();
    }

    /// Closing the annex clears the search box.
    pub fn close_annex(&mut self) {
        self.annex.query.clear();
    }

    /// Rows for the current annex query. Empty until a table is loaded.
    pub fn visible_rows(&self) -> Vec<&Row> {
        if !self.annex.loaded {
            return Vec::new();
        }
        filter_rows(&self.annex.table, &self.annex.query)
    }

    /// A failed fetch is reported even when an earlier table is still shown.
    pub fn annex_status(&self) -> String {
        if let Some(err) = &self.annex.last_error {
            return format!("No se pudo cargar el TSV. Revisa el link o permisos. ({err})");
        }
        if !self.annex.loaded {
            return "Se cargará desde el link público.".to_string();
        }
        let total = self.annex.table.len();
        if self.annex.query.trim().is_empty() {
            format!("Listo: {total} filas.")
        } else {
            let shown = self.visible_rows().len();
            format!("Mostrando {shown} filas de {total}.")
        }
    }

    pub fn set_apps_query(&mut self, query: impl Into<String>) {
        self.apps.query = query.into();
    }

    pub fn select_section(&mut self, label: &str) {
        self.apps.facet = Facet::from_label(label);
    }

    pub fn apps_view(&self) -> Grouped<'_, DirectoryEntry> {
        filter_directory(&self.proposal.aplicativos, &self.apps, &self.collator)
    }

    pub fn apps_chips(&self) -> Vec<String> {
        directory_chips(&self.proposal.aplicativos, &self.collator)
    }
}
