//! View-side state for one display surface.
//!
//! The lookup core is stateless; whatever the user currently sees (query,
//! loading flag, error text, last report) lives here. Every lookup takes a
//! [`Ticket`] and only the newest ticket may write its outcome back, so a slow
//! response for an old query cannot overwrite a newer one.

use parking_lot::Mutex;
use std::sync::Arc;

use crate::error::LookupError;
use crate::models::LookupReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
pub struct WeatherPanel {
    generation: u64,
    query: String,
    loading: bool,
    error: Option<LookupError>,
    report: Option<LookupReport>,
}

impl WeatherPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// A panel whose first lookup will be for `query`
    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Starts a lookup on a shared panel. Dropping the returned guard before
    /// [`PendingLookup::finish`] records the lookup as cancelled.
    pub fn start(panel: &Arc<Mutex<Self>>, query: &str) -> PendingLookup {
        let ticket = panel.lock().begin(query);
        PendingLookup {
            panel: Arc::clone(panel),
            ticket: Some(ticket),
        }
    }

    /// Records a new query and invalidates any lookup still in flight.
    pub fn begin(&mut self, query: &str) -> Ticket {
        self.generation += 1;
        self.query = query.to_string();
        self.loading = true;
        self.error = None;
        Ticket(self.generation)
    }

    /// Applies a lookup outcome. Returns `false` when the ticket is stale.
    ///
    /// A failure clears the previously shown report.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        outcome: &Result<LookupReport, LookupError>,
    ) -> bool {
        if ticket.0 != self.generation {
            tracing::debug!(
                stale = ticket.0,
                current = self.generation,
                "Discarding superseded lookup"
            );
            return false;
        }

        self.loading = false;
        match outcome {
            Ok(report) => {
                self.report = Some(report.clone());
                self.error = None;
            }
            Err(err) => {
                self.report = None;
                self.error = Some(err.clone());
            }
        }
        true
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Nothing shown yet: no lookup has run or is running.
    pub fn is_idle(&self) -> bool {
        !self.loading && self.error.is_none() && self.report.is_none()
    }

    pub fn error(&self) -> Option<&LookupError> {
        self.error.as_ref()
    }

    pub fn report(&self) -> Option<&LookupReport> {
        self.report.as_ref()
    }
}

/// An in-flight lookup on a shared [`WeatherPanel`]
#[must_use = "dropping the guard marks the lookup cancelled"]
pub struct PendingLookup {
    panel: Arc<Mutex<WeatherPanel>>,
    ticket: Option<Ticket>,
}

impl PendingLookup {
    /// Writes the outcome back. Returns `false` when a newer lookup won.
    pub fn finish(mut self, outcome: &Result<LookupReport, LookupError>) -> bool {
        match self.ticket.take() {
            Some(ticket) => self.panel.lock().complete(ticket, outcome),
            None => false,
        }
    }
}

impl Drop for PendingLookup {
    fn drop(&mut self) {
        if let Some(ticket) = self.ticket.take() {
            tracing::debug!(ticket = ticket.0, "Lookup dropped before completion");
            self.panel.lock().complete(ticket, &Err(LookupError::Cancelled));
        }
    }
}
