//! Delayed, supersedable wrapper around [`forecast::analyze`].
//!
//! Each request for a dream takes a new sequence number. When the delay
//! elapses the result is only handed back if no newer request (or reset) for
//! the same dream arrived in the meantime.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::forecast;
use crate::models::{Goal, Insight};
use crate::sentiment::Lexicon;

#[derive(Debug, Default)]
struct Tickets {
    latest: HashMap<Uuid, u64>,
    pending: HashMap<Uuid, u64>,
}

#[derive(Debug, Clone)]
pub struct Analyst {
    lexicon: Arc<Lexicon>,
    delay: Duration,
    tickets: Arc<Mutex<Tickets>>,
}

impl Analyst {
    pub fn new(lexicon: Lexicon, delay: Duration) -> Self {
        Self {
            lexicon: Arc::new(lexicon),
            delay,
            tickets: Arc::new(Mutex::new(Tickets::default())),
        }
    }

    /// Returns `None` when the request was superseded before it finished.
    pub async fn analyze(&self, id: Uuid, goal: Goal, now: NaiveDateTime) -> Option<Insight> {
        let pending = self.issue(id);
        tracing::debug!(%id, ticket = pending.ticket, "analysis requested");

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let insight = forecast::analyze(&goal, now, &self.lexicon);

        let current = lock(&self.tickets).latest.get(&id) == Some(&pending.ticket);
        if !current {
            tracing::debug!(%id, ticket = pending.ticket, "discarding superseded analysis");
            return None;
        }
        tracing::info!(%id, status = ?insight.status, "analysis ready");
        Some(insight)
    }

    /// Invalidates any in-flight analysis for the dream.
    pub fn reset(&self, id: Uuid) {
        let mut tickets = lock(&self.tickets);
        *tickets.latest.entry(id).or_insert(0) += 1;
        tickets.pending.remove(&id);
    }

    pub fn is_pending(&self, id: Uuid) -> bool {
        lock(&self.tickets).pending.contains_key(&id)
    }

    fn issue(&self, id: Uuid) -> PendingTicket<'_> {
        let mut tickets = lock(&self.tickets);
        let latest = tickets.latest.entry(id).or_insert(0);
        *latest += 1;
        let ticket = *latest;
        tickets.pending.insert(id, ticket);
        PendingTicket {
            tickets: &self.tickets,
            id,
            ticket,
        }
    }
}

/// Clears the pending mark for its request when the request finishes or is
/// dropped mid-flight, unless a newer request has taken over the mark.
struct PendingTicket<'a> {
    tickets: &'a Mutex<Tickets>,
    id: Uuid,
    ticket: u64,
}

impl Drop for PendingTicket<'_> {
    fn drop(&mut self) {
        let mut tickets = lock(self.tickets);
        if tickets.pending.get(&self.id) == Some(&self.ticket) {
            tickets.pending.remove(&self.id);
        }
    }
}

fn lock(tickets: &Mutex<Tickets>) -> MutexGuard<'_, Tickets> {
    // The ticket maps stay consistent even if a holder panicked.
    tickets
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
