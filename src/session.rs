// ABOUTME: Per-login session contexts holding tokens, fetched activities, and fetch sequencers
// ABOUTME: Concurrent session store with idle expiry and session cookie helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Sessions
//!
//! A session is created by a successful login and lives until logout or
//! until it has been idle for the configured TTL. Each one owns the token
//! pair for its user and the activities last fetched for the list and
//! calendar views, so concurrent users never share state.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use http::header::COOKIE;
use http::HeaderMap;
use stride_core::constants::session::COOKIE_NAME;
use stride_core::models::{Activity, TokenPair};
use tokio::sync::{RwLock, RwLockReadGuard};
use tracing::{debug, info};
use uuid::Uuid;

use crate::sequencing::{FetchSequencer, FetchTicket};

/// Opaque session identifier carried in the session cookie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generate a random id
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// Activities fetched for a session's views
#[derive(Debug, Default)]
pub struct SessionView {
    /// List view activities, newest first, grown by "load more"
    pub list: Vec<Activity>,
    /// Calendar window, `None` until first loaded
    pub calendar: Option<Vec<Activity>>,
}

/// Result of trying to store a fetch result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Stored; `total` activities are now held for the view
    Committed {
        /// Activities held for the view after the commit
        total: usize,
    },
    /// A newer fetch was issued meanwhile; nothing was stored
    Stale,
}

impl CommitOutcome {
    /// True when the result was discarded
    #[must_use]
    pub const fn is_stale(self) -> bool {
        matches!(self, Self::Stale)
    }
}

/// Per-login context
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    tokens: TokenPair,
    created_at: DateTime<Utc>,
    last_seen: AtomicI64,
    list_fetches: FetchSequencer,
    calendar_fetches: FetchSequencer,
    view: RwLock<SessionView>,
}

impl Session {
    fn new(tokens: TokenPair, now: DateTime<Utc>) -> Self {
        Self {
            id: SessionId::generate(),
            tokens,
            created_at: now,
            last_seen: AtomicI64::new(now.timestamp()),
            list_fetches: FetchSequencer::new(),
            calendar_fetches: FetchSequencer::new(),
            view: RwLock::new(SessionView::default()),
        }
    }

    /// Session id
    #[must_use]
    pub const fn id(&self) -> SessionId {
        self.id
    }

    /// Tokens issued at login
    #[must_use]
    pub const fn tokens(&self) -> &TokenPair {
        &self.tokens
    }

    /// Login time
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last time the session was used
    #[must_use]
    pub fn last_seen_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.last_seen.load(Ordering::Relaxed), 0).unwrap_or(self.created_at)
    }

    fn touch(&self, now: DateTime<Utc>) {
        self.last_seen.store(now.timestamp(), Ordering::Relaxed);
    }

    fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.last_seen_at() > ttl
    }

    /// Start a list fetch, superseding any in flight
    pub fn begin_list_fetch(&self) -> FetchTicket {
        self.list_fetches.issue()
    }

    /// Start a calendar fetch, superseding any in flight
    pub fn begin_calendar_fetch(&self) -> FetchTicket {
        self.calendar_fetches.issue()
    }

    /// Store a list page if `ticket` is still current
    ///
    /// With `append` the page is added after the activities already held
    /// ("load more"); otherwise it replaces them.
    pub async fn commit_list(
        &self,
        ticket: FetchTicket,
        page: Vec<Activity>,
        append: bool,
    ) -> CommitOutcome {
        let mut view = self.view.write().await;
        if !self.list_fetches.is_current(ticket) {
            debug!(session = %self.id, ticket = ticket.sequence(), "Discarding stale list page");
            return CommitOutcome::Stale;
        }
        if append {
            view.list.extend(page);
        } else {
            view.list = page;
        }
        CommitOutcome::Committed {
            total: view.list.len(),
        }
    }

    /// Store the calendar window if `ticket` is still current
    pub async fn commit_calendar(
        &self,
        ticket: FetchTicket,
        activities: Vec<Activity>,
    ) -> CommitOutcome {
        let mut view = self.view.write().await;
        if !self.calendar_fetches.is_current(ticket) {
            debug!(session = %self.id, ticket = ticket.sequence(), "Discarding stale calendar window");
            return CommitOutcome::Stale;
        }
        let total = activities.len();
        view.calendar = Some(activities);
        CommitOutcome::Committed { total }
    }

    /// Read access to the fetched activities
    ///
    /// Do not hold the guard across an upstream call.
    pub async fn view(&self) -> RwLockReadGuard<'_, SessionView> {
        self.view.read().await
    }
}

/// Why a session id did not resolve to a live session
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SessionLookupError {
    /// Never issued, logged out, or already purged
    #[error("Not logged in")]
    Unknown,
    /// Known but idle past the TTL; removed by this lookup
    #[error("Session has expired, please log in again")]
    Expired,
}

/// Concurrent map of live sessions
#[derive(Debug)]
pub struct SessionStore {
    sessions: DashMap<SessionId, Arc<Session>>,
    ttl: Duration,
}

impl SessionStore {
    /// Create a store whose sessions expire after `ttl` of inactivity
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
        }
    }

    /// Idle lifetime
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Open a session for freshly issued tokens
    pub fn create(&self, tokens: TokenPair) -> Arc<Session> {
        let session = Arc::new(Session::new(tokens, Utc::now()));
        self.sessions.insert(session.id(), Arc::clone(&session));
        info!(session = %session.id(), active = self.sessions.len(), "Session created");
        session
    }

    /// Look up a live session and mark it used
    ///
    /// An expired session is removed and reported as absent.
    pub fn get(&self, id: SessionId) -> Option<Arc<Session>> {
        self.lookup(id).ok()
    }

    /// Like [`SessionStore::get`], but says whether the session expired
    ///
    /// # Errors
    ///
    /// [`SessionLookupError::Expired`] the first time an idle session is
    /// looked up after its TTL, [`SessionLookupError::Unknown`] otherwise.
    pub fn lookup(&self, id: SessionId) -> Result<Arc<Session>, SessionLookupError> {
        let session = self
            .sessions
            .get(&id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or(SessionLookupError::Unknown)?;
        let now = Utc::now();
        if session.is_expired(now, self.ttl) {
            self.sessions.remove(&id);
            debug!(session = %id, "Session expired");
            return Err(SessionLookupError::Expired);
        }
        session.touch(now);
        Ok(session)
    }

    /// End a session
    pub fn remove(&self, id: SessionId) -> Option<Arc<Session>> {
        let removed = self.sessions.remove(&id).map(|(_, session)| session);
        if removed.is_some() {
            info!(session = %id, "Session removed");
        }
        removed
    }

    /// Drop every expired session, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let before = self.sessions.len();
        self.sessions
            .retain(|_, session| !session.is_expired(now, self.ttl));
        before.saturating_sub(self.sessions.len())
    }

    /// Number of sessions held, including not yet purged expired ones
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// True when no sessions are held
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// `Set-Cookie` value establishing a session
#[must_use]
pub fn session_cookie(id: SessionId, max_age_secs: u64, secure: bool) -> String {
    let secure = if secure { "; Secure" } else { "" };
    format!("{COOKIE_NAME}={id}; HttpOnly; Path=/; SameSite=Lax; Max-Age={max_age_secs}{secure}")
}

/// `Set-Cookie` value deleting the session cookie
#[must_use]
pub fn expired_session_cookie(secure: bool) -> String {
    let secure = if secure { "; Secure" } else { "" };
    format!("{COOKIE_NAME}=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0{secure}")
}

/// Session id from the request's `Cookie` headers, if present and well formed
#[must_use]
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == COOKIE_NAME)
        .and_then(|(_, value)| value.parse().ok())
}

#[cfg(test)]
mod tests {
    use http::HeaderValue;

    use super::*;

    #[test]
    fn test_cookie_round_trip_through_headers() {
        let id = SessionId::generate();
        let cookie = session_cookie(id, 3600, true);
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.ends_with("; Secure"));

        let mut headers = HeaderMap::new();
        let value = format!("theme=dark; {COOKIE_NAME}={id}");
        headers.insert(COOKIE, HeaderValue::from_str(&value).unwrap());
        assert_eq!(session_id_from_headers(&headers), Some(id));
    }

    #[test]
    fn test_malformed_cookie_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("stride_session=not-a-uuid"));
        assert_eq!(session_id_from_headers(&headers), None);
    }

    #[test]
    fn test_expired_session_is_dropped() {
        let store = SessionStore::new(Duration::zero());
        let session = store.create(TokenPair::new("a", "b"));
        session.last_seen.store(0, Ordering::Relaxed);

        assert!(store.get(session.id()).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_lookup_distinguishes_expired_from_unknown() {
        let store = SessionStore::new(Duration::zero());
        let session = store.create(TokenPair::new("a", "b"));
        session.last_seen.store(0, Ordering::Relaxed);

        assert_eq!(
            store.lookup(session.id()).err(),
            Some(SessionLookupError::Expired)
        );
        assert_eq!(
            store.lookup(session.id()).err(),
            Some(SessionLookupError::Unknown)
        );
        assert_eq!(
            store.lookup(SessionId::generate()).err(),
            Some(SessionLookupError::Unknown)
        );
    }

    #[tokio::test]
    async fn test_stale_list_commit_is_discarded() {
        let store = SessionStore::new(Duration::hours(1));
        let session = store.create(TokenPair::new("a", "b"));

        let slow = session.begin_list_fetch();
        let fast = session.begin_list_fetch();

        let fresh = vec![Activity::default()];
        assert_eq!(
            session.commit_list(fast, fresh, false).await,
            CommitOutcome::Committed { total: 1 }
        );
        assert!(session
            .commit_list(slow, vec![Activity::default(); 5], false)
            .await
            .is_stale());
        assert_eq!(session.view().await.list.len(), 1);
    }
}
