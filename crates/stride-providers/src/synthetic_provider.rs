// ABOUTME: Deterministic in-process activity provider and demo-account authenticator
// ABOUTME: Serves generated or injected activities to tokens it issued itself
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Synthetic Provider
//!
//! Lets the viewer run without an upstream account. The authenticator accepts
//! one configured identifier/secret and issues random token pairs; the
//! provider answers only for tokens that came from its paired authenticator,
//! so the unauthorized paths behave like the real service.
//!
//! Activities are returned newest first, like Garmin's activity list.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use stride_core::constants::oauth_providers;
use stride_core::models::{Activity, ActivityType, TokenPair};
use tracing::{debug, info};
use uuid::Uuid;

use crate::core::{ActivityProvider, Authenticator};
use crate::errors::{AuthError, ProviderError, ProviderResult};

/// Bearer tokens issued by a [`SyntheticAuthenticator`]
///
/// Tokens are valid for `ttl` after issue or until revoked. Expired entries
/// are pruned whenever a new token is issued, so the registry stays bounded
/// by the logins of one TTL window.
#[derive(Debug, Clone)]
pub struct IssuedTokens {
    bearers: Arc<RwLock<HashMap<String, DateTime<Utc>>>>,
    ttl: Duration,
}

impl Default for IssuedTokens {
    fn default() -> Self {
        Self::with_ttl(Duration::hours(i64::from(oauth_providers::SYNTHETIC_TOKEN_TTL_HOURS)))
    }
}

impl IssuedTokens {
    /// Registry whose tokens lapse `ttl` after issue
    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            bearers: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Tokens currently held, including lapsed ones not yet pruned
    #[must_use]
    pub fn len(&self) -> usize {
        self.bearers.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// True when no tokens are held
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn issue(&self) -> TokenPair {
        let pair = TokenPair::new(
            format!("synthetic-oauth1-{}", Uuid::new_v4()),
            format!("synthetic-oauth2-{}", Uuid::new_v4()),
        );
        let now = Utc::now();
        let mut bearers = self.bearers.write().unwrap_or_else(PoisonError::into_inner);
        bearers.retain(|_, issued_at| now - *issued_at <= self.ttl);
        bearers.insert(pair.oauth2.clone(), now);
        pair
    }

    fn revoke(&self, tokens: &TokenPair) -> bool {
        self.bearers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(tokens.bearer())
            .is_some()
    }

    fn accepts(&self, tokens: &TokenPair) -> bool {
        if !tokens.is_complete() {
            return false;
        }
        let now = Utc::now();
        self.bearers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(tokens.bearer())
            .is_some_and(|issued_at| now - *issued_at <= self.ttl)
    }
}

/// Authenticator for a single demo account
pub struct SyntheticAuthenticator {
    identifier: String,
    secret: String,
    issued: IssuedTokens,
}

impl SyntheticAuthenticator {
    /// Accept `identifier`/`secret` and record issued tokens in `issued`
    #[must_use]
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>, issued: IssuedTokens) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
            issued,
        }
    }
}

#[async_trait]
impl Authenticator for SyntheticAuthenticator {
    fn name(&self) -> &'static str {
        oauth_providers::SYNTHETIC
    }

    async fn login(&self, identifier: &str, secret: &str) -> Result<TokenPair, AuthError> {
        if identifier.trim().is_empty() {
            return Err(AuthError::MissingCredential { field: "email" });
        }
        if secret.is_empty() {
            return Err(AuthError::MissingCredential { field: "password" });
        }
        if !identifier.trim().eq_ignore_ascii_case(&self.identifier) || secret != self.secret {
            debug!("Synthetic login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        info!("Synthetic login accepted");
        Ok(self.issued.issue())
    }

    async fn revoke(&self, tokens: &TokenPair) {
        if self.issued.revoke(tokens) {
            debug!("Synthetic tokens revoked");
        }
    }
}

/// Provider backed by an in-memory activity list
pub struct SyntheticProvider {
    activities: Vec<Activity>,
    issued: IssuedTokens,
}

impl SyntheticProvider {
    /// Serve `activities` (already newest first) to tokens in `issued`
    #[must_use]
    pub fn with_activities(activities: Vec<Activity>, issued: IssuedTokens) -> Self {
        Self { activities, issued }
    }

    /// Number of activities served
    #[must_use]
    pub fn activity_count(&self) -> usize {
        self.activities.len()
    }

    /// Generate `days` days of training ending on `last_day`, newest first
    ///
    /// The output depends only on the arguments. Rest days produce no
    /// activity and some days produce two.
    #[must_use]
    pub fn generate_activities(last_day: NaiveDate, days: u32) -> Vec<Activity> {
        let mut activities = Vec::new();
        let mut next_id = 10_000_u64;

        for offset in 0..days {
            let Some(date) = last_day.checked_sub_signed(Duration::days(i64::from(offset))) else {
                break;
            };
            let Some(templates) = WEEKLY_PLAN.get((offset % 7) as usize) else {
                continue;
            };
            // Alternate the plan's volume week to week
            let scale = if (offset / 7) % 2 == 0 { 1.0 } else { 0.85 };

            for template in templates.iter().rev() {
                let (hour, minute) = template.start;
                let Some(start) = date.and_hms_opt(hour, minute, 0) else {
                    continue;
                };
                activities.push(Activity {
                    id: Some(next_id),
                    name: Some(template.name.to_owned()),
                    activity_type: Some(ActivityType::new(template.type_key)),
                    distance_meters: Some((template.distance_meters * scale).round()),
                    duration_seconds: Some((template.duration_seconds * scale).round()),
                    average_heart_rate: template.heart_rate,
                    calories: Some((template.duration_seconds * scale / 60.0 * 9.0).round()),
                    start_time_local: Some(start.format("%Y-%m-%d %H:%M:%S").to_string()),
                    ..Activity::default()
                });
                next_id += 1;
            }
        }

        activities
    }

    fn authorize(&self, tokens: &TokenPair) -> ProviderResult<()> {
        if self.issued.accepts(tokens) {
            Ok(())
        } else {
            Err(ProviderError::Unauthorized {
                provider: oauth_providers::SYNTHETIC,
            })
        }
    }
}

#[async_trait]
impl ActivityProvider for SyntheticProvider {
    fn name(&self) -> &'static str {
        oauth_providers::SYNTHETIC
    }

    async fn fetch_activities(
        &self,
        start: usize,
        limit: usize,
        tokens: &TokenPair,
    ) -> ProviderResult<Vec<Activity>> {
        self.authorize(tokens)?;
        Ok(self
            .activities
            .iter()
            .skip(start)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn fetch_activity_detail(
        &self,
        activity_id: u64,
        tokens: &TokenPair,
    ) -> ProviderResult<Activity> {
        self.authorize(tokens)?;
        self.activities
            .iter()
            .find(|activity| activity.id == Some(activity_id))
            .cloned()
            .ok_or_else(|| ProviderError::NotFound {
                provider: oauth_providers::SYNTHETIC,
                resource: format!("Activity {activity_id}"),
            })
    }
}

/// Build a paired authenticator and provider sharing one token registry
#[must_use]
pub fn demo_account(
    identifier: &str,
    secret: &str,
    activities: Vec<Activity>,
) -> (SyntheticAuthenticator, SyntheticProvider) {
    let issued = IssuedTokens::default();
    (
        SyntheticAuthenticator::new(identifier, secret, issued.clone()),
        SyntheticProvider::with_activities(activities, issued),
    )
}

struct SessionTemplate {
    name: &'static str,
    type_key: &'static str,
    /// Local start as (hour, minute)
    start: (u32, u32),
    distance_meters: f64,
    duration_seconds: f64,
    heart_rate: Option<f64>,
}

/// Sessions per day, indexed by days before the last generated day
const WEEKLY_PLAN: [&[SessionTemplate]; 7] = [
    &[SessionTemplate {
        name: "Morning Run",
        type_key: "running",
        start: (6, 45),
        distance_meters: 8_200.0,
        duration_seconds: 2_520.0,
        heart_rate: Some(152.0),
    }],
    &[],
    &[
        SessionTemplate {
            name: "Commute Ride",
            type_key: "road_biking",
            start: (8, 5),
            distance_meters: 12_400.0,
            duration_seconds: 2_460.0,
            heart_rate: Some(128.0),
        },
        SessionTemplate {
            name: "Evening Walk",
            type_key: "walking",
            start: (19, 30),
            distance_meters: 3_100.0,
            duration_seconds: 2_220.0,
            heart_rate: Some(96.0),
        },
    ],
    &[SessionTemplate {
        name: "Tempo Run",
        type_key: "running",
        start: (7, 0),
        distance_meters: 10_000.0,
        duration_seconds: 2_700.0,
        heart_rate: Some(168.0),
    }],
    &[SessionTemplate {
        name: "Pool Swim",
        type_key: "lap_swimming",
        start: (12, 15),
        distance_meters: 1_800.0,
        duration_seconds: 2_400.0,
        heart_rate: None,
    }],
    &[SessionTemplate {
        name: "Yoga",
        type_key: "yoga",
        start: (18, 0),
        distance_meters: 0.0,
        duration_seconds: 3_600.0,
        heart_rate: Some(88.0),
    }],
    &[SessionTemplate {
        name: "Long Hike",
        type_key: "hiking",
        start: (9, 30),
        distance_meters: 16_500.0,
        duration_seconds: 17_100.0,
        heart_rate: Some(118.0),
    }],
];
