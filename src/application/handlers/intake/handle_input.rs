//! HandleInputHandler - Applies one inbound event to its session.
//!
//! The session lease is held from load until the new state is written, so
//! events for the same applicant are strictly serialized. A confirmation
//! that arrives twice is therefore seen the second time against an already
//! cleared session and cannot submit again.

use std::sync::Arc;

use crate::config::{AppConfig, ValidationError};
use crate::domain::foundation::{Locale, SubmissionId, Timestamp};
use crate::domain::questionnaire::{
    Directive, EngineConfig, InboundEvent, NoticeKey, Outcome, PromptKey, QuestionnaireEngine,
    Reply,
};
use crate::domain::summary::Submission;
use crate::ports::{
    GatewayError, ReviewChannelId, SessionStore, SessionStoreError, SubmissionGateway,
};

/// Command to apply one inbound event.
#[derive(Debug, Clone)]
pub struct HandleInputCommand {
    pub event: InboundEvent,
}

/// How delivery of a confirmed application went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryStatus {
    Delivered(SubmissionId),
    /// No review channel configured; nothing was sent.
    Unconfigured(SubmissionId),
    Failed {
        submission_id: SubmissionId,
        reason: String,
    },
}

impl DeliveryStatus {
    pub fn submission_id(&self) -> SubmissionId {
        match self {
            Self::Delivered(id) | Self::Unconfigured(id) => *id,
            Self::Failed { submission_id, .. } => *submission_id,
        }
    }

    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered(_))
    }

    /// What the applicant is told afterwards.
    fn directives(&self) -> Vec<Directive> {
        let main_menu = Directive::prompt(PromptKey::MainMenu, vec![]);
        match self {
            Self::Delivered(_) => vec![
                Directive::notice(NoticeKey::ApplicationSubmitted),
                Directive::notice(NoticeKey::ThankYou),
                main_menu,
            ],
            Self::Unconfigured(_) => {
                vec![Directive::notice(NoticeKey::SubmissionUnavailable), main_menu]
            }
            Self::Failed { .. } => vec![Directive::notice(NoticeKey::SubmissionFailed), main_menu],
        }
    }
}

/// Result of handling one event.
#[derive(Debug, Clone)]
pub struct HandleInputResult {
    pub reply: Reply,
    pub outcome: Outcome,
    pub delivery: Option<DeliveryStatus>,
}

/// Errors from the intake handler.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("Session store error: {0}")]
    Store(#[from] SessionStoreError),
}

/// Runtime settings for the intake.
#[derive(Debug, Clone, Copy)]
pub struct IntakeSettings {
    pub review_channel: Option<ReviewChannelId>,
    pub default_locale: Locale,
    pub engine: EngineConfig,
}

impl Default for IntakeSettings {
    fn default() -> Self {
        Self {
            review_channel: None,
            default_locale: Locale::default(),
            engine: EngineConfig::default(),
        }
    }
}

impl IntakeSettings {
    /// Builds settings from validated configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, ValidationError> {
        let engine = EngineConfig {
            min_voice_seconds: config.session.min_voice_seconds,
            review_offset: config
                .gateway
                .review_offset()
                .ok_or(ValidationError::InvalidUtcOffset)?,
        };
        Ok(Self {
            review_channel: config.gateway.destination(),
            default_locale: config.session.locale()?,
            engine,
        })
    }
}

/// Handler for inbound events.
pub struct HandleInputHandler {
    store: Arc<dyn SessionStore>,
    gateway: Arc<dyn SubmissionGateway>,
    engine: QuestionnaireEngine,
    settings: IntakeSettings,
}

impl HandleInputHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        gateway: Arc<dyn SubmissionGateway>,
        settings: IntakeSettings,
    ) -> Self {
        if settings.review_channel.is_none() {
            tracing::warn!("No review channel configured; confirmed applications will not be delivered");
        }
        Self {
            store,
            gateway,
            engine: QuestionnaireEngine::new(settings.engine),
            settings,
        }
    }

    pub async fn handle(&self, cmd: HandleInputCommand) -> Result<HandleInputResult, IntakeError> {
        let event = cmd.event;

        // 1. Lease the session; held until the new state is written
        let mut lease = self
            .store
            .lease(&event.session_id, self.settings.default_locale)
            .await?;

        // 2. Decide
        let decision = self.engine.decide(&lease, &event, Timestamp::now());
        log_outcome(&event, &decision.outcome);
        let mut directives = decision.directives;

        // 3. Deliver a confirmed application exactly once
        let delivery = match &decision.submission {
            Some(submission) => {
                let status = self.deliver(&event, submission).await;
                directives.extend(status.directives());
                Some(status)
            }
            None => None,
        };

        // 4. Persist
        *lease = decision.session;

        let reply = Reply {
            session_id: event.session_id,
            locale: lease.locale(),
            directives,
        };
        Ok(HandleInputResult {
            reply,
            outcome: decision.outcome,
            delivery,
        })
    }

    async fn deliver(&self, event: &InboundEvent, submission: &Submission) -> DeliveryStatus {
        let submission_id = submission.record.submission_id;
        let Some(channel) = self.settings.review_channel else {
            tracing::error!(
                session_id = %event.session_id,
                %submission_id,
                "Review channel not configured, application not delivered"
            );
            return DeliveryStatus::Unconfigured(submission_id);
        };

        match self.gateway.submit(channel, submission).await {
            Ok(()) => {
                tracing::info!(
                    session_id = %event.session_id,
                    %submission_id,
                    %channel,
                    attachments = submission.attachments.len(),
                    "Application submitted"
                );
                DeliveryStatus::Delivered(submission_id)
            }
            Err(GatewayError::Unconfigured) => {
                tracing::error!(
                    session_id = %event.session_id,
                    %submission_id,
                    "Gateway reports review channel unconfigured"
                );
                DeliveryStatus::Unconfigured(submission_id)
            }
            Err(e) => {
                tracing::error!(
                    session_id = %event.session_id,
                    %submission_id,
                    %channel,
                    error = %e,
                    "Application delivery failed"
                );
                DeliveryStatus::Failed {
                    submission_id,
                    reason: e.to_string(),
                }
            }
        }
    }
}

fn log_outcome(event: &InboundEvent, outcome: &Outcome) {
    let session_id = &event.session_id;
    match outcome {
        Outcome::Rejected { step, rejection } => tracing::warn!(
            %session_id,
            step = ?step,
            input = event.input.kind(),
            %rejection,
            "Input rejected"
        ),
        Outcome::Cleared(reason) => {
            tracing::info!(%session_id, reason = ?reason, "Session cleared")
        }
        Outcome::Submitted => tracing::info!(%session_id, "Application confirmed"),
        other => tracing::debug!(%session_id, outcome = ?other, "Event applied"),
    }
}
