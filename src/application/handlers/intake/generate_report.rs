//! GenerateReportHandler - Command handler for the one-time report step.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::domain::catalog::QuestionCatalog;
use crate::domain::foundation::SessionId;
use crate::domain::report::{MalformedReportResponse, MedicalReport, ReportRequest};
use crate::domain::session::SessionError;
use crate::ports::{GeneratorError, ReportGenerator, SessionStore};

/// Command to generate the report for a completed session.
#[derive(Debug, Clone)]
pub struct GenerateReportCommand {
    pub session_id: SessionId,
}

/// Report generation failures.
///
/// `Generator` is a collaborator-availability problem; `Malformed` means the
/// collaborator answered but produced garbage. They are kept distinct so the
/// surrounding service can choose a per-kind retry policy.
#[derive(Debug, Error)]
pub enum GenerateReportError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("report generation failed: {0}")]
    Generator(#[from] GeneratorError),

    #[error("report response malformed: {0}")]
    Malformed(#[from] MalformedReportResponse),
}

/// Handler for report generation.
///
/// The collaborator is invoked at most once per session: the validated
/// report is cached on the session, and repeat calls return the cached
/// report without another external call. The session handle's mutex is held
/// across the call, so concurrent report requests for one session cannot
/// double-invoke the collaborator.
pub struct GenerateReportHandler {
    catalog: Arc<QuestionCatalog>,
    store: Arc<dyn SessionStore>,
    generator: Arc<dyn ReportGenerator>,
}

impl GenerateReportHandler {
    pub fn new(
        catalog: Arc<QuestionCatalog>,
        store: Arc<dyn SessionStore>,
        generator: Arc<dyn ReportGenerator>,
    ) -> Self {
        Self {
            catalog,
            store,
            generator,
        }
    }

    pub async fn handle(
        &self,
        cmd: GenerateReportCommand,
    ) -> Result<MedicalReport, GenerateReportError> {
        let handle = self
            .store
            .get(&cmd.session_id)
            .await
            .map_err(SessionError::from)?
            .ok_or_else(|| SessionError::not_found(cmd.session_id))?;

        let mut session = handle.lock().await;

        if let Some(report) = session.report() {
            return Ok(report.clone());
        }

        let request = ReportRequest::assemble(&session, &self.catalog)?;
        let payload = self.generator.generate(&request).await?;
        let report = MedicalReport::from_value(payload)?;

        session.set_report(report.clone());
        info!(
            session = %cmd.session_id,
            urgency = %report.urgency_level,
            causes = report.possible_causes.len(),
            generator = %self.generator.generator_info().name,
            "assessment report generated"
        );

        Ok(report)
    }
}
