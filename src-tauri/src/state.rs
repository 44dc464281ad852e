use std::sync::Arc;

use crate::api::HttpAnalysisClient;
use crate::config::ServiceConfig;
use crate::error::StudyHabitsError;
use crate::history::HistoryQuery;
use crate::prefs::PreferenceStore;
use crate::session::SessionContext;
use crate::submission::SubmissionFlow;

/// Managed state shared by all commands.
pub struct AppState {
    pub client: HttpAnalysisClient,
    pub session: SessionContext,
    pub submission: SubmissionFlow,
    pub history: HistoryQuery,
}

impl AppState {
    pub fn new(
        config: &ServiceConfig,
        prefs: Arc<dyn PreferenceStore>,
    ) -> Result<Self, StudyHabitsError> {
        let client = HttpAnalysisClient::new(config)?;
        Ok(Self {
            client,
            session: SessionContext::load(prefs),
            submission: SubmissionFlow::new(config.request_timeout()),
            history: HistoryQuery::new(config.request_timeout()),
        })
    }
}
