use std::sync::Arc;

use crate::analysis::JournalAnalyzer;
use crate::config::Config;
use crate::db::DatabaseBackend;
use crate::llm::LlmProvider;
use crate::services::{CommunityService, JournalService};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Arc<dyn DatabaseBackend>,
    pub llm: LlmProvider,
    pub journal: Arc<JournalService>,
    pub community: Arc<CommunityService>,
}

impl AppState {
    pub fn new(config: Config, db: Arc<dyn DatabaseBackend>, llm: LlmProvider) -> Self {
        let analyzer = JournalAnalyzer::new(llm.clone());
        let journal = Arc::new(JournalService::new(db.clone(), analyzer));
        let community = Arc::new(CommunityService::new(db.clone()));

        Self {
            config: Arc::new(config),
            db,
            llm,
            journal,
            community,
        }
    }
}
