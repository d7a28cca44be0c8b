pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod utils;

use std::sync::Arc;

use crate::services::{
    candidate_service::CandidateService, cascade_service::CascadeService,
    history_service::HistoryService, position_service::PositionService,
    status_service::StatusService, trash_service::TrashService,
};
use crate::store::locks::KeyedLocks;
use crate::store::resume::ResumeStore;
use crate::store::RowStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RowStore>,
    pub resumes: Arc<dyn ResumeStore>,
    pub history: Arc<HistoryService>,
    pub candidate_service: CandidateService,
    pub position_service: PositionService,
    pub status_service: StatusService,
    pub cascade_service: CascadeService,
    pub trash_service: TrashService,
}

impl AppState {
    pub fn new(store: Arc<dyn RowStore>, resumes: Arc<dyn ResumeStore>) -> Self {
        let history = Arc::new(HistoryService::new(store.clone()));
        let write_locks = Arc::new(KeyedLocks::new());

        let candidate_service = CandidateService::new(
            store.clone(),
            resumes.clone(),
            history.clone(),
            write_locks.clone(),
        );
        let position_service = PositionService::new(store.clone(), write_locks.clone());
        let status_service = StatusService::new(store.clone(), write_locks);
        let cascade_service = CascadeService::new(
            store.clone(),
            candidate_service.clone(),
            position_service.clone(),
            status_service.clone(),
        );
        let trash_service = TrashService::new(candidate_service.clone());

        Self {
            store,
            resumes,
            history,
            candidate_service,
            position_service,
            status_service,
            cascade_service,
            trash_service,
        }
    }
}
