pub mod candidate_service;
pub mod cascade_service;
pub mod history_service;
pub mod position_service;
pub mod status_service;
pub mod trash_service;
