pub mod classify_service;
pub mod stats_service;
pub mod verify_service;
