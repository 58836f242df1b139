pub mod calendar_utils;
pub mod crew_service;
pub mod leaderboard_service;
pub mod progress_service;
pub mod settings_service;
pub mod streak_service;
pub mod walking_service;
