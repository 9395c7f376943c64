mod leaderboard_repository;
mod quiz_repository;

pub use leaderboard_repository::LeaderboardRepository;
pub use quiz_repository::QuizRepository;
