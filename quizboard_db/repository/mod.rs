mod leaderboard_repository;
mod quiz_repository;

pub use leaderboard_repository::PostgresLeaderboardRepository;
pub use quiz_repository::PostgresQuizRepository;
