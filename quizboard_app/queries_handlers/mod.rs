mod get_leaderboard_page;
mod get_player_entry;

pub use get_leaderboard_page::GetLeaderboardPageHandler;
pub use get_player_entry::GetPlayerEntryHandler;
