mod helpers;
mod leaderboard_handler;

pub use helpers::ApiError;
pub use leaderboard_handler::{
    LeaderboardParams, ScoreForm, get_player_entry, list_leaderboard, remove_entry,
    resubmit_score, submit_score,
};
