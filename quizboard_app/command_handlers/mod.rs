mod remove_entry;
mod resubmit_score;
mod submit_score;

pub use remove_entry::RemoveEntryCommandHandler;
pub use resubmit_score::ResubmitScoreCommandHandler;
pub use submit_score::SubmitScoreCommandHandler;
