mod community;
mod journal;

pub use community::{CommunityService, DEFAULT_COMMENT_AUTHOR, MAX_COMMENT_CHARS};
pub use journal::JournalService;
