mod comments;
mod entries;
mod reactions;

pub use comments::CommentRepository;
pub use entries::EntryRepository;
pub use reactions::ReactionRepository;
