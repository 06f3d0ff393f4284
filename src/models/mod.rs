pub mod comment;
pub mod meme;
pub mod profile;
pub mod theme;

pub use comment::Comment;
pub use meme::Meme;
pub use profile::Profile;
pub use theme::Theme;
