pub mod ids;
pub mod song;
pub mod tags;

pub use ids::{IdAllocator, SongId};
pub use song::Song;
pub use tags::TagList;
