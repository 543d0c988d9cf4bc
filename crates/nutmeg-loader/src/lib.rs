pub mod error;
pub mod geo;
pub mod loader;
pub mod normalize;
mod retry;
pub mod source;
pub mod types;

pub use error::LoaderError;
pub use geo::{FixedPosition, GeoError, Locator, PositionSource, Unsupported};
pub use loader::{DirectoryLoader, LoadedDirectory};
pub use normalize::{parse_featured_file, parse_town_file, TownListing};
pub use source::DataRoot;
