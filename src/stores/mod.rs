pub mod mock;
pub mod remote;
pub mod traits;

pub use mock::{MockPropertyStore, MockSavedPropertyStore};
pub use remote::{RemotePropertyStore, RemoteSavedPropertyStore};
pub use traits::{FetchPolicy, PropertyStore, SavedPropertyStore};
