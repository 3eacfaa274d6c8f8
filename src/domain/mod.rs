pub mod item;
pub mod store;

pub use item::{Item, ItemId, MAX_TEXT_LEN};
pub use store::{ChangeKind, ItemStore, StoreEvent, StoreSnapshot};
