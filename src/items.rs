pub mod item;
pub mod item_store;
pub mod stream;

pub use item::{Item, ItemIndex, ItemKind};
pub use item_store::ItemStore;
pub use stream::{Stream, StreamId};
