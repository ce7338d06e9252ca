mod catalog;
mod document;
mod fields;
mod id;
mod message;
mod order;
mod product;
mod reference;
mod user;

pub use catalog::*;
pub use document::*;
pub use fields::*;
pub use id::*;
pub use message::*;
pub use order::*;
pub use product::*;
pub use reference::*;
pub use user::*;
