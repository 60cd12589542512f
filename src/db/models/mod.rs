pub mod label;
pub mod org;
pub mod thread;
pub mod user;

pub use label::{Label, LabelObject, LabelUpdate, NewLabel};
pub use org::Org;
pub use thread::Thread;
pub use user::User;
