pub mod labels;
pub mod labels_objects;
pub mod orgs;
pub mod threads;
pub mod users;
