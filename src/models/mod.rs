pub mod document;
pub mod event;
pub mod fields;
pub mod person;
pub mod priority;
pub mod task;
pub mod timeline;
pub mod user;
pub mod vendor;
