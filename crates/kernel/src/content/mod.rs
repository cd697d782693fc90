//! Content model, bundled defaults, and the persisted envelope format.

mod defaults;
mod envelope;
mod model;

pub use defaults::bundled_default;
pub use envelope::{decode, encode, DecodeError, Decoded, SCHEMA_VERSION};
pub use model::{
    Author, BlogPost, Book, Event, Link, Product, Resource, SiteSettings, Snapshot, Testimonial,
    ValidationIssue,
};
