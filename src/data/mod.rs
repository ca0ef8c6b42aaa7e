//! data model and support layer : labeled descriptors and distances, the file
//! prefix to class table, signature file io, min-max normalization and
//! seeded train/test splitting

pub mod desc;
pub mod labels;
pub mod point;
pub mod prep;
pub mod split;
