//! vCard 3.0 construction for contact rows.

pub mod rfc;
