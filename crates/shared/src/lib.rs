//! multidml shared library — REST wire types, payload builders and the error
//! type used by the demo server.

pub mod api;
pub mod constants;
pub mod error;
pub mod ids;
