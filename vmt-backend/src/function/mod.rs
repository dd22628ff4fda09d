//! Function protocol: entry, call sites, return and program start-up

pub(crate) mod calling_convention;

pub use calling_convention::bootstrap;
