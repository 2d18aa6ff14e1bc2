//! Domain layer - valuation, selection and the asset view

pub mod catalog;
pub mod projection;
pub mod quote;
pub mod selection;
pub mod valuation;
