#![forbid(unsafe_code)]

mod ids;
mod numbers;
mod person;
mod strings;

pub(crate) use ids::*;
pub(crate) use numbers::*;
pub(crate) use person::*;
pub(crate) use strings::*;
