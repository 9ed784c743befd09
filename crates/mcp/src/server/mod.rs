#![forbid(unsafe_code)]

mod lifecycle;

#[cfg(test)]
mod tests;
