pub mod executor;

pub(crate) mod handler;

#[cfg(test)]
mod integration_tests;
