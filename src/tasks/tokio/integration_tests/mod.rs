mod basic;
mod fail;
