//! Extraction of tables from PDF files via Tabula, and their output as CSV.

pub mod csvout;
pub mod method;
pub mod process;
pub mod table;
pub mod tabula_wrapper;
#[cfg(test)]
mod testutil;
