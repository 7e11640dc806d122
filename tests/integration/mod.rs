//! Integration tests for the discfit packing pipeline

mod cli_contracts;
mod fit_properties;
mod pack_scenarios;
