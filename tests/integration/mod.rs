/// Integration tests exercising the public API end to end
mod basic_integration;
mod chart_output;
mod store_contract;
