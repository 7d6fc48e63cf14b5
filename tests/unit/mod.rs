/// Unit tests for the public domain, statistics and configuration types
mod basic_tests;
