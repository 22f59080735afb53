mod generator_tests;
mod runtime_tests;
