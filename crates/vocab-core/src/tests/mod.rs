mod cache_tests;
mod preprocess_tests;
