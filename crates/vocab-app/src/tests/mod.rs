mod channel_tests;
mod input_tests;
