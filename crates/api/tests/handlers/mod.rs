mod config_test;
mod lessons_test;
