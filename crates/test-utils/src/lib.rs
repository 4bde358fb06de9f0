pub mod git_test_utils;
