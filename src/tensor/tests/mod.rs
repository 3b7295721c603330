mod mat_mul_tests;
mod new_tests;
