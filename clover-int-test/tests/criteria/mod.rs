mod criteria_test;
mod negation_test;
