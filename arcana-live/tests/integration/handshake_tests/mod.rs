mod test_duplicate_answer_ignored;
mod test_oracle_connects;
