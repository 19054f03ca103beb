mod test_answer_timeout;
mod test_media_denied;
mod test_session_init_failure;
mod test_socket_failures;
mod test_unknown_oracle;
