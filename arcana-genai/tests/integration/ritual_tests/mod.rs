mod test_tarot_reading;
