mod test_drop_releases;
