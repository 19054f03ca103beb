mod test_edit_image;
