
mod test_params;
