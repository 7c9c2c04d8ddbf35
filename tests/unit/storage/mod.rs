mod test_seed;
mod test_utils;
